pub mod classes;
pub mod day;
pub mod export;
pub mod init;
pub mod week;

use crate::{
    api::SchoolApi,
    libs::{config::Config, messages::Message},
    msg_bail_anyhow, msg_error_anyhow,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Show attendance for one day, page by page")]
    Day(day::DayArgs),
    #[command(about = "Show the attendance trend over the last days")]
    Week(week::WeekArgs),
    #[command(about = "Show attendance rates by class")]
    Classes,
    #[command(about = "Export attendance to CSV, Excel or PDF")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Day(args) => day::cmd(args).await,
            Commands::Week(args) => week::cmd(args).await,
            Commands::Classes => classes::cmd().await,
            Commands::Export(args) => export::cmd(args).await,
        }
    }
}

/// Reads the configuration with environment overrides applied.
pub(crate) fn load_config() -> Result<Config> {
    Ok(Config::read()?.with_env_overrides())
}

/// Builds the API client, failing early when no URL is configured.
pub(crate) fn school_api(config: &Config) -> Result<SchoolApi> {
    match &config.api {
        Some(api) if !api.api_url.trim().is_empty() => Ok(SchoolApi::new(api)),
        _ => msg_bail_anyhow!(Message::ApiNotConfigured),
    }
}

/// Parses `today` (any case) or a `YYYY-MM-DD` date.
pub(crate) fn parse_date(input: &str) -> Result<NaiveDate> {
    if input.eq_ignore_ascii_case("today") {
        return Ok(Local::now().date_naive());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidDate(input.to_string())))
}

/// Label used in headers and file names for an optional class filter.
pub(crate) fn class_label(label: Option<String>, class_id: Option<i64>) -> Option<String> {
    label.or_else(|| class_id.map(|id| format!("class-{}", id)))
}
