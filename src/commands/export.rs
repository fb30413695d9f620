//! Attendance export command.
//!
//! ```bash
//! # Today's attendance of class 4 as a spreadsheet
//! rollbook export day --format excel --class 4 --label "Grade 5A"
//!
//! # The last week as a PDF report
//! rollbook export week --format pdf
//! ```

use super::{class_label, load_config, parse_date, school_api};
use crate::{
    libs::{
        export::{ExportData, ExportFormat, Exporter},
        fetcher::{fetch_day, fetch_window, DateWindow},
        messages::Message,
    },
    msg_info,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Range of data to export
    #[arg(value_enum, default_value = "day")]
    data: ExportData,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output directory, defaults to the configured one or the current directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Date of a day export: `today` or YYYY-MM-DD
    #[arg(short, long, default_value = "today")]
    date: String,

    /// Class id to filter by
    #[arg(short, long)]
    class: Option<i64>,

    /// Class name used in file names and report headers
    #[arg(short, long)]
    label: Option<String>,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let config = load_config()?;
    let api = school_api(&config)?;
    let report = config.report_or_default();
    let label = class_label(args.label, args.class);

    msg_info!(Message::ExportingData(format!("{:?}", args.data), format!("{:?}", args.format)));
    let exporter = Exporter::new(args.format, args.output.or_else(|| report.output_dir()));

    match args.data {
        ExportData::Day => {
            let date = parse_date(&args.date)?;
            let bucket = fetch_day(&api, date, args.class).await?;
            exporter.export_day(&bucket, label.as_deref())?;
        }
        ExportData::Week => {
            let window = DateWindow::ending_today(report.window_days);
            let buckets = fetch_window(&api, &window, args.class).await;
            exporter.export_window(&buckets, label.as_deref())?;
        }
    }

    Ok(())
}
