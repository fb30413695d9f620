//! Configuration management for rollbook.
//!
//! Settings live in `config.json` inside the platform data directory
//! (see [`DataStorage`]). Each module is optional so a fresh install works
//! with nothing configured except what the environment provides.
//!
//! ## Configuration Structure
//!
//! - **API Config**: school API base URL and access token
//! - **Report Config**: window length, page size, export directory
//!
//! ## Environment Overrides
//!
//! `ROLLBOOK_API_URL` and `ROLLBOOK_API_TOKEN` (also read from a `.env`
//! file) take precedence over the stored API settings.
//!
//! ## Usage Examples
//!
//! ```rust,ignore
//! use rollbook::libs::config::Config;
//!
//! let config = Config::read()?.with_env_overrides();
//! let report = config.report_or_default();
//! println!("Window: {} days", report.window_days);
//! ```

use super::data_storage::DataStorage;
use crate::api::school::ApiConfig;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const ENV_API_URL: &str = "ROLLBOOK_API_URL";
pub const ENV_API_TOKEN: &str = "ROLLBOOK_API_TOKEN";

/// A module offered by the interactive setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Report and paging defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReportConfig {
    /// Number of days before today covered by weekly views and exports.
    pub window_days: u32,

    /// Records per page in the day view.
    pub page_size: u32,

    /// Directory for exported files. Current directory when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            window_days: 7,
            page_size: 10,
            output_dir: None,
        }
    }
}

impl ReportConfig {
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir.as_deref().filter(|dir| !dir.trim().is_empty()).map(PathBuf::from)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,
}

impl Config {
    /// Reads the configuration file, or returns the default configuration
    /// when none has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Applies `ROLLBOOK_API_URL` / `ROLLBOOK_API_TOKEN` on top of the
    /// stored API settings.
    pub fn with_env_overrides(mut self) -> Self {
        let url = env::var(ENV_API_URL).ok().filter(|v| !v.trim().is_empty());
        let token = env::var(ENV_API_TOKEN).ok();
        if url.is_none() && token.is_none() {
            return self;
        }

        let mut api = self.api.take().unwrap_or(ApiConfig {
            api_url: String::new(),
            auth_token: String::new(),
        });
        if let Some(url) = url {
            api.api_url = url;
        }
        if let Some(token) = token {
            api.auth_token = token;
        }
        self.api = Some(api);
        self
    }

    pub fn report_or_default(&self) -> ReportConfig {
        self.report.clone().unwrap_or_default()
    }

    /// Runs the interactive setup wizard, starting from the saved values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ApiConfig::module(),
            ConfigModule {
                key: "report".to_string(),
                name: "Reports".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "api" => config.api = Some(ApiConfig::init(&config.api)?),
                "report" => {
                    let default = config.report_or_default();
                    msg_print!(Message::ConfigModuleReport);
                    let window_days = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptWindowDays.to_string())
                        .default(default.window_days)
                        .interact_text()?;
                    let page_size = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptPageSize.to_string())
                        .default(default.page_size)
                        .interact_text()?;
                    let output_dir: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptOutputDir.to_string())
                        .default(default.output_dir.clone().unwrap_or_default())
                        .allow_empty(true)
                        .interact_text()?;
                    config.report = Some(ReportConfig {
                        window_days,
                        page_size,
                        output_dir: Some(output_dir).filter(|dir| !dir.trim().is_empty()),
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
