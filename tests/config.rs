#[cfg(test)]
mod tests {
    use rollbook::api::ApiConfig;
    use rollbook::libs::config::{Config, ReportConfig, ENV_API_TOKEN, ENV_API_URL};
    use rollbook::libs::data_storage::{DataStorage, ENV_DATA_DIR};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the data directory at a temporary directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        api_url: String,
        auth_token: String,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var(ENV_DATA_DIR, temp_dir.path());
            ConfigTestContext {
                _temp_dir: temp_dir,
                api_url: "https://school.example.com/api".to_string(),
                auth_token: "token123".to_string(),
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api.is_none());
        assert!(config.report.is_none());

        let report = config.report_or_default();
        assert_eq!(report.window_days, 7);
        assert_eq!(report.page_size, 10);
        assert!(report.output_dir().is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        assert_eq!(Config::read().unwrap(), Config::default());

        let config = Config {
            api: Some(ApiConfig {
                api_url: ctx.api_url.clone(),
                auth_token: ctx.auth_token.clone(),
            }),
            report: Some(ReportConfig {
                window_days: 14,
                page_size: 25,
                output_dir: Some("/tmp/reports".to_string()),
            }),
        };
        config.save().unwrap();

        assert!(DataStorage::new().base_path().join("config.json").exists());
        let loaded = Config::read().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.report_or_default().output_dir(), Some(PathBuf::from("/tmp/reports")));
    }

    #[test]
    fn test_report_config_tolerates_missing_output_dir() {
        let config: Config = serde_json::from_str(r#"{ "report": { "window_days": 5, "page_size": 20 } }"#).unwrap();

        let report = config.report_or_default();
        assert_eq!(report.window_days, 5);
        assert!(report.output_dir.is_none());
        assert!(ReportConfig {
            output_dir: Some("  ".to_string()),
            ..ReportConfig::default()
        }
        .output_dir()
        .is_none());
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var(ENV_API_URL, "https://override.example.com");
        std::env::set_var(ENV_API_TOKEN, "secret");

        let config = Config {
            api: Some(ApiConfig {
                api_url: "https://stored.example.com".to_string(),
                auth_token: "stored".to_string(),
            }),
            report: None,
        }
        .with_env_overrides();

        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_API_TOKEN);

        let api = config.api.unwrap();
        assert_eq!(api.api_url, "https://override.example.com");
        assert_eq!(api.auth_token, "secret");
    }
}
