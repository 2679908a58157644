//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::Result;

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_, `__` between sections)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    // Add config file if it exists
    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    // Add environment variables with APP_ prefix
    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::LogFormat;
    use std::io::Write;

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("updown_pnl_config_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[database]
url = "postgres://db.internal:5432/polymarket"
trades_table = "polymarket.trades"

[monitor]
refresh_interval_secs = 2
market_filter = "btc-updown-15m"
imbalance_alert_threshold = "3.5"

[settings]
log_format = "json"
"#
        )
        .unwrap();

        let config = load_config(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.database.url, "postgres://db.internal:5432/polymarket");
        assert_eq!(config.database.trades_table, "polymarket.trades");
        assert_eq!(config.monitor.refresh_interval_secs, 2);
        assert_eq!(config.monitor.market_filter.as_deref(), Some("btc-updown-15m"));
        assert_eq!(config.monitor.imbalance_alert_threshold.to_string(), "3.5");
        assert_eq!(config.monitor.pnl_lookback_minutes, 60);
        assert_eq!(config.settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Some("/nonexistent/updown_pnl.toml")).unwrap();
        assert_eq!(config.database.trades_table, "trades");
    }

    #[test]
    fn test_prefixed_env_overrides_file() {
        let path = std::env::temp_dir().join(format!("updown_pnl_env_{}.toml", std::process::id()));
        std::fs::write(&path, "[monitor]\nrecent_trades_display = 10\n").unwrap();

        std::env::set_var("APP_MONITOR__RECENT_TRADES_DISPLAY", "7");
        let config = load_config(path.to_str());
        std::env::remove_var("APP_MONITOR__RECENT_TRADES_DISPLAY");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.unwrap().monitor.recent_trades_display, 7);
    }
}
