//! Configuration types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::errors::{MonitorError, Result};
use crate::store::postgres::is_valid_identifier;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trade store connection
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Refresh loop and window settings
    #[serde(default)]
    pub monitor: MonitorSettings,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl AppConfig {
    /// Reject settings the monitor cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(MonitorError::Configuration(msg.to_string()));

        if self.database.url.trim().is_empty() {
            return invalid("database.url must not be empty");
        }
        if !is_valid_identifier(&self.database.trades_table) {
            return invalid("database.trades_table must be a plain SQL identifier");
        }
        if self.database.max_connections == 0 {
            return invalid("database.max_connections must be at least 1");
        }
        if self.database.connection_timeout_seconds == 0 {
            return invalid("database.connection_timeout_seconds must be positive");
        }
        if self.monitor.refresh_interval_secs == 0 {
            return invalid("monitor.refresh_interval_secs must be positive");
        }
        if self.monitor.pnl_lookback_minutes == 0 || self.monitor.trades_lookback_minutes == 0 {
            return invalid("monitor lookback windows must be positive");
        }
        if self.monitor.fetch_timeout_seconds == 0 {
            return invalid("monitor.fetch_timeout_seconds must be positive");
        }
        if self.monitor.imbalance_alert_threshold < Decimal::ZERO {
            return invalid("monitor.imbalance_alert_threshold must not be negative");
        }
        Ok(())
    }
}

/// Trade store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Table holding executed trades
    #[serde(default = "default_trades_table")]
    pub trades_table: String,
    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            trades_table: default_trades_table(),
            max_connections: default_max_connections(),
            connection_timeout_seconds: default_connection_timeout(),
        }
    }
}

fn default_database_url() -> String {
    "postgres://localhost:5432/polymarket".to_string()
}

fn default_trades_table() -> String {
    "trades".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_connection_timeout() -> u64 {
    30
}

/// Refresh loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Seconds between refresh passes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// Lookback for the P&L aggregation window
    #[serde(default = "default_pnl_lookback")]
    pub pnl_lookback_minutes: u64,
    /// Lookback for the recent trades listing
    #[serde(default = "default_trades_lookback")]
    pub trades_lookback_minutes: u64,
    /// Maximum trades fetched for the listing
    #[serde(default = "default_recent_trades_limit")]
    pub recent_trades_limit: u32,
    /// Trades shown in the listing
    #[serde(default = "default_recent_trades_display")]
    pub recent_trades_display: usize,
    /// Only markets whose id contains this substring
    #[serde(default)]
    pub market_filter: Option<String>,
    /// Absolute imbalance above which a market is flagged
    #[serde(default = "default_imbalance_alert_threshold")]
    pub imbalance_alert_threshold: Decimal,
    /// Upper bound on a single window fetch
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            pnl_lookback_minutes: default_pnl_lookback(),
            trades_lookback_minutes: default_trades_lookback(),
            recent_trades_limit: default_recent_trades_limit(),
            recent_trades_display: default_recent_trades_display(),
            market_filter: None,
            imbalance_alert_threshold: default_imbalance_alert_threshold(),
            fetch_timeout_seconds: default_fetch_timeout(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    5
}

fn default_pnl_lookback() -> u64 {
    60
}

fn default_trades_lookback() -> u64 {
    15
}

fn default_recent_trades_limit() -> u32 {
    50
}

fn default_recent_trades_display() -> usize {
    20
}

fn default_imbalance_alert_threshold() -> Decimal {
    Decimal::TWO
}

fn default_fetch_timeout() -> u64 {
    30
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
