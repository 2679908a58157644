//! Error types for the application

use thiserror::Error;

/// Result type alias using our MonitorError
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Main error type for the monitor and its collaborators
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Trade store query or connection errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output writer errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Aggregated positions violate the non-negative shares/cost contract
    #[error("Data integrity fault in market {market_id}: {detail}")]
    DataIntegrity { market_id: String, detail: String },

    /// Timeout errors
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MonitorError {
    /// Create a data integrity fault for a market
    pub fn integrity(market_id: impl Into<String>, detail: impl Into<String>) -> Self {
        MonitorError::DataIntegrity {
            market_id: market_id.into(),
            detail: detail.into(),
        }
    }

    /// Returns true if this error reports corrupted position data
    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, MonitorError::DataIntegrity { .. })
    }
}

impl From<config::ConfigError> for MonitorError {
    fn from(err: config::ConfigError) -> Self {
        MonitorError::Configuration(err.to_string())
    }
}
