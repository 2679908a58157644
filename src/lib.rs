//! Up/Down complete-set P&L library
//!
//! Aggregates executed trades in binary Up/Down prediction markets into
//! per-market exposure and values the risk-free profit of pairing
//! opposing shares into complete sets.

pub mod common;
pub mod config;
pub mod monitor;
pub mod pnl;
pub mod presenter;
pub mod store;

// Re-export commonly used types
pub use common::errors::{MonitorError, Result};
pub use common::traits::{Presenter, WindowFetcher};
pub use common::types::{Outcome, Side, TradeRecord};
pub use config::types::AppConfig;
pub use monitor::PnlMonitor;
pub use store::{InMemoryTradeStore, PgTradeStore, WindowQuery};

// P&L engine types
pub use pnl::{
    Aggregation, ArbitragePnlCalculator, ArbitrageResult, MarketPosition, OutcomeBook, PnlReport,
    PnlSnapshot, PositionAggregator, PositionMap,
};
