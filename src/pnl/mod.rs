//! Complete-set P&L engine
//!
//! Turns a window of executed Up/Down fills into per-market exposure and
//! the profit locked in by pairing opposing shares.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PER REFRESH (pure, sync)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  &[TradeRecord]                                             │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  PositionAggregator::aggregate_counted()                    │
//! │    - Sums size / size*price per market and outcome          │
//! │    - Drops and counts non Up/Down outcomes                  │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ArbitragePnlCalculator::compute()                          │
//! │    - paired = min(up, down), imbalance = up - down          │
//! │    - edge = paired * 1 - total_cost (0 when unpaired)       │
//! │    - Ordered by market id, exact portfolio total            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is carried between refreshes: every pass recomputes from the
//! window it is given.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use updown_pnl::pnl::{ArbitragePnlCalculator, PositionAggregator};
//! use updown_pnl::{Outcome, TradeRecord};
//!
//! let records = vec![
//!     TradeRecord::new("btc-updown-15m", Outcome::Up, dec!(0.40), dec!(10)),
//!     TradeRecord::new("btc-updown-15m", Outcome::Down, dec!(0.55), dec!(10)),
//! ];
//!
//! let positions = PositionAggregator::aggregate(&records);
//! let report = ArbitragePnlCalculator::compute(&positions).unwrap();
//! assert_eq!(report.total_edge_pnl, dec!(0.50));
//! ```

mod aggregator;
mod calculator;
mod types;

pub use aggregator::PositionAggregator;

pub use calculator::{ArbitragePnlCalculator, COMPLETE_SET_PAYOUT};

pub use types::{
    Aggregation,
    ArbitrageResult,
    MarketPosition,
    OutcomeBook,
    PnlReport,
    PnlSnapshot,
    PositionMap,
};
