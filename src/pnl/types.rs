use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::types::{Outcome, TradeRecord};

/// Accumulated shares and notional cost for one outcome of a market
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeBook {
    pub shares: Decimal,
    pub cost: Decimal,
}

impl OutcomeBook {
    pub fn new(shares: Decimal, cost: Decimal) -> Self {
        Self { shares, cost }
    }

    /// Fold one fill into the book
    ///
    /// Returns false, leaving the book untouched, if either sum would
    /// overflow.
    pub fn add(&mut self, shares: Decimal, cost: Decimal) -> bool {
        match (self.shares.checked_add(shares), self.cost.checked_add(cost)) {
            (Some(shares), Some(cost)) => {
                self.shares = shares;
                self.cost = cost;
                true
            }
            _ => false,
        }
    }
}

/// Up and Down exposure accumulated for a single market
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPosition {
    pub market_id: String,
    pub up: OutcomeBook,
    pub down: OutcomeBook,
    /// Set once any fill or merge overflowed; the books are then incomplete
    #[serde(default)]
    pub overflowed: bool,
}

impl MarketPosition {
    pub fn new(market_id: impl Into<String>) -> Self {
        Self::with_books(market_id, OutcomeBook::default(), OutcomeBook::default())
    }

    /// Build a position directly from both books
    pub fn with_books(market_id: impl Into<String>, up: OutcomeBook, down: OutcomeBook) -> Self {
        Self {
            market_id: market_id.into(),
            up,
            down,
            overflowed: false,
        }
    }

    /// Fold a record into the matching outcome book
    ///
    /// Returns false (and leaves the position untouched) when the record's
    /// outcome is neither Up nor Down. A fill whose notional or running
    /// sums overflow is not applied and marks the position as overflowed.
    pub fn apply(&mut self, record: &TradeRecord) -> bool {
        let book = match record.outcome {
            Outcome::Up => &mut self.up,
            Outcome::Down => &mut self.down,
            Outcome::Other(_) => return false,
        };
        let folded = match record.notional() {
            Some(cost) => book.add(record.shares(), cost),
            None => false,
        };
        if !folded {
            self.overflowed = true;
        }
        true
    }

    /// Add another partial accumulation of the same market
    pub fn merge(&mut self, other: &MarketPosition) {
        debug_assert_eq!(self.market_id, other.market_id);
        let up = self.up.add(other.up.shares, other.up.cost);
        let down = self.down.add(other.down.shares, other.down.cost);
        if !up || !down || other.overflowed {
            self.overflowed = true;
        }
    }
}

/// Per-market positions keyed (and therefore ordered) by market id
pub type PositionMap = BTreeMap<String, MarketPosition>;

/// Output of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub positions: PositionMap,
    /// Records skipped because their outcome was not Up or Down
    pub dropped_records: usize,
}

impl Aggregation {
    /// Combine an independently aggregated partition into this one
    pub fn merge(&mut self, other: Aggregation) {
        for (market_id, position) in other.positions {
            match self.positions.get_mut(&market_id) {
                Some(existing) => existing.merge(&position),
                None => {
                    self.positions.insert(market_id, position);
                }
            }
        }
        self.dropped_records += other.dropped_records;
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Complete-set valuation of one market
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrageResult {
    pub market_id: String,
    pub up_shares: Decimal,
    pub down_shares: Decimal,
    /// `min(up_shares, down_shares)`
    pub paired_shares: Decimal,
    /// `up_shares - down_shares`, positive means net long Up
    pub imbalance: Decimal,
    /// Up cost plus Down cost, unpaired shares included
    pub total_cost: Decimal,
    /// `paired_shares - total_cost` when anything is paired, else zero
    pub edge_pnl: Decimal,
}

/// Results of one calculator pass, ordered by market id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlReport {
    pub results: Vec<ArbitrageResult>,
    pub total_edge_pnl: Decimal,
}

impl PnlReport {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Look up a market's result
    pub fn get(&self, market_id: &str) -> Option<&ArbitrageResult> {
        self.results.iter().find(|r| r.market_id == market_id)
    }
}

/// Everything one refresh pass hands to a presenter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlSnapshot {
    pub generated_at: DateTime<Utc>,
    /// Start of the window the P&L was aggregated over
    pub pnl_window_start: DateTime<Utc>,
    /// Start of the window the recent trades were taken from
    pub trades_window_start: DateTime<Utc>,
    pub market_filter: Option<String>,
    /// Newest first
    pub recent_trades: Vec<TradeRecord>,
    pub report: PnlReport,
    pub dropped_records: usize,
}
