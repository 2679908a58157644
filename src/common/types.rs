//! Trade data model shared by the store, the P&L engine and the presenters

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome token of a binary Up/Down market
///
/// Store rows carry the outcome as free text. Anything that is not a
/// case-insensitive `up`/`down` is kept verbatim in `Other` so the
/// aggregator can drop and count it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Outcome {
    Up,
    Down,
    Other(String),
}

impl Outcome {
    /// Parse a raw outcome label
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("up") {
            Outcome::Up
        } else if trimmed.eq_ignore_ascii_case("down") {
            Outcome::Down
        } else {
            Outcome::Other(label.to_string())
        }
    }

    /// Returns true for the two outcomes a complete set is made of
    pub fn is_known(&self) -> bool {
        !matches!(self, Outcome::Other(_))
    }
}

impl From<String> for Outcome {
    fn from(label: String) -> Self {
        Outcome::parse(&label)
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        outcome.to_string()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Up => write!(f, "UP"),
            Outcome::Down => write!(f, "DOWN"),
            Outcome::Other(label) => write!(f, "{}", label),
        }
    }
}

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Parse a raw side label, `None` for anything unrecognised
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("buy") {
            Some(Side::Buy)
        } else if trimmed.eq_ignore_ascii_case("sell") {
            Some(Side::Sell)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// A single executed fill
///
/// Numeric fields are optional because upstream rows may be partial;
/// the aggregator treats a missing value as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Execution time
    pub timestamp: DateTime<Utc>,
    /// Market identifier (slug)
    pub market_id: String,
    /// Outcome token that traded
    pub outcome: Outcome,
    /// Execution price (0.00 to 1.00)
    pub price: Option<Decimal>,
    /// Shares filled
    pub size: Option<Decimal>,
    /// Side of the order, informational only
    pub side: Option<Side>,
}

impl TradeRecord {
    /// Create a buy fill timestamped now
    pub fn new(
        market_id: impl Into<String>,
        outcome: Outcome,
        price: Decimal,
        size: Decimal,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            market_id: market_id.into(),
            outcome,
            price: Some(price),
            size: Some(size),
            side: Some(Side::Buy),
        }
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_side(mut self, side: Option<Side>) -> Self {
        self.side = side;
        self
    }

    pub fn with_size(mut self, size: Option<Decimal>) -> Self {
        self.size = size;
        self
    }

    pub fn with_price(mut self, price: Option<Decimal>) -> Self {
        self.price = price;
        self
    }

    /// Shares filled, zero when missing
    pub fn shares(&self) -> Decimal {
        self.size.unwrap_or(Decimal::ZERO)
    }

    /// Notional paid (`size * price`), zero when either field is missing
    ///
    /// `None` when the product does not fit in a `Decimal`.
    pub fn notional(&self) -> Option<Decimal> {
        match (self.size, self.price) {
            (Some(size), Some(price)) => size.checked_mul(price),
            _ => Some(Decimal::ZERO),
        }
    }
}
