//! Lookback window description shared by all trade stores

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::common::types::TradeRecord;

/// A bounded, time-delimited slice of the trade history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowQuery {
    /// Exclusive lower bound on trade timestamps
    pub since: DateTime<Utc>,
    /// Keep only markets whose id contains this substring
    pub market_filter: Option<String>,
    /// Maximum number of records, newest first
    pub limit: Option<u32>,
}

impl WindowQuery {
    /// Window covering everything after `since`
    pub fn since(since: DateTime<Utc>) -> Self {
        Self {
            since,
            market_filter: None,
            limit: None,
        }
    }

    /// Window covering the last `minutes` before `now`
    pub fn lookback(now: DateTime<Utc>, minutes: u64) -> Self {
        let since = i64::try_from(minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self::since(since)
    }

    pub fn with_market_filter(mut self, filter: Option<String>) -> Self {
        // An empty filter matches everything; normalise it away
        self.market_filter = filter.filter(|f| !f.is_empty());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record falls inside this window
    pub fn matches(&self, record: &TradeRecord) -> bool {
        if record.timestamp <= self.since {
            return false;
        }
        match &self.market_filter {
            Some(filter) => record.market_id.contains(filter.as_str()),
            None => true,
        }
    }
}
