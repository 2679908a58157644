use async_trait::async_trait;

use super::window::WindowQuery;
use crate::common::errors::Result;
use crate::common::traits::WindowFetcher;
use crate::common::types::TradeRecord;

/// Simple in-memory trade store
///
/// Holds records in a Vec and applies the same window semantics as the
/// database store. Useful for tests, replays and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeStore {
    records: Vec<TradeRecord>,
}

impl InMemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    /// Append a record
    pub fn insert(&mut self, record: TradeRecord) {
        self.records.push(record);
    }

    /// Remove all records
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Get number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in the window, newest first
    pub fn select(&self, query: &WindowQuery) -> Vec<TradeRecord> {
        let mut selected: Vec<TradeRecord> = self
            .records
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();

        selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if let Some(limit) = query.limit {
            selected.truncate(limit as usize);
        }
        selected
    }
}

#[async_trait]
impl WindowFetcher for InMemoryTradeStore {
    async fn fetch_window(&self, query: &WindowQuery) -> Result<Vec<TradeRecord>> {
        Ok(self.select(query))
    }

    fn source_name(&self) -> &'static str {
        "memory"
    }
}
