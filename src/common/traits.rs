//! Trait definitions for the collaborators around the P&L engine

use async_trait::async_trait;

use super::errors::{MonitorError, Result};
use super::types::TradeRecord;
use crate::pnl::PnlSnapshot;
use crate::store::WindowQuery;

/// Source of trade records for a lookback window
///
/// Implementations own time-window and market filtering; the records they
/// return are already typed, so the engine never sees raw rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WindowFetcher: Send + Sync {
    /// Fetch records matching the query, newest first
    ///
    /// # Arguments
    /// * `query` - Window start, optional market-id substring and row limit
    async fn fetch_window(&self, query: &WindowQuery) -> Result<Vec<TradeRecord>>;

    /// Name of the backing store, for logging
    fn source_name(&self) -> &'static str;
}

/// Renders the output of each refresh pass
pub trait Presenter: Send {
    /// Render a completed pass
    fn render(&mut self, snapshot: &PnlSnapshot) -> Result<()>;

    /// Report a failed pass
    ///
    /// Default implementation does nothing.
    fn render_error(&mut self, _error: &MonitorError) -> Result<()> {
        Ok(())
    }
}
