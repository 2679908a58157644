//! Refresh loop driving fetch → aggregate → compute → present

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

use crate::common::errors::{MonitorError, Result};
use crate::common::traits::{Presenter, WindowFetcher};
use crate::common::types::TradeRecord;
use crate::config::types::MonitorSettings;
use crate::pnl::{ArbitragePnlCalculator, PnlSnapshot, PositionAggregator};
use crate::store::WindowQuery;

/// Periodic P&L monitor
///
/// Holds no state between passes besides its collaborators; every pass
/// recomputes from the fetched windows.
pub struct PnlMonitor<F, P> {
    fetcher: F,
    presenter: P,
    settings: MonitorSettings,
}

impl<F: WindowFetcher, P: Presenter> PnlMonitor<F, P> {
    pub fn new(fetcher: F, presenter: P, settings: MonitorSettings) -> Self {
        Self {
            fetcher,
            presenter,
            settings,
        }
    }

    pub fn into_parts(self) -> (F, P) {
        (self.fetcher, self.presenter)
    }

    /// Window for the recent trades listing
    pub fn trades_window(&self, now: DateTime<Utc>) -> WindowQuery {
        WindowQuery::lookback(now, self.settings.trades_lookback_minutes)
            .with_market_filter(self.settings.market_filter.clone())
            .with_limit(self.settings.recent_trades_limit)
    }

    /// Window the P&L is aggregated over
    pub fn pnl_window(&self, now: DateTime<Utc>) -> WindowQuery {
        WindowQuery::lookback(now, self.settings.pnl_lookback_minutes)
            .with_market_filter(self.settings.market_filter.clone())
    }

    async fn fetch(&self, query: &WindowQuery, label: &str) -> Result<Vec<TradeRecord>> {
        let timeout = Duration::from_secs(self.settings.fetch_timeout_seconds);
        match time::timeout(timeout, self.fetcher.fetch_window(query)).await {
            Ok(result) => result,
            Err(_) => Err(MonitorError::Timeout(format!(
                "{} fetch from {} exceeded {}s",
                label,
                self.fetcher.source_name(),
                self.settings.fetch_timeout_seconds
            ))),
        }
    }

    /// Run one pass as of `now` without rendering
    #[instrument(skip(self))]
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> Result<PnlSnapshot> {
        let trades_window = self.trades_window(now);
        let pnl_window = self.pnl_window(now);

        let recent_trades = self.fetch(&trades_window, "trade window").await?;
        let window_records = self.fetch(&pnl_window, "P&L window").await?;

        let aggregation = PositionAggregator::aggregate_counted(&window_records);
        if aggregation.dropped_records > 0 {
            warn!(
                dropped = aggregation.dropped_records,
                "Records with unrecognised outcome were skipped"
            );
        }

        let report = ArbitragePnlCalculator::compute(&aggregation.positions)?;

        debug!(
            recent_trades = recent_trades.len(),
            window_records = window_records.len(),
            markets = report.results.len(),
            total_edge_pnl = %report.total_edge_pnl,
            "Refresh pass complete"
        );

        Ok(PnlSnapshot {
            generated_at: now,
            pnl_window_start: pnl_window.since,
            trades_window_start: trades_window.since,
            market_filter: pnl_window.market_filter,
            recent_trades,
            report,
            dropped_records: aggregation.dropped_records,
        })
    }

    /// Refresh at the current time and render the outcome
    ///
    /// A failed pass is handed to the presenter and returned; nothing is
    /// retried.
    pub async fn tick(&mut self) -> Result<()> {
        match self.pass().await? {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// One rendered pass
    ///
    /// The outer error is a presenter failure. A refresh failure that was
    /// rendered successfully comes back as `Ok(Some(_))`.
    async fn pass(&mut self) -> Result<Option<MonitorError>> {
        match self.refresh_at(Utc::now()).await {
            Ok(snapshot) => {
                self.presenter.render(&snapshot)?;
                Ok(None)
            }
            Err(err) => {
                warn!(error = %err, "Refresh pass failed");
                self.presenter.render_error(&err)?;
                Ok(Some(err))
            }
        }
    }

    /// Tick on the configured interval until `shutdown` resolves
    ///
    /// Pass failures are reported and the loop carries on; only presenter
    /// output failures end it.
    pub async fn run<S>(&mut self, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()>,
    {
        let period = Duration::from_secs(self.settings.refresh_interval_secs.max(1));
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            source = self.fetcher.source_name(),
            interval_secs = period.as_secs(),
            filter = self.settings.market_filter.as_deref().unwrap_or("ALL"),
            "Streaming complete-set P&L"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping monitor");
                    return Ok(());
                }
                _ = interval.tick() => {
                    if let Err(err) = self.pass().await {
                        error!(error = %err, "Presenter output failed, stopping monitor");
                        return Err(err);
                    }
                }
            }
        }
    }
}
