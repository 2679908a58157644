//! Machine-readable JSON lines output

use std::io::Write;

use serde_json::json;

use crate::common::errors::{MonitorError, Result};
use crate::common::traits::Presenter;
use crate::pnl::PnlSnapshot;

/// Presenter emitting one JSON object per line
///
/// Each line has the shape `{"type": ..., "payload": ...}` so consumers
/// can tell snapshots from errors.
pub struct JsonPresenter<W> {
    out: W,
}

impl<W: Write + Send> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, kind: &str, payload: serde_json::Value) -> Result<()> {
        let line = json!({
            "type": kind,
            "payload": payload,
        });
        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> Presenter for JsonPresenter<W> {
    fn render(&mut self, snapshot: &PnlSnapshot) -> Result<()> {
        let payload = serde_json::to_value(snapshot)?;
        self.emit("snapshot", payload)
    }

    fn render_error(&mut self, error: &MonitorError) -> Result<()> {
        self.emit("error", json!({ "message": error.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pnl::{ArbitrageResult, PnlReport};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_line() {
        let now = Utc::now();
        let snapshot = PnlSnapshot {
            generated_at: now,
            pnl_window_start: now,
            trades_window_start: now,
            market_filter: Some("btc".to_string()),
            recent_trades: vec![],
            report: PnlReport {
                results: vec![ArbitrageResult {
                    market_id: "btc-updown-15m".to_string(),
                    up_shares: dec!(10),
                    down_shares: dec!(10),
                    paired_shares: dec!(10),
                    imbalance: dec!(0),
                    total_cost: dec!(9.50),
                    edge_pnl: dec!(0.50),
                }],
                total_edge_pnl: dec!(0.50),
            },
            dropped_records: 1,
        };

        let mut presenter = JsonPresenter::new(Vec::new());
        presenter.render(&snapshot).unwrap();
        let output = String::from_utf8(presenter.into_inner()).unwrap();

        assert_eq!(output.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["type"], "snapshot");
        assert_eq!(value["payload"]["dropped_records"], 1);
        assert_eq!(value["payload"]["report"]["total_edge_pnl"], "0.50");
        assert_eq!(value["payload"]["report"]["results"][0]["market_id"], "btc-updown-15m");

        let parsed: PnlSnapshot = serde_json::from_value(value["payload"].clone()).unwrap();
        assert_eq!(parsed.report, snapshot.report);
    }

    #[test]
    fn test_error_line() {
        let mut presenter = JsonPresenter::new(Vec::new());
        presenter
            .render_error(&MonitorError::integrity("m", "up.cost is negative (-1)"))
            .unwrap();
        let output = String::from_utf8(presenter.into_inner()).unwrap();

        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(
            value["payload"]["message"],
            "Data integrity fault in market m: up.cost is negative (-1)"
        );
    }
}
