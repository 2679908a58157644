//! Terminal table rendering

use std::io::Write;

use owo_colors::{OwoColorize, Style};
use rust_decimal::{Decimal, RoundingStrategy};
use tabled::{Table, Tabled};

use crate::common::errors::{MonitorError, Result};
use crate::common::traits::Presenter;
use crate::common::types::TradeRecord;
use crate::pnl::{ArbitrageResult, PnlSnapshot};

/// ANSI clear screen + cursor home
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

const TRADE_MARKET_WIDTH: usize = 30;
const PNL_MARKET_WIDTH: usize = 25;

#[derive(Tabled)]
struct TradeRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Size")]
    size: String,
}

impl From<&TradeRecord> for TradeRow {
    fn from(record: &TradeRecord) -> Self {
        let outcome = record.outcome.to_string();
        Self {
            time: record.timestamp.format("%H:%M:%S").to_string(),
            market: shorten(&record.market_id, TRADE_MARKET_WIDTH),
            side: record.side.map(|s| s.to_string()).unwrap_or_else(na),
            outcome: if outcome.trim().is_empty() { na() } else { outcome },
            price: record.price.map(|p| fixed(p, 4)).unwrap_or_else(na),
            size: record.size.map(|s| fixed(s, 2)).unwrap_or_else(na),
        }
    }
}

#[derive(Tabled)]
struct PnlRow {
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "UP")]
    up: String,
    #[tabled(rename = "DOWN")]
    down: String,
    #[tabled(rename = "Paired")]
    paired: String,
    #[tabled(rename = "Imbalance")]
    imbalance: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Edge P&L")]
    edge: String,
}

/// Display options for [`TablePresenter`]
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Clear the terminal before each pass
    pub clear_screen: bool,
    /// Emit ANSI colours
    pub color: bool,
    /// Trades shown in the recent trades table
    pub max_trades: usize,
    /// Absolute imbalance above which a market is flagged with `!`
    pub imbalance_alert_threshold: Decimal,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            clear_screen: false,
            color: false,
            max_trades: 20,
            imbalance_alert_threshold: Decimal::TWO,
        }
    }
}

/// Human-readable presenter writing text tables
pub struct TablePresenter<W> {
    out: W,
    options: TableOptions,
}

impl<W: Write + Send> TablePresenter<W> {
    pub fn new(out: W, options: TableOptions) -> Self {
        Self { out, options }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.options.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn pnl_row(&self, result: &ArbitrageResult) -> PnlRow {
        let mut imbalance = signed(result.imbalance, 1);
        if result.imbalance.abs() > self.options.imbalance_alert_threshold {
            imbalance.push_str(" !");
            imbalance = self.paint(&imbalance, Style::new().red());
        }
        let edge_style = if result.edge_pnl > Decimal::ZERO {
            Style::new().green()
        } else {
            Style::new().red()
        };
        PnlRow {
            market: shorten(&result.market_id, PNL_MARKET_WIDTH),
            up: fixed(result.up_shares, 1),
            down: fixed(result.down_shares, 1),
            paired: fixed(result.paired_shares, 1),
            imbalance,
            cost: money(result.total_cost, 2),
            edge: self.paint(&money(result.edge_pnl, 4), edge_style),
        }
    }

    fn write_trades(&mut self, trades: &[TradeRecord]) -> Result<()> {
        let title = self.paint("Recent Trades", Style::new().bold());
        writeln!(self.out, "{}", title)?;

        if trades.is_empty() {
            let empty = self.paint("No recent trades found", Style::new().yellow());
            writeln!(self.out, "{}", empty)?;
            return Ok(());
        }

        let rows: Vec<TradeRow> = trades
            .iter()
            .take(self.options.max_trades)
            .map(TradeRow::from)
            .collect();
        writeln!(self.out, "{}", Table::new(rows))?;
        Ok(())
    }

    fn write_pnl(&mut self, snapshot: &PnlSnapshot) -> Result<()> {
        let title = self.paint("P&L Summary (Complete-Set)", Style::new().bold());
        writeln!(self.out, "{}", title)?;

        let report = &snapshot.report;
        if report.is_empty() {
            let empty = self.paint("No position data", Style::new().yellow());
            writeln!(self.out, "{}", empty)?;
        } else {
            let mut rows: Vec<PnlRow> = report.results.iter().map(|r| self.pnl_row(r)).collect();
            rows.push(PnlRow {
                market: String::new(),
                up: String::new(),
                down: String::new(),
                paired: String::new(),
                imbalance: String::new(),
                cost: "TOTAL".to_string(),
                edge: money(report.total_edge_pnl, 4),
            });
            writeln!(self.out, "{}", Table::new(rows))?;

            let style = if report.total_edge_pnl > Decimal::ZERO {
                Style::new().green().bold()
            } else {
                Style::new().red().bold()
            };
            let total = format!("Total edge: {}", money(report.total_edge_pnl, 4));
            let total = self.paint(&total, style);
            writeln!(self.out, "{}", total)?;
        }

        if snapshot.dropped_records > 0 {
            let warning = format!(
                "Dropped {} record(s) with unrecognised outcome",
                snapshot.dropped_records
            );
            let warning = self.paint(&warning, Style::new().yellow());
            writeln!(self.out, "{}", warning)?;
        }
        Ok(())
    }
}

impl<W: Write + Send> Presenter for TablePresenter<W> {
    fn render(&mut self, snapshot: &PnlSnapshot) -> Result<()> {
        if self.options.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }

        let header = format!(
            "Last update: {} UTC | Filter: {}",
            snapshot.generated_at.format("%H:%M:%S"),
            snapshot.market_filter.as_deref().unwrap_or("ALL")
        );
        let header = self.paint(&header, Style::new().dimmed());
        writeln!(self.out, "{}", header)?;
        writeln!(self.out)?;

        self.write_trades(&snapshot.recent_trades)?;
        writeln!(self.out)?;
        self.write_pnl(snapshot)?;

        self.out.flush()?;
        Ok(())
    }

    fn render_error(&mut self, error: &MonitorError) -> Result<()> {
        let line = format!("Error: {}", error);
        let line = self.paint(&line, Style::new().red());
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}

fn na() -> String {
    "N/A".to_string()
}

/// Keep the last `max` characters of a market id
pub fn shorten(market_id: &str, max: usize) -> String {
    let count = market_id.chars().count();
    if count <= max {
        market_id.to_string()
    } else {
        market_id.chars().skip(count - max).collect()
    }
}

/// Round half away from zero to exactly `dp` decimal places
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

/// Like [`fixed`] with an explicit `+` on non-negative values
pub fn signed(value: Decimal, dp: u32) -> String {
    let text = fixed(value, dp);
    if text.starts_with('-') {
        text
    } else {
        format!("+{}", text)
    }
}

fn money(value: Decimal, dp: u32) -> String {
    format!("${}", fixed(value, dp))
}
