use rust_decimal::Decimal;

use crate::common::errors::{MonitorError, Result};
use crate::pnl::types::{ArbitrageResult, MarketPosition, OutcomeBook, PnlReport, PositionMap};

/// Value a complete set (one Up share plus one Down share) redeems for
pub const COMPLETE_SET_PAYOUT: Decimal = Decimal::ONE;

/// Complete-set arbitrage valuation
///
/// Each market's paired shares are worth exactly [`COMPLETE_SET_PAYOUT`]
/// whatever the outcome, so the edge is that value minus everything paid
/// for the position. A one-sided position has no realizable edge and
/// reports zero.
///
/// No rounding is applied; formatting belongs to the presenter.
pub struct ArbitragePnlCalculator;

impl ArbitragePnlCalculator {
    /// Value every position, ordered by market id, plus the portfolio total
    ///
    /// # Errors
    /// `MonitorError::DataIntegrity` if any position carries negative
    /// shares or cost, or its values exceed the `Decimal` range.
    pub fn compute(positions: &PositionMap) -> Result<PnlReport> {
        let mut report = PnlReport::default();

        // BTreeMap iteration is ascending by market id
        for position in positions.values() {
            let result = Self::evaluate(position)?;
            report.total_edge_pnl = report
                .total_edge_pnl
                .checked_add(result.edge_pnl)
                .ok_or_else(|| overflow(&result.market_id, "total edge"))?;
            report.results.push(result);
        }

        Ok(report)
    }

    /// Value a single market position
    pub fn evaluate(position: &MarketPosition) -> Result<ArbitrageResult> {
        let market_id = position.market_id.as_str();
        if position.overflowed {
            return Err(overflow(market_id, "accumulated shares or cost"));
        }
        check_book(market_id, "up", &position.up)?;
        check_book(market_id, "down", &position.down)?;

        let up_shares = position.up.shares;
        let down_shares = position.down.shares;
        let paired_shares = up_shares.min(down_shares);
        let total_cost = position
            .up
            .cost
            .checked_add(position.down.cost)
            .ok_or_else(|| overflow(market_id, "total cost"))?;
        let imbalance = up_shares
            .checked_sub(down_shares)
            .ok_or_else(|| overflow(market_id, "imbalance"))?;

        let edge_pnl = if paired_shares > Decimal::ZERO {
            paired_shares
                .checked_mul(COMPLETE_SET_PAYOUT)
                .and_then(|payout| payout.checked_sub(total_cost))
                .ok_or_else(|| overflow(market_id, "edge"))?
        } else {
            Decimal::ZERO
        };

        Ok(ArbitrageResult {
            market_id: position.market_id.clone(),
            up_shares,
            down_shares,
            paired_shares,
            imbalance,
            total_cost,
            edge_pnl,
        })
    }
}

fn overflow(market_id: &str, what: &str) -> MonitorError {
    MonitorError::integrity(market_id, format!("{} overflows the decimal range", what))
}

fn check_book(market_id: &str, label: &str, book: &OutcomeBook) -> Result<()> {
    if book.shares < Decimal::ZERO {
        return Err(MonitorError::integrity(
            market_id,
            format!("{}.shares is negative ({})", label, book.shares),
        ));
    }
    if book.cost < Decimal::ZERO {
        return Err(MonitorError::integrity(
            market_id,
            format!("{}.cost is negative ({})", label, book.cost),
        ));
    }
    Ok(())
}
