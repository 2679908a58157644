use tracing::{debug, warn};

use crate::common::types::TradeRecord;
use crate::pnl::types::{Aggregation, MarketPosition, PositionMap};

/// Folds trade records into per-market Up/Down books
///
/// Aggregation is a pure sum over the input, so the result does not depend
/// on record order. Missing sizes or prices count as zero; records whose
/// outcome is neither Up nor Down are skipped and counted. A market whose
/// totals overflow is flagged rather than aborting the pass.
pub struct PositionAggregator;

impl PositionAggregator {
    /// Aggregate records into positions keyed by market id
    pub fn aggregate<'a, I>(records: I) -> PositionMap
    where
        I: IntoIterator<Item = &'a TradeRecord>,
    {
        Self::aggregate_counted(records).positions
    }

    /// Aggregate records, also reporting how many were dropped
    pub fn aggregate_counted<'a, I>(records: I) -> Aggregation
    where
        I: IntoIterator<Item = &'a TradeRecord>,
    {
        let mut aggregation = Aggregation::default();

        for record in records {
            if !record.outcome.is_known() {
                debug!(
                    market_id = %record.market_id,
                    outcome = %record.outcome,
                    "Dropping record with unrecognised outcome"
                );
                aggregation.dropped_records += 1;
                continue;
            }

            let position = aggregation
                .positions
                .entry(record.market_id.clone())
                .or_insert_with(|| MarketPosition::new(record.market_id.as_str()));
            let already_overflowed = position.overflowed;
            position.apply(record);
            if position.overflowed && !already_overflowed {
                warn!(
                    market_id = %record.market_id,
                    size = ?record.size,
                    price = ?record.price,
                    "Position totals overflowed"
                );
            }
        }

        aggregation
    }
}
