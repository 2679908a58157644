//! Common test utilities and fixtures

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use updown_pnl::{Outcome, Side, TradeRecord};

/// Fixed reference time for deterministic windows
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap()
}

pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    reference_time() - Duration::minutes(minutes)
}

/// A buy fill `minutes` before the reference time
pub fn fill(market_id: &str, outcome: Outcome, price: Decimal, size: Decimal, minutes: i64) -> TradeRecord {
    TradeRecord::new(market_id, outcome, price, size).at(minutes_ago(minutes))
}

/// Scenario A: UP 10@0.40 and DOWN 10@0.55 in one market
pub fn balanced_pair(market_id: &str) -> Vec<TradeRecord> {
    vec![
        fill(market_id, Outcome::Up, dec!(0.40), dec!(10), 10),
        fill(market_id, Outcome::Down, dec!(0.55), dec!(10), 9),
    ]
}

/// A realistic session across several 15 minute markets
pub fn sample_session() -> Vec<TradeRecord> {
    vec![
        fill("btc-updown-15m-1717250400", Outcome::Up, dec!(0.48), dec!(25), 44),
        fill("btc-updown-15m-1717250400", Outcome::Down, dec!(0.49), dec!(20), 43),
        fill("btc-updown-15m-1717250400", Outcome::Down, dec!(0.47), dec!(5.5), 40),
        fill("btc-updown-15m-1717251300", Outcome::Up, dec!(0.52), dec!(12), 20)
            .with_side(Some(Side::Sell)),
        fill("btc-updown-15m-1717251300", Outcome::Down, dec!(0.45), dec!(12), 18),
        fill("eth-updown-15m-1717251300", Outcome::Up, dec!(0.61), dec!(8), 12),
        fill("eth-updown-15m-1717251300", Outcome::Down, dec!(0.37), dec!(3), 6),
        fill("eth-updown-15m-1717251300", Outcome::Down, dec!(0.36), dec!(4), 2),
    ]
}
