//! End-to-end checks of the aggregate → compute pipeline
//!
//! Exercises the documented scenarios and the order/idempotence
//! properties over realistic trade sets.

mod common;

use common::{balanced_pair, fill, sample_session};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use updown_pnl::{
    ArbitragePnlCalculator, Outcome, PnlReport, PositionAggregator, TradeRecord,
};

fn pipeline(records: &[TradeRecord]) -> PnlReport {
    let positions = PositionAggregator::aggregate(records);
    ArbitragePnlCalculator::compute(&positions).expect("positions are non-negative")
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scenario_a_balanced_pair() {
    let report = pipeline(&balanced_pair("btc-updown-15m"));

    assert_eq!(report.results.len(), 1);
    let result = &report.results[0];
    assert_eq!(result.paired_shares, dec!(10));
    assert_eq!(result.imbalance, dec!(0));
    assert_eq!(result.total_cost, dec!(9.50));
    assert_eq!(result.edge_pnl, dec!(0.50));
    assert_eq!(report.total_edge_pnl, dec!(0.50));
}

#[test]
fn test_scenario_b_one_sided() {
    let report = pipeline(&[fill("btc-updown-15m", Outcome::Up, dec!(0.30), dec!(5), 1)]);

    let result = &report.results[0];
    assert_eq!(result.paired_shares, dec!(0));
    assert_eq!(result.imbalance, dec!(5));
    assert_eq!(result.edge_pnl, dec!(0));
    assert_eq!(result.total_cost, dec!(1.50));
}

#[test]
fn test_scenario_c_two_markets() {
    let mut records = balanced_pair("eth-updown-15m");
    records.extend(balanced_pair("btc-updown-15m"));

    let report = pipeline(&records);

    assert_eq!(report.total_edge_pnl, dec!(1.00));
    let ids: Vec<&str> = report.results.iter().map(|r| r.market_id.as_str()).collect();
    assert_eq!(ids, vec!["btc-updown-15m", "eth-updown-15m"]);
}

#[test]
fn test_scenario_d_missing_size() {
    let mut records = balanced_pair("btc-updown-15m");
    records.push(fill("btc-updown-15m", Outcome::Up, dec!(0.99), dec!(50), 1).with_size(None));

    let report = pipeline(&records);

    let result = &report.results[0];
    assert_eq!(result.up_shares, dec!(10));
    assert_eq!(result.total_cost, dec!(9.50));
    assert_eq!(result.edge_pnl, dec!(0.50));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_empty_window() {
    let report = pipeline(&[]);
    assert!(report.results.is_empty());
    assert_eq!(report.total_edge_pnl, Decimal::ZERO);
}

#[test]
fn test_session_order_independent() {
    let records = sample_session();
    let expected = pipeline(&records);

    // Newest first, as the store returns them
    let mut newest_first = records.clone();
    newest_first.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    assert_eq!(pipeline(&newest_first), expected);

    let mut by_market_desc = records.clone();
    by_market_desc.sort_by(|a, b| b.market_id.cmp(&a.market_id));
    assert_eq!(pipeline(&by_market_desc), expected);

    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let mut swapped = records.clone();
            swapped.swap(i, j);
            assert_eq!(pipeline(&swapped), expected, "swap {} <-> {}", i, j);
        }
    }
}

#[test]
fn test_session_values() {
    let report = pipeline(&sample_session());

    // 1717250400: up 25 (12.00), down 25.5 (9.80 + 2.585) -> paired 25
    let first = report.get("btc-updown-15m-1717250400").unwrap();
    assert_eq!(first.paired_shares, dec!(25));
    assert_eq!(first.imbalance, dec!(-0.5));
    assert_eq!(first.total_cost, dec!(24.385));
    assert_eq!(first.edge_pnl, dec!(0.615));

    // 1717251300: 12 paired for 6.24 + 5.40
    let second = report.get("btc-updown-15m-1717251300").unwrap();
    assert_eq!(second.edge_pnl, dec!(0.36));

    // eth: up 8 (4.88), down 7 (1.11 + 1.44) -> paired 7
    let eth = report.get("eth-updown-15m-1717251300").unwrap();
    assert_eq!(eth.paired_shares, dec!(7));
    assert_eq!(eth.imbalance, dec!(1));
    assert_eq!(eth.total_cost, dec!(7.43));
    assert_eq!(eth.edge_pnl, dec!(-0.43));

    assert_eq!(report.total_edge_pnl, dec!(0.545));
}

#[test]
fn test_invariants_hold_per_market() {
    let report = pipeline(&sample_session());

    let mut sum = Decimal::ZERO;
    for result in &report.results {
        assert_eq!(result.paired_shares, result.up_shares.min(result.down_shares));
        assert_eq!(result.imbalance, result.up_shares - result.down_shares);
        if result.paired_shares.is_zero() {
            assert_eq!(result.edge_pnl, Decimal::ZERO);
        } else {
            assert_eq!(result.edge_pnl, result.paired_shares - result.total_cost);
        }
        sum += result.edge_pnl;
    }
    assert_eq!(report.total_edge_pnl, sum);
}

#[test]
fn test_repeated_compute_is_identical() {
    let positions = PositionAggregator::aggregate(&sample_session());

    let first = ArbitragePnlCalculator::compute(&positions).unwrap();
    let second = ArbitragePnlCalculator::compute(&positions).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_unknown_outcome_does_not_affect_pnl() {
    let mut records = balanced_pair("btc-updown-15m");
    records.push(fill("btc-updown-15m", Outcome::parse("Yes"), dec!(0.50), dec!(100), 1));

    let aggregation = PositionAggregator::aggregate_counted(&records);
    assert_eq!(aggregation.dropped_records, 1);

    let report = ArbitragePnlCalculator::compute(&aggregation.positions).unwrap();
    assert_eq!(report.total_edge_pnl, dec!(0.50));
}

#[test]
fn test_out_of_range_sizes_fail_the_market_not_the_process() {
    let half = Decimal::MAX / dec!(2) + Decimal::ONE;
    let mut records = balanced_pair("btc-updown-15m");
    records.push(fill("eth-updown-15m", Outcome::Up, dec!(0), half, 2));
    records.push(fill("eth-updown-15m", Outcome::Up, dec!(0), half, 1));

    let positions = PositionAggregator::aggregate(&records);
    let err = ArbitragePnlCalculator::compute(&positions).unwrap_err();

    assert!(err.is_integrity_fault());
    assert!(err.to_string().contains("eth-updown-15m"));
}
