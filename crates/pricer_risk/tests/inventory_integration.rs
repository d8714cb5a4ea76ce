//! Integration tests for the risk inventory and query flow.
//!
//! These tests verify end-to-end behaviour from option books through the
//! aggregator to query answers, across several assets.

use approx::assert_abs_diff_eq;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{OptionDirection, OptionPosition, PositionSide};
use pricer_risk::inventory::{AssetBook, AssetInfo, RiskAggregator, RiskMetric, RiskTable};
use pricer_risk::parallel::ParallelConfig;
use pricer_risk::query::{QueryEngine, QueryFilter, StructuredResolver};
use pricer_risk::scenarios::SpotVolGrid;

// ============================================================================
// Fixtures
// ============================================================================

fn market() -> BlackScholes<f64> {
    BlackScholes::new(1.0, 0.05, 0.2).unwrap()
}

fn book(info: AssetInfo, legs: &[(f64, f64, f64, i8, i8)]) -> AssetBook {
    let positions = legs
        .iter()
        .map(|&(quantity, strike, tenor, direction, side)| {
            OptionPosition::new(
                info.asset.as_str(),
                quantity,
                strike,
                tenor,
                OptionDirection::from_flag(direction),
                PositionSide::from_flag(side),
            )
            .unwrap()
        })
        .collect();
    AssetBook::new(info, market(), positions).unwrap()
}

fn books() -> Vec<AssetBook> {
    vec![
        book(
            AssetInfo::new("AAPL", "Technology", "Consumer Electronics", "Equity"),
            &[
                (1_000_000.0, 1.0, 1.0, 1, 1),
                (2_000_000.0, 1.5, 0.25, -1, -1),
            ],
        ),
        book(
            AssetInfo::new("MSFT", "Technology", "Software", "Equity"),
            &[(500_000.0, 0.8, 2.0, 1, -1)],
        ),
        book(
            AssetInfo::new("BAC", "Financials", "Banks", "Equity"),
            &[
                (10_000_000.0, 1.1, 0.5, -1, 1),
                (10_000_000.0, 0.9, 0.5, 1, 1),
                (10_000_000.0, 2.0, 3.0, 1, -1),
            ],
        ),
    ]
}

fn build() -> RiskTable {
    RiskAggregator::default().build(&books())
}

// ============================================================================
// Table Shape Tests
// ============================================================================

/// Test row count: 59 per position plus 57 per asset hedge.
#[test]
fn test_full_book_row_count() {
    let table = build();
    assert_eq!(table.len(), 6 * 59 + 3 * 57);
    assert_eq!(table.assets(), vec!["AAPL", "MSFT", "BAC"]);
}

/// Test that every asset is processed, not just the first.
#[test]
fn test_all_assets_present() {
    let table = build();
    assert_eq!(table.for_asset("AAPL").count(), 2 * 59 + 57);
    assert_eq!(table.for_asset("MSFT").count(), 59 + 57);
    assert_eq!(table.for_asset("BAC").count(), 3 * 59 + 57);
}

/// Test that each asset's delta nets to zero once hedged.
#[test]
fn test_delta_hedged_per_asset() {
    let table = build();
    for asset in table.assets() {
        let net: f64 = table
            .for_asset(asset)
            .filter(|r| r.metric() == RiskMetric::Delta)
            .map(|r| r.value())
            .sum();
        assert_abs_diff_eq!(net, 0.0, epsilon = 1e-6);
    }
    assert_abs_diff_eq!(table.metric_total(RiskMetric::Delta), 0.0, epsilon = 1e-6);
}

// ============================================================================
// Determinism Tests
// ============================================================================

/// Test bit-identical output across runs and execution modes.
#[test]
fn test_deterministic_across_modes() {
    let first = build();
    let second = build();
    assert_eq!(first, second);

    let parallel = RiskAggregator::default()
        .with_parallel(ParallelConfig::new(1))
        .build(&books());
    let sequential = RiskAggregator::default()
        .with_parallel(ParallelConfig::sequential())
        .build(&books());
    assert_eq!(parallel, first);
    assert_eq!(sequential, first);
}

// ============================================================================
// Query Tests
// ============================================================================

/// Test that the default query returns the exact AAPL vega sum.
#[test]
fn test_default_query_matches_manual_sum() {
    let table = build();
    let expected: f64 = table
        .iter()
        .filter(|r| r.asset() == "AAPL" && r.metric() == RiskMetric::Vega)
        .map(|r| r.value())
        .sum();

    let response = QueryEngine::default().answer("How much vega?", &table).unwrap();
    assert_eq!(response.value, expected);
    assert_eq!(
        response.content,
        format!("Your Vega risk to AAPL is {}", expected)
    );
}

/// Test that absent assets answer zero.
#[test]
fn test_absent_asset_is_zero() {
    let table = build();
    let response = QueryEngine::default()
        .answer_filter(&QueryFilter::for_asset("GOOG", RiskMetric::Vega), &table);
    assert_eq!(response.value, 0.0);
}

/// Test sector-level scenario P&L through the structured resolver.
#[test]
fn test_structured_sector_scenario_query() {
    let table = build();
    let engine = QueryEngine::new(StructuredResolver::default()).with_data(true);
    let response = engine
        .answer("metric=SPOT_VOL_PNL sector=Technology spot=-0.25 vol=0", &table)
        .unwrap();

    // One cell per position and per hedge: AAPL 2 + 1, MSFT 1 + 1
    let data = response.data.unwrap();
    assert_eq!(data.len(), 5);
    let total: f64 = data.iter().map(|r| r.value()).sum();
    assert_eq!(response.value, total);
}

/// Test that the unshocked cell carries zero P&L for every position.
#[test]
fn test_flat_cell_is_zero() {
    let table = build();
    let response = QueryEngine::new(StructuredResolver::default())
        .answer("metric=SPOT_VOL_PNL spot=0 vol=0", &table)
        .unwrap();
    assert_eq!(response.value, 0.0);
}

// ============================================================================
// Custom Grid Tests
// ============================================================================

/// Test that a custom grid changes the row count.
#[test]
fn test_custom_grid() {
    let grid = SpotVolGrid::new(vec![-0.5, 0.5], vec![0.0]).unwrap();
    let table = RiskAggregator::new(grid).build(&books());
    assert_eq!(table.len(), 6 * (3 + 2) + 3 * (1 + 2));
}
