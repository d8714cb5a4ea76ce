//! Risk aggregation: positions → point Greeks, scenario P&L and delta hedge.
//!
//! For each asset book:
//!
//! 1. every position emits DELTA, VEGA and GAMMA (signed quantity × Greek),
//!    then one SPOT_VOL_PNL record per grid cell from full revaluation;
//! 2. a synthetic hedge labelled with the asset ticker offsets the summed
//!    position delta and emits one DELTA record plus one linear
//!    SPOT_VOL_PNL record (hedge delta × spot shock) per grid cell.
//!
//! The output depends only on the books and the grid.

use std::sync::Arc;

use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::OptionPosition;
use thiserror::Error;
use tracing::{debug, info};

use super::record::{AssetInfo, PointGreek, RiskMetric, RiskRecord};
use super::table::RiskTable;
use crate::parallel::{parallel_map, ParallelConfig};
use crate::scenarios::SpotVolGrid;

/// Point Greek records emitted per position.
pub const POINT_GREEKS_PER_POSITION: usize = 3;

/// Errors raised when assembling an [`AssetBook`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    /// A position belongs to a different underlying than the book.
    #[error("Position {position} is booked on {found}, not {expected}")]
    AssetMismatch {
        /// The book's ticker
        expected: String,
        /// The position's ticker
        found: String,
        /// Label of the offending position
        position: String,
    },
}

/// Positions for one underlying, with its metadata and market parameters.
#[derive(Clone, Debug)]
pub struct AssetBook {
    info: Arc<AssetInfo>,
    market: BlackScholes<f64>,
    positions: Vec<OptionPosition>,
}

impl AssetBook {
    /// Creates a book.
    ///
    /// # Errors
    /// Returns [`InventoryError::AssetMismatch`] if any position is booked on
    /// an asset other than `info.asset`.
    pub fn new(
        info: AssetInfo,
        market: BlackScholes<f64>,
        positions: Vec<OptionPosition>,
    ) -> Result<Self, InventoryError> {
        if let Some(stray) = positions.iter().find(|p| p.asset() != info.asset) {
            return Err(InventoryError::AssetMismatch {
                expected: info.asset,
                found: stray.asset().to_string(),
                position: stray.label(),
            });
        }
        Ok(Self {
            info: Arc::new(info),
            market,
            positions,
        })
    }

    /// Asset metadata.
    pub fn info(&self) -> &AssetInfo {
        &self.info
    }

    /// Market parameters used for every position in the book.
    pub fn market(&self) -> &BlackScholes<f64> {
        &self.market
    }

    /// Positions in booking order.
    pub fn positions(&self) -> &[OptionPosition] {
        &self.positions
    }
}

/// Builds risk tables from asset books.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::{OptionDirection, OptionPosition, PositionSide};
/// use pricer_risk::inventory::{AssetBook, AssetInfo, RiskAggregator, RiskMetric};
///
/// let market = BlackScholes::new(1.0, 0.05, 0.2).unwrap();
/// let position = OptionPosition::new(
///     "AAPL", 1_000_000.0, 1.0, 1.0, OptionDirection::Call, PositionSide::Long,
/// ).unwrap();
/// let book = AssetBook::new(
///     AssetInfo::new("AAPL", "Technology", "Consumer Electronics", "Equity"),
///     market,
///     vec![position],
/// ).unwrap();
///
/// let table = RiskAggregator::default().build(&[book]);
/// assert_eq!(table.len(), 59 + 57);
/// assert!(table.metric_total(RiskMetric::Delta).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RiskAggregator {
    grid: SpotVolGrid,
    parallel: ParallelConfig,
}

impl RiskAggregator {
    /// Creates an aggregator over the given grid.
    pub fn new(grid: SpotVolGrid) -> Self {
        Self {
            grid,
            parallel: ParallelConfig::default(),
        }
    }

    /// Overrides the parallel execution policy.
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// The scenario grid.
    pub fn grid(&self) -> &SpotVolGrid {
        &self.grid
    }

    /// Records emitted per option position.
    pub fn records_per_position(&self) -> usize {
        POINT_GREEKS_PER_POSITION + self.grid.len()
    }

    /// Records emitted per asset hedge.
    pub fn records_per_hedge(&self) -> usize {
        1 + self.grid.len()
    }

    /// Builds the risk table for every book, in book order.
    pub fn build(&self, books: &[AssetBook]) -> RiskTable {
        let per_asset: Vec<Vec<RiskRecord>> = if self.parallel.should_parallelize(books.len()) {
            debug!(books = books.len(), "aggregating asset books in parallel");
            parallel_map(books, |book| self.asset_records(book))
        } else {
            books.iter().map(|book| self.asset_records(book)).collect()
        };

        let mut table = RiskTable::new();
        for records in per_asset {
            table.extend(records);
        }
        info!(
            assets = books.len(),
            records = table.len(),
            "risk inventory built"
        );
        table
    }

    /// All records for one book: positions first, then the hedge.
    pub fn asset_records(&self, book: &AssetBook) -> Vec<RiskRecord> {
        info!(
            asset = %book.info.asset,
            positions = book.positions.len(),
            "generating risk inventory"
        );

        let capacity =
            book.positions.len() * self.records_per_position() + self.records_per_hedge();
        let mut records = Vec::with_capacity(capacity);

        let mut position_delta = 0.0;
        for position in &book.positions {
            position_delta += self.push_position_records(book, position, &mut records);
        }

        self.push_hedge_records(book, 0.0 - position_delta, &mut records);
        debug!(asset = %book.info.asset, records = records.len(), "asset inventory complete");
        records
    }

    /// Emits one position's records and returns its DELTA value.
    fn push_position_records(
        &self,
        book: &AssetBook,
        position: &OptionPosition,
        out: &mut Vec<RiskRecord>,
    ) -> f64 {
        let label = position.label();
        let size = position.signed_quantity();
        let (direction, strike, tenor) = (position.direction(), position.strike(), position.tenor());

        let greeks = book.market.greeks(direction, strike, tenor).scale(size);
        out.push(RiskRecord::point(label.as_str(), PointGreek::Delta, greeks.delta, &book.info));
        out.push(RiskRecord::point(label.as_str(), PointGreek::Vega, greeks.vega, &book.info));
        out.push(RiskRecord::point(label.as_str(), PointGreek::Gamma, greeks.gamma, &book.info));

        let base_price = book.market.price(direction, strike, tenor);
        for scenario in self.grid.scenarios() {
            let shocked_price = scenario.apply(&book.market).price(direction, strike, tenor);
            let pnl = size * (shocked_price - base_price);
            out.push(RiskRecord::spot_vol(label.as_str(), scenario, pnl, &book.info));
        }

        greeks.delta
    }

    /// Emits the delta hedge: no vega or gamma, linear scenario P&L.
    fn push_hedge_records(&self, book: &AssetBook, hedge_delta: f64, out: &mut Vec<RiskRecord>) {
        let label = book.info.asset.as_str();
        out.push(RiskRecord::point(label, PointGreek::Delta, hedge_delta, &book.info));

        for scenario in self.grid.scenarios() {
            let pnl = hedge_delta * scenario.spot_shock;
            out.push(RiskRecord::spot_vol(label, scenario, pnl, &book.info));
        }
    }
}
