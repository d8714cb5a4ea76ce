//! # Pricer Risk (L4: Application)
//!
//! Spot/vol scenario risk inventory and risk queries.
//!
//! This crate provides:
//! - The 8 × 7 spot/volatility scenario grid
//! - Per-position point Greeks and full-revaluation scenario P&L
//! - A per-asset delta hedge offsetting the book's delta
//! - A flat, long-format risk table tagged with asset metadata
//! - Query resolution and reduction over the table
//! - Rayon-based per-asset parallelisation
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  scenarios/  - SpotVolGrid, cells       │
//! │  inventory/  - RiskAggregator,          │
//! │                RiskRecord, RiskTable    │
//! │  query/      - resolvers, reduction     │
//! │  parallel/   - Rayon utilities          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Black-Scholes price and Greeks         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::instruments::{OptionDirection, OptionPosition, PositionSide};
//! use pricer_risk::inventory::{AssetBook, AssetInfo, RiskAggregator};
//! use pricer_risk::query::QueryEngine;
//!
//! let market = BlackScholes::new(1.0, 0.05, 0.2).unwrap();
//! let call = OptionPosition::new(
//!     "AAPL", 1_000_000.0, 1.0, 1.0, OptionDirection::Call, PositionSide::Long,
//! ).unwrap();
//! let book = AssetBook::new(
//!     AssetInfo::new("AAPL", "Technology", "Consumer Electronics", "Equity"),
//!     market,
//!     vec![call],
//! ).unwrap();
//!
//! let table = RiskAggregator::default().build(&[book]);
//! let response = QueryEngine::default().answer("What is my AAPL vega?", &table).unwrap();
//! assert!((response.value - 3_752.403).abs() < 1e-2);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod inventory;
pub mod parallel;
pub mod query;
pub mod scenarios;

// Re-export commonly used types
pub use inventory::{
    AssetBook, AssetInfo, InventoryError, PointGreek, RiskAggregator, RiskMetric, RiskRecord,
    RiskTable,
};
pub use parallel::{ParallelConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use query::{
    FilterResolver, FixedResolver, QueryEngine, QueryError, QueryFilter, QueryResponse,
    StructuredResolver,
};
pub use scenarios::{MarketScenario, ScenarioError, SpotVolGrid};
