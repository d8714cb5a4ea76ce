//! # Demo Inputs
//!
//! Mock upstream data for the riskstore demo: the asset universe and the
//! option books held in it.
//!
//! ## Modules
//!
//! - [`universe`]: Static sector, subsector and desk lookup for 20 equities
//! - [`position_source`]: Position sources, including the seeded synthetic generator
//!
//! ## Example
//!
//! ```
//! use demo_inputs::prelude::*;
//! use pricer_models::analytical::BlackScholes;
//! use pricer_risk::inventory::RiskAggregator;
//!
//! let universe = universe::select(&["AAPL", "MSFT"]).unwrap();
//! let market = BlackScholes::new(1.0, 0.05, 0.2).unwrap();
//! let mut generator = SyntheticPositionGenerator::with_seed(GeneratorParams::default(), 7).unwrap();
//!
//! let books = generator.books(&universe, market).unwrap();
//! let table = RiskAggregator::default().build(&books);
//! assert_eq!(table.assets().len(), 2);
//! ```

pub mod error;
pub mod position_source;
pub mod universe;

pub use error::GeneratorError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::GeneratorError;
    pub use crate::position_source::{
        GeneratorParams, PositionSource, StaticPositionSource, SyntheticPositionGenerator,
    };
    pub use crate::universe;
}
