//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form option pricing and the option position types consumed by the
//! risk aggregator.
//!
//! This crate provides:
//! - Standard normal CDF / PDF
//! - Black-Scholes price, delta, vega and gamma
//! - Validated market parameters with relative spot / volatility bumps
//! - Option positions with long/short side and call/put direction
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::BlackScholes;
//! use pricer_models::instruments::{OptionDirection, OptionPosition, PositionSide};
//!
//! let market = BlackScholes::new(1.0_f64, 0.05, 0.2).unwrap();
//! let position = OptionPosition::new(
//!     "AAPL", 1_000_000.0, 1.0, 1.0, OptionDirection::Call, PositionSide::Long,
//! ).unwrap();
//!
//! let greeks = market
//!     .greeks(position.direction(), position.strike(), position.tenor())
//!     .scale(position.signed_quantity());
//! assert!((greeks.delta - 636_830.65).abs() < 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
