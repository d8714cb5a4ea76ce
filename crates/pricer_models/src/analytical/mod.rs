//! Closed-form Black-Scholes pricing.
//!
//! This module provides:
//! - `norm_cdf` / `norm_pdf`: standard normal distribution functions
//! - `d1`, `d2`, `price`, `delta`, `vega`, `gamma`: unguarded pure formulas
//! - `BlackScholes`: validated market parameters (spot, rate, volatility)
//!   with scenario bumping and point Greeks
//!
//! ## Conventions
//!
//! - Direction enters as φ = +1 (call) / -1 (put) through [`OptionDirection`].
//! - Delta is φ·S·N(d₁) with the unsigned d₁.
//! - Vega and gamma are divided by 100.
//!
//! [`OptionDirection`]: crate::instruments::OptionDirection

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::{d1, d2, delta, gamma, price, vega, BlackScholes, Greeks};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
