//! Error types for Black-Scholes input validation.

use thiserror::Error;

/// Domain errors for Black-Scholes market inputs.
///
/// The closed-form functions in [`super::black_scholes`] never return these;
/// they are raised by the validating constructors at the input boundary so
/// that non-finite prices cannot reach the risk aggregator.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: 0.0 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Spot price is not strictly positive.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The rejected spot
        spot: f64,
    },

    /// Volatility is not strictly positive.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Rate is NaN or infinite.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The rejected rate
        rate: f64,
    },
}
