//! Instrument error types.

use thiserror::Error;

/// Errors raised when constructing an [`OptionPosition`](super::OptionPosition).
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Strike is not strictly positive.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Tenor is not strictly positive.
    #[error("Invalid tenor: T = {tenor}")]
    InvalidTenor {
        /// The rejected tenor
        tenor: f64,
    },

    /// Quantity is NaN or infinite.
    #[error("Invalid quantity: Q = {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: f64,
    },

    /// Underlying asset identifier is empty.
    #[error("Asset identifier must not be empty")]
    EmptyAsset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_strike_display() {
        let err = InstrumentError::InvalidStrike { strike: -100.0 };
        assert_eq!(format!("{}", err), "Invalid strike: K = -100");
    }

    #[test]
    fn test_invalid_tenor_display() {
        let err = InstrumentError::InvalidTenor { tenor: 0.0 };
        assert_eq!(format!("{}", err), "Invalid tenor: T = 0");
    }

    #[test]
    fn test_invalid_quantity_display() {
        let err = InstrumentError::InvalidQuantity {
            quantity: f64::INFINITY,
        };
        assert_eq!(format!("{}", err), "Invalid quantity: Q = inf");
    }

    #[test]
    fn test_empty_asset_display() {
        assert_eq!(
            format!("{}", InstrumentError::EmptyAsset),
            "Asset identifier must not be empty"
        );
    }
}
