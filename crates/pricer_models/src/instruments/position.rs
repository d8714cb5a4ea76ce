//! Option positions held against a single underlying.

use super::direction::{OptionDirection, PositionSide};
use super::error::InstrumentError;

/// A European option holding in one underlying.
///
/// Immutable once constructed. The identifier is the tuple (asset, strike,
/// tenor, direction, side); [`label`](Self::label) renders the human-readable
/// form used as the position key in risk inventories.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionDirection, OptionPosition, PositionSide};
///
/// let position = OptionPosition::new(
///     "AAPL", 1_000_000.0, 1.0, 1.0, OptionDirection::Call, PositionSide::Long,
/// ).unwrap();
///
/// assert_eq!(position.label(), "AAPL Call 1.0 1.0Y");
/// assert_eq!(position.signed_quantity(), 1_000_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionPosition {
    asset: String,
    quantity: f64,
    strike: f64,
    tenor: f64,
    direction: OptionDirection,
    side: PositionSide,
}

impl OptionPosition {
    /// Creates a validated position.
    ///
    /// # Arguments
    /// * `asset` - Underlying identifier (non-empty)
    /// * `quantity` - Units held (finite; the side carries the sign)
    /// * `strike` - Strike price (must be positive)
    /// * `tenor` - Time to expiry in years (must be positive)
    /// * `direction` - Call or put
    /// * `side` - Long or short
    ///
    /// # Errors
    /// Returns an `InstrumentError` for an empty asset, a non-finite
    /// quantity, or a non-positive strike or tenor.
    pub fn new(
        asset: impl Into<String>,
        quantity: f64,
        strike: f64,
        tenor: f64,
        direction: OptionDirection,
        side: PositionSide,
    ) -> Result<Self, InstrumentError> {
        let asset = asset.into();

        if asset.trim().is_empty() {
            return Err(InstrumentError::EmptyAsset);
        }

        if !quantity.is_finite() {
            return Err(InstrumentError::InvalidQuantity { quantity });
        }

        if !(strike > 0.0) || !strike.is_finite() {
            return Err(InstrumentError::InvalidStrike { strike });
        }

        if !(tenor > 0.0) || !tenor.is_finite() {
            return Err(InstrumentError::InvalidTenor { tenor });
        }

        Ok(Self {
            asset,
            quantity,
            strike,
            tenor,
            direction,
            side,
        })
    }

    /// Returns the underlying identifier.
    #[inline]
    pub fn asset(&self) -> &str {
        &self.asset
    }

    /// Returns the unsigned quantity as booked.
    #[inline]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the tenor in years.
    #[inline]
    pub fn tenor(&self) -> f64 {
        self.tenor
    }

    /// Returns call or put.
    #[inline]
    pub fn direction(&self) -> OptionDirection {
        self.direction
    }

    /// Returns long or short.
    #[inline]
    pub fn side(&self) -> PositionSide {
        self.side
    }

    /// Side sign times quantity.
    #[inline]
    pub fn signed_quantity(&self) -> f64 {
        self.side.sign::<f64>() * self.quantity
    }

    /// `"<asset> <Call|Put> <strike> <tenor>Y"`, strike and tenor rounded
    /// to two decimals and printed in their shortest form (`1.0`, `1.25`).
    pub fn label(&self) -> String {
        format!(
            "{} {} {} {}Y",
            self.asset,
            self.direction,
            short_decimal(self.strike),
            short_decimal(self.tenor)
        )
    }
}

fn short_decimal(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let text = rounded.to_string();
    if text.contains('.') {
        text
    } else {
        text + ".0"
    }
}
