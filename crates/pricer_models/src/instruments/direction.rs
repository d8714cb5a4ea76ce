//! Option direction and position side.

use num_traits::Float;
use std::fmt;

/// Call or put.
///
/// Enters the pricing formulas as φ = +1 (call) or φ = -1 (put).
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionDirection;
///
/// assert_eq!(OptionDirection::Call.phi::<f64>(), 1.0);
/// assert_eq!(OptionDirection::Put.phi::<f64>(), -1.0);
/// assert_eq!(OptionDirection::Put.to_string(), "Put");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionDirection {
    /// Right to buy
    Call,
    /// Right to sell
    Put,
}

impl OptionDirection {
    /// Returns φ: +1 for calls, -1 for puts.
    #[inline]
    pub fn phi<T: Float>(&self) -> T {
        match self {
            OptionDirection::Call => T::one(),
            OptionDirection::Put => -T::one(),
        }
    }

    /// Builds a direction from a ±1 flag. Any non-negative flag is a call.
    #[inline]
    pub fn from_flag(flag: i8) -> Self {
        if flag >= 0 {
            OptionDirection::Call
        } else {
            OptionDirection::Put
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionDirection::Call)
    }
}

impl fmt::Display for OptionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionDirection::Call => write!(f, "Call"),
            OptionDirection::Put => write!(f, "Put"),
        }
    }
}

/// Long or short holding of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionSide {
    /// Bought
    Long,
    /// Sold
    Short,
}

impl PositionSide {
    /// Returns +1 for long, -1 for short.
    #[inline]
    pub fn sign<T: Float>(&self) -> T {
        match self {
            PositionSide::Long => T::one(),
            PositionSide::Short => -T::one(),
        }
    }

    /// Builds a side from a ±1 flag. Any non-negative flag is long.
    #[inline]
    pub fn from_flag(flag: i8) -> Self {
        if flag >= 0 {
            PositionSide::Long
        } else {
            PositionSide::Short
        }
    }

    /// Returns whether this is a long position.
    #[inline]
    pub fn is_long(&self) -> bool {
        matches!(self, PositionSide::Long)
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSide::Long => write!(f, "Long"),
            PositionSide::Short => write!(f, "Short"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phi() {
        assert_eq!(OptionDirection::Call.phi::<f64>(), 1.0);
        assert_eq!(OptionDirection::Put.phi::<f32>(), -1.0);
    }

    #[test]
    fn test_direction_from_flag() {
        assert_eq!(OptionDirection::from_flag(1), OptionDirection::Call);
        assert_eq!(OptionDirection::from_flag(-1), OptionDirection::Put);
        assert!(OptionDirection::from_flag(1).is_call());
    }

    #[test]
    fn test_side_sign() {
        assert_eq!(PositionSide::Long.sign::<f64>(), 1.0);
        assert_eq!(PositionSide::Short.sign::<f64>(), -1.0);
    }

    #[test]
    fn test_side_from_flag() {
        assert_eq!(PositionSide::from_flag(1), PositionSide::Long);
        assert_eq!(PositionSide::from_flag(-1), PositionSide::Short);
        assert!(!PositionSide::Short.is_long());
    }

    #[test]
    fn test_display() {
        assert_eq!(OptionDirection::Call.to_string(), "Call");
        assert_eq!(PositionSide::Short.to_string(), "Short");
    }
}
