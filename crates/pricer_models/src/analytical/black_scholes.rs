//! Black-Scholes price and point Greeks for European options.
//!
//! ## Formulas
//!
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//! - V = φ·S·N(φ·d₁) - φ·K·e^(-rT)·N(φ·d₂)
//! - Δ = φ·S·N(d₁)
//! - ν = S·n(d₁)·√T / 100
//! - Γ = n(d₁) / (S·σ·√T) / 100
//!
//! φ is +1 for calls and -1 for puts. The delta keeps the unsigned d₁ and the
//! spot factor, so a put's delta is -S·N(d₁) rather than the textbook
//! N(d₁) - 1. Risk inventories built with this engine depend on that
//! convention.
//!
//! The free functions perform no validation: T = 0 or σ = 0 yields infinities
//! or NaN. Use [`BlackScholes::new`] to reject such inputs up front.

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::OptionDirection;

/// Vega and gamma are quoted per 100 units of the underlying move.
const GREEK_SCALE: f64 = 100.0;

/// Computes d₁.
#[inline]
pub fn d1<T: Float>(spot: T, strike: T, rate: T, volatility: T, tenor: T) -> T {
    let half = T::from(0.5).unwrap();
    let drift = (rate + half * volatility * volatility) * tenor;
    ((spot / strike).ln() + drift) / (volatility * tenor.sqrt())
}

/// Computes d₂ = d₁ - σ√T.
#[inline]
pub fn d2<T: Float>(spot: T, strike: T, rate: T, volatility: T, tenor: T) -> T {
    d1(spot, strike, rate, volatility, tenor) - volatility * tenor.sqrt()
}

/// Option price for either direction.
///
/// # Examples
/// ```
/// use pricer_models::analytical::price;
/// use pricer_models::instruments::OptionDirection;
///
/// let call = price(OptionDirection::Call, 1.0_f64, 1.0, 0.05, 0.2, 1.0);
/// let put = price(OptionDirection::Put, 1.0_f64, 1.0, 0.05, 0.2, 1.0);
///
/// // Put-call parity: C - P = S - K·e^(-rT)
/// assert!((call - put - (1.0 - (-0.05_f64).exp())).abs() < 1e-12);
/// ```
#[inline]
pub fn price<T: Float>(
    direction: OptionDirection,
    spot: T,
    strike: T,
    rate: T,
    volatility: T,
    tenor: T,
) -> T {
    let phi = direction.phi::<T>();
    let d1 = d1(spot, strike, rate, volatility, tenor);
    let d2 = d1 - volatility * tenor.sqrt();
    let discount = (-rate * tenor).exp();

    phi * spot * norm_cdf(phi * d1) - phi * strike * discount * norm_cdf(phi * d2)
}

/// Delta, φ·S·N(d₁).
#[inline]
pub fn delta<T: Float>(
    direction: OptionDirection,
    spot: T,
    strike: T,
    rate: T,
    volatility: T,
    tenor: T,
) -> T {
    direction.phi::<T>() * spot * norm_cdf(d1(spot, strike, rate, volatility, tenor))
}

/// Vega per volatility point, S·n(d₁)·√T / 100. Identical for calls and puts.
#[inline]
pub fn vega<T: Float>(spot: T, strike: T, rate: T, volatility: T, tenor: T) -> T {
    let d1 = d1(spot, strike, rate, volatility, tenor);
    spot * norm_pdf(d1) * tenor.sqrt() / T::from(GREEK_SCALE).unwrap()
}

/// Gamma, n(d₁) / (S·σ·√T) / 100. Identical for calls and puts.
#[inline]
pub fn gamma<T: Float>(spot: T, strike: T, rate: T, volatility: T, tenor: T) -> T {
    let d1 = d1(spot, strike, rate, volatility, tenor);
    norm_pdf(d1) / (spot * volatility * tenor.sqrt()) / T::from(GREEK_SCALE).unwrap()
}

/// Point Greeks of a single option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T: Float> {
    /// φ·S·N(d₁)
    pub delta: T,
    /// Per volatility point
    pub vega: T,
    /// Scaled by 1/100
    pub gamma: T,
}

impl<T: Float> Greeks<T> {
    /// Multiplies every Greek by `factor` (signed position size).
    pub fn scale(&self, factor: T) -> Self {
        Self {
            delta: self.delta * factor,
            vega: self.vega * factor,
            gamma: self.gamma * factor,
        }
    }
}

/// Market parameters for Black-Scholes valuation.
///
/// Holds spot, risk-free rate and volatility for one underlying; strike,
/// tenor and direction come from the option being priced.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::OptionDirection;
///
/// let market = BlackScholes::new(1.0_f64, 0.05, 0.2).unwrap();
/// let greeks = market.greeks(OptionDirection::Call, 1.0, 1.0);
/// assert!((greeks.delta - 0.6368307).abs() < 1e-6);
///
/// assert!(BlackScholes::new(1.0_f64, 0.05, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates validated market parameters.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or not finite
    /// - `AnalyticalError::InvalidRate` if rate is not finite
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !(spot > zero) || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility > zero) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate {
                rate: rate.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Applies relative shocks: S·(1 + spot_shock), σ·(1 + vol_shock).
    ///
    /// The result is not re-validated. Shocks at or below -1 produce a
    /// non-positive spot or volatility and hence non-finite prices.
    #[inline]
    pub fn bumped(&self, spot_shock: T, vol_shock: T) -> Self {
        let one = T::one();
        Self {
            spot: self.spot * (one + spot_shock),
            rate: self.rate,
            volatility: self.volatility * (one + vol_shock),
        }
    }

    /// Option price at these market parameters.
    #[inline]
    pub fn price(&self, direction: OptionDirection, strike: T, tenor: T) -> T {
        price(direction, self.spot, strike, self.rate, self.volatility, tenor)
    }

    /// Delta, vega and gamma at these market parameters.
    pub fn greeks(&self, direction: OptionDirection, strike: T, tenor: T) -> Greeks<T> {
        Greeks {
            delta: delta(direction, self.spot, strike, self.rate, self.volatility, tenor),
            vega: vega(self.spot, strike, self.rate, self.volatility, tenor),
            gamma: gamma(self.spot, strike, self.rate, self.volatility, tenor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    const S: f64 = 1.0;
    const K: f64 = 1.0;
    const R: f64 = 0.05;
    const VOL: f64 = 0.2;
    const T: f64 = 1.0;

    #[test]
    fn test_d1_d2_atm() {
        assert_relative_eq!(d1(S, K, R, VOL, T), 0.35, epsilon = 1e-12);
        assert_relative_eq!(d2(S, K, R, VOL, T), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_price_reference_values() {
        let call = price(OptionDirection::Call, S, K, R, VOL, T);
        let put = price(OptionDirection::Put, S, K, R, VOL, T);
        assert_abs_diff_eq!(call, 0.10450583572185568, epsilon = 1e-6);
        assert_abs_diff_eq!(put, 0.05573526022256975, epsilon = 1e-6);
    }

    #[test]
    fn test_price_scales_with_spot_and_strike() {
        let unit = price(OptionDirection::Call, S, K, R, VOL, T);
        let scaled = price(OptionDirection::Call, 100.0, 100.0, R, VOL, T);
        assert_relative_eq!(scaled, 100.0 * unit, epsilon = 1e-10);
    }

    #[test]
    fn test_delta_keeps_unsigned_d1() {
        let call = delta(OptionDirection::Call, S, K, R, VOL, T);
        let put = delta(OptionDirection::Put, S, K, R, VOL, T);
        assert_abs_diff_eq!(call, 0.6368306511756191, epsilon = 1e-6);
        assert_eq!(put, -call);
    }

    #[test]
    fn test_delta_includes_spot_factor() {
        let at_two = delta(OptionDirection::Call, 2.0, 2.0, R, VOL, T);
        let at_one = delta(OptionDirection::Call, 1.0, 1.0, R, VOL, T);
        assert_relative_eq!(at_two, 2.0 * at_one, epsilon = 1e-12);
    }

    #[test]
    fn test_vega_and_gamma_scaled_by_hundred() {
        assert_relative_eq!(vega(S, K, R, VOL, T), 0.003752403469169379, epsilon = 1e-10);
        assert_relative_eq!(gamma(S, K, R, VOL, T), 0.018762017345846896, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_tenor_is_not_guarded() {
        let v = vega(S, K, R, VOL, 0.0);
        let g = gamma(S, K, R, VOL, 0.0);
        assert!(!v.is_finite() || !g.is_finite());
    }

    #[test]
    fn test_zero_volatility_is_not_guarded() {
        assert!(!gamma(S, K, R, 0.0, T).is_finite());
    }

    #[test]
    fn test_black_scholes_new_validation() {
        assert!(BlackScholes::new(1.0_f64, 0.05, 0.2).is_ok());
        assert_eq!(
            BlackScholes::new(0.0_f64, 0.05, 0.2),
            Err(AnalyticalError::InvalidSpot { spot: 0.0 })
        );
        assert_eq!(
            BlackScholes::new(1.0_f64, 0.05, -0.2),
            Err(AnalyticalError::InvalidVolatility { volatility: -0.2 })
        );
        assert!(matches!(
            BlackScholes::new(1.0_f64, f64::INFINITY, 0.2),
            Err(AnalyticalError::InvalidRate { .. })
        ));
        assert!(BlackScholes::new(f64::NAN, 0.05, 0.2).is_err());
    }

    #[test]
    fn test_bumped_applies_relative_shocks() {
        let market = BlackScholes::new(2.0_f64, 0.05, 0.2).unwrap();
        let shocked = market.bumped(-0.25, 0.1);
        assert_relative_eq!(shocked.spot(), 1.5, epsilon = 1e-15);
        assert_relative_eq!(shocked.volatility(), 0.22, epsilon = 1e-15);
        assert_eq!(shocked.rate(), 0.05);

        let flat = market.bumped(0.0, 0.0);
        assert_eq!(flat, market);
    }

    #[test]
    fn test_greeks_match_free_functions() {
        let market = BlackScholes::new(S, R, VOL).unwrap();
        let greeks = market.greeks(OptionDirection::Put, 1.3, 0.7);
        assert_eq!(greeks.delta, delta(OptionDirection::Put, S, 1.3, R, VOL, 0.7));
        assert_eq!(greeks.vega, vega(S, 1.3, R, VOL, 0.7));
        assert_eq!(greeks.gamma, gamma(S, 1.3, R, VOL, 0.7));
        assert_eq!(
            market.price(OptionDirection::Put, 1.3, 0.7),
            price(OptionDirection::Put, S, 1.3, R, VOL, 0.7)
        );
    }

    #[test]
    fn test_greeks_scale() {
        let greeks = Greeks {
            delta: 0.5,
            vega: 0.004,
            gamma: 0.02,
        };
        let scaled = greeks.scale(-1_000_000.0);
        assert_relative_eq!(scaled.delta, -500_000.0);
        assert_relative_eq!(scaled.vega, -4_000.0);
        assert_relative_eq!(scaled.gamma, -20_000.0);
    }

    proptest! {
        #[test]
        fn prop_put_call_parity(
            spot in 0.05_f64..5.0,
            strike in 0.5_f64..2.0,
            rate in -0.02_f64..0.10,
            vol in 0.05_f64..0.8,
            tenor in 0.01_f64..3.0,
        ) {
            let call = price(OptionDirection::Call, spot, strike, rate, vol, tenor);
            let put = price(OptionDirection::Put, spot, strike, rate, vol, tenor);
            let forward = spot - strike * (-rate * tenor).exp();
            prop_assert!((call - put - forward).abs() < 1e-9);
        }

        #[test]
        fn prop_greeks_continuous_in_spot_and_vol(
            spot in 0.2_f64..3.0,
            strike in 0.5_f64..2.0,
            vol in 0.1_f64..0.6,
            tenor in 0.05_f64..3.0,
        ) {
            let h = 1e-7;
            let base = BlackScholes::new(spot, 0.05, vol).unwrap();
            let near_spot = BlackScholes::new(spot + h, 0.05, vol).unwrap();
            let near_vol = BlackScholes::new(spot, 0.05, vol + h).unwrap();

            let g0 = base.greeks(OptionDirection::Call, strike, tenor);
            for g1 in [
                near_spot.greeks(OptionDirection::Call, strike, tenor),
                near_vol.greeks(OptionDirection::Call, strike, tenor),
            ] {
                prop_assert!((g1.delta - g0.delta).abs() < 1e-4);
                prop_assert!((g1.vega - g0.vega).abs() < 1e-4);
                prop_assert!((g1.gamma - g0.gamma).abs() < 1e-3);
            }
        }
    }
}
