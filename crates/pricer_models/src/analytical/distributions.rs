//! Standard normal density and cumulative distribution.
//!
//! Both functions are generic over `T: Float` so the pricing formulas in
//! [`super::black_scholes`] can be evaluated in `f32` or `f64`.

use num_traits::Float;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Abramowitz and Stegun 7.1.26 coefficients.
const ERFC_P: f64 = 0.327_591_1;
const ERFC_A: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

/// Complementary error function, maximum absolute error 1.5e-7.
///
/// Negative arguments use the reflection `erfc(-x) = 2 - erfc(x)`, which keeps
/// `Φ(x) + Φ(-x) = 1` exact up to rounding. Put-call parity relies on that.
#[inline]
fn erfc<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();
    let t = one / (one + T::from(ERFC_P).unwrap() * abs_x);

    let poly = ERFC_A
        .iter()
        .rev()
        .fold(T::zero(), |acc, &a| T::from(a).unwrap() + t * acc);

    let tail = t * poly * (-abs_x * abs_x).exp();
    if x < T::zero() {
        T::from(2.0).unwrap() - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function Φ(x).
///
/// # Examples
/// ```
/// use pricer_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!((norm_cdf(0.35_f64) - 0.636_830_7).abs() < 1e-6);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    half * erfc(-x / T::from(std::f64::consts::SQRT_2).unwrap())
}

/// Standard normal probability density φ(x) = exp(-x²/2) / sqrt(2π).
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    T::from(FRAC_1_SQRT_2PI).unwrap() * (-half * x * x).exp()
}
