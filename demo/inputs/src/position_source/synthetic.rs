//! Synthetic option book generator.
//!
//! Draws a random number of positions per asset, then for each position:
//!
//! | Field     | Distribution                         |
//! |-----------|--------------------------------------|
//! | count     | `abs(Normal(20, 30))`, truncated     |
//! |           | and capped at 10 000                 |
//! | quantity  | `Normal(1e7, 20)`                    |
//! | direction | call / put, 50% each                 |
//! | side      | long / short, 50% each               |
//! | strike    | `Uniform(0.5, 2.0)`                  |
//! | tenor     | `Triangular(0, mode 0.5, 3)`, > 0    |

use pricer_models::instruments::{OptionDirection, OptionPosition, PositionSide};
use pricer_risk::inventory::AssetInfo;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Triangular};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PositionSource;
use crate::error::GeneratorError;

/// Upper bound on the positions drawn for one asset.
pub const MAX_POSITIONS_PER_ASSET: usize = 10_000;

fn default_count_mean() -> f64 {
    20.0
}

fn default_count_scale() -> f64 {
    30.0
}

fn default_quantity_mean() -> f64 {
    1e7
}

fn default_quantity_std() -> f64 {
    20.0
}

fn default_strike_min() -> f64 {
    0.5
}

fn default_strike_max() -> f64 {
    2.0
}

fn default_tenor_min() -> f64 {
    0.0
}

fn default_tenor_mode() -> f64 {
    0.5
}

fn default_tenor_max() -> f64 {
    3.0
}

/// Distribution parameters for [`SyntheticPositionGenerator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorParams {
    /// Mean of the position-count normal
    #[serde(default = "default_count_mean")]
    pub count_mean: f64,
    /// Standard deviation of the position-count normal
    #[serde(default = "default_count_scale")]
    pub count_scale: f64,
    /// Mean quantity
    #[serde(default = "default_quantity_mean")]
    pub quantity_mean: f64,
    /// Quantity standard deviation
    #[serde(default = "default_quantity_std")]
    pub quantity_std: f64,
    /// Lower strike bound (inclusive)
    #[serde(default = "default_strike_min")]
    pub strike_min: f64,
    /// Upper strike bound (exclusive)
    #[serde(default = "default_strike_max")]
    pub strike_max: f64,
    /// Tenor triangular lower bound
    #[serde(default = "default_tenor_min")]
    pub tenor_min: f64,
    /// Tenor triangular mode
    #[serde(default = "default_tenor_mode")]
    pub tenor_mode: f64,
    /// Tenor triangular upper bound
    #[serde(default = "default_tenor_max")]
    pub tenor_max: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            count_mean: default_count_mean(),
            count_scale: default_count_scale(),
            quantity_mean: default_quantity_mean(),
            quantity_std: default_quantity_std(),
            strike_min: default_strike_min(),
            strike_max: default_strike_max(),
            tenor_min: default_tenor_min(),
            tenor_mode: default_tenor_mode(),
            tenor_max: default_tenor_max(),
        }
    }
}

impl GeneratorParams {
    fn invalid(name: &'static str, reason: impl Into<String>) -> GeneratorError {
        GeneratorError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Checks that every distribution can be built and yields valid positions.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let cap = MAX_POSITIONS_PER_ASSET as f64;
        if !self.count_mean.is_finite() || self.count_mean.abs() > cap {
            return Err(Self::invalid(
                "count_mean",
                format!("must be finite with magnitude <= {}", cap),
            ));
        }
        if !(self.count_scale >= 0.0 && self.count_scale <= cap) {
            return Err(Self::invalid(
                "count_scale",
                format!("must lie in [0, {}], got {}", cap, self.count_scale),
            ));
        }
        if !self.quantity_mean.is_finite() {
            return Err(Self::invalid("quantity_mean", "must be finite"));
        }
        if !(self.quantity_std >= 0.0) || !self.quantity_std.is_finite() {
            return Err(Self::invalid(
                "quantity_std",
                format!("must be finite and >= 0, got {}", self.quantity_std),
            ));
        }
        if !(self.strike_min > 0.0) || !(self.strike_min < self.strike_max) {
            return Err(Self::invalid(
                "strike_range",
                format!(
                    "need 0 < min < max, got [{}, {})",
                    self.strike_min, self.strike_max
                ),
            ));
        }
        if !self.strike_max.is_finite() {
            return Err(Self::invalid("strike_max", "must be finite"));
        }
        if !(self.tenor_min <= self.tenor_mode && self.tenor_mode <= self.tenor_max)
            || !(self.tenor_min < self.tenor_max)
            || !(self.tenor_max > 0.0)
            || !self.tenor_max.is_finite()
        {
            return Err(Self::invalid(
                "tenor",
                format!(
                    "need min <= mode <= max, min < max and max > 0, got ({}, {}, {})",
                    self.tenor_min, self.tenor_mode, self.tenor_max
                ),
            ));
        }
        Ok(())
    }
}

/// Random option books for demonstration and tests.
///
/// Seeded generators are reproducible: the same seed and parameters yield the
/// same positions.
///
/// # Examples
/// ```
/// use demo_inputs::position_source::{GeneratorParams, PositionSource, SyntheticPositionGenerator};
/// use demo_inputs::universe;
///
/// let aapl = universe::lookup("AAPL").unwrap();
/// let mut generator = SyntheticPositionGenerator::with_seed(GeneratorParams::default(), 7).unwrap();
/// let positions = generator.positions(&aapl).unwrap();
/// assert!(positions.iter().all(|p| p.strike() >= 0.5 && p.strike() < 2.0));
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticPositionGenerator {
    params: GeneratorParams,
    rng: StdRng,
    count: Normal<f64>,
    quantity: Normal<f64>,
    tenor: Triangular<f64>,
}

impl SyntheticPositionGenerator {
    /// Creates a generator seeded from OS entropy.
    pub fn new(params: GeneratorParams) -> Result<Self, GeneratorError> {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Creates a reproducible generator.
    pub fn with_seed(params: GeneratorParams, seed: u64) -> Result<Self, GeneratorError> {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: GeneratorParams, rng: StdRng) -> Result<Self, GeneratorError> {
        params.validate()?;
        let count = Normal::new(params.count_mean, params.count_scale)
            .map_err(|e| GeneratorParams::invalid("count_scale", e.to_string()))?;
        let quantity = Normal::new(params.quantity_mean, params.quantity_std)
            .map_err(|e| GeneratorParams::invalid("quantity_std", e.to_string()))?;
        let tenor = Triangular::new(params.tenor_min, params.tenor_max, params.tenor_mode)
            .map_err(|e| GeneratorParams::invalid("tenor", e.to_string()))?;

        Ok(Self {
            params,
            rng,
            count,
            quantity,
            tenor,
        })
    }

    /// Distribution parameters.
    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    /// Number of positions for the next asset, at most
    /// [`MAX_POSITIONS_PER_ASSET`].
    pub fn draw_count(&mut self) -> usize {
        let count = self.count.sample(&mut self.rng).abs();
        count.min(MAX_POSITIONS_PER_ASSET as f64) as usize
    }

    fn draw_tenor(&mut self) -> f64 {
        loop {
            let tenor = self.tenor.sample(&mut self.rng);
            if tenor > 0.0 {
                return tenor;
            }
        }
    }

    fn draw_position(&mut self, asset: &str) -> Result<OptionPosition, GeneratorError> {
        let quantity = self.quantity.sample(&mut self.rng);
        let direction = if self.rng.gen_bool(0.5) {
            OptionDirection::Call
        } else {
            OptionDirection::Put
        };
        let side = if self.rng.gen_bool(0.5) {
            PositionSide::Long
        } else {
            PositionSide::Short
        };
        let strike = self
            .rng
            .gen_range(self.params.strike_min..self.params.strike_max);
        let tenor = self.draw_tenor();

        OptionPosition::new(asset, quantity, strike, tenor, direction, side)
            .map_err(GeneratorError::from)
    }
}

impl PositionSource for SyntheticPositionGenerator {
    fn positions(&mut self, asset: &AssetInfo) -> Result<Vec<OptionPosition>, GeneratorError> {
        let count = self.draw_count();
        debug!(asset = %asset.asset, count, "drawing synthetic positions");
        (0..count).map(|_| self.draw_position(&asset.asset)).collect()
    }
}
