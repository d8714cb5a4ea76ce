//! Spot/volatility scenario grid.
//!
//! The grid is the Cartesian product of a list of relative spot shocks and a
//! list of relative volatility shocks. Each cell revalues a position at
//! `S·(1 + spot_shock)` and `σ·(1 + vol_shock)`.

use pricer_models::analytical::BlackScholes;
use thiserror::Error;

/// Relative spot shocks of the standard grid.
pub const STANDARD_SPOT_SHOCKS: [f64; 8] = [-0.99, -0.25, -0.15, -0.05, 0.0, 0.05, 0.15, 0.25];

/// Relative volatility shocks of the standard grid.
pub const STANDARD_VOL_SHOCKS: [f64; 7] = [-0.10, -0.05, -0.02, 0.0, 0.02, 0.05, 0.10];

/// Errors raised when building a [`SpotVolGrid`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScenarioError {
    /// No spot shocks were supplied.
    #[error("Scenario grid requires at least one spot shock")]
    EmptySpotShocks,

    /// No volatility shocks were supplied.
    #[error("Scenario grid requires at least one volatility shock")]
    EmptyVolShocks,

    /// A shock is non-finite or would make spot/volatility non-positive.
    #[error("Invalid {axis} shock: {value} (must be finite and > -1)")]
    InvalidShock {
        /// "spot" or "vol"
        axis: &'static str,
        /// The rejected shock
        value: f64,
    },
}

/// One cell of the grid: a joint relative spot and volatility shock.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketScenario {
    /// Relative spot move, e.g. -0.25 for a 25% drop
    pub spot_shock: f64,
    /// Relative volatility move, e.g. 0.10 for vol × 1.1
    pub vol_shock: f64,
}

impl MarketScenario {
    /// Creates a scenario cell.
    pub fn new(spot_shock: f64, vol_shock: f64) -> Self {
        Self {
            spot_shock,
            vol_shock,
        }
    }

    /// Market parameters after applying this cell's shocks.
    #[inline]
    pub fn apply(&self, market: &BlackScholes<f64>) -> BlackScholes<f64> {
        market.bumped(self.spot_shock, self.vol_shock)
    }
}

/// Ordered Cartesian product of spot and volatility shocks.
///
/// Cells are enumerated spot-major: for each spot shock in insertion order,
/// every volatility shock in insertion order.
///
/// # Examples
/// ```
/// use pricer_risk::scenarios::SpotVolGrid;
///
/// let grid = SpotVolGrid::standard();
/// assert_eq!(grid.len(), 56);
///
/// let first = grid.scenarios().next().unwrap();
/// assert_eq!((first.spot_shock, first.vol_shock), (-0.99, -0.10));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotVolGrid {
    spot_shocks: Vec<f64>,
    vol_shocks: Vec<f64>,
}

impl Default for SpotVolGrid {
    fn default() -> Self {
        Self::standard()
    }
}

impl SpotVolGrid {
    /// Creates a grid from explicit shock lists.
    ///
    /// # Errors
    /// Fails if either list is empty, or any shock is non-finite or <= -1.
    pub fn new(spot_shocks: Vec<f64>, vol_shocks: Vec<f64>) -> Result<Self, ScenarioError> {
        if spot_shocks.is_empty() {
            return Err(ScenarioError::EmptySpotShocks);
        }
        if vol_shocks.is_empty() {
            return Err(ScenarioError::EmptyVolShocks);
        }
        Self::check_axis("spot", &spot_shocks)?;
        Self::check_axis("vol", &vol_shocks)?;

        Ok(Self {
            spot_shocks,
            vol_shocks,
        })
    }

    /// The 8 × 7 grid used for the risk inventory.
    pub fn standard() -> Self {
        Self {
            spot_shocks: STANDARD_SPOT_SHOCKS.to_vec(),
            vol_shocks: STANDARD_VOL_SHOCKS.to_vec(),
        }
    }

    fn check_axis(axis: &'static str, shocks: &[f64]) -> Result<(), ScenarioError> {
        match shocks.iter().find(|s| !s.is_finite() || **s <= -1.0) {
            Some(&value) => Err(ScenarioError::InvalidShock { axis, value }),
            None => Ok(()),
        }
    }

    /// Spot shocks in insertion order.
    pub fn spot_shocks(&self) -> &[f64] {
        &self.spot_shocks
    }

    /// Volatility shocks in insertion order.
    pub fn vol_shocks(&self) -> &[f64] {
        &self.vol_shocks
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.spot_shocks.len() * self.vol_shocks.len()
    }

    /// Always false for a constructed grid.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every cell, spot-major.
    pub fn scenarios(&self) -> impl Iterator<Item = MarketScenario> + '_ {
        self.spot_shocks.iter().flat_map(move |&spot| {
            self.vol_shocks
                .iter()
                .map(move |&vol| MarketScenario::new(spot, vol))
        })
    }
}
