//! Position sources feeding the risk aggregator.
//!
//! The aggregator only sees ordered [`AssetBook`]s; anything implementing
//! [`PositionSource`] can stand behind it.

mod synthetic;

pub use synthetic::{GeneratorParams, SyntheticPositionGenerator, MAX_POSITIONS_PER_ASSET};

use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::OptionPosition;
use pricer_risk::inventory::{AssetBook, AssetInfo};
use tracing::info;

use crate::error::GeneratorError;

/// Trait for position sources
pub trait PositionSource {
    /// Positions held in one asset, in booking order.
    fn positions(&mut self, asset: &AssetInfo) -> Result<Vec<OptionPosition>, GeneratorError>;

    /// One book per asset, in universe order, all priced off `market`.
    fn books(
        &mut self,
        universe: &[AssetInfo],
        market: BlackScholes<f64>,
    ) -> Result<Vec<AssetBook>, GeneratorError> {
        universe
            .iter()
            .map(|asset| {
                info!(asset = %asset.asset, "Generating risk inventory");
                let positions = self.positions(asset)?;
                Ok(AssetBook::new(asset.clone(), market, positions)?)
            })
            .collect()
    }
}

/// Fixed list of positions, handed out by asset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticPositionSource {
    positions: Vec<OptionPosition>,
}

impl StaticPositionSource {
    /// Creates a source over already-booked positions.
    pub fn new(positions: Vec<OptionPosition>) -> Self {
        Self { positions }
    }
}

impl From<Vec<OptionPosition>> for StaticPositionSource {
    fn from(positions: Vec<OptionPosition>) -> Self {
        Self::new(positions)
    }
}

impl PositionSource for StaticPositionSource {
    fn positions(&mut self, asset: &AssetInfo) -> Result<Vec<OptionPosition>, GeneratorError> {
        Ok(self
            .positions
            .iter()
            .filter(|p| p.asset() == asset.asset)
            .cloned()
            .collect())
    }
}
