//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod generate;
pub mod price;
pub mod query;

use demo_inputs::position_source::{PositionSource, SyntheticPositionGenerator};
use demo_inputs::universe;
use pricer_risk::inventory::{RiskAggregator, RiskTable};
use pricer_risk::parallel::ParallelConfig;
use tracing::info;

use crate::config::RiskStoreConfig;
use crate::Result;

/// Generates the demo book and builds its risk table.
///
/// `seed` and `assets` override the configuration when given.
pub fn build_risk_table(
    config: &RiskStoreConfig,
    seed: Option<u64>,
    assets: Option<&[String]>,
) -> Result<RiskTable> {
    let assets = universe::select(assets.unwrap_or(config.assets.as_slice()))?;
    let market = config.market.model()?;
    let grid = config.grid.grid()?;

    let seed = seed.or(config.seed);
    let mut generator = match seed {
        Some(seed) => SyntheticPositionGenerator::with_seed(config.generator.clone(), seed)?,
        None => SyntheticPositionGenerator::new(config.generator.clone())?,
    };
    info!(
        assets = assets.len(),
        seed = ?seed,
        scenarios = grid.len(),
        "Building risk inventory"
    );

    let books = generator.books(&assets, market)?;
    let aggregator =
        RiskAggregator::new(grid).with_parallel(ParallelConfig::new(config.parallel_threshold));
    let table = aggregator.build(&books);

    Ok(match config.as_of {
        Some(date) => table.with_as_of(date),
        None => table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_risk_table_subset() {
        let config = RiskStoreConfig::default();
        let assets = vec!["AAPL".to_string(), "V".to_string()];
        let table = build_risk_table(&config, Some(5), Some(assets.as_slice())).unwrap();
        assert_eq!(table.assets(), vec!["AAPL", "V"]);
        assert_eq!(table.as_of(), None);
    }

    #[test]
    fn test_build_risk_table_seeded_reproducible() {
        let mut config = RiskStoreConfig::default();
        config.seed = Some(99);
        config.assets = vec!["MSFT".to_string()];
        let a = build_risk_table(&config, None, None).unwrap();
        let b = build_risk_table(&config, None, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_risk_table_stamps_date() {
        let mut config = RiskStoreConfig::default();
        config.as_of = chrono::NaiveDate::from_ymd_opt(2023, 10, 31);
        config.assets = vec!["AAPL".to_string()];
        let table = build_risk_table(&config, Some(1), None).unwrap();
        assert_eq!(table.as_of(), config.as_of);
    }

    #[test]
    fn test_build_risk_table_unknown_asset() {
        let config = RiskStoreConfig::default();
        let assets = vec!["IBM".to_string()];
        assert!(build_risk_table(&config, Some(1), Some(assets.as_slice())).is_err());
    }
}
