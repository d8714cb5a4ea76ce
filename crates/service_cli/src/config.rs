//! riskstore configuration management.
//!
//! Loads `riskstore.toml` with serde defaults for every field, then applies
//! environment variable overrides. A missing file yields the defaults.

use chrono::NaiveDate;
use demo_inputs::position_source::GeneratorParams;
use demo_inputs::universe;
use pricer_models::analytical::{AnalyticalError, BlackScholes};
use pricer_risk::parallel::DEFAULT_PARALLEL_THRESHOLD;
use pricer_risk::query::DEFAULT_SOURCE;
use pricer_risk::scenarios::{ScenarioError, SpotVolGrid, STANDARD_SPOT_SHOCKS, STANDARD_VOL_SHOCKS};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Market parameters shared by every demo asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketConfig {
    /// Spot price
    #[serde(default = "default_spot")]
    pub spot: f64,
    /// Continuously compounded risk-free rate
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Black-Scholes volatility
    #[serde(default = "default_volatility")]
    pub volatility: f64,
}

fn default_spot() -> f64 {
    1.0
}

fn default_rate() -> f64 {
    0.05
}

fn default_volatility() -> f64 {
    0.2
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            spot: default_spot(),
            rate: default_rate(),
            volatility: default_volatility(),
        }
    }
}

impl MarketConfig {
    /// Validated pricing model.
    pub fn model(&self) -> Result<BlackScholes<f64>, AnalyticalError> {
        BlackScholes::new(self.spot, self.rate, self.volatility)
    }
}

/// Scenario grid shocks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    /// Relative spot shocks
    #[serde(default = "default_spot_shocks")]
    pub spot_shocks: Vec<f64>,
    /// Relative volatility shocks
    #[serde(default = "default_vol_shocks")]
    pub vol_shocks: Vec<f64>,
}

fn default_spot_shocks() -> Vec<f64> {
    STANDARD_SPOT_SHOCKS.to_vec()
}

fn default_vol_shocks() -> Vec<f64> {
    STANDARD_VOL_SHOCKS.to_vec()
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spot_shocks: default_spot_shocks(),
            vol_shocks: default_vol_shocks(),
        }
    }
}

impl GridConfig {
    /// Validated scenario grid.
    pub fn grid(&self) -> Result<SpotVolGrid, ScenarioError> {
        SpotVolGrid::new(self.spot_shocks.clone(), self.vol_shocks.clone())
    }
}

/// riskstore configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RiskStoreConfig {
    /// Market parameters
    #[serde(default)]
    pub market: MarketConfig,

    /// Scenario grid
    #[serde(default)]
    pub grid: GridConfig,

    /// Synthetic book distributions
    #[serde(default)]
    pub generator: GeneratorParams,

    /// RNG seed; entropy when absent
    pub seed: Option<u64>,

    /// Asset subset; whole universe when empty
    #[serde(default)]
    pub assets: Vec<String>,

    /// Snapshot date stamped on generated tables
    pub as_of: Option<NaiveDate>,

    /// Source label attached to query answers
    #[serde(default = "default_source")]
    pub source: String,

    /// Minimum asset count before aggregating in parallel
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Unparseable `RISKSTORE_SEED` value, reported by `validate`
    #[serde(skip)]
    rejected_seed: Option<String>,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for RiskStoreConfig {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            grid: GridConfig::default(),
            generator: GeneratorParams::default(),
            seed: None,
            assets: Vec::new(),
            as_of: None,
            source: default_source(),
            parallel_threshold: default_parallel_threshold(),
            log_level: default_log_level(),
            rejected_seed: None,
        }
    }
}

impl RiskStoreConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(seed) = lookup("RISKSTORE_SEED") {
            match seed.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => self.rejected_seed = Some(seed),
            }
        }

        if let Some(log_level) = lookup("RISKSTORE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(assets) = lookup("RISKSTORE_ASSETS") {
            self.assets = split_assets(&assets);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.market.model() {
            errors.push(format!("Invalid market: {}", e));
        }

        if let Err(e) = self.grid.grid() {
            errors.push(format!("Invalid grid: {}", e));
        }

        if let Err(e) = self.generator.validate() {
            errors.push(format!("Invalid generator: {}", e));
        }

        if let Some(seed) = &self.rejected_seed {
            errors.push(format!("Invalid RISKSTORE_SEED '{}': expected an unsigned integer", seed));
        }

        for asset in &self.assets {
            if universe::lookup(asset).is_none() {
                errors.push(format!("Unknown asset '{}' in assets", asset));
            }
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load with defaults for a missing file, apply env overrides, and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Splits a comma-separated ticker list.
pub fn split_assets(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
