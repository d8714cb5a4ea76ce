//! Error types for the riskstore CLI.

use demo_inputs::GeneratorError;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_risk::query::QueryError;
use pricer_risk::scenarios::ScenarioError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Book generation failed
    #[error("Generation error: {0}")]
    Generator(#[from] GeneratorError),

    /// Query could not be resolved
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Invalid market parameters
    #[error("Pricing error: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Invalid option terms
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Invalid scenario grid
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
