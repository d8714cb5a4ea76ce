//! Error types for demo book generation.

use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::InstrumentError;
use pricer_risk::inventory::InventoryError;
use thiserror::Error;

/// Errors raised while building demo asset books.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeneratorError {
    /// Ticker is not part of the demo universe.
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    /// A distribution parameter is out of range.
    #[error("Invalid generator parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A generated position failed validation.
    #[error("Invalid position: {0}")]
    Instrument(#[from] InstrumentError),

    /// Market parameters failed validation.
    #[error("Invalid market parameters: {0}")]
    Analytical(#[from] AnalyticalError),

    /// A source handed out positions on the wrong asset.
    #[error("Invalid asset book: {0}")]
    Inventory(#[from] InventoryError),
}
