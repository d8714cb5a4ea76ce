//! Option position definitions.
//!
//! - [`OptionDirection`]: call / put, mapped to φ = ±1
//! - [`PositionSide`]: long / short, mapped to ±1
//! - [`OptionPosition`]: validated holding of one option on one underlying

mod direction;
mod error;
mod position;

pub use direction::{OptionDirection, PositionSide};
pub use error::InstrumentError;
pub use position::OptionPosition;
