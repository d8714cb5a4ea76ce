//! Scenario definitions for full-revaluation stress P&L.
//!
//! ```text
//! spot shocks  × vol shocks  →  SpotVolGrid  →  MarketScenario cells
//!   (8)           (7)              (56)          S·(1+ds), σ·(1+dv)
//! ```

mod grid;

pub use grid::{
    MarketScenario, ScenarioError, SpotVolGrid, STANDARD_SPOT_SHOCKS, STANDARD_VOL_SHOCKS,
};
