//! Risk inventory: records, tables and the aggregator that builds them.
//!
//! ```text
//! AssetBook ─┬─ OptionPosition ──→ DELTA, VEGA, GAMMA, 56 × SPOT_VOL_PNL
//!            ├─ OptionPosition ──→ ...
//!            └─ hedge (asset)  ──→ DELTA, 56 × SPOT_VOL_PNL
//!                                        │
//!                                        ▼
//!                                    RiskTable
//! ```

mod aggregator;
mod record;
mod table;

pub use aggregator::{AssetBook, InventoryError, RiskAggregator, POINT_GREEKS_PER_POSITION};
pub use record::{AssetInfo, PointGreek, RiskMetric, RiskRecord, RiskRow};
pub use table::RiskTable;
