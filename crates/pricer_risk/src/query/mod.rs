//! Risk queries: resolve a request to a filter, then reduce the table.
//!
//! ```text
//! request ──FilterResolver──→ QueryFilter ──reduce──→ Σ RiskValue ──→ QueryResponse
//!            (Fixed | Structured)
//! ```

mod engine;
mod error;
mod filter;
mod resolver;

pub use engine::{reduce, QueryEngine, QueryResponse, Reduction, ResponseSummary, DEFAULT_SOURCE};
pub use error::QueryError;
pub use filter::{FilterCriterion, FilterField, FilterOperator, FilterValue, QueryFilter};
pub use resolver::{FilterResolver, FixedResolver, StructuredResolver};
