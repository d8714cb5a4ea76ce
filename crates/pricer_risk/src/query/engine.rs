//! Query reduction and responses.

use tracing::{debug, warn};

use super::error::QueryError;
use super::filter::QueryFilter;
use super::resolver::{FilterResolver, FixedResolver};
use crate::inventory::{RiskRecord, RiskTable};

/// Default source label attached to responses.
pub const DEFAULT_SOURCE: &str = "RiskStore";

/// Result of summing the records a filter selects.
#[derive(Clone, Debug, PartialEq)]
pub struct Reduction<'a> {
    /// Sum of matched risk values; 0 when nothing matched
    pub value: f64,
    /// Matched records in table order
    pub matched: Vec<&'a RiskRecord>,
}

impl Reduction<'_> {
    /// True when no record matched.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Sums the risk values of every record matching `filter`.
///
/// A filter whose date disagrees with the table stamp matches nothing.
pub fn reduce<'a>(table: &'a RiskTable, filter: &QueryFilter) -> Reduction<'a> {
    if !filter.applies_to(table) {
        return Reduction {
            value: 0.0,
            matched: Vec::new(),
        };
    }
    let matched: Vec<&RiskRecord> = table.iter().filter(|r| filter.matches(r)).collect();
    let value = matched.iter().fold(0.0, |acc, r| acc + r.value());
    Reduction { value, matched }
}

/// Answer to a risk question.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResponse {
    /// Human-readable explanation
    pub content: String,
    /// Where the number came from
    pub source: Option<String>,
    /// Reduced value
    pub value: f64,
    /// Matched records, when requested
    pub data: Option<Vec<RiskRecord>>,
}

impl QueryResponse {
    /// Projection carrying only what a chat front end displays.
    pub fn create_response(&self) -> ResponseSummary<'_> {
        ResponseSummary {
            content: &self.content,
            source: self.source.as_deref(),
        }
    }
}

/// `{content, source}` view of a [`QueryResponse`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResponseSummary<'a> {
    /// Explanation
    pub content: &'a str,
    /// Source label
    pub source: Option<&'a str>,
}

/// Resolves requests with a pluggable strategy and reduces them over a table.
///
/// # Examples
/// ```
/// use pricer_risk::inventory::RiskTable;
/// use pricer_risk::query::QueryEngine;
///
/// let response = QueryEngine::default()
///     .answer("What is my vega?", &RiskTable::new())
///     .unwrap();
/// assert_eq!(response.content, "Your Vega risk to AAPL is 0");
/// assert_eq!(response.source.as_deref(), Some("RiskStore"));
/// ```
#[derive(Clone, Debug)]
pub struct QueryEngine<R: FilterResolver = FixedResolver> {
    resolver: R,
    source: Option<String>,
    include_data: bool,
}

impl Default for QueryEngine<FixedResolver> {
    fn default() -> Self {
        Self::new(FixedResolver::default())
    }
}

impl<R: FilterResolver> QueryEngine<R> {
    /// Creates an engine with the default source label.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            source: Some(DEFAULT_SOURCE.to_string()),
            include_data: false,
        }
    }

    /// Overrides the source label; `None` omits it.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    /// Attaches matched records to responses.
    pub fn with_data(mut self, include_data: bool) -> Self {
        self.include_data = include_data;
        self
    }

    /// The resolution strategy.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolves `request` and answers it from `table`.
    ///
    /// # Errors
    /// Only resolution fails; an empty match answers 0.
    pub fn answer(&self, request: &str, table: &RiskTable) -> Result<QueryResponse, QueryError> {
        let filter = self.resolver.resolve(request)?;
        Ok(self.answer_filter(&filter, table))
    }

    /// Answers an already-resolved filter.
    pub fn answer_filter(&self, filter: &QueryFilter, table: &RiskTable) -> QueryResponse {
        let reduction = reduce(table, filter);
        let target = filter.target_description();
        if reduction.is_empty() {
            warn!(metric = %filter.metric(), target = %target, "query matched no risk records");
        } else {
            debug!(matched = reduction.matched.len(), value = reduction.value, "query reduced");
        }

        QueryResponse {
            content: format!(
                "Your {} risk to {} is {}",
                filter.metric().display_name(),
                target,
                reduction.value
            ),
            source: self.source.clone(),
            value: reduction.value,
            data: self
                .include_data
                .then(|| reduction.matched.into_iter().cloned().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{AssetInfo, PointGreek, RiskMetric};
    use crate::query::StructuredResolver;
    use crate::scenarios::MarketScenario;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn table() -> RiskTable {
        let aapl = Arc::new(AssetInfo::new("AAPL", "Technology", "Consumer Electronics", "Equity"));
        let msft = Arc::new(AssetInfo::new("MSFT", "Technology", "Software", "Equity"));
        RiskTable::from_records(vec![
            RiskRecord::point("AAPL Call 1.0 1.0Y", PointGreek::Vega, 1.5, &aapl),
            RiskRecord::point("AAPL Put 1.2 0.5Y", PointGreek::Vega, 2.25, &aapl),
            RiskRecord::point("MSFT Call 0.9 2.0Y", PointGreek::Vega, 10.0, &msft),
            RiskRecord::point("AAPL", PointGreek::Delta, -4.0, &aapl),
            RiskRecord::spot_vol("AAPL", MarketScenario::new(-0.25, 0.0), 1.0, &aapl),
            RiskRecord::spot_vol("AAPL", MarketScenario::new(0.25, 0.0), -1.0, &aapl),
        ])
    }

    #[test]
    fn test_reduce_sums_matches() {
        let table = table();
        let reduction = reduce(&table, &QueryFilter::for_asset("AAPL", RiskMetric::Vega));
        assert_eq!(reduction.value, 3.75);
        assert_eq!(reduction.matched.len(), 2);
    }

    #[test]
    fn test_reduce_absent_asset_is_zero() {
        let table = table();
        let reduction = reduce(&table, &QueryFilter::for_asset("GOOG", RiskMetric::Vega));
        assert_eq!(reduction.value, 0.0);
        assert!(reduction.is_empty());
    }

    #[test]
    fn test_reduce_respects_table_date() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();
        let other = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        let filter = QueryFilter::for_asset("AAPL", RiskMetric::Vega).with_as_of(date);

        assert_eq!(reduce(&table().with_as_of(date), &filter).value, 3.75);
        assert_eq!(reduce(&table().with_as_of(other), &filter).value, 0.0);
        assert_eq!(reduce(&table(), &filter).value, 3.75);
    }

    #[test]
    fn test_default_engine_answers_aapl_vega() {
        let response = QueryEngine::default().answer("anything", &table()).unwrap();
        assert_eq!(response.content, "Your Vega risk to AAPL is 3.75");
        assert_eq!(response.value, 3.75);
        assert_eq!(response.source.as_deref(), Some(DEFAULT_SOURCE));
        assert!(response.data.is_none());
    }

    #[test]
    fn test_structured_engine_with_data() {
        let engine = QueryEngine::new(StructuredResolver::default()).with_data(true);
        let response = engine
            .answer("metric=SPOT_VOL_PNL asset=AAPL spot<0", &table())
            .unwrap();
        assert_eq!(response.value, 1.0);
        assert_eq!(response.content, "Your Spot/Vol P&L risk to AAPL is 1");
        let data = response.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].spot_shock(), Some(-0.25));
    }

    #[test]
    fn test_portfolio_wide_query() {
        let engine = QueryEngine::new(StructuredResolver::default());
        let response = engine.answer("metric=vega", &table()).unwrap();
        assert_eq!(response.content, "Your Vega risk to the portfolio is 13.75");
    }

    #[test]
    fn test_resolution_errors_propagate() {
        let engine = QueryEngine::new(StructuredResolver::default());
        assert_eq!(
            engine.answer("asset=AAPL", &table()),
            Err(QueryError::MissingMetric)
        );
    }

    #[test]
    fn test_unmatched_asset_answers_positive_zero() {
        let response = QueryEngine::new(FixedResolver::new("GOOG", RiskMetric::Vega))
            .answer("", &table())
            .unwrap();
        assert_eq!(response.content, "Your Vega risk to GOOG is 0");
        assert!(response.value.is_sign_positive());

        let empty_table = RiskTable::new();
        let empty = reduce(&empty_table, &QueryFilter::new(RiskMetric::Delta));
        assert!(empty.value.is_sign_positive());
    }

    #[test]
    fn test_create_response_projection() {
        let engine = QueryEngine::default().with_source(None);
        let response = engine.answer("", &RiskTable::new()).unwrap();
        let summary = response.create_response();
        assert_eq!(summary.content, "Your Vega risk to AAPL is 0");
        assert_eq!(summary.source, None);
    }
}
