//! Filter resolution strategies: free-form request → [`QueryFilter`].

use chrono::NaiveDate;
use tracing::debug;

use super::error::QueryError;
use super::filter::{FilterCriterion, FilterField, FilterOperator, FilterValue, QueryFilter};
use crate::inventory::RiskMetric;

/// Turns a request into a structured filter.
///
/// Reduction never depends on how a filter was produced, so new strategies
/// plug into [`QueryEngine`](super::QueryEngine) without touching it.
pub trait FilterResolver {
    /// Resolves a request.
    fn resolve(&self, request: &str) -> Result<QueryFilter, QueryError>;
}

/// Resolves every request to the same filter, ignoring the text.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedResolver {
    asset: String,
    metric: RiskMetric,
    as_of: Option<NaiveDate>,
}

impl Default for FixedResolver {
    /// AAPL vega as of 2023-10-31.
    fn default() -> Self {
        Self {
            asset: "AAPL".to_string(),
            metric: RiskMetric::Vega,
            as_of: NaiveDate::from_ymd_opt(2023, 10, 31),
        }
    }
}

impl FixedResolver {
    /// Creates a resolver answering every request with `metric` for `asset`.
    pub fn new(asset: impl Into<String>, metric: RiskMetric) -> Self {
        Self {
            asset: asset.into(),
            metric,
            as_of: None,
        }
    }

    /// Sets the snapshot date.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }
}

impl FilterResolver for FixedResolver {
    fn resolve(&self, request: &str) -> Result<QueryFilter, QueryError> {
        debug!(request, asset = %self.asset, metric = %self.metric, "fixed resolution");
        let filter = QueryFilter::for_asset(self.asset.clone(), self.metric);
        Ok(match self.as_of {
            Some(date) => filter.with_as_of(date),
            None => filter,
        })
    }
}

/// Parses whitespace-separated `key<op>value` tokens.
///
/// Keys: `metric`, `date`, `asset`, `sector`, `subsector`, `desk`,
/// `position`, `spot`, `vol`. Operators: `=`, `!=`, `<`, `<=`, `>`, `>=`
/// (ordering only on `spot`/`vol`). Values containing spaces are quoted.
///
/// # Examples
/// ```
/// use pricer_risk::inventory::RiskMetric;
/// use pricer_risk::query::{FilterResolver, StructuredResolver};
///
/// let filter = StructuredResolver::default()
///     .resolve(r#"metric=SPOT_VOL_PNL subsector="Consumer Electronics" spot<=-0.15"#)
///     .unwrap();
/// assert_eq!(filter.metric(), RiskMetric::SpotVolPnl);
/// assert_eq!(filter.criteria().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructuredResolver {
    default_metric: Option<RiskMetric>,
}

impl StructuredResolver {
    /// Uses `metric` when the request names none.
    pub fn with_default_metric(metric: RiskMetric) -> Self {
        Self {
            default_metric: Some(metric),
        }
    }
}

impl FilterResolver for StructuredResolver {
    fn resolve(&self, request: &str) -> Result<QueryFilter, QueryError> {
        let mut metric = None;
        let mut as_of = None;
        let mut criteria = Vec::new();

        for token in tokenize(request)? {
            let (key, operator, value) = split_token(&token)?;
            match key.to_ascii_lowercase().as_str() {
                "metric" => {
                    require_equality(key, operator)?;
                    let parsed = value
                        .parse::<RiskMetric>()
                        .map_err(QueryError::UnknownMetric)?;
                    metric = Some(parsed);
                }
                "date" | "as_of" => {
                    require_equality(key, operator)?;
                    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                        .map_err(|_| QueryError::InvalidDate(value.to_string()))?;
                    as_of = Some(parsed);
                }
                _ => {
                    let field: FilterField = key.parse()?;
                    let value = if field.is_numeric() {
                        let number = value.parse::<f64>().map_err(|_| QueryError::InvalidValue {
                            field: field.name().to_string(),
                            value: value.to_string(),
                        })?;
                        FilterValue::Number(number)
                    } else {
                        FilterValue::Text(value.to_string())
                    };
                    criteria.push(FilterCriterion::new(field, operator, value)?);
                }
            }
        }

        let metric = metric
            .or(self.default_metric)
            .ok_or(QueryError::MissingMetric)?;
        let mut filter = criteria
            .into_iter()
            .fold(QueryFilter::new(metric), QueryFilter::with_criterion);
        if let Some(date) = as_of {
            filter = filter.with_as_of(date);
        }
        debug!(request, criteria = filter.criteria().len(), "structured resolution");
        Ok(filter)
    }
}

fn require_equality(key: &str, operator: FilterOperator) -> Result<(), QueryError> {
    if operator == FilterOperator::Eq {
        Ok(())
    } else {
        Err(QueryError::UnsupportedOperator {
            field: key.to_string(),
            operator: operator.symbol().to_string(),
        })
    }
}

/// Splits on whitespace outside double quotes; quotes are removed.
fn tokenize(request: &str) -> Result<Vec<String>, QueryError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in request.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if quoted {
        return Err(QueryError::MalformedToken(current));
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

fn split_token(token: &str) -> Result<(&str, FilterOperator, &str), QueryError> {
    let malformed = || QueryError::MalformedToken(token.to_string());

    let start = token
        .find(['=', '!', '<', '>'])
        .ok_or_else(malformed)?;
    let (key, rest) = token.split_at(start);
    let (symbol, operator) = FilterOperator::SYMBOLS
        .iter()
        .find(|(symbol, _)| rest.starts_with(symbol))
        .ok_or_else(malformed)?;
    let value = &rest[symbol.len()..];

    if key.is_empty() || value.is_empty() {
        return Err(malformed());
    }
    Ok((key, *operator, value))
}
