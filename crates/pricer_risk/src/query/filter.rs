//! Structured filters over the risk table.
//!
//! A [`QueryFilter`] selects one metric and any number of
//! `{field, operator, value}` criteria. Equality criteria on the same field
//! are alternatives (`asset=V asset=MA`); every other criterion must hold.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::error::QueryError;
use crate::inventory::{RiskMetric, RiskRecord, RiskTable};

/// Tolerance for numeric equality on shock coordinates.
const SHOCK_TOLERANCE: f64 = 1e-12;

/// Record attribute a criterion tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Underlying ticker
    Asset,
    /// Sector
    Sector,
    /// Subsector
    Subsector,
    /// Desk
    Desk,
    /// Position label
    Position,
    /// Relative spot shock (SPOT_VOL_PNL records only)
    SpotShock,
    /// Relative volatility shock (SPOT_VOL_PNL records only)
    VolShock,
}

impl FilterField {
    /// Canonical lower-case key.
    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Asset => "asset",
            FilterField::Sector => "sector",
            FilterField::Subsector => "subsector",
            FilterField::Desk => "desk",
            FilterField::Position => "position",
            FilterField::SpotShock => "spot",
            FilterField::VolShock => "vol",
        }
    }

    /// True for the shock coordinates.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FilterField::SpotShock | FilterField::VolShock)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asset" | "ticker" => Ok(FilterField::Asset),
            "sector" => Ok(FilterField::Sector),
            "subsector" | "sub_sector" => Ok(FilterField::Subsector),
            "desk" => Ok(FilterField::Desk),
            "position" => Ok(FilterField::Position),
            "spot" | "spot_shock" | "spotmove" => Ok(FilterField::SpotShock),
            "vol" | "vol_shock" | "volmove" => Ok(FilterField::VolShock),
            other => Err(QueryError::UnknownField(other.to_string())),
        }
    }
}

/// Comparison operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl FilterOperator {
    /// Symbols in the order a tokenizer must try them (two-character first).
    pub const SYMBOLS: [(&'static str, FilterOperator); 6] = [
        ("!=", FilterOperator::Ne),
        ("<=", FilterOperator::Le),
        (">=", FilterOperator::Ge),
        ("=", FilterOperator::Eq),
        ("<", FilterOperator::Lt),
        (">", FilterOperator::Gt),
    ];

    /// Operator symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "=",
            FilterOperator::Ne => "!=",
            FilterOperator::Lt => "<",
            FilterOperator::Le => "<=",
            FilterOperator::Gt => ">",
            FilterOperator::Ge => ">=",
        }
    }

    /// True for `<`, `<=`, `>`, `>=`.
    pub fn is_ordering(&self) -> bool {
        !matches!(self, FilterOperator::Eq | FilterOperator::Ne)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Criterion operand.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    /// Compared case-insensitively
    Text(String),
    /// Compared with a small absolute tolerance
    Number(f64),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(text) => f.write_str(text),
            FilterValue::Number(number) => write!(f, "{}", number),
        }
    }
}

/// One `{field, operator, value}` test.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCriterion {
    field: FilterField,
    operator: FilterOperator,
    value: FilterValue,
}

impl FilterCriterion {
    /// Creates a criterion.
    ///
    /// # Errors
    /// - [`QueryError::UnsupportedOperator`] for an ordering operator on a text field
    /// - [`QueryError::InvalidValue`] when the value kind does not fit the field
    pub fn new(
        field: FilterField,
        operator: FilterOperator,
        value: FilterValue,
    ) -> Result<Self, QueryError> {
        match (&value, field.is_numeric()) {
            (FilterValue::Number(_), true) => {}
            (FilterValue::Text(_), false) => {
                if operator.is_ordering() {
                    return Err(QueryError::UnsupportedOperator {
                        field: field.name().to_string(),
                        operator: operator.symbol().to_string(),
                    });
                }
            }
            _ => {
                return Err(QueryError::InvalidValue {
                    field: field.name().to_string(),
                    value: value.to_string(),
                })
            }
        }
        Ok(Self {
            field,
            operator,
            value,
        })
    }

    /// Equality on a text field.
    pub fn text_eq(field: FilterField, value: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(field, FilterOperator::Eq, FilterValue::Text(value.into()))
    }

    /// Field under test.
    pub fn field(&self) -> FilterField {
        self.field
    }

    /// Operator.
    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// Operand.
    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// Whether a record satisfies this criterion.
    ///
    /// Shock criteria never match records without a scenario.
    pub fn matches(&self, record: &RiskRecord) -> bool {
        match (&self.value, self.field) {
            (FilterValue::Text(expected), field) => {
                let actual = match field {
                    FilterField::Asset => record.asset(),
                    FilterField::Sector => record.sector(),
                    FilterField::Subsector => record.subsector(),
                    FilterField::Desk => record.desk(),
                    FilterField::Position => record.position(),
                    FilterField::SpotShock | FilterField::VolShock => return false,
                };
                let equal = actual.eq_ignore_ascii_case(expected);
                match self.operator {
                    FilterOperator::Ne => !equal,
                    _ => equal,
                }
            }
            (FilterValue::Number(expected), FilterField::SpotShock) => record
                .spot_shock()
                .is_some_and(|actual| compare(actual, self.operator, *expected)),
            (FilterValue::Number(expected), FilterField::VolShock) => record
                .vol_shock()
                .is_some_and(|actual| compare(actual, self.operator, *expected)),
            (FilterValue::Number(_), _) => false,
        }
    }
}

fn compare(actual: f64, operator: FilterOperator, expected: f64) -> bool {
    let equal = (actual - expected).abs() <= SHOCK_TOLERANCE;
    match operator {
        FilterOperator::Eq => equal,
        FilterOperator::Ne => !equal,
        FilterOperator::Lt => actual < expected && !equal,
        FilterOperator::Le => actual < expected || equal,
        FilterOperator::Gt => actual > expected && !equal,
        FilterOperator::Ge => actual > expected || equal,
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator, self.value)
    }
}

/// Resolved query: one metric, an optional snapshot date, and criteria.
///
/// # Examples
/// ```
/// use pricer_risk::inventory::RiskMetric;
/// use pricer_risk::query::QueryFilter;
///
/// let filter = QueryFilter::for_asset("AAPL", RiskMetric::Vega);
/// assert_eq!(filter.target_description(), "AAPL");
/// assert_eq!(QueryFilter::new(RiskMetric::Delta).target_description(), "the portfolio");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct QueryFilter {
    metric: RiskMetric,
    as_of: Option<NaiveDate>,
    criteria: Vec<FilterCriterion>,
}

impl QueryFilter {
    /// Filter on a metric across the whole table.
    pub fn new(metric: RiskMetric) -> Self {
        Self {
            metric,
            as_of: None,
            criteria: Vec::new(),
        }
    }

    /// Filter on a metric for one asset.
    pub fn for_asset(asset: impl Into<String>, metric: RiskMetric) -> Self {
        Self::new(metric).with_criterion(FilterCriterion {
            field: FilterField::Asset,
            operator: FilterOperator::Eq,
            value: FilterValue::Text(asset.into()),
        })
    }

    /// Adds a criterion.
    pub fn with_criterion(mut self, criterion: FilterCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Sets the snapshot date.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Metric selected.
    pub fn metric(&self) -> RiskMetric {
        self.metric
    }

    /// Snapshot date requested.
    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }

    /// Criteria in insertion order.
    pub fn criteria(&self) -> &[FilterCriterion] {
        &self.criteria
    }

    /// Whether the table's snapshot can answer this filter.
    ///
    /// A date only constrains when both the filter and the table carry one.
    pub fn applies_to(&self, table: &RiskTable) -> bool {
        match (self.as_of, table.as_of()) {
            (Some(wanted), Some(stamped)) => wanted == stamped,
            _ => true,
        }
    }

    /// Whether a record matches the metric and the criteria.
    pub fn matches(&self, record: &RiskRecord) -> bool {
        record.metric() == self.metric
            && self.criteria.iter().all(|criterion| {
                if criterion.operator != FilterOperator::Eq {
                    return criterion.matches(record);
                }
                self.criteria
                    .iter()
                    .filter(|c| c.field == criterion.field && c.operator == FilterOperator::Eq)
                    .any(|c| c.matches(record))
            })
    }

    /// Human-readable target for explanations.
    pub fn target_description(&self) -> String {
        let equal_text = |field: FilterField| -> Vec<&str> {
            self.criteria
                .iter()
                .filter(|c| c.field == field && c.operator == FilterOperator::Eq)
                .filter_map(|c| match &c.value {
                    FilterValue::Text(text) => Some(text.as_str()),
                    FilterValue::Number(_) => None,
                })
                .collect()
        };

        let assets = equal_text(FilterField::Asset);
        if !assets.is_empty() {
            return assets.join(", ");
        }
        for field in [
            FilterField::Position,
            FilterField::Subsector,
            FilterField::Sector,
            FilterField::Desk,
        ] {
            let values = equal_text(field);
            if !values.is_empty() {
                return format!("the {} {}", values.join(", "), field.name());
            }
        }
        "the portfolio".to_string()
    }
}
