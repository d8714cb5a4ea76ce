//! Error types for query resolution.

use thiserror::Error;

/// Errors raised while turning a request into a [`QueryFilter`](super::QueryFilter).
///
/// An empty result is not an error: a filter that matches nothing reduces to
/// zero.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    /// Filter key not recognised.
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    /// Metric name not recognised.
    #[error("Unknown risk metric: {0}")]
    UnknownMetric(String),

    /// Value could not be interpreted for its field.
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Raw value
        value: String,
    },

    /// Date not in `YYYY-MM-DD` form.
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// Request did not name a metric.
    #[error("Query must specify a metric")]
    MissingMetric,

    /// Token is not of the form `key<op>value`.
    #[error("Malformed filter token: {0}")]
    MalformedToken(String),

    /// Ordering operator applied to a text field.
    #[error("Operator {operator} is not supported for field {field}")]
    UnsupportedOperator {
        /// Field name
        field: String,
        /// Operator symbol
        operator: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", QueryError::UnknownMetric("THETA".into())),
            "Unknown risk metric: THETA"
        );
        assert_eq!(
            format!(
                "{}",
                QueryError::InvalidValue {
                    field: "spot".into(),
                    value: "abc".into()
                }
            ),
            "Invalid value for spot: abc"
        );
        assert_eq!(
            format!(
                "{}",
                QueryError::UnsupportedOperator {
                    field: "asset".into(),
                    operator: "<".into()
                }
            ),
            "Operator < is not supported for field asset"
        );
        assert_eq!(
            format!("{}", QueryError::MissingMetric),
            "Query must specify a metric"
        );
    }
}
