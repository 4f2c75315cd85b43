//! Error types for report classification and validation.
//!
//! Every rejection produced by [`ReportType::validate`](crate::core::ReportType::validate)
//! is a [`ReportError`]. Validation is fail-closed: the first violation found is
//! returned to the caller and nothing is retried or suppressed.

use crate::constraints::{Cardinality, GroupKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for report validation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A dimension or filter that no constraint in the report declares.
    #[error("{group} '{field}' is not supported by this report")]
    UnrecognizedField {
        /// Which request group the field was found in
        group: GroupKind,
        /// The offending field name
        field: String,
    },

    /// The requested dimensions break one of the report's cardinality rules.
    #[error("expected {} in dimensions, got {}", rule_text(.rule, .fields), present_text(.present))]
    InvalidDimensions {
        /// The violated rule
        rule: Cardinality,
        /// The fields the rule is declared over
        fields: Vec<String>,
        /// The rule's fields that were actually present
        present: Vec<String>,
    },

    /// The requested filters break one of the report's cardinality rules.
    #[error("expected {} in filters, got {}", rule_text(.rule, .fields), present_text(.present))]
    InvalidFilters {
        /// The violated rule
        rule: Cardinality,
        /// The fields the rule is declared over
        fields: Vec<String>,
        /// The rule's fields that were actually present
        present: Vec<String>,
    },

    /// A filter was given a value the report does not accept.
    #[error("filter '{field}' does not support the value '{value}'{}", expected_text(.expected))]
    UnsupportedFilterValue {
        /// The filter key
        field: String,
        /// The value supplied by the caller
        value: String,
        /// The only accepted value, when the filter is value-restricted
        expected: Option<String>,
    },

    /// The metric set is empty or names a metric outside the report's whitelist.
    #[error("invalid metrics: {message}")]
    InvalidMetrics {
        /// Human-readable error message
        message: String,
    },

    /// A sort option is unknown or has the wrong direction.
    #[error("invalid sort options: {message}")]
    InvalidSortOptions {
        /// Human-readable error message
        message: String,
    },

    /// The requested result count falls outside the report's window.
    #[error("max results must be between 1 and {limit}, got {requested}")]
    InvalidMaxResults {
        /// The value supplied by the caller
        requested: u32,
        /// The report's upper bound
        limit: u32,
    },

    /// A request could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The downstream executor failed after validation succeeded.
    #[error("Execution failed: {message}")]
    Execution {
        /// Detailed error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// A type alias for `Result<T, ReportError>`.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Discriminant of a [`ReportError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnrecognizedField,
    InvalidDimensions,
    InvalidFilters,
    UnsupportedFilterValue,
    InvalidMetrics,
    InvalidSortOptions,
    InvalidMaxResults,
    Serialization,
    Execution,
}

impl ErrorKind {
    /// Returns the snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnrecognizedField => "unrecognized_field",
            ErrorKind::InvalidDimensions => "invalid_dimensions",
            ErrorKind::InvalidFilters => "invalid_filters",
            ErrorKind::UnsupportedFilterValue => "unsupported_filter_value",
            ErrorKind::InvalidMetrics => "invalid_metrics",
            ErrorKind::InvalidSortOptions => "invalid_sort_options",
            ErrorKind::InvalidMaxResults => "invalid_max_results",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Execution => "execution",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ReportError {
    /// Creates an unrecognized field error.
    pub fn unrecognized(group: GroupKind, field: impl Into<String>) -> Self {
        Self::UnrecognizedField {
            group,
            field: field.into(),
        }
    }

    /// Creates the cardinality error matching `group`.
    pub fn cardinality(
        group: GroupKind,
        rule: Cardinality,
        fields: Vec<String>,
        present: Vec<String>,
    ) -> Self {
        match group {
            GroupKind::Dimension => Self::InvalidDimensions {
                rule,
                fields,
                present,
            },
            GroupKind::Filter => Self::InvalidFilters {
                rule,
                fields,
                present,
            },
        }
    }

    /// Creates an unsupported filter value error.
    pub fn unsupported_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: Option<String>,
    ) -> Self {
        Self::UnsupportedFilterValue {
            field: field.into(),
            value: value.into(),
            expected,
        }
    }

    /// Creates an invalid metrics error.
    pub fn invalid_metrics(message: impl Into<String>) -> Self {
        Self::InvalidMetrics {
            message: message.into(),
        }
    }

    /// Creates an invalid sort options error.
    pub fn invalid_sort_options(message: impl Into<String>) -> Self {
        Self::InvalidSortOptions {
            message: message.into(),
        }
    }

    /// Creates an execution error.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an execution error with a source error.
    pub fn execution_with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Execution {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Returns the payload-free kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnrecognizedField { .. } => ErrorKind::UnrecognizedField,
            Self::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            Self::InvalidFilters { .. } => ErrorKind::InvalidFilters,
            Self::UnsupportedFilterValue { .. } => ErrorKind::UnsupportedFilterValue,
            Self::InvalidMetrics { .. } => ErrorKind::InvalidMetrics,
            Self::InvalidSortOptions { .. } => ErrorKind::InvalidSortOptions,
            Self::InvalidMaxResults { .. } => ErrorKind::InvalidMaxResults,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Execution { .. } => ErrorKind::Execution,
        }
    }

    /// Returns true for errors caused by the caller's request rather than execution.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Serialization(_) | Self::Execution { .. })
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

fn quoted(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| format!("'{f}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn rule_text(rule: &Cardinality, fields: &[String]) -> String {
    format!("{} {}", rule.description(), quoted(fields))
}

fn present_text(present: &[String]) -> String {
    if present.is_empty() {
        "none".to_string()
    } else {
        quoted(present)
    }
}

fn expected_text(expected: &Option<String>) -> String {
    match expected {
        Some(value) => format!(" (expected '{value}')"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_message_reconstructs_rule() {
        let err = ReportError::cardinality(
            GroupKind::Dimension,
            Cardinality::ExactlyOne,
            vec!["day".into(), "month".into()],
            vec!["day".into(), "month".into()],
        );
        assert_eq!(
            err.to_string(),
            "expected exactly one of 'day', 'month' in dimensions, got 'day', 'month'"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    }

    #[test]
    fn test_cardinality_message_with_nothing_present() {
        let err = ReportError::cardinality(
            GroupKind::Filter,
            Cardinality::Required,
            vec!["video".into()],
            vec![],
        );
        assert_eq!(err.to_string(), "expected all of 'video' in filters, got none");
        assert_eq!(err.kind(), ErrorKind::InvalidFilters);
    }

    #[test]
    fn test_unsupported_value_message() {
        let err = ReportError::unsupported_value("country", "CA", Some("US".into()));
        assert_eq!(
            err.to_string(),
            "filter 'country' does not support the value 'CA' (expected 'US')"
        );

        let err = ReportError::unsupported_value("video", "a,b", None);
        assert_eq!(
            err.to_string(),
            "filter 'video' does not support the value 'a,b'"
        );
    }

    #[test]
    fn test_kind_classification() {
        assert!(ReportError::invalid_metrics("none given").is_validation());
        assert!(!ReportError::execution("boom").is_validation());
        assert_eq!(ErrorKind::InvalidMaxResults.to_string(), "invalid_max_results");
    }

    #[test]
    fn test_from_serde_json() {
        let err: ReportError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }
}
