//! Constraint trait and related types for validation rules.

use crate::core::ReportRequest;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

/// Metadata associated with a constraint.
///
/// This struct provides extensible metadata that can be attached to constraints
/// for better observability and reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintMetadata {
    /// The field(s) this constraint operates on
    pub fields: Vec<String>,
    /// A human-readable description of what this constraint validates
    pub description: Option<String>,
    /// Additional key-value pairs for custom metadata
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub custom: HashMap<String, String>,
}

impl ConstraintMetadata {
    /// Creates a new metadata instance with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata for a constraint over several fields.
    pub fn for_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            description: None,
            custom: HashMap::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a custom metadata entry.
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }
}

/// A validation rule that can be evaluated against a report request.
///
/// Implementations are stateless and immutable once built, so a single
/// instance can be shared by any number of concurrent callers.
///
/// # Examples
///
/// ```rust
/// use report_guard::core::{Constraint, ConstraintMetadata, ReportRequest};
/// use report_guard::prelude::*;
///
/// #[derive(Debug)]
/// struct NoFilters;
///
/// impl Constraint for NoFilters {
///     fn evaluate(&self, request: &ReportRequest) -> Result<()> {
///         match request.filters.keys().next() {
///             Some(key) => Err(ReportError::unrecognized(GroupKind::Filter, key.clone())),
///             None => Ok(()),
///         }
///     }
///
///     fn name(&self) -> &str {
///         "no_filters"
///     }
/// }
///
/// let request = ReportRequest::new().with_filter("video", "abc");
/// assert!(NoFilters.evaluate(&request).is_err());
/// ```
pub trait Constraint: Debug + Send + Sync {
    /// Evaluates the constraint, returning the first violation found.
    fn evaluate(&self, request: &ReportRequest) -> Result<()>;

    /// Returns the name of the constraint.
    fn name(&self) -> &str;

    /// Returns the metadata associated with this constraint.
    ///
    /// The default implementation returns empty metadata.
    fn metadata(&self) -> ConstraintMetadata {
        ConstraintMetadata::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_metadata_builder() {
        let metadata = ConstraintMetadata::for_fields(["day", "month"])
            .with_description("exactly one of 'day', 'month'")
            .with_custom("group", "dimensions");

        assert_eq!(metadata.fields, vec!["day", "month"]);
        assert_eq!(
            metadata.description,
            Some("exactly one of 'day', 'month'".to_string())
        );
        assert_eq!(metadata.custom.get("group"), Some(&"dimensions".to_string()));
    }

    #[test]
    fn test_constraint_metadata_serializes_without_empty_custom() {
        let metadata = ConstraintMetadata::for_fields(["video"]);
        let json = serde_json::to_value(&metadata).unwrap();
        assert!(json.get("custom").is_none());
        assert_eq!(json["fields"][0], "video");
    }
}
