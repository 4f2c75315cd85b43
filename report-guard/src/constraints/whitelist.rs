//! Whitelist groups for metrics and sort options.

use crate::core::{parse_sort_option, Constraint, ConstraintMetadata, ReportRequest};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

fn quoted<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values
        .into_iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The metrics a report accepts.
///
/// A request must name at least one metric, and every metric it names must be
/// in the whitelist.
///
/// # Examples
///
/// ```rust
/// use report_guard::constraints::Metrics;
/// use report_guard::core::{Constraint, ReportRequest};
///
/// let metrics = Metrics::new(["views", "likes"]);
/// assert!(metrics.evaluate(&ReportRequest::new().with_metrics(["views"])).is_ok());
/// assert!(metrics.evaluate(&ReportRequest::new().with_metrics(["shares"])).is_err());
/// assert!(metrics.evaluate(&ReportRequest::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    values: Vec<String>,
}

impl Metrics {
    /// Creates a metrics whitelist.
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the whitelisted metrics in declaration order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns true if `metric` is whitelisted.
    pub fn contains(&self, metric: &str) -> bool {
        self.values.iter().any(|v| v == metric)
    }
}

impl Constraint for Metrics {
    #[instrument(skip(self, request), fields(requested = request.metrics.len()))]
    fn evaluate(&self, request: &ReportRequest) -> Result<()> {
        let requested = request.metric_set();
        if requested.is_empty() {
            return Err(ReportError::invalid_metrics("expected at least one metric"));
        }

        let unknown: BTreeSet<&str> = requested
            .into_iter()
            .filter(|m| !self.contains(m))
            .collect();
        if !unknown.is_empty() {
            return Err(ReportError::invalid_metrics(format!(
                "{} not supported by this report",
                quoted(unknown)
            )));
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "metrics"
    }

    fn metadata(&self) -> ConstraintMetadata {
        ConstraintMetadata::for_fields(self.values.iter().cloned())
            .with_description(format!("one or more of {} metrics", self.values.len()))
            .with_custom("constraint_type", "whitelist")
    }
}

/// The sort keys a report accepts.
///
/// Each requested key, after stripping a leading descending marker, must be
/// whitelisted. A descending-only group additionally rejects any key without
/// the marker, and a required group rejects an empty sort.
///
/// # Examples
///
/// ```rust
/// use report_guard::constraints::SortOptions;
/// use report_guard::core::{Constraint, ReportRequest};
///
/// let sort = SortOptions::new(["views"]).descending_only();
/// assert!(sort.evaluate(&ReportRequest::new().with_sort_options(["-views"])).is_ok());
/// assert!(sort.evaluate(&ReportRequest::new().with_sort_options(["views"])).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    values: Vec<String>,
    descending_only: bool,
    required: bool,
}

impl SortOptions {
    /// Creates a sort whitelist.
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            descending_only: false,
            required: false,
        }
    }

    /// Creates a sort whitelist equal to a metrics whitelist.
    pub fn from_metrics(metrics: &Metrics) -> Self {
        Self::new(metrics.values().iter().cloned())
    }

    /// Only accept keys carrying the descending marker.
    pub fn descending_only(mut self) -> Self {
        self.descending_only = true;
        self
    }

    /// Reject requests with no sort options.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_descending_only(&self) -> bool {
        self.descending_only
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns true if `key` (without marker) is whitelisted.
    pub fn contains(&self, key: &str) -> bool {
        self.values.iter().any(|v| v == key)
    }
}

impl Constraint for SortOptions {
    #[instrument(skip(self, request), fields(descending_only = self.descending_only))]
    fn evaluate(&self, request: &ReportRequest) -> Result<()> {
        if self.required && request.sort_options.is_empty() {
            return Err(ReportError::invalid_sort_options(
                "expected at least one sort option",
            ));
        }

        let parsed: Vec<(&str, bool)> = request
            .sort_options
            .iter()
            .map(|option| parse_sort_option(option))
            .collect();

        let unknown: BTreeSet<&str> = parsed
            .iter()
            .map(|(key, _)| *key)
            .filter(|key| !self.contains(key))
            .collect();
        if !unknown.is_empty() {
            return Err(ReportError::invalid_sort_options(format!(
                "{} not supported by this report",
                quoted(unknown)
            )));
        }

        if self.descending_only {
            let ascending: Vec<&str> = parsed
                .iter()
                .filter(|(_, descending)| !descending)
                .map(|(key, _)| *key)
                .collect();
            if !ascending.is_empty() {
                return Err(ReportError::invalid_sort_options(format!(
                    "this report only supports descending sorts, but {} ascending",
                    quoted(ascending)
                )));
            }
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "sort_options"
    }

    fn metadata(&self) -> ConstraintMetadata {
        ConstraintMetadata::for_fields(self.values.iter().cloned())
            .with_description(if self.descending_only {
                "descending sort over whitelisted keys"
            } else {
                "sort over whitelisted keys"
            })
            .with_custom("constraint_type", "whitelist")
            .with_custom("required", self.required.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn sorted(options: &[&str]) -> ReportRequest {
        ReportRequest::new().with_sort_options(options.iter().copied())
    }

    #[test]
    fn test_metrics_reports_every_unknown_metric() {
        let metrics = Metrics::new(["views", "likes"]);
        let err = metrics
            .evaluate(&ReportRequest::new().with_metrics(["views", "shares", "comments"]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid metrics: 'comments', 'shares' not supported by this report"
        );
    }

    #[test]
    fn test_metrics_empty_request() {
        let err = Metrics::new(["views"])
            .evaluate(&ReportRequest::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMetrics);
    }

    #[test]
    fn test_sort_defaults_to_metrics_whitelist() {
        let sort = SortOptions::from_metrics(&Metrics::new(["views", "likes"]));
        assert!(sort.evaluate(&sorted(&["views", "-likes"])).is_ok());
        assert!(sort.evaluate(&sorted(&[])).is_ok());
        assert_eq!(
            sort.evaluate(&sorted(&["shares"])).unwrap_err().kind(),
            ErrorKind::InvalidSortOptions
        );
    }

    #[test]
    fn test_descending_only() {
        let sort = SortOptions::new(["views", "estimatedMinutesWatched"]).descending_only();
        assert!(sort.is_descending_only());
        assert!(sort.evaluate(&sorted(&["-views"])).is_ok());

        let err = sort.evaluate(&sorted(&["-views", "views"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid sort options: this report only supports descending sorts, but 'views' ascending"
        );
    }

    #[test]
    fn test_unknown_key_reported_before_direction() {
        let sort = SortOptions::new(["views"]).descending_only();
        let err = sort.evaluate(&sorted(&["likes"])).unwrap_err();
        assert!(err.to_string().contains("'likes' not supported"));
    }

    #[test]
    fn test_bare_marker_is_unknown() {
        let sort = SortOptions::new(["views"]);
        assert!(sort.evaluate(&sorted(&["-"])).is_err());
    }

    #[test]
    fn test_required_sort() {
        let sort = SortOptions::new(["views"]).descending_only().required();
        assert!(sort.is_required());
        assert_eq!(
            sort.evaluate(&sorted(&[])).unwrap_err().to_string(),
            "invalid sort options: expected at least one sort option"
        );
    }
}
