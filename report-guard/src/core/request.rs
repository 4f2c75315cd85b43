//! The raw fields of an analytics report request.

use crate::catalog::ReportCatalog;
use crate::classifier;
use crate::core::ReportType;
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Marker prefixed to a sort key to request descending order.
pub const DESCENDING_MARKER: char = '-';

/// A report request as supplied by a caller.
///
/// Filters map a field name to its value; a value may itself be a
/// comma-separated list unless the matched report forbids it. A
/// `max_results` of `0` means "unspecified".
///
/// # Examples
///
/// ```rust
/// use report_guard::core::ReportRequest;
///
/// let request = ReportRequest::new()
///     .with_dimensions(["day"])
///     .with_filter("country", "US")
///     .with_metrics(["views", "likes"])
///     .with_sort_options(["-views"]);
///
/// assert_eq!(request.classify().name(), "Time-based activity");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportRequest {
    /// Requested dimensions, in request order
    pub dimensions: Vec<String>,
    /// Filter key to value mapping
    pub filters: BTreeMap<String, String>,
    /// Requested metrics, in request order
    pub metrics: Vec<String>,
    /// Sort keys, each optionally prefixed with [`DESCENDING_MARKER`]
    #[serde(alias = "sort")]
    pub sort_options: Vec<String>,
    /// Maximum number of result rows, `0` for the default
    pub max_results: u32,
}

impl ReportRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request from its five parts.
    pub fn from_parts<D, F, K, V, M, S>(
        dimensions: D,
        filters: F,
        metrics: M,
        sort_options: S,
        max_results: u32,
    ) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            dimensions: dimensions.into_iter().map(Into::into).collect(),
            filters: filters
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            metrics: metrics.into_iter().map(Into::into).collect(),
            sort_options: sort_options.into_iter().map(Into::into).collect(),
            max_results,
        }
    }

    /// Decodes a request from JSON.
    ///
    /// ```rust
    /// use report_guard::core::ReportRequest;
    ///
    /// let request = ReportRequest::from_json(
    ///     r#"{"dimensions": ["video"], "metrics": ["views"], "sort": ["-views"], "maxResults": 10}"#,
    /// ).unwrap();
    /// assert_eq!(request.max_results, 10);
    /// assert_eq!(request.sort_options, vec!["-views"]);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replaces the dimensions.
    pub fn with_dimensions<I>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    /// Adds or replaces a single filter.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Replaces the metrics.
    pub fn with_metrics<I>(mut self, metrics: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the sort options.
    pub fn with_sort_options<I>(mut self, sort_options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.sort_options = sort_options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the maximum number of results.
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Returns the distinct dimension names.
    pub fn dimension_set(&self) -> BTreeSet<&str> {
        self.dimensions.iter().map(String::as_str).collect()
    }

    /// Returns the distinct filter keys.
    pub fn filter_keys(&self) -> BTreeSet<&str> {
        self.filters.keys().map(String::as_str).collect()
    }

    /// Returns the distinct metric names.
    pub fn metric_set(&self) -> BTreeSet<&str> {
        self.metrics.iter().map(String::as_str).collect()
    }

    /// Selects the catalog report this request is attempting to match.
    ///
    /// Classification never fails; an unsuitable request is rejected later by
    /// [`ReportType::validate`].
    pub fn classify(&self) -> &'static ReportType {
        let id = classifier::determine(
            &self.dimension_set(),
            &self.filter_keys(),
            &self.metric_set(),
        );
        ReportCatalog::global().get(id)
    }
}

/// Splits a sort option into its key and whether it is descending.
pub fn parse_sort_option(option: &str) -> (&str, bool) {
    match option.strip_prefix(DESCENDING_MARKER) {
        Some(key) => (key, true),
        None => (option, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let request = ReportRequest::new()
            .with_dimensions(["day", "day"])
            .with_filter("video", "abc")
            .with_filter("video", "def")
            .with_metrics(["views"])
            .with_sort_options(["-views"])
            .with_max_results(5);

        assert_eq!(request.dimensions, vec!["day", "day"]);
        assert_eq!(request.dimension_set().len(), 1);
        assert_eq!(request.filters.get("video").map(String::as_str), Some("def"));
        assert_eq!(request.max_results, 5);
    }

    #[test]
    fn test_from_parts() {
        let request = ReportRequest::from_parts(
            ["country"],
            [("continent", "002")],
            ["views"],
            Vec::<String>::new(),
            0,
        );
        assert_eq!(request.filter_keys().into_iter().collect::<Vec<_>>(), vec!["continent"]);
        assert!(request.sort_options.is_empty());
    }

    #[test]
    fn test_from_json_defaults_missing_fields() {
        let request = ReportRequest::from_json(r#"{"metrics": ["views"]}"#).unwrap();
        assert!(request.dimensions.is_empty());
        assert!(request.filters.is_empty());
        assert_eq!(request.max_results, 0);
    }

    #[test]
    fn test_from_json_rejects_negative_max_results() {
        let err = ReportRequest::from_json(r#"{"maxResults": -1}"#).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Serialization);
    }

    #[test]
    fn test_parse_sort_option() {
        assert_eq!(parse_sort_option("-views"), ("views", true));
        assert_eq!(parse_sort_option("views"), ("views", false));
        assert_eq!(parse_sort_option("-"), ("", true));
    }
}
