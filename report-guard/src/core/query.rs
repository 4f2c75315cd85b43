//! Wire-form query parameters handed to an executor.

use crate::core::ReportRequest;
use serde::{Deserialize, Serialize};

/// A validated request rendered into the hosting API's parameter strings.
///
/// Dimensions, metrics and sort keys are comma-joined in request order;
/// filters are rendered as `key==value` pairs joined by `;`.
///
/// ```rust
/// use report_guard::core::{QueryParams, ReportRequest};
///
/// let request = ReportRequest::new()
///     .with_dimensions(["day"])
///     .with_filter("video", "abc")
///     .with_filter("country", "US")
///     .with_metrics(["views", "likes"]);
///
/// let params = QueryParams::from_request(&request);
/// assert_eq!(params.dimensions.as_deref(), Some("day"));
/// assert_eq!(params.filters.as_deref(), Some("country==US;video==abc"));
/// assert_eq!(params.metrics, "views,likes");
/// assert!(params.sort.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    pub metrics: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

fn join_non_empty(parts: &[String], separator: &str) -> Option<String> {
    (!parts.is_empty()).then(|| parts.join(separator))
}

impl QueryParams {
    /// Renders a request. Call only with a request that has been validated.
    pub fn from_request(request: &ReportRequest) -> Self {
        let filters: Vec<String> = request
            .filters
            .iter()
            .map(|(key, value)| format!("{key}=={value}"))
            .collect();

        Self {
            dimensions: join_non_empty(&request.dimensions, ","),
            filters: join_non_empty(&filters, ";"),
            metrics: request.metrics.join(","),
            sort: join_non_empty(&request.sort_options, ","),
            max_results: (request.max_results > 0).then_some(request.max_results),
        }
    }

    /// Returns the parameters as name/value pairs, omitting absent ones.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(5);
        if let Some(dimensions) = &self.dimensions {
            pairs.push(("dimensions", dimensions.clone()));
        }
        if let Some(filters) = &self.filters {
            pairs.push(("filters", filters.clone()));
        }
        pairs.push(("metrics", self.metrics.clone()));
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(max_results) = self.max_results {
            pairs.push(("maxResults", max_results.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_rendering() {
        let request = ReportRequest::new()
            .with_dimensions(["video"])
            .with_filter("country", "US")
            .with_metrics(["views", "estimatedMinutesWatched"])
            .with_sort_options(["-views", "-estimatedMinutesWatched"])
            .with_max_results(25);

        let params = QueryParams::from_request(&request);
        assert_eq!(
            params.to_pairs(),
            vec![
                ("dimensions", "video".to_string()),
                ("filters", "country==US".to_string()),
                ("metrics", "views,estimatedMinutesWatched".to_string()),
                ("sort", "-views,-estimatedMinutesWatched".to_string()),
                ("maxResults", "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_value_filter_kept_verbatim() {
        let request = ReportRequest::new()
            .with_filter("video", "abc,def")
            .with_metrics(["views"]);
        let params = QueryParams::from_request(&request);
        assert_eq!(params.filters.as_deref(), Some("video==abc,def"));
        assert!(params.dimensions.is_none());
        assert!(params.max_results.is_none());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let params = QueryParams::from_request(&ReportRequest::new().with_metrics(["views"]));
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({ "metrics": "views" }));
    }
}
