//! Report type definitions and the validation entry point.

use crate::catalog::ReportId;
use crate::constraints::{FieldGroup, Metrics, ResultLimit, SortOptions};
use crate::core::{Constraint, ConstraintMetadata, ReportRequest};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Whether a report is a plain aggregate or a ranked "detailed" listing.
///
/// Detailed reports are bounded: they require a `max_results` inside their
/// window and at least one sort option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Plain,
    Detailed,
}

/// A report-specific rule run after the base constraints pass.
#[derive(Clone, Copy)]
pub struct SupplementaryRule {
    name: &'static str,
    description: &'static str,
    check: fn(&ReportRequest) -> Result<()>,
}

impl SupplementaryRule {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        check: fn(&ReportRequest) -> Result<()>,
    ) -> Self {
        Self {
            name,
            description,
            check,
        }
    }
}

impl fmt::Debug for SupplementaryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplementaryRule")
            .field("name", &self.name)
            .finish()
    }
}

impl Constraint for SupplementaryRule {
    fn evaluate(&self, request: &ReportRequest) -> Result<()> {
        (self.check)(request)
    }

    fn name(&self) -> &str {
        self.name
    }

    fn metadata(&self) -> ConstraintMetadata {
        ConstraintMetadata::new()
            .with_description(self.description)
            .with_custom("constraint_type", "supplementary")
    }
}

/// One named report shape: the dimensions, filters, metrics, sort options and
/// result limit a request must satisfy.
///
/// Report types are built once into the [`ReportCatalog`](crate::catalog::ReportCatalog)
/// and never mutated.
///
/// # Examples
///
/// ```rust
/// use report_guard::catalog::ReportId;
/// use report_guard::constraints::{FieldGroup, Metrics};
/// use report_guard::core::{ReportRequest, ReportType};
///
/// let report = ReportType::builder(ReportId::TimeBasedActivity, "Daily views")
///     .dimensions(FieldGroup::dimensions().exactly_one(["day", "month"]).build())
///     .metrics(Metrics::new(["views"]))
///     .build();
///
/// let request = ReportRequest::new()
///     .with_dimensions(["day"])
///     .with_metrics(["views"]);
/// assert!(report.validate(&request).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ReportType {
    id: ReportId,
    name: String,
    kind: ReportKind,
    dimensions: FieldGroup,
    filters: FieldGroup,
    metrics: Metrics,
    sort_options: SortOptions,
    max_results: ResultLimit,
    supplementary: Option<SupplementaryRule>,
}

impl ReportType {
    /// Starts building a report type.
    pub fn builder(id: ReportId, name: impl Into<String>) -> ReportTypeBuilder {
        ReportTypeBuilder::new(id, name)
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn dimensions(&self) -> &FieldGroup {
        &self.dimensions
    }

    pub fn filters(&self) -> &FieldGroup {
        &self.filters
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn sort_options(&self) -> &SortOptions {
        &self.sort_options
    }

    /// Returns the result limit, `0` when unbounded.
    pub fn max_results(&self) -> u32 {
        self.max_results.limit()
    }

    /// Returns the report-specific rule, if any.
    pub fn supplementary(&self) -> Option<&SupplementaryRule> {
        self.supplementary.as_ref()
    }

    /// Returns the constraints in evaluation order.
    pub fn constraints(&self) -> Vec<&dyn Constraint> {
        let mut constraints: Vec<&dyn Constraint> = Vec::with_capacity(6);
        constraints.push(&self.dimensions);
        constraints.push(&self.filters);
        constraints.push(&self.metrics);
        constraints.push(&self.sort_options);
        constraints.push(&self.max_results);
        if let Some(rule) = &self.supplementary {
            constraints.push(rule);
        }
        constraints
    }

    /// Validates a request against this report.
    ///
    /// Runs dimensions, filters, metrics, sort options and max results in that
    /// order, then the supplementary rule. The first violation is returned.
    ///
    /// # Errors
    ///
    /// Returns the [`ReportError`] variant matching the first failed check.
    #[instrument(skip(self, request), fields(report = %self.name))]
    pub fn validate(&self, request: &ReportRequest) -> Result<()> {
        for constraint in self.constraints() {
            if let Err(err) = constraint.evaluate(request) {
                debug!(
                    constraint = constraint.name(),
                    kind = %err.kind(),
                    rule = ?constraint.metadata().description,
                    "request rejected"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`ReportType`].
#[derive(Debug)]
pub struct ReportTypeBuilder {
    id: ReportId,
    name: String,
    kind: ReportKind,
    dimensions: FieldGroup,
    filters: FieldGroup,
    metrics: Metrics,
    sort_options: Option<SortOptions>,
    max_results: ResultLimit,
    supplementary: Option<SupplementaryRule>,
}

impl ReportTypeBuilder {
    fn new(id: ReportId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: ReportKind::Plain,
            dimensions: FieldGroup::dimensions().build(),
            filters: FieldGroup::filters().build(),
            metrics: Metrics::new(Vec::<String>::new()),
            sort_options: None,
            max_results: ResultLimit::unbounded(),
            supplementary: None,
        }
    }

    pub fn dimensions(mut self, dimensions: FieldGroup) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn filters(mut self, filters: FieldGroup) -> Self {
        self.filters = filters;
        self
    }

    pub fn metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Sets an explicit sort whitelist. Defaults to the metrics whitelist.
    pub fn sort_options(mut self, sort_options: SortOptions) -> Self {
        self.sort_options = Some(sort_options);
        self
    }

    /// Marks the report as detailed with the given result limit.
    pub fn detailed(mut self, max_results: u32) -> Self {
        self.kind = ReportKind::Detailed;
        self.max_results = ResultLimit::new(max_results);
        self
    }

    /// Attaches a rule run after the base constraints.
    pub fn supplementary(mut self, rule: SupplementaryRule) -> Self {
        self.supplementary = Some(rule);
        self
    }

    pub fn build(self) -> ReportType {
        let mut sort_options = self
            .sort_options
            .unwrap_or_else(|| SortOptions::from_metrics(&self.metrics));
        if self.kind == ReportKind::Detailed {
            sort_options = sort_options.required();
        }

        ReportType {
            id: self.id,
            name: self.name,
            kind: self.kind,
            dimensions: self.dimensions,
            filters: self.filters,
            metrics: self.metrics,
            sort_options,
            max_results: self.max_results,
            supplementary: self.supplementary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn single_video(request: &ReportRequest) -> Result<()> {
        match request.filters.get("video") {
            Some(value) if value.contains(',') => {
                Err(ReportError::unsupported_value("video", value.clone(), None))
            }
            _ => Ok(()),
        }
    }

    fn report() -> ReportType {
        ReportType::builder(ReportId::AudienceRetention, "Retention")
            .dimensions(FieldGroup::dimensions().required(["elapsedVideoTimeRatio"]).build())
            .filters(FieldGroup::filters().required(["video"]).build())
            .metrics(Metrics::new(["audienceWatchRatio"]))
            .supplementary(SupplementaryRule::new(
                "single_video",
                "the video filter names one video",
                single_video,
            ))
            .build()
    }

    fn request() -> ReportRequest {
        ReportRequest::new()
            .with_dimensions(["elapsedVideoTimeRatio"])
            .with_filter("video", "abc")
            .with_metrics(["audienceWatchRatio"])
    }

    #[test]
    fn test_validate_runs_supplementary_rule_last() {
        let report = report();
        assert!(report.validate(&request()).is_ok());

        let err = report
            .validate(&request().with_filter("video", "abc,def"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFilterValue);

        // base failures take precedence over the supplementary rule
        let err = report
            .validate(&request().with_filter("video", "abc,def").with_metrics(["views"]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMetrics);
    }

    #[test]
    fn test_evaluation_order() {
        let report = report();
        let constraints = report.constraints();
        let names: Vec<_> = constraints.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "dimensions",
                "filters",
                "metrics",
                "sort_options",
                "max_results",
                "single_video"
            ]
        );

        let err = report.validate(&ReportRequest::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimensions);
    }

    #[test]
    fn test_detailed_reports_require_sort_and_limit() {
        let report = ReportType::builder(ReportId::TopVideosRegional, "Top")
            .dimensions(FieldGroup::dimensions().required(["video"]).build())
            .metrics(Metrics::new(["views"]))
            .sort_options(SortOptions::new(["views"]).descending_only())
            .detailed(10)
            .build();

        assert_eq!(report.kind(), ReportKind::Detailed);
        assert_eq!(report.max_results(), 10);
        assert!(report.sort_options().is_required());

        let base = ReportRequest::new()
            .with_dimensions(["video"])
            .with_metrics(["views"]);

        assert_eq!(
            report.validate(&base.clone().with_max_results(5)).unwrap_err().kind(),
            ErrorKind::InvalidSortOptions
        );
        assert_eq!(
            report
                .validate(&base.clone().with_sort_options(["-views"]))
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidMaxResults
        );
        assert!(report
            .validate(&base.with_sort_options(["-views"]).with_max_results(10))
            .is_ok());
    }

    #[test]
    fn test_plain_defaults() {
        let report = ReportType::builder(ReportId::BasicUserActivity, "Basic")
            .metrics(Metrics::new(["views"]))
            .build();
        assert_eq!(report.kind(), ReportKind::Plain);
        assert_eq!(report.max_results(), 0);
        assert_eq!(report.sort_options().values(), &["views".to_string()]);
        assert!(report.supplementary().is_none());
        assert_eq!(report.to_string(), "Basic");
    }
}
