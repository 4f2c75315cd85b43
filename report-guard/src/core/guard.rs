//! Classify, validate, then hand off to an executor.

use crate::catalog::ReportCatalog;
use crate::classifier;
use crate::core::{QueryParams, ReportRequest, ReportType};
use crate::logging::{truncate_field, LogConfig};
use crate::prelude::*;
use crate::{log_classification, log_constraint};
use async_trait::async_trait;
use tracing::{info, instrument};

/// The downstream collaborator that performs a validated report query.
///
/// Implementations own authorization and transport. They are only ever
/// invoked by [`ReportGuard::run`] after the request has passed validation,
/// and receive exactly the validated parameter set.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use report_guard::core::{QueryParams, ReportExecutor, ReportType};
/// use report_guard::prelude::*;
///
/// struct Echo;
///
/// #[async_trait]
/// impl ReportExecutor for Echo {
///     type Output = Vec<(&'static str, String)>;
///
///     async fn execute(&self, _report: &ReportType, params: QueryParams) -> Result<Self::Output> {
///         Ok(params.to_pairs())
///     }
/// }
/// ```
#[async_trait]
pub trait ReportExecutor: Send + Sync {
    /// The raw result type produced by the executor.
    type Output: Send;

    /// Runs the query for `report` with the validated `params`.
    async fn execute(&self, report: &ReportType, params: QueryParams) -> Result<Self::Output>;
}

/// Entry point tying the classifier, the catalog and an executor together.
///
/// # Examples
///
/// ```rust
/// use report_guard::core::{ReportGuard, ReportRequest};
///
/// let guard = ReportGuard::new();
/// let request = ReportRequest::new()
///     .with_dimensions(["country"])
///     .with_metrics(["views"])
///     .with_sort_options(["views"]);
///
/// let report = guard.validate(&request).unwrap();
/// assert_eq!(report.name(), "Geography-based activity");
/// ```
#[derive(Debug, Clone)]
pub struct ReportGuard {
    catalog: &'static ReportCatalog,
    log_config: LogConfig,
}

impl Default for ReportGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGuard {
    /// Creates a guard over the global catalog.
    pub fn new() -> Self {
        Self {
            catalog: ReportCatalog::global(),
            log_config: LogConfig::default(),
        }
    }

    /// Sets the logging configuration.
    pub fn with_log_config(mut self, log_config: LogConfig) -> Self {
        self.log_config = log_config;
        self
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    pub fn catalog(&self) -> &'static ReportCatalog {
        self.catalog
    }

    /// Selects the report a request is attempting to match.
    pub fn classify(&self, request: &ReportRequest) -> &'static ReportType {
        let decision = classifier::decide(
            &request.dimension_set(),
            &request.filter_keys(),
            &request.metric_set(),
        );
        let report = self.catalog.get(decision.report);
        log_classification!(
            self.log_config,
            rule = decision.name,
            report = %report.name(),
            "request classified"
        );
        report
    }

    /// Classifies and validates a request, returning the matched report.
    ///
    /// # Errors
    ///
    /// Returns the first violation of the matched report's rules.
    #[instrument(skip(self, request), fields(dimensions = request.dimensions.len(), filters = request.filters.len()))]
    pub fn validate(&self, request: &ReportRequest) -> Result<&'static ReportType> {
        let report = self.classify(request);
        if let Err(err) = report.validate(request) {
            log_constraint!(
                self.log_config,
                report = %report.name(),
                error = %truncate_field(&err.to_string(), self.log_config.max_field_length),
                "request failed validation"
            );
            return Err(err);
        }
        Ok(report)
    }

    /// Validates a request and, only if it passes, runs it through `executor`.
    ///
    /// # Errors
    ///
    /// Returns a validation error without calling the executor, or whatever
    /// error the executor returns.
    pub async fn run<E>(&self, executor: &E, request: &ReportRequest) -> Result<E::Output>
    where
        E: ReportExecutor,
    {
        let report = self.validate(request)?;
        let params = QueryParams::from_request(request);
        info!(report = %report.name(), metrics = %params.metrics, "executing report");
        executor.execute(report, params).await
    }
}
