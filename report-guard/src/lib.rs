//! # report-guard - Report request validation for analytics APIs
//!
//! report-guard decides which analytics report a request is asking for and
//! checks that the request's dimensions, filters, metrics, sort options and
//! result count are a legal combination for that report, before anything is
//! sent over the network.
//!
//! ## Quick Start
//!
//! ```rust
//! use report_guard::prelude::*;
//!
//! let guard = ReportGuard::new();
//!
//! let request = ReportRequest::new()
//!     .with_dimensions(["country"])
//!     .with_metrics(["views", "likes"])
//!     .with_sort_options(["-views"]);
//!
//! let report = guard.validate(&request)?;
//! assert_eq!(report.id(), ReportId::GeographyBasedActivity);
//!
//! // Geography-based reports cannot also break down by month.
//! let err = guard
//!     .validate(&request.clone().with_dimensions(["country", "month"]))
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnrecognizedField);
//! # Ok::<(), ReportError>(())
//! ```
//!
//! ## How a request is checked
//!
//! 1. The [`classifier`] walks an ordered rule table over the request's
//!    dimension names, filter keys and metric names and picks exactly one
//!    report from the [`catalog`]. Classification never fails.
//! 2. The report's constraints run in a fixed order: dimensions, filters,
//!    metrics, sort options, max results, then any report-specific rule.
//!    The first violation is returned as a [`ReportError`](error::ReportError).
//! 3. Optionally, [`ReportGuard::run`](core::ReportGuard::run) hands the
//!    validated request, rendered as [`QueryParams`](core::QueryParams), to a
//!    caller-supplied [`ReportExecutor`](core::ReportExecutor).
//!
//! ## Modules
//!
//! - **`constraints`**: cardinality rules, field groups, metric and sort
//!   whitelists, result limits
//! - **`core`**: requests, report types, the guard facade and executor seam
//! - **`catalog`**: the 29 report definitions and their metric vocabularies
//! - **`classifier`**: the rule table that maps a request to a report
//! - **`logging`**: log configuration and subscriber setup

pub mod catalog;
pub mod classifier;
pub mod constraints;
pub mod core;
pub mod error;
pub mod logging;
pub mod prelude;
