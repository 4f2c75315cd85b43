//! Core validation types for report requests.
//!
//! ## Overview
//!
//! - **[`ReportRequest`]**: the raw dimensions, filters, metrics, sort options
//!   and result count a caller asks for
//! - **[`ReportType`]**: one named report shape, validated through its
//!   [`Constraint`]s
//! - **[`ReportGuard`]**: classify, validate, then call a [`ReportExecutor`]
//! - **[`QueryParams`]**: the validated request in wire form
//!
//! ## Architecture
//!
//! ```text
//! ReportRequest
//!     └── classifier ──> ReportType (from the catalog)
//!                          ├── dimensions   (FieldGroup)
//!                          ├── filters      (FieldGroup)
//!                          ├── metrics      (Metrics)
//!                          ├── sort options (SortOptions)
//!                          ├── max results  (ResultLimit)
//!                          └── supplementary rule (optional)
//!                                 │
//!                                 └── ok ──> ReportExecutor
//! ```
//!
//! ## Example
//!
//! ```rust
//! use report_guard::core::{ReportGuard, ReportRequest};
//! use report_guard::error::ErrorKind;
//!
//! let guard = ReportGuard::new();
//!
//! let request = ReportRequest::new()
//!     .with_dimensions(["elapsedVideoTimeRatio"])
//!     .with_filter("video", "abc,def")
//!     .with_metrics(["audienceWatchRatio"]);
//!
//! let err = guard.validate(&request).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnsupportedFilterValue);
//! ```

mod constraint;
mod guard;
mod query;
mod report;
mod request;

pub use constraint::{Constraint, ConstraintMetadata};
pub use guard::{ReportExecutor, ReportGuard};
pub use query::QueryParams;
pub use report::{ReportKind, ReportType, ReportTypeBuilder, SupplementaryRule};
pub use request::{parse_sort_option, ReportRequest, DESCENDING_MARKER};
