//! Prelude for commonly used types and traits in report-guard.

pub use crate::catalog::{ReportCatalog, ReportId};
pub use crate::constraints::GroupKind;
pub use crate::core::{Constraint, ReportGuard, ReportRequest, ReportType};
pub use crate::error::{ErrorKind, ReportError, Result};
pub use crate::logging::LogConfig;
