//! Result-count window validation.

use crate::core::{Constraint, ConstraintMetadata, ReportRequest};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// The maximum number of rows a report may return.
///
/// A limit of `0` means the report is unbounded and any requested value is
/// accepted. A nonzero limit requires the request to ask for between `1` and
/// `limit` rows inclusive.
///
/// ```rust
/// use report_guard::constraints::ResultLimit;
/// use report_guard::core::{Constraint, ReportRequest};
///
/// let limit = ResultLimit::new(25);
/// assert!(limit.evaluate(&ReportRequest::new().with_max_results(25)).is_ok());
/// assert!(limit.evaluate(&ReportRequest::new().with_max_results(26)).is_err());
/// assert!(limit.evaluate(&ReportRequest::new()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultLimit {
    limit: u32,
}

impl ResultLimit {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    /// An unbounded limit.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn is_bounded(&self) -> bool {
        self.limit > 0
    }
}

impl Constraint for ResultLimit {
    fn evaluate(&self, request: &ReportRequest) -> Result<()> {
        let requested = request.max_results;
        if self.is_bounded() && !(1..=self.limit).contains(&requested) {
            return Err(ReportError::InvalidMaxResults {
                requested,
                limit: self.limit,
            });
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "max_results"
    }

    fn metadata(&self) -> ConstraintMetadata {
        let description = if self.is_bounded() {
            format!("between 1 and {} results", self.limit)
        } else {
            "any number of results".to_string()
        };
        ConstraintMetadata::new()
            .with_description(description)
            .with_custom("limit", self.limit.to_string())
    }
}
