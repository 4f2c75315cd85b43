//! Built-in constraints for report validation.
//!
//! A report is validated by four constraint groups plus a result limit:
//!
//! - **[`FieldGroup`]** for dimensions and for filters, each an ordered list
//!   of [`FieldConstraint`]s with a [`Cardinality`]
//! - **[`Metrics`]**, a non-empty subset-of-whitelist check
//! - **[`SortOptions`]**, a whitelist with optional descending-only and
//!   required flags
//! - **[`ResultLimit`]**, the `max_results` window
//!
//! ## Cardinality rules
//!
//! | Rule | Passes when |
//! |---|---|
//! | `Required` | every named field is present |
//! | `Optional` | always |
//! | `ZeroOrOne` | at most one named field is present |
//! | `ZeroOrMore` | always (membership only) |
//! | `OneOrMore` | at least one named field is present |
//! | `ExactlyOne` | precisely one named field is present |
//!
//! ## Example
//!
//! ```rust
//! use report_guard::constraints::{FieldGroup, FieldSpec};
//! use report_guard::core::{Constraint, ReportRequest};
//!
//! let dimensions = FieldGroup::dimensions()
//!     .required(["province"])
//!     .zero_or_more(["subscribedStatus", "youtubeProduct"])
//!     .build();
//! let filters = FieldGroup::filters()
//!     .zero_or_one([FieldSpec::restricted("country", "US")])
//!     .zero_or_one(["video", "group"])
//!     .build();
//!
//! let request = ReportRequest::new()
//!     .with_dimensions(["province", "youtubeProduct"])
//!     .with_filter("country", "US");
//!
//! assert!(dimensions.evaluate(&request).is_ok());
//! assert!(filters.evaluate(&request).is_ok());
//! ```

mod cardinality;
mod group;
mod limit;
mod whitelist;

pub use cardinality::{Cardinality, FieldConstraint, FieldSpec};
pub use group::{FieldGroup, FieldGroupBuilder, GroupKind};
pub use limit::ResultLimit;
pub use whitelist::{Metrics, SortOptions};
