//! Dimension and filter groups built from cardinality rules.

use super::cardinality::{Cardinality, FieldConstraint, FieldSpec};
use crate::core::{Constraint, ConstraintMetadata, ReportRequest};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::instrument;

/// The request group a [`FieldGroup`] validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Requested dimension names
    Dimension,
    /// Filter mapping keys (and their values)
    Filter,
}

impl GroupKind {
    fn as_str(&self) -> &'static str {
        match self {
            GroupKind::Dimension => "dimension",
            GroupKind::Filter => "filter",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered list of cardinality rules for one request group.
///
/// Validation first rejects any field no rule declares, then evaluates each
/// rule in declaration order and reports the first violation. For filters, a
/// rule's value-restricted fields are checked before its cardinality.
///
/// A field name appears in at most one rule of a group.
///
/// # Examples
///
/// ```rust
/// use report_guard::constraints::{FieldGroup, FieldSpec};
/// use report_guard::core::{Constraint, ReportRequest};
///
/// let filters = FieldGroup::filters()
///     .zero_or_one([FieldSpec::restricted("country", "US")])
///     .zero_or_one(["video", "group"])
///     .build();
///
/// let ok = ReportRequest::new().with_filter("country", "US");
/// assert!(filters.evaluate(&ok).is_ok());
///
/// let wrong_value = ReportRequest::new().with_filter("country", "CA");
/// assert!(filters.evaluate(&wrong_value).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    kind: GroupKind,
    constraints: Vec<FieldConstraint>,
}

impl FieldGroup {
    /// Starts a dimensions group.
    pub fn dimensions() -> FieldGroupBuilder {
        FieldGroupBuilder::new(GroupKind::Dimension)
    }

    /// Starts a filters group.
    pub fn filters() -> FieldGroupBuilder {
        FieldGroupBuilder::new(GroupKind::Filter)
    }

    /// Returns the request group this validates.
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Returns the rules in declaration order.
    pub fn constraints(&self) -> &[FieldConstraint] {
        &self.constraints
    }

    /// Returns every field name any rule declares.
    pub fn every(&self) -> BTreeSet<&str> {
        self.constraints.iter().flat_map(|c| c.names()).collect()
    }

    /// Returns the fields pinned to a single value, keyed by name.
    pub fn restricted(&self) -> BTreeMap<&str, &str> {
        self.constraints
            .iter()
            .flat_map(|c| c.fields())
            .filter_map(|f| f.required_value().map(|v| (f.name(), v)))
            .collect()
    }

    /// Returns true if any rule declares `name`.
    pub fn declares(&self, name: &str) -> bool {
        self.constraints.iter().any(|c| c.declares(name))
    }

    /// Returns true if no field name is declared by more than one rule.
    pub fn has_unique_fields(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.constraints
            .iter()
            .flat_map(|c| c.names())
            .all(|name| seen.insert(name))
    }

    /// Validates a set of present field names, with filter values when the
    /// group is a filters group.
    pub fn check(
        &self,
        present: &BTreeSet<&str>,
        values: Option<&BTreeMap<String, String>>,
    ) -> Result<()> {
        if let Some(unknown) = present.iter().find(|name| !self.declares(name)) {
            return Err(ReportError::unrecognized(self.kind, *unknown));
        }

        for constraint in &self.constraints {
            if let Some(values) = values {
                check_values(constraint, values)?;
            }

            if !constraint.is_satisfied_by(present) {
                return Err(ReportError::cardinality(
                    self.kind,
                    constraint.cardinality(),
                    constraint.names().map(String::from).collect(),
                    constraint
                        .matched(present)
                        .into_iter()
                        .map(String::from)
                        .collect(),
                ));
            }
        }

        Ok(())
    }
}

fn check_values(constraint: &FieldConstraint, values: &BTreeMap<String, String>) -> Result<()> {
    for spec in constraint.fields() {
        if let Some(value) = values.get(spec.name()) {
            if !spec.accepts(value) {
                return Err(ReportError::unsupported_value(
                    spec.name(),
                    value.clone(),
                    spec.required_value().map(String::from),
                ));
            }
        }
    }
    Ok(())
}

impl Constraint for FieldGroup {
    #[instrument(skip(self, request), fields(group = %self.kind))]
    fn evaluate(&self, request: &ReportRequest) -> Result<()> {
        match self.kind {
            GroupKind::Dimension => self.check(&request.dimension_set(), None),
            GroupKind::Filter => self.check(&request.filter_keys(), Some(&request.filters)),
        }
    }

    fn name(&self) -> &str {
        match self.kind {
            GroupKind::Dimension => "dimensions",
            GroupKind::Filter => "filters",
        }
    }

    fn metadata(&self) -> ConstraintMetadata {
        let rules = self
            .constraints
            .iter()
            .map(|c| {
                let names: Vec<_> = c.names().map(|n| format!("'{n}'")).collect();
                format!("{} {}", c.cardinality(), names.join(", "))
            })
            .collect::<Vec<_>>();

        ConstraintMetadata::for_fields(self.every())
            .with_description(rules.join("; "))
            .with_custom("constraint_type", "cardinality")
    }
}

/// Builder for [`FieldGroup`].
#[derive(Debug)]
pub struct FieldGroupBuilder {
    kind: GroupKind,
    constraints: Vec<FieldConstraint>,
}

impl FieldGroupBuilder {
    fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            constraints: Vec::new(),
        }
    }

    /// Appends a prepared rule.
    pub fn constraint(mut self, constraint: FieldConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    fn rule<I, F>(self, cardinality: Cardinality, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.constraint(FieldConstraint::new(cardinality, fields))
    }

    /// Appends a [`Cardinality::Required`] rule.
    pub fn required<I, F>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.rule(Cardinality::Required, fields)
    }

    /// Appends a [`Cardinality::Optional`] rule.
    pub fn optional<I, F>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.rule(Cardinality::Optional, fields)
    }

    /// Appends a [`Cardinality::ZeroOrOne`] rule.
    pub fn zero_or_one<I, F>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.rule(Cardinality::ZeroOrOne, fields)
    }

    /// Appends a [`Cardinality::ZeroOrMore`] rule.
    pub fn zero_or_more<I, F>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.rule(Cardinality::ZeroOrMore, fields)
    }

    /// Appends a [`Cardinality::OneOrMore`] rule.
    pub fn one_or_more<I, F>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.rule(Cardinality::OneOrMore, fields)
    }

    /// Appends a [`Cardinality::ExactlyOne`] rule.
    pub fn exactly_one<I, F>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        self.rule(Cardinality::ExactlyOne, fields)
    }

    /// Builds the group.
    pub fn build(self) -> FieldGroup {
        let group = FieldGroup {
            kind: self.kind,
            constraints: self.constraints,
        };
        debug_assert!(
            group.has_unique_fields(),
            "a field may appear in only one {} rule",
            group.kind
        );
        group
    }
}
