//! Cardinality rules over named field sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How many of a constraint's fields may or must appear in a request.
///
/// # Examples
///
/// ```rust
/// use report_guard::constraints::Cardinality;
///
/// // Exactly one of two fields present
/// assert!(Cardinality::ExactlyOne.admits(1, 2));
/// assert!(!Cardinality::ExactlyOne.admits(2, 2));
///
/// // All fields present
/// assert!(Cardinality::Required.admits(2, 2));
/// assert!(!Cardinality::Required.admits(1, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// Every field must be present
    Required,
    /// Presence is unconstrained
    Optional,
    /// At most one field may be present
    ZeroOrOne,
    /// Any number of fields may be present
    ZeroOrMore,
    /// At least one field must be present
    OneOrMore,
    /// Precisely one field must be present
    ExactlyOne,
}

impl Cardinality {
    /// Returns true if `present` of `declared` fields satisfies this rule.
    pub fn admits(&self, present: usize, declared: usize) -> bool {
        match self {
            Cardinality::Required => present == declared,
            Cardinality::Optional | Cardinality::ZeroOrMore => true,
            Cardinality::ZeroOrOne => present <= 1,
            Cardinality::OneOrMore => present >= 1,
            Cardinality::ExactlyOne => present == 1,
        }
    }

    /// Returns a human-readable description of the rule.
    pub fn description(&self) -> &'static str {
        match self {
            Cardinality::Required => "all of",
            Cardinality::Optional => "optionally",
            Cardinality::ZeroOrOne => "at most one of",
            Cardinality::ZeroOrMore => "any of",
            Cardinality::OneOrMore => "at least one of",
            Cardinality::ExactlyOne => "exactly one of",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A field named by a constraint, optionally pinned to one accepted value.
///
/// Only filters carry values, so a restriction has no effect inside a
/// dimensions group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: String,
    required_value: Option<String>,
}

impl FieldSpec {
    /// Creates an unrestricted field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_value: None,
        }
    }

    /// Creates a field whose filter value must equal `value` exactly.
    ///
    /// ```rust
    /// use report_guard::constraints::FieldSpec;
    ///
    /// let spec = FieldSpec::restricted("country", "US");
    /// assert!(spec.accepts("US"));
    /// assert!(!spec.accepts("us"));
    /// ```
    pub fn restricted(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_value: Some(value.into()),
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the pinned value, if any.
    pub fn required_value(&self) -> Option<&str> {
        self.required_value.as_deref()
    }

    /// Returns true if `value` is acceptable for this field.
    pub fn accepts(&self, value: &str) -> bool {
        self.required_value.as_deref().map_or(true, |v| v == value)
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A cardinality rule declared over an ordered set of fields.
///
/// # Examples
///
/// ```rust
/// use report_guard::constraints::FieldConstraint;
/// use std::collections::BTreeSet;
///
/// let rule = FieldConstraint::exactly_one(["day", "month"]);
/// let present: BTreeSet<&str> = ["day"].into_iter().collect();
/// assert!(rule.is_satisfied_by(&present));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConstraint {
    cardinality: Cardinality,
    fields: Vec<FieldSpec>,
}

impl FieldConstraint {
    /// Creates a constraint of the given cardinality.
    pub fn new<I, F>(cardinality: Cardinality, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self {
            cardinality,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// All fields must be present together.
    pub fn required<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self::new(Cardinality::Required, fields)
    }

    /// Fields may be present or absent.
    pub fn optional<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self::new(Cardinality::Optional, fields)
    }

    /// At most one of the fields may be present.
    pub fn zero_or_one<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self::new(Cardinality::ZeroOrOne, fields)
    }

    /// Any of the fields may be present.
    pub fn zero_or_more<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self::new(Cardinality::ZeroOrMore, fields)
    }

    /// At least one of the fields must be present.
    pub fn one_or_more<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self::new(Cardinality::OneOrMore, fields)
    }

    /// Exactly one of the fields must be present.
    pub fn exactly_one<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldSpec>,
    {
        Self::new(Cardinality::ExactlyOne, fields)
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the declared field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSpec::name)
    }

    /// Returns true if `name` is one of this constraint's fields.
    pub fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Returns the declared fields found in `present`, in declaration order.
    pub fn matched<'a>(&'a self, present: &BTreeSet<&str>) -> Vec<&'a str> {
        self.names().filter(|n| present.contains(n)).collect()
    }

    /// Returns true if `present` satisfies the rule's cardinality.
    pub fn is_satisfied_by(&self, present: &BTreeSet<&str>) -> bool {
        self.cardinality
            .admits(self.matched(present).len(), self.fields.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<'a>(fields: &[&'a str]) -> BTreeSet<&'a str> {
        fields.iter().copied().collect()
    }

    #[test]
    fn test_required() {
        let rule = FieldConstraint::required(["deviceType", "operatingSystem"]);
        assert!(rule.is_satisfied_by(&set(&["deviceType", "operatingSystem", "day"])));
        assert!(!rule.is_satisfied_by(&set(&["deviceType"])));
        assert!(!rule.is_satisfied_by(&set(&[])));
    }

    #[test]
    fn test_zero_or_one() {
        let rule = FieldConstraint::zero_or_one(["country", "continent", "subContinent"]);
        assert!(rule.is_satisfied_by(&set(&[])));
        assert!(rule.is_satisfied_by(&set(&["continent"])));
        assert!(!rule.is_satisfied_by(&set(&["country", "continent"])));
    }

    #[test]
    fn test_one_or_more() {
        let rule = FieldConstraint::one_or_more(["ageGroup", "gender"]);
        assert!(!rule.is_satisfied_by(&set(&[])));
        assert!(rule.is_satisfied_by(&set(&["gender"])));
        assert!(rule.is_satisfied_by(&set(&["ageGroup", "gender"])));
    }

    #[test]
    fn test_exactly_one() {
        let rule = FieldConstraint::exactly_one(["day", "month"]);
        assert!(!rule.is_satisfied_by(&set(&["day", "month"])));
        assert!(!rule.is_satisfied_by(&set(&[])));
        assert!(rule.is_satisfied_by(&set(&["day"])));
        assert!(rule.is_satisfied_by(&set(&["month"])));
    }

    #[test]
    fn test_permissive_kinds() {
        for rule in [
            FieldConstraint::optional(["subscribedStatus"]),
            FieldConstraint::zero_or_more(["liveOrOnDemand", "subscribedStatus"]),
        ] {
            assert!(rule.is_satisfied_by(&set(&[])));
            assert!(rule.is_satisfied_by(&set(&["liveOrOnDemand", "subscribedStatus"])));
        }
    }

    #[test]
    fn test_matched_keeps_declaration_order() {
        let rule = FieldConstraint::zero_or_one(["country", "province", "continent"]);
        assert_eq!(
            rule.matched(&set(&["continent", "country"])),
            vec!["country", "continent"]
        );
    }

    #[test]
    fn test_restricted_field() {
        let rule =
            FieldConstraint::zero_or_one([FieldSpec::restricted("country", "US")]);
        assert!(rule.declares("country"));
        assert_eq!(rule.fields()[0].required_value(), Some("US"));
        assert!(rule.fields()[0].accepts("US"));
        assert!(!rule.fields()[0].accepts("CA"));
        assert!(FieldSpec::new("video").accepts("anything"));
    }

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::ZeroOrOne.to_string(), "at most one of");
        assert_eq!(Cardinality::ExactlyOne.description(), "exactly one of");
    }
}
