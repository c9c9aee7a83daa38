//! Constraint violation records.
//!
//! This module provides [`ConstraintViolation`] for a single broken rule and
//! [`ConstraintViolations`] for the ordered report produced by one
//! `Validator::validate` call.

use std::fmt::{self, Display};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use stillwater::prelude::*;

use crate::message::{Locale, MessageFormatter};

/// A single broken rule, with everything needed to render its message.
///
/// `args` always starts with the field name and ends with the violated value;
/// the predicate's own arguments sit in between. Messages are rendered on
/// demand through the validator's [`MessageFormatter`].
#[derive(Clone)]
pub struct ConstraintViolation {
    name: String,
    message_key: String,
    default_message_format: String,
    args: Vec<Value>,
    formatter: Arc<dyn MessageFormatter>,
    locale: Locale,
}

impl ConstraintViolation {
    /// Creates a violation.
    ///
    /// `args` must already be in `[name, predicate args..., violated value]`
    /// order.
    pub fn new(
        name: impl Into<String>,
        message_key: impl Into<String>,
        default_message_format: impl Into<String>,
        args: Vec<Value>,
        formatter: Arc<dyn MessageFormatter>,
        locale: Locale,
    ) -> Self {
        Self {
            name: name.into(),
            message_key: message_key.into(),
            default_message_format: default_message_format.into(),
            args,
            formatter,
            locale,
        }
    }

    /// The (possibly indexed) field name, for example `items[0].name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    pub fn default_message_format(&self) -> &str {
        &self.default_message_format
    }

    /// All message arguments.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The value that broke the rule (`null` when it was absent).
    pub fn violated_value(&self) -> &Value {
        self.args.last().unwrap_or(&Value::Null)
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Renders the message with the validator's formatter.
    pub fn message(&self) -> String {
        self.formatter.format(
            &self.message_key,
            &self.default_message_format,
            &self.args,
            &self.locale,
        )
    }

    /// Projects this violation into a plain, serializable record.
    pub fn detail(&self) -> ViolationDetail {
        ViolationDetail {
            key: self.message_key.clone(),
            args: self.args.clone(),
            default_message: self.message(),
        }
    }

    /// Returns the same violation under a different name.
    pub fn rename(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }
}

impl fmt::Debug for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintViolation")
            .field("name", &self.name)
            .field("message_key", &self.message_key)
            .field("args", &self.args)
            .field("locale", &self.locale)
            .finish()
    }
}

impl PartialEq for ConstraintViolation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.message_key == other.message_key
            && self.default_message_format == other.default_message_format
            && self.args == other.args
            && self.locale == other.locale
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ConstraintViolation {}

/// A serializable projection of a violation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ViolationDetail {
    /// The message key.
    pub key: String,
    /// The message arguments, field name first.
    pub args: Vec<Value>,
    /// The rendered message.
    pub default_message: String,
}

/// The ordered outcome of validating one value.
///
/// Violations appear in field registration order, and within a field in
/// predicate order. An empty report means the value is valid.
///
/// # Example
///
/// ```rust
/// use verdict::{Constraint, Validator};
///
/// struct User {
///     name: String,
/// }
///
/// let validator = Validator::<User>::builder()
///     .string("name", |u: &User| Some(u.name.as_str()), |c| c.not_blank())
///     .build();
///
/// let violations = validator.validate(&User { name: " ".into() });
/// assert!(!violations.is_valid());
/// assert_eq!(violations.messages(), vec!["\"name\" must not be blank"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintViolations(Vec<ConstraintViolation>);

impl ConstraintViolations {
    /// Creates an empty (valid) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no violations.
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.0.iter()
    }

    /// The violations as a slice.
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&ConstraintViolation> {
        self.0.get(index)
    }

    /// Adds a violation at the end.
    pub fn push(&mut self, violation: ConstraintViolation) {
        self.0.push(violation);
    }

    /// Renders every message, in order.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ConstraintViolation::message).collect()
    }

    /// Projects every violation into a [`ViolationDetail`].
    pub fn details(&self) -> Vec<ViolationDetail> {
        self.0.iter().map(ConstraintViolation::detail).collect()
    }

    /// Returns all violations for a field name.
    pub fn for_name(&self, name: &str) -> Vec<&ConstraintViolation> {
        self.0.iter().filter(|v| v.name == name).collect()
    }

    /// Returns all violations with a message key.
    pub fn with_key(&self, message_key: &str) -> Vec<&ConstraintViolation> {
        self.0.iter().filter(|v| v.message_key == message_key).collect()
    }

    /// Groups violations by field name, in order of first appearance.
    pub fn by_name(&self) -> IndexMap<&str, Vec<&ConstraintViolation>> {
        let mut grouped: IndexMap<&str, Vec<&ConstraintViolation>> = IndexMap::new();
        for violation in &self.0 {
            grouped.entry(violation.name()).or_default().push(violation);
        }
        grouped
    }

    /// Converts into a non-empty list, or `None` when valid.
    pub fn into_non_empty(self) -> Option<NonEmptyVec<ConstraintViolation>> {
        NonEmptyVec::from_vec(self.0)
    }

    pub fn into_vec(self) -> Vec<ConstraintViolation> {
        self.0
    }

    /// Converts into a `Result`, so an invalid report can be propagated with `?`.
    pub fn into_result(self) -> Result<(), ConstraintViolationsError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ConstraintViolationsError { violations: self })
        }
    }
}

impl Display for ConstraintViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}: {}", i + 1, violation.name(), violation.message())?;
        }
        Ok(())
    }
}

impl Semigroup for ConstraintViolations {
    fn combine(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl From<Vec<ConstraintViolation>> for ConstraintViolations {
    fn from(violations: Vec<ConstraintViolation>) -> Self {
        Self(violations)
    }
}

impl FromIterator<ConstraintViolation> for ConstraintViolations {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ConstraintViolation> for ConstraintViolations {
    fn extend<I: IntoIterator<Item = ConstraintViolation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ConstraintViolations {
    type Item = ConstraintViolation;
    type IntoIter = std::vec::IntoIter<ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConstraintViolations {
    type Item = &'a ConstraintViolation;
    type IntoIter = std::slice::Iter<'a, ConstraintViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Raised when an invalid report is turned into an error.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Constraint violations found!\n{}", bullet_list(.violations))]
pub struct ConstraintViolationsError {
    violations: ConstraintViolations,
}

impl ConstraintViolationsError {
    pub fn violations(&self) -> &ConstraintViolations {
        &self.violations
    }

    pub fn into_violations(self) -> ConstraintViolations {
        self.violations
    }
}

fn bullet_list(violations: &ConstraintViolations) -> String {
    violations
        .iter()
        .map(|v| format!("* {}", v.message()))
        .collect::<Vec<_>>()
        .join("\n")
}

// The formatter is held behind `Arc<dyn MessageFormatter>`, which requires
// `Send + Sync`, so violation reports can cross threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConstraintViolation>();
    assert_sync::<ConstraintViolation>();
    assert_send::<ConstraintViolations>();
    assert_sync::<ConstraintViolations>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::SimpleMessageFormatter;
    use serde_json::json;

    fn violation(name: &str, key: &str, format: &str, args: Vec<Value>) -> ConstraintViolation {
        ConstraintViolation::new(
            name,
            key,
            format,
            args,
            Arc::new(SimpleMessageFormatter),
            Locale::root(),
        )
    }

    fn not_blank(name: &str) -> ConstraintViolation {
        violation(
            name,
            "charSequence.notBlank",
            "\"{0}\" must not be blank",
            vec![json!(name), json!("")],
        )
    }

    #[test]
    fn test_violation_accessors() {
        let v = violation(
            "age",
            "numeric.greaterThanOrEqual",
            "\"{0}\" must be greater than or equal to {1}",
            vec![json!("age"), json!(0), json!(-1)],
        );
        assert_eq!(v.name(), "age");
        assert_eq!(v.violated_value(), &json!(-1));
        assert_eq!(v.message(), "\"age\" must be greater than or equal to 0");
        assert_eq!(v.to_string(), v.message());
    }

    #[test]
    fn test_detail_projection() {
        let detail = not_blank("name").detail();
        assert_eq!(detail.key, "charSequence.notBlank");
        assert_eq!(detail.args, vec![json!("name"), json!("")]);
        assert_eq!(detail.default_message, "\"name\" must not be blank");
    }

    #[test]
    fn test_rename() {
        let v = not_blank("name").rename("items[0].name");
        assert_eq!(v.name(), "items[0].name");
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = ConstraintViolations::new();
        assert!(report.is_valid());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_by_name_keeps_first_seen_order() {
        let report: ConstraintViolations =
            vec![not_blank("b"), not_blank("a"), not_blank("b")].into_iter().collect();
        let grouped = report.by_name();
        let names: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(grouped["b"].len(), 2);
    }

    #[test]
    fn test_filters() {
        let report: ConstraintViolations = vec![not_blank("a"), not_blank("b")].into();
        assert_eq!(report.for_name("a").len(), 1);
        assert_eq!(report.with_key("charSequence.notBlank").len(), 2);
        assert!(report.with_key("object.notNull").is_empty());
    }

    #[test]
    fn test_combine_appends() {
        let left: ConstraintViolations = vec![not_blank("a")].into();
        let right: ConstraintViolations = vec![not_blank("b")].into();
        let names: Vec<_> = left
            .combine(right)
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_error_message_lists_every_violation() {
        let report: ConstraintViolations = vec![not_blank("a"), not_blank("b")].into();
        let err = report.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Constraint violations found!\n* \"a\" must not be blank\n* \"b\" must not be blank"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_display() {
        let report: ConstraintViolations = vec![not_blank("name")].into();
        let display = report.to_string();
        assert!(display.contains("1 violation(s)"));
        assert!(display.contains("name: \"name\" must not be blank"));
    }

    #[test]
    fn test_into_non_empty() {
        assert!(ConstraintViolations::new().into_non_empty().is_none());
        let report: ConstraintViolations = vec![not_blank("a")].into();
        assert_eq!(report.into_non_empty().map(|v| v.len()), Some(1));
    }
}
