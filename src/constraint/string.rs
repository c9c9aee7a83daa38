//! String constraints.
//!
//! This module provides [`StringConstraint`] for text fields: blankness,
//! length bounds measured in characters, substrings, regex patterns and a few
//! well-known formats.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Value};

use super::predicate::{ConstraintPredicate, NullHandling, ViolationMessage};
use super::traits::Constraint;

const EMAIL_PATTERN: &str = r"^[^\x00-\x1F()<>@,;:\\\x22.\[\]\s]+(\.[^\x00-\x1F()<>@,;:\\\x22.\[\]\s]+)*@([^\x00-\x1F()<>@,;:\\\x22.\[\]\s]+(\.[^\x00-\x1F()<>@,;:\\\x22.\[\]\s]+)*)$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Constraints for string fields.
///
/// Sizes count characters (Unicode scalar values), not bytes.
///
/// # Example
///
/// ```rust
/// use verdict::{Constraint, StringConstraint};
///
/// let code = StringConstraint::new()
///     .not_blank()
///     .fixed_size(3)
///     .pattern(r"^[A-Z]+$")
///     .unwrap();
///
/// let broken: Vec<_> = code
///     .predicates()
///     .iter()
///     .filter(|p| p.is_violated(Some("ab")))
///     .map(|p| p.message_key())
///     .collect();
/// assert_eq!(broken, vec!["container.fixedSize", "charSequence.pattern"]);
/// ```
#[derive(Debug, Default)]
pub struct StringConstraint {
    predicates: Vec<ConstraintPredicate<str>>,
}

impl Constraint<str> for StringConstraint {
    fn predicates(&self) -> &[ConstraintPredicate<str>] {
        &self.predicates
    }

    fn predicates_mut(&mut self) -> &mut Vec<ConstraintPredicate<str>> {
        &mut self.predicates
    }

    fn into_predicates(self) -> Vec<ConstraintPredicate<str>> {
        self.predicates
    }
}

impl StringConstraint {
    /// Creates a string constraint with no predicates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a present, non-empty string.
    pub fn not_empty(self) -> Self {
        self.constrain(ConstraintPredicate::new(
            |s: &str| !s.is_empty(),
            ViolationMessage::CONTAINER_NOT_EMPTY,
            NullHandling::NullIsInvalid,
        ))
    }

    /// Requires a present string with at least one non-whitespace character.
    pub fn not_blank(self) -> Self {
        self.constrain(ConstraintPredicate::new(
            |s: &str| !s.trim().is_empty(),
            ViolationMessage::CHAR_SEQUENCE_NOT_BLANK,
            NullHandling::NullIsInvalid,
        ))
    }

    /// Requires fewer than `max` characters.
    pub fn less_than(self, max: usize) -> Self {
        self.size(max, ViolationMessage::CONTAINER_LESS_THAN, |len, max| len < max)
    }

    /// Requires at most `max` characters.
    pub fn less_than_or_equal(self, max: usize) -> Self {
        self.size(max, ViolationMessage::CONTAINER_LESS_THAN_OR_EQUAL, |len, max| len <= max)
    }

    /// Requires more than `min` characters.
    pub fn greater_than(self, min: usize) -> Self {
        self.size(min, ViolationMessage::CONTAINER_GREATER_THAN, |len, min| len > min)
    }

    /// Requires at least `min` characters.
    pub fn greater_than_or_equal(self, min: usize) -> Self {
        self.size(min, ViolationMessage::CONTAINER_GREATER_THAN_OR_EQUAL, |len, min| len >= min)
    }

    /// Requires exactly `size` characters.
    pub fn fixed_size(self, size: usize) -> Self {
        self.size(size, ViolationMessage::CONTAINER_FIXED_SIZE, |len, size| len == size)
    }

    fn size(self, limit: usize, message: ViolationMessage, check: fn(usize, usize) -> bool) -> Self {
        self.constrain(
            ConstraintPredicate::new(
                move |s: &str| check(s.chars().count(), limit),
                message,
                NullHandling::NullIsValid,
            )
            .with_args(move || vec![json!(limit)])
            .with_violated_value(|s: &str| json!(s.chars().count())),
        )
    }

    /// Requires the string to contain `needle`.
    pub fn contains(self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        self.with_text_arg(needle, ViolationMessage::CHAR_SEQUENCE_CONTAINS, |s, n| s.contains(n))
    }

    /// Requires the string to start with `prefix`.
    pub fn starts_with(self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.with_text_arg(prefix, ViolationMessage::CHAR_SEQUENCE_STARTS_WITH, |s, p| {
            s.starts_with(p)
        })
    }

    /// Requires the string to end with `suffix`.
    pub fn ends_with(self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.with_text_arg(suffix, ViolationMessage::CHAR_SEQUENCE_ENDS_WITH, |s, x| s.ends_with(x))
    }

    fn with_text_arg(self, text: String, message: ViolationMessage, check: fn(&str, &str) -> bool) -> Self {
        let arg = Value::String(text.clone());
        self.constrain(
            ConstraintPredicate::new(
                move |s: &str| check(s, &text),
                message,
                NullHandling::NullIsValid,
            )
            .with_args(move || vec![arg.clone()]),
        )
    }

    /// Requires the whole string to match a regex.
    ///
    /// Returns an error if the pattern does not compile.
    pub fn pattern(self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        let arg = Value::String(pattern.to_string());
        Ok(self.constrain(
            ConstraintPredicate::new(
                move |s: &str| regex.is_match(s),
                ViolationMessage::CHAR_SEQUENCE_PATTERN,
                NullHandling::NullIsValid,
            )
            .with_args(move || vec![arg.clone()]),
        ))
    }

    /// Requires an email address. The empty string passes.
    pub fn email(self) -> Self {
        self.constrain(ConstraintPredicate::new(
            |s: &str| s.is_empty() || email_regex().is_match(s),
            ViolationMessage::CHAR_SEQUENCE_EMAIL,
            NullHandling::NullIsValid,
        ))
    }

    /// Requires an IPv4 address. The empty string passes.
    pub fn ipv4(self) -> Self {
        self.constrain(ConstraintPredicate::new(
            |s: &str| s.is_empty() || s.parse::<Ipv4Addr>().is_ok(),
            ViolationMessage::CHAR_SEQUENCE_IPV4,
            NullHandling::NullIsValid,
        ))
    }

    /// Requires an IPv6 address. The empty string passes.
    pub fn ipv6(self) -> Self {
        self.constrain(ConstraintPredicate::new(
            |s: &str| s.is_empty() || s.parse::<Ipv6Addr>().is_ok(),
            ViolationMessage::CHAR_SEQUENCE_IPV6,
            NullHandling::NullIsValid,
        ))
    }

    /// Requires a string that parses as a 32-bit integer.
    pub fn is_integer(self) -> Self {
        self.constrain(ConstraintPredicate::new(
            |s: &str| s.parse::<i32>().is_ok(),
            ViolationMessage::CHAR_SEQUENCE_INTEGER,
            NullHandling::NullIsValid,
        ))
    }

    /// Requires the string to be one of `allowed`.
    ///
    /// # Panics
    ///
    /// Panics if `allowed` is empty.
    pub fn one_of<S: Into<String>>(self, allowed: impl IntoIterator<Item = S>) -> Self {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        assert!(!allowed.is_empty(), "one_of requires at least one allowed value");
        let arg = json!(allowed);
        self.constrain(
            ConstraintPredicate::new(
                move |s: &str| allowed.iter().any(|a| a == s),
                ViolationMessage::OBJECT_ONE_OF,
                NullHandling::NullIsValid,
            )
            .with_args(move || vec![arg.clone()]),
        )
    }
}
