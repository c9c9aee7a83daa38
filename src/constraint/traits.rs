//! The self-typed constraint builder.
//!
//! Every concrete constraint ([`StringConstraint`](crate::StringConstraint),
//! [`NumericConstraint`](crate::NumericConstraint), ...) implements
//! [`Constraint`] by exposing its predicate list. The shared builder methods
//! defined here return `Self`, so a chain that mixes shared and specialised
//! methods never loses the concrete type:
//!
//! ```rust
//! use verdict::{Constraint, StringConstraint};
//!
//! let username = StringConstraint::new()
//!     .not_null()
//!     .not_blank()
//!     .predicate(|s: &str| !s.contains(' '), "username.noSpace", "\"{0}\" must not contain spaces")
//!     .less_than_or_equal(20);
//!
//! assert_eq!(username.predicates().len(), 4);
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;

use super::predicate::{ConstraintPredicate, NullHandling, ViolationMessage};

/// A named, reusable rule that can be plugged into any constraint.
///
/// # Example
///
/// ```rust
/// use verdict::{Constraint, CustomConstraint, StringConstraint, ViolationMessage};
///
/// struct IsbnLength;
///
/// impl CustomConstraint<str> for IsbnLength {
///     fn test(&self, value: &str) -> bool {
///         matches!(value.len(), 10 | 13)
///     }
///
///     fn message(&self) -> ViolationMessage {
///         ViolationMessage::of("isbn.length", "\"{0}\" must have 10 or 13 characters")
///     }
/// }
///
/// let isbn = StringConstraint::new().custom(IsbnLength);
/// assert_eq!(isbn.predicates()[0].message_key(), "isbn.length");
/// ```
pub trait CustomConstraint<V: ?Sized>: Send + Sync + 'static {
    /// Returns true when `value` satisfies the rule.
    fn test(&self, value: &V) -> bool;

    /// The message used when the rule is broken.
    fn message(&self) -> ViolationMessage;

    /// Extra message arguments, placed after the field name.
    fn arguments(&self) -> Vec<Value> {
        Vec::new()
    }
}

/// An ordered, append-only list of predicates over one field value.
///
/// Implementors provide access to their predicate list; every builder method
/// appends exactly one predicate and hands back the concrete type.
pub trait Constraint<V: ?Sized + 'static>: Sized {
    /// The predicates added so far, in insertion order.
    fn predicates(&self) -> &[ConstraintPredicate<V>];

    /// Mutable access to the predicate list.
    fn predicates_mut(&mut self) -> &mut Vec<ConstraintPredicate<V>>;

    /// Consumes the constraint, returning its predicates.
    fn into_predicates(self) -> Vec<ConstraintPredicate<V>>;

    /// Appends a predicate.
    fn constrain(mut self, predicate: ConstraintPredicate<V>) -> Self {
        self.predicates_mut().push(predicate);
        self
    }

    /// Requires the value to be present.
    fn not_null(self) -> Self {
        self.constrain(ConstraintPredicate::presence(
            |present| present,
            ViolationMessage::OBJECT_NOT_NULL,
        ))
    }

    /// Requires the value to be absent.
    ///
    /// An absent value passes and a present one is a violation.
    fn is_null(self) -> Self {
        self.constrain(ConstraintPredicate::presence(
            |present| !present,
            ViolationMessage::OBJECT_IS_NULL,
        ))
    }

    /// Adds a custom test. Absent values pass.
    fn predicate<F>(
        self,
        test: F,
        message_key: impl Into<Cow<'static, str>>,
        default_message_format: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.constrain(ConstraintPredicate::new(
            test,
            ViolationMessage::new(message_key, default_message_format),
            NullHandling::NullIsValid,
        ))
    }

    /// Adds a custom test. Absent values are violations.
    fn predicate_nullable<F>(
        self,
        test: F,
        message_key: impl Into<Cow<'static, str>>,
        default_message_format: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        self.constrain(ConstraintPredicate::new(
            test,
            ViolationMessage::new(message_key, default_message_format),
            NullHandling::NullIsInvalid,
        ))
    }

    /// Adds a [`CustomConstraint`]. Absent values pass.
    fn custom<C: CustomConstraint<V>>(self, constraint: C) -> Self {
        self.constrain(custom_predicate(constraint, NullHandling::NullIsValid))
    }

    /// Adds a [`CustomConstraint`]. Absent values are violations.
    fn custom_nullable<C: CustomConstraint<V>>(self, constraint: C) -> Self {
        self.constrain(custom_predicate(constraint, NullHandling::NullIsInvalid))
    }

    /// Replaces the default message format of the most recently added predicate.
    ///
    /// Does nothing if no predicate has been added yet.
    fn message(mut self, default_message_format: impl Into<Cow<'static, str>>) -> Self {
        if let Some(last) = self.predicates_mut().last_mut() {
            last.set_default_message_format(default_message_format.into());
        }
        self
    }
}

fn custom_predicate<V, C>(constraint: C, null_handling: NullHandling) -> ConstraintPredicate<V>
where
    V: ?Sized + 'static,
    C: CustomConstraint<V>,
{
    let constraint = Arc::new(constraint);
    let message = constraint.message();
    let for_args = Arc::clone(&constraint);
    ConstraintPredicate::new(move |value: &V| constraint.test(value), message, null_handling)
        .with_args(move || for_args.arguments())
}
