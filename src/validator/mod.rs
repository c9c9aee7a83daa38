//! Validators: ordered field constraints evaluated against a value.
//!
//! A [`Validator`] is assembled once through [`ValidatorBuilder`] and then
//! reused, from any number of threads, to check values of its target type.
//! Each check walks the registered fields in order and collects every broken
//! rule into [`ConstraintViolations`].

mod builder;
mod field;

use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use rayon::prelude::*;

use crate::context::{ConstraintContext, ConstraintGroup};
use crate::either::Either;
use crate::error::{ConstraintViolation, ConstraintViolations};
use crate::message::{Locale, MessageFormatter};
use crate::path::FieldPath;
use crate::validation::Validation;

pub use builder::ValidatorBuilder;

use field::{FieldEntry, Scope};

/// A validation outcome whose errors are constraint violations.
pub type Validated<T> = Validation<ConstraintViolation, T>;

/// Checks values of type `T` against registered field constraints.
///
/// # Example
///
/// ```rust
/// use verdict::{Constraint, Validator};
///
/// struct User {
///     name: String,
///     age: i32,
/// }
///
/// let validator = Validator::<User>::builder()
///     .string("name", |u: &User| Some(u.name.as_str()), |c| c.not_blank())
///     .number("age", |u: &User| Some(&u.age), |c| c.greater_than_or_equal(0))
///     .build();
///
/// let violations = validator.validate(&User { name: "".into(), age: -1 });
/// assert_eq!(violations.len(), 2);
/// assert_eq!(violations.messages(), vec![
///     "\"name\" must not be blank",
///     "\"age\" must be greater than or equal to 0",
/// ]);
///
/// assert!(validator.validate(&User { name: "Alice".into(), age: 30 }).is_valid());
/// ```
pub struct Validator<T> {
    entries: Vec<Box<dyn FieldEntry<T>>>,
    formatter: Arc<dyn MessageFormatter>,
    separator: String,
    fail_fast: bool,
}

impl<T: 'static> Validator<T> {
    /// Starts building a validator.
    pub fn builder() -> ValidatorBuilder<T> {
        ValidatorBuilder::new()
    }
}

impl<T> Validator<T> {
    /// Validates `target` in the default group, rendering messages in the
    /// root locale.
    pub fn validate(&self, target: &T) -> ConstraintViolations {
        self.validate_with_context(target, &ConstraintContext::default(), &Locale::root())
    }

    /// Validates `target`, rendering messages in `locale`.
    pub fn validate_with_locale(&self, target: &T, locale: &Locale) -> ConstraintViolations {
        self.validate_with_context(target, &ConstraintContext::default(), locale)
    }

    /// Validates `target` in `group`.
    ///
    /// Fields registered with
    /// [`constraint_on_group`](ValidatorBuilder::constraint_on_group) only run
    /// when their group matches.
    pub fn validate_with_group(&self, target: &T, group: &ConstraintGroup) -> ConstraintViolations {
        self.validate_with_context(target, &ConstraintContext::from(group), &Locale::root())
    }

    /// Validates `target` in `context`, rendering messages in `locale`.
    pub fn validate_with_context(
        &self,
        target: &T,
        context: &ConstraintContext,
        locale: &Locale,
    ) -> ConstraintViolations {
        let scope = Scope {
            formatter: &self.formatter,
            locale,
            context,
            separator: &self.separator,
            fail_fast: self.fail_fast,
        };
        let mut violations = ConstraintViolations::new();
        let _ = self.evaluate_into(target, &FieldPath::root(), &scope, &mut violations);

        if violations.is_valid() {
            tracing::trace!(
                entries = self.entries.len(),
                context = context.name(),
                "validation passed"
            );
        } else {
            tracing::debug!(
                violations = violations.len(),
                context = context.name(),
                "validation failed"
            );
        }
        violations
    }

    /// Validates `target` and keeps it on success.
    pub fn validate_to_either(&self, target: T) -> Either<ConstraintViolations, T> {
        let violations = self.validate(&target);
        if violations.is_valid() {
            Either::right(target)
        } else {
            Either::left(violations)
        }
    }

    /// Validates `target` into a [`Validated`], so it can take part in
    /// [`Validations::combine`](crate::Validations::combine).
    pub fn validated(&self, target: T) -> Validated<T> {
        match self.validate(&target).into_non_empty() {
            None => Validation::success(target),
            Some(errors) => Validation::from_errors(errors),
        }
    }

    /// Validates every target in parallel. Reports keep the input order.
    pub fn validate_all(&self, targets: &[T]) -> Vec<ConstraintViolations>
    where
        T: Sync,
    {
        targets.par_iter().map(|target| self.validate(target)).collect()
    }

    /// Returns true if the validator fails fast.
    pub fn is_fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Returns the separator placed between nested field names.
    pub fn message_key_separator(&self) -> &str {
        &self.separator
    }

    /// Evaluates every entry under `parent`, using the caller's scope.
    ///
    /// Nested validators run with the settings of the outermost validator.
    pub(crate) fn evaluate_into(
        &self,
        target: &T,
        parent: &FieldPath,
        scope: &Scope<'_>,
        out: &mut ConstraintViolations,
    ) -> ControlFlow<()> {
        for entry in &self.entries {
            entry.evaluate(target, parent, scope, out)?;
        }
        ControlFlow::Continue(())
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("entries", &self.entries.len())
            .field("separator", &self.separator)
            .field("fail_fast", &self.fail_fast)
            .finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validator<String>>();
    assert_sync::<Validator<String>>();
};
