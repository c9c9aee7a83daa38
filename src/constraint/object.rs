//! Constraints for values compared by equality.

use std::sync::Arc;

use serde::Serialize;

use super::predicate::{ConstraintPredicate, NullHandling, ViolationMessage};
use super::to_arg;
use super::traits::Constraint;

/// Constraints for any value type: presence, equality and membership.
///
/// # Example
///
/// ```rust
/// use verdict::{Constraint, ObjectConstraint};
///
/// #[derive(PartialEq, serde::Serialize)]
/// enum Plan {
///     Free,
///     Pro,
/// }
///
/// let plan = ObjectConstraint::new().not_null().one_of([Plan::Free, Plan::Pro]);
/// assert_eq!(plan.predicates().len(), 2);
/// ```
#[derive(Debug)]
pub struct ObjectConstraint<V: ?Sized> {
    predicates: Vec<ConstraintPredicate<V>>,
}

impl<V: ?Sized> ObjectConstraint<V> {
    /// Creates a constraint with no predicates.
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<V: ?Sized> Default for ObjectConstraint<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized + 'static> Constraint<V> for ObjectConstraint<V> {
    fn predicates(&self) -> &[ConstraintPredicate<V>] {
        &self.predicates
    }

    fn predicates_mut(&mut self) -> &mut Vec<ConstraintPredicate<V>> {
        &mut self.predicates
    }

    fn into_predicates(self) -> Vec<ConstraintPredicate<V>> {
        self.predicates
    }
}

impl<V> ObjectConstraint<V>
where
    V: PartialEq + Serialize + Send + Sync + 'static,
{
    /// Requires the value to equal `expected`.
    pub fn equal_to(self, expected: V) -> Self {
        let arg = to_arg(&expected);
        self.constrain(
            ConstraintPredicate::new(
                move |value: &V| *value == expected,
                ViolationMessage::OBJECT_EQUAL_TO,
                NullHandling::NullIsValid,
            )
            .with_args(move || vec![arg.clone()]),
        )
    }

    /// Requires the value to be one of `allowed`.
    ///
    /// # Panics
    ///
    /// Panics if `allowed` is empty, since no value could ever pass.
    pub fn one_of(self, allowed: impl IntoIterator<Item = V>) -> Self {
        let allowed: Arc<Vec<V>> = Arc::new(allowed.into_iter().collect());
        assert!(!allowed.is_empty(), "one_of requires at least one allowed value");
        let arg = to_arg(allowed.as_slice());
        self.constrain(
            ConstraintPredicate::new(
                move |value: &V| allowed.contains(value),
                ViolationMessage::OBJECT_ONE_OF,
                NullHandling::NullIsValid,
            )
            .with_args(move || vec![arg.clone()]),
        )
    }
}
