//! Numeric constraints.

use serde::Serialize;

use super::predicate::{ConstraintPredicate, NullHandling, ViolationMessage};
use super::to_arg;
use super::traits::Constraint;

/// Constraints for ordered numeric fields (`i32`, `u64`, `f64`, ...).
///
/// # Example
///
/// ```rust
/// use verdict::{Constraint, NumericConstraint};
///
/// let percent = NumericConstraint::<f64>::new().between(0.0, 100.0);
/// assert!(percent.predicates()[0].is_violated(Some(&100.5)));
/// ```
#[derive(Debug)]
pub struct NumericConstraint<V> {
    predicates: Vec<ConstraintPredicate<V>>,
}

impl<V> NumericConstraint<V> {
    /// Creates a numeric constraint with no predicates.
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<V> Default for NumericConstraint<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> Constraint<V> for NumericConstraint<V> {
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

impl<V> NumericConstraint<V>
where
    V: PartialOrd + Serialize + Send + Sync + 'static,
{
    /// Requires a value strictly greater than `min`.
    pub fn greater_than(self, min: V) -> Self {
        self.compare(min, ViolationMessage::NUMERIC_GREATER_THAN, |v, min| v > min)
    }

    /// Requires a value greater than or equal to `min`.
    pub fn greater_than_or_equal(self, min: V) -> Self {
        self.compare(min, ViolationMessage::NUMERIC_GREATER_THAN_OR_EQUAL, |v, min| v >= min)
    }

    /// Requires a value strictly less than `max`.
    pub fn less_than(self, max: V) -> Self {
        self.compare(max, ViolationMessage::NUMERIC_LESS_THAN, |v, max| v < max)
    }

    /// Requires a value less than or equal to `max`.
    pub fn less_than_or_equal(self, max: V) -> Self {
        self.compare(max, ViolationMessage::NUMERIC_LESS_THAN_OR_EQUAL, |v, max| v <= max)
    }

    /// Requires `min <= value <= max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` or the bounds are not comparable.
    pub fn between(self, min: V, max: V) -> Self {
        assert!(min <= max, "between requires min <= max");
        let args = vec![to_arg(&min), to_arg(&max)];
        self.constrain(
            ConstraintPredicate::new(
                move |v: &V| *v >= min && *v <= max,
                ViolationMessage::NUMERIC_BETWEEN,
                NullHandling::NullIsValid,
            )
            .with_args(move || args.clone()),
        )
    }

    fn compare(self, bound: V, message: ViolationMessage, check: fn(&V, &V) -> bool) -> Self {
        let arg = to_arg(&bound);
        self.constrain(
            ConstraintPredicate::new(
                move |v: &V| check(v, &bound),
                message,
                NullHandling::NullIsValid,
            )
            .with_args(move || vec![arg.clone()]),
        )
    }
}

impl<V> NumericConstraint<V>
where
    V: PartialOrd + Default + Serialize + Send + Sync + 'static,
{
    /// Requires a value greater than zero.
    pub fn positive(self) -> Self {
        self.sign(ViolationMessage::NUMERIC_POSITIVE, |v, zero| v > zero)
    }

    /// Requires a value greater than or equal to zero.
    pub fn positive_or_zero(self) -> Self {
        self.sign(ViolationMessage::NUMERIC_POSITIVE_OR_ZERO, |v, zero| v >= zero)
    }

    /// Requires a value less than zero.
    pub fn negative(self) -> Self {
        self.sign(ViolationMessage::NUMERIC_NEGATIVE, |v, zero| v < zero)
    }

    /// Requires a value less than or equal to zero.
    pub fn negative_or_zero(self) -> Self {
        self.sign(ViolationMessage::NUMERIC_NEGATIVE_OR_ZERO, |v, zero| v <= zero)
    }

    fn sign(self, message: ViolationMessage, check: fn(&V, &V) -> bool) -> Self {
        let zero = V::default();
        self.constrain(ConstraintPredicate::new(
            move |v: &V| check(v, &zero),
            message,
            NullHandling::NullIsValid,
        ))
    }
}
