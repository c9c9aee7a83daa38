//! Constraints on points in time.
//!
//! Any ordered, serializable time type works (`SystemTime`, seconds since the
//! epoch, a date type from another crate). Reference instants can be fixed,
//! or supplied lazily through a [`Memoized`] cell that is filled on the first
//! evaluation and then shared by every thread using the validator.

use std::sync::Arc;
use std::time::SystemTime;

use serde::Serialize;

use super::predicate::{ConstraintPredicate, NullHandling, ViolationMessage};
use super::to_arg;
use super::traits::Constraint;
use crate::memoize::Memoized;

/// Constraints for temporal fields.
///
/// # Example
///
/// ```rust
/// use std::time::{Duration, SystemTime};
/// use verdict::{Constraint, TemporalConstraint};
///
/// let expiry = TemporalConstraint::<SystemTime>::new().future();
/// let yesterday = SystemTime::now() - Duration::from_secs(86_400);
/// assert!(expiry.predicates()[0].is_violated(Some(&yesterday)));
/// ```
#[derive(Debug)]
pub struct TemporalConstraint<V> {
    predicates: Vec<ConstraintPredicate<V>>,
}

impl<V> TemporalConstraint<V> {
    /// Creates a temporal constraint with no predicates.
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<V> Default for TemporalConstraint<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: 'static> Constraint<V> for TemporalConstraint<V> {
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

impl<V> TemporalConstraint<V>
where
    V: PartialOrd + Serialize + Send + Sync + 'static,
{
    /// Requires a value strictly before `max`.
    pub fn before(self, max: V) -> Self {
        self.fixed(max, ViolationMessage::TEMPORAL_BEFORE, |v, max| v < max)
    }

    /// Requires a value strictly after `min`.
    pub fn after(self, min: V) -> Self {
        self.fixed(min, ViolationMessage::TEMPORAL_AFTER, |v, min| v > min)
    }

    /// Requires `min <= value <= max`.
    ///
    /// # Panics
    ///
    /// Panics if `min` is after `max`.
    pub fn between(self, min: V, max: V) -> Self {
        assert!(min <= max, "between requires min <= max");
        let args = vec![to_arg(&min), to_arg(&max)];
        self.constrain(
            ConstraintPredicate::new(
                move |v: &V| *v >= min && *v <= max,
                ViolationMessage::TEMPORAL_BETWEEN,
                NullHandling::NullIsValid,
            )
            .with_args(move || args.clone()),
        )
    }

    /// Requires a value before an instant computed on first use.
    ///
    /// The supplier may run more than once under contention; every check and
    /// every message observes the single committed instant.
    pub fn before_lazy<F>(self, supplier: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.lazy(supplier, ViolationMessage::TEMPORAL_BEFORE, |v, max| v < max)
    }

    /// Requires a value after an instant computed on first use.
    pub fn after_lazy<F>(self, supplier: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.lazy(supplier, ViolationMessage::TEMPORAL_AFTER, |v, min| v > min)
    }

    fn fixed(self, bound: V, message: ViolationMessage, check: fn(&V, &V) -> bool) -> Self {
        let arg = to_arg(&bound);
        self.constrain(
            ConstraintPredicate::new(move |v: &V| check(v, &bound), message, NullHandling::NullIsValid)
                .with_args(move || vec![arg.clone()]),
        )
    }

    fn lazy<F>(self, supplier: F, message: ViolationMessage, check: fn(&V, &V) -> bool) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
    {
        let bound = Arc::new(Memoized::new(supplier));
        let for_args = Arc::clone(&bound);
        self.constrain(
            ConstraintPredicate::new(move |v: &V| check(v, bound.get()), message, NullHandling::NullIsValid)
                .with_args(move || vec![to_arg(for_args.get())]),
        )
    }
}

impl TemporalConstraint<SystemTime> {
    /// Requires an instant before the moment of each check.
    pub fn past(self) -> Self {
        self.relative_to_now(ViolationMessage::TEMPORAL_PAST, |v, now| v < now)
    }

    /// Requires an instant no later than the moment of each check.
    pub fn past_or_present(self) -> Self {
        self.relative_to_now(ViolationMessage::TEMPORAL_PAST_OR_PRESENT, |v, now| v <= now)
    }

    /// Requires an instant after the moment of each check.
    pub fn future(self) -> Self {
        self.relative_to_now(ViolationMessage::TEMPORAL_FUTURE, |v, now| v > now)
    }

    /// Requires an instant no earlier than the moment of each check.
    pub fn future_or_present(self) -> Self {
        self.relative_to_now(ViolationMessage::TEMPORAL_FUTURE_OR_PRESENT, |v, now| v >= now)
    }

    fn relative_to_now(self, message: ViolationMessage, check: fn(&SystemTime, &SystemTime) -> bool) -> Self {
        self.constrain(ConstraintPredicate::new(
            move |v: &SystemTime| check(v, &SystemTime::now()),
            message,
            NullHandling::NullIsValid,
        ))
    }
}
