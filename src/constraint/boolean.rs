//! Boolean constraints.

use super::predicate::{ConstraintPredicate, NullHandling, ViolationMessage};
use super::traits::Constraint;

/// Constraints for `bool` fields.
#[derive(Debug, Default)]
pub struct BooleanConstraint {
    predicates: Vec<ConstraintPredicate<bool>>,
}

impl Constraint<bool> for BooleanConstraint {
    fn predicates(&self) -> &[ConstraintPredicate<bool>] {
        &self.predicates
    }

    fn predicates_mut(&mut self) -> &mut Vec<ConstraintPredicate<bool>> {
        &mut self.predicates
    }

    fn into_predicates(self) -> Vec<ConstraintPredicate<bool>> {
        self.predicates
    }
}

impl BooleanConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `true`. An absent value passes.
    pub fn is_true(self) -> Self {
        self.constrain(ConstraintPredicate::new(
            |b: &bool| *b,
            ViolationMessage::BOOLEAN_IS_TRUE,
            NullHandling::NullIsValid,
        ))
    }

    /// Requires `false`. An absent value passes.
    pub fn is_false(self) -> Self {
        self.constrain(ConstraintPredicate::new(
            |b: &bool| !*b,
            ViolationMessage::BOOLEAN_IS_FALSE,
            NullHandling::NullIsValid,
        ))
    }
}
