//! Constraints on single field values.
//!
//! A constraint is an ordered list of [`ConstraintPredicate`]s built through a
//! fluent, self-typed API. The shared methods (`not_null`, `is_null`,
//! `predicate`, `custom`, `message`) come from the [`Constraint`] trait; each
//! concrete constraint adds the vocabulary of its value type.
//!
//! # Example
//!
//! ```rust
//! use verdict::{Constraint, NumericConstraint};
//!
//! let age = NumericConstraint::<i32>::new().not_null().greater_than_or_equal(0);
//!
//! let broken: Vec<_> = age
//!     .predicates()
//!     .iter()
//!     .filter(|p| p.is_violated(Some(&-1)))
//!     .map(|p| p.message_key())
//!     .collect();
//! assert_eq!(broken, vec!["numeric.greaterThanOrEqual"]);
//! ```

mod boolean;
mod container;
mod numeric;
mod object;
mod predicate;
mod string;
mod temporal;
mod traits;

pub use boolean::BooleanConstraint;
pub use container::{ContainerConstraint, HasLen};
pub use numeric::NumericConstraint;
pub use object::ObjectConstraint;
pub use predicate::{ConstraintPredicate, NullHandling, ViolationMessage};
pub use string::StringConstraint;
pub use temporal::TemporalConstraint;
pub use traits::{Constraint, CustomConstraint};

use serde::Serialize;
use serde_json::Value;

/// Converts a value into a message argument. Unserializable values become `null`.
pub(crate) fn to_arg<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
