//! # Verdict
//!
//! A declarative validation library that collects ALL constraint violations,
//! giving callers complete feedback instead of stopping at the first problem.
//!
//! ## Overview
//!
//! Constraints are described per field with a fluent builder, assembled into
//! a reusable [`Validator`], and evaluated into an ordered
//! [`ConstraintViolations`] report. Independently validated inputs can be
//! folded into one typed value with [`Validations::combine`], which keeps
//! every failure in positional order.
//!
//! ## Core Types
//!
//! - [`Constraint`]: The self-typed builder shared by every constraint
//! - [`ConstraintPredicate`]: One rule, with its message and [`NullHandling`] policy
//! - [`Validator`]: Ordered field constraints for a target type
//! - [`ConstraintGroup`] / [`ConstraintContext`]: What a validation runs under, for conditional fields
//! - [`ConstraintViolations`]: The ordered outcome of one validation
//! - [`Validation`] / [`Either`]: Success-or-errors values with applicative combination
//! - [`Memoized`]: A thread-safe, single-assignment lazy value
//!
//! Absent values are modelled as `None`. Value tests never see them; each
//! predicate's [`NullHandling`] decides whether absence is a violation.
//!
//! ## Example
//!
//! ```rust
//! use verdict::{Constraint, Validation, Validations, Validator};
//!
//! struct User {
//!     name: String,
//!     age: i32,
//! }
//!
//! let validator = Validator::<User>::builder()
//!     .string("name", |u: &User| Some(u.name.as_str()), |c| c.not_null().not_blank())
//!     .number("age", |u: &User| Some(&u.age), |c| c.greater_than_or_equal(0))
//!     .build();
//!
//! let violations = validator.validate(&User { name: "".into(), age: -1 });
//! assert_eq!(violations.len(), 2);
//!
//! // Independent validations fold into one value, or every error.
//! let total = Validations::combine((
//!     Validation::<String, i32>::success(1),
//!     Validation::success(2),
//! ))
//! .apply(|a, b| a + b);
//! assert_eq!(total, Validation::success(3));
//! ```

pub mod combine;
pub mod constraint;
pub mod context;
pub mod either;
pub mod error;
pub mod memoize;
pub mod message;
pub mod path;
pub mod validation;
pub mod validator;

pub use combine::{AppendValidation, Combining, Composing, FoldApply, ValidationTuple, Validations};
pub use constraint::{
    BooleanConstraint, Constraint, ConstraintPredicate, ContainerConstraint, CustomConstraint,
    HasLen, NullHandling, NumericConstraint, ObjectConstraint, StringConstraint,
    TemporalConstraint, ViolationMessage,
};
pub use context::{ConstraintContext, ConstraintGroup};
pub use either::{Either, EitherExt};
pub use error::{
    ConstraintViolation, ConstraintViolations, ConstraintViolationsError, ViolationDetail,
};
pub use memoize::Memoized;
pub use message::{BundleMessageFormatter, Locale, MessageFormatter, SimpleMessageFormatter};
pub use path::{FieldPath, PathSegment};
pub use validation::Validation;
pub use validator::{Validated, Validator, ValidatorBuilder};

/// Re-exports of `stillwater`'s non-empty list, used as the error list of a
/// failed [`Validation`].
pub use stillwater::prelude::NonEmptyVec;
