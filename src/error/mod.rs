//! Violation reports and error types.
//!
//! A validator never fails with a Rust error: broken rules are data, collected
//! into [`ConstraintViolations`]. [`ConstraintViolationsError`] exists for
//! callers who want to propagate an invalid report with `?`.

mod violation;

pub use violation::{
    ConstraintViolation, ConstraintViolations, ConstraintViolationsError, ViolationDetail,
};
