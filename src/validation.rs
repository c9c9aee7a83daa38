//! Accumulating validation results.
//!
//! [`Validation`] is either `Success(T)` or `Failure` holding a non-empty,
//! ordered list of errors. Unlike `Result`, two failures combined through
//! [`Validation::apply`] keep the errors of both sides, which is what makes
//! [`Validations::combine`](crate::Validations::combine) able to report every
//! problem at once.
//!
//! # Example
//!
//! ```rust
//! use verdict::Validation;
//!
//! let age: Validation<&str, u32> = Validation::success(30);
//! assert_eq!(age.map(|a| a + 1).into_result().ok(), Some(31));
//!
//! let name: Validation<&str, String> = Validation::failure(vec!["name is blank"]);
//! assert!(name.is_failure());
//! ```

use stillwater::prelude::*;

use crate::combine::{Combining, Composing};
use crate::either::Either;

/// The outcome of validating a value: the value itself, or every error found.
///
/// The error list of a `Failure` is a [`NonEmptyVec`], so a failure without
/// errors cannot be constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<E, T> {
    /// The value passed validation.
    Success(T),
    /// The value failed validation with at least one error.
    Failure(NonEmptyVec<E>),
}

impl<E, T> Validation<E, T> {
    // ========== Constructors ==========

    /// Creates a successful validation.
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Creates a failed validation from a list of errors.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. A failure must carry at least one error.
    pub fn failure(errors: Vec<E>) -> Self {
        match NonEmptyVec::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => panic!("a failed Validation requires at least one error"),
        }
    }

    /// Creates a failed validation with a single error.
    pub fn failure_of(error: E) -> Self {
        Validation::Failure(NonEmptyVec::singleton(error))
    }

    /// Creates a failed validation from an already non-empty error list.
    pub fn from_errors(errors: NonEmptyVec<E>) -> Self {
        Validation::Failure(errors)
    }

    // ========== Queries ==========

    /// Returns true if this is a `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Returns true if this is a `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Borrows the validated value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Validation::Success(value) => Some(value),
            Validation::Failure(_) => None,
        }
    }

    /// Borrows the error list, if any.
    pub fn errors(&self) -> Option<&NonEmptyVec<E>> {
        match self {
            Validation::Success(_) => None,
            Validation::Failure(errors) => Some(errors),
        }
    }

    /// Consumes this validation, returning the value if it succeeded.
    pub fn into_value(self) -> Option<T> {
        match self {
            Validation::Success(value) => Some(value),
            Validation::Failure(_) => None,
        }
    }

    /// Consumes this validation, returning the errors as a `Vec` (empty on success).
    pub fn into_errors(self) -> Vec<E> {
        match self {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }

    // ========== Functor ==========

    /// Transforms the value of a success. Failures pass through untouched.
    ///
    /// `v.map(|x| x)` is equal to `v` for every `v`.
    pub fn map<U, F>(self, f: F) -> Validation<E, U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }

    /// Chains a dependent validation.
    ///
    /// This short-circuits: a failure is returned as is and `f` never runs,
    /// so errors do not accumulate across a `flat_map`.
    pub fn flat_map<U, F>(self, f: F) -> Validation<E, U>
    where
        F: FnOnce(T) -> Validation<E, U>,
    {
        match self {
            Validation::Success(value) => f(value),
            Validation::Failure(errors) => Validation::Failure(errors),
        }
    }

    /// Transforms every error individually, keeping their order.
    pub fn map_error<E2, F>(self, f: F) -> Validation<E2, T>
    where
        F: FnMut(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(errors) => Validation::Failure(errors.map(f)),
        }
    }

    /// Transforms the error list as a whole.
    pub fn map_errors<E2, F>(self, f: F) -> Validation<E2, T>
    where
        F: FnOnce(NonEmptyVec<E>) -> NonEmptyVec<E2>,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(errors) => Validation::Failure(f(errors)),
        }
    }

    /// Transforms whichever side is present.
    pub fn bimap<E2, U, F, G>(self, errors_fn: F, value_fn: G) -> Validation<E2, U>
    where
        F: FnOnce(NonEmptyVec<E>) -> NonEmptyVec<E2>,
        G: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(value_fn(value)),
            Validation::Failure(errors) => Validation::Failure(errors_fn(errors)),
        }
    }

    /// Runs `f` on the value of a success and returns `self` unchanged.
    pub fn peek<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Validation::Success(value) = &self {
            f(value);
        }
        self
    }

    /// Runs `f` on the errors of a failure and returns `self` unchanged.
    pub fn peek_errors<F>(self, f: F) -> Self
    where
        F: FnOnce(&NonEmptyVec<E>),
    {
        if let Validation::Failure(errors) = &self {
            f(errors);
        }
        self
    }

    /// Collapses both cases into one value.
    pub fn fold<U, F, G>(self, on_failure: F, on_success: G) -> U
    where
        F: FnOnce(NonEmptyVec<E>) -> U,
        G: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => on_success(value),
            Validation::Failure(errors) => on_failure(errors),
        }
    }

    // ========== Applicative ==========

    /// Applies a validated function to this validated value.
    ///
    /// Succeeds only when both succeed. When both fail, the result holds the
    /// errors of `holder` first, followed by the errors of `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::Validation;
    ///
    /// let holder: Validation<&str, fn(i32) -> i32> = Validation::failure(vec!["f"]);
    /// let v: Validation<&str, i32> = Validation::failure(vec!["x"]);
    /// assert_eq!(v.apply(holder).into_errors(), vec!["f", "x"]);
    /// ```
    pub fn apply<U, F>(self, holder: Validation<E, F>) -> Validation<E, U>
    where
        F: FnOnce(T) -> U,
    {
        match (holder, self) {
            (Validation::Success(f), Validation::Success(value)) => Validation::Success(f(value)),
            (Validation::Success(_), Validation::Failure(errors)) => Validation::Failure(errors),
            (Validation::Failure(errors), Validation::Success(_)) => Validation::Failure(errors),
            (Validation::Failure(first), Validation::Failure(second)) => {
                Validation::Failure(first.combine(second))
            }
        }
    }

    /// Starts an accumulating combination with `next`.
    ///
    /// See [`Validations::combine`](crate::Validations::combine).
    pub fn combine<T2>(self, next: Validation<E, T2>) -> Combining<(Self, Validation<E, T2>)> {
        Combining::new((self, next))
    }

    /// Starts a list-typed accumulating combination with `next`.
    ///
    /// The resulting failure carries all errors as a single `Vec<E>` error.
    pub fn compose<T2>(self, next: Validation<E, T2>) -> Composing<(Self, Validation<E, T2>)> {
        Composing::new((self, next))
    }

    // ========== Conversions ==========

    /// Converts into a `Result` with the non-empty error list as the error.
    pub fn into_result(self) -> Result<T, NonEmptyVec<E>> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(errors) => Err(errors),
        }
    }

    /// Returns the value, or an error built from the errors.
    pub fn or_else_throw<X, F>(self, f: F) -> Result<T, X>
    where
        F: FnOnce(NonEmptyVec<E>) -> X,
    {
        self.into_result().map_err(f)
    }

    /// Returns the value, or a fallback derived from the errors.
    pub fn or_else_get<F>(self, f: F) -> T
    where
        F: FnOnce(NonEmptyVec<E>) -> T,
    {
        self.fold(f, |value| value)
    }

    /// Converts into an [`Either`] with the errors on the left.
    pub fn to_either(self) -> Either<NonEmptyVec<E>, T> {
        match self {
            Validation::Success(value) => Either::Right(value),
            Validation::Failure(errors) => Either::Left(errors),
        }
    }

    /// Builds a validation from an [`Either`] with the errors on the left.
    ///
    /// `Validation::from_either(v.to_either()) == v` for every `v`.
    pub fn from_either(either: Either<NonEmptyVec<E>, T>) -> Self {
        match either {
            Either::Left(errors) => Validation::Failure(errors),
            Either::Right(value) => Validation::Success(value),
        }
    }
}

impl<E, T> From<Result<T, NonEmptyVec<E>>> for Validation<E, T> {
    fn from(result: Result<T, NonEmptyVec<E>>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(errors) => Validation::Failure(errors),
        }
    }
}

impl<E, T> From<Validation<E, T>> for stillwater::Validation<T, NonEmptyVec<E>> {
    fn from(validation: Validation<E, T>) -> Self {
        match validation {
            Validation::Success(value) => stillwater::Validation::Success(value),
            Validation::Failure(errors) => stillwater::Validation::Failure(errors),
        }
    }
}

impl<E, T> From<stillwater::Validation<T, NonEmptyVec<E>>> for Validation<E, T> {
    fn from(validation: stillwater::Validation<T, NonEmptyVec<E>>) -> Self {
        match validation {
            stillwater::Validation::Success(value) => Validation::Success(value),
            stillwater::Validation::Failure(errors) => Validation::Failure(errors),
        }
    }
}
