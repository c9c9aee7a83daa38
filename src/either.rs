//! A two-case union with no success/failure bias.
//!
//! [`Either`] is `stillwater`'s union, re-exported. It is what
//! [`Validator::validate_to_either`](crate::Validator::validate_to_either)
//! returns: the violations on the left, the validated value on the right.
//! [`EitherExt`] adds the borrowing accessors, side-named maps, peeks and
//! `*_or_else_*` extractors that `stillwater` leaves out.
//!
//! # Example
//!
//! ```rust
//! use verdict::{Either, EitherExt};
//!
//! let parsed: Either<String, i32> = Either::right(42);
//! assert_eq!(parsed.right_value(), Some(&42));
//! let text = parsed.fold(|err| format!("error: {}", err), |n| format!("value: {}", n));
//! assert_eq!(text, "value: 42");
//! ```

pub use stillwater::Either;

/// Extra operations on [`Either`].
pub trait EitherExt<L, R>: Sized {
    /// Borrows the left value, if present.
    fn left_value(&self) -> Option<&L>;

    /// Borrows the right value, if present.
    fn right_value(&self) -> Option<&R>;

    /// Maps the left side, leaving a right value untouched.
    fn left_map<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2;

    /// Maps the right side, leaving a left value untouched.
    fn right_map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2;

    /// Returns the left value, or derives one from the right value.
    fn left_or_else_get<F>(self, f: F) -> L
    where
        F: FnOnce(R) -> L;

    /// Returns the right value, or derives one from the left value.
    fn right_or_else_get<F>(self, f: F) -> R
    where
        F: FnOnce(L) -> R;

    /// Returns the left value, or an error built from the right value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Either, EitherExt};
    ///
    /// let e: Either<&str, i32> = Either::right(5);
    /// assert_eq!(e.left_or_else_throw(|r| r * 2), Err(10));
    /// ```
    fn left_or_else_throw<X, F>(self, f: F) -> Result<L, X>
    where
        F: FnOnce(R) -> X;

    /// Returns the right value, or an error built from the left value.
    fn right_or_else_throw<X, F>(self, f: F) -> Result<R, X>
    where
        F: FnOnce(L) -> X;

    /// Runs `f` on the left value, if present, and returns `self` unchanged.
    fn peek_left<F>(self, f: F) -> Self
    where
        F: FnOnce(&L);

    /// Runs `f` on the right value, if present, and returns `self` unchanged.
    fn peek_right<F>(self, f: F) -> Self
    where
        F: FnOnce(&R);
}

impl<L, R> EitherExt<L, R> for Either<L, R> {
    fn left_value(&self) -> Option<&L> {
        self.as_ref().into_left()
    }

    fn right_value(&self) -> Option<&R> {
        self.as_ref().into_right()
    }

    fn left_map<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        self.map_left(f)
    }

    fn right_map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        self.map_right(f)
    }

    fn left_or_else_get<F>(self, f: F) -> L
    where
        F: FnOnce(R) -> L,
    {
        self.fold(|l| l, f)
    }

    fn right_or_else_get<F>(self, f: F) -> R
    where
        F: FnOnce(L) -> R,
    {
        self.fold(f, |r| r)
    }

    fn left_or_else_throw<X, F>(self, f: F) -> Result<L, X>
    where
        F: FnOnce(R) -> X,
    {
        self.swap().into_result().map_err(f)
    }

    fn right_or_else_throw<X, F>(self, f: F) -> Result<R, X>
    where
        F: FnOnce(L) -> X,
    {
        self.into_result().map_err(f)
    }

    fn peek_left<F>(self, f: F) -> Self
    where
        F: FnOnce(&L),
    {
        if let Either::Left(l) = &self {
            f(l);
        }
        self
    }

    fn peek_right<F>(self, f: F) -> Self
    where
        F: FnOnce(&R),
    {
        if let Either::Right(r) = &self {
            f(r);
        }
        self
    }
}
