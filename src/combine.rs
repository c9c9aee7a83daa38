//! Applicative combination of independent validations.
//!
//! [`Validations::combine`] takes a tuple of up to 16 [`Validation`]s with a
//! common error type and folds them against a function of the same arity. The
//! result is a success only when every input succeeded; otherwise it is a
//! failure holding every error, in the positional order of the inputs.
//!
//! The fold curries the function into nested single-argument closures, seeds
//! `Success(curried)`, and applies each input left to right with
//! [`Validation::apply`].
//!
//! # Example
//!
//! ```rust
//! use verdict::{Validation, Validations};
//!
//! let first: Validation<&str, &str> = Validation::success("A");
//! let second: Validation<&str, &str> = Validation::failure(vec!["bad1"]);
//! let third: Validation<&str, &str> = Validation::failure(vec!["bad2"]);
//!
//! let joined = Validations::combine((first, second, third))
//!     .apply(|a, b, c| format!("{}{}{}", a, b, c));
//! assert_eq!(joined.into_errors(), vec!["bad1", "bad2"]);
//! ```

use stillwater::prelude::NonEmptyVec;
use stillwater::traverse::sequence;

use crate::validation::Validation;

/// A tuple of validations sharing one error type.
///
/// Implemented for tuples of 1 to 16 `Validation<E, _>`.
pub trait ValidationTuple {
    /// The shared error type.
    type Error;
}

/// A tuple of validations that can be folded against `F`.
///
/// `F` must take exactly one argument per tuple element, in order.
pub trait FoldApply<F>: ValidationTuple {
    /// The result type of `F`.
    type Output;

    /// Folds every validation against `f`, accumulating errors in order.
    fn fold_apply(self, f: F) -> Validation<Self::Error, Self::Output>;
}

/// A tuple that can grow by one more validation.
pub trait AppendValidation<V> {
    /// The tuple with `V` appended.
    type Output;

    /// Appends `next` as the last element.
    fn append(self, next: V) -> Self::Output;
}

/// Entry point for combining validations.
pub struct Validations;

impl Validations {
    /// Wraps a tuple of validations for a later [`Combining::apply`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Validation, Validations};
    ///
    /// let sum = Validations::combine((
    ///     Validation::<&str, i32>::success(1),
    ///     Validation::<&str, i32>::success(2),
    /// ))
    /// .apply(|a, b| a + b);
    /// assert_eq!(sum, Validation::success(3));
    /// ```
    pub fn combine<Vs: ValidationTuple>(validations: Vs) -> Combining<Vs> {
        Combining::new(validations)
    }

    /// Wraps a tuple of validations for a later [`Composing::apply`], which
    /// reports every error as one list-typed error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Validation, Validations};
    ///
    /// let only: Validation<&str, i32> = Validation::failure(vec!["a", "b"]);
    /// let composed = Validations::compose((only,)).apply(|n| n + 1);
    /// assert_eq!(composed.into_errors(), vec![vec!["a", "b"]]);
    /// ```
    pub fn compose<Vs: ValidationTuple>(validations: Vs) -> Composing<Vs> {
        Composing::new(validations)
    }

    /// Folds a tuple of validations against `f` in one call.
    pub fn apply<F, Vs>(f: F, validations: Vs) -> Validation<Vs::Error, Vs::Output>
    where
        Vs: FoldApply<F>,
    {
        validations.fold_apply(f)
    }

    /// Turns a sequence of validations into a validation of the sequence.
    ///
    /// Errors of every failing element are kept, in element order.
    pub fn sequence<E, T, I>(validations: I) -> Validation<E, Vec<T>>
    where
        I: IntoIterator<Item = Validation<E, T>>,
    {
        Self::traverse(validations, |v| v)
    }

    /// Validates every element with `f`, accumulating all errors.
    pub fn traverse<E, T, U, I, F>(values: I, mut f: F) -> Validation<E, Vec<U>>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Validation<E, U>,
    {
        Self::traverse_indexed(values, |value, _| f(value))
    }

    /// Like [`traverse`](Self::traverse), passing each element's index to `f`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Validation, Validations};
    ///
    /// let checked = Validations::traverse_indexed(vec![3, -1, -2], |n, i| {
    ///     if n >= 0 {
    ///         Validation::success(n)
    ///     } else {
    ///         Validation::failure_of(format!("[{}] is negative", i))
    ///     }
    /// });
    /// assert_eq!(checked.into_errors(), vec!["[1] is negative", "[2] is negative"]);
    /// ```
    pub fn traverse_indexed<E, T, U, I, F>(values: I, mut f: F) -> Validation<E, Vec<U>>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T, usize) -> Validation<E, U>,
    {
        let results = values.into_iter().enumerate().map(|(index, value)| {
            stillwater::Validation::<U, NonEmptyVec<E>>::from(f(value, index))
        });
        sequence(results).into()
    }

    /// Validates an optional value; `None` is a success.
    pub fn traverse_optional<E, T, U, F>(value: Option<T>, f: F) -> Validation<E, Option<U>>
    where
        F: FnOnce(T) -> Validation<E, U>,
    {
        match value {
            Some(value) => f(value).map(Some),
            None => Validation::Success(None),
        }
    }
}

/// Validations waiting for the function that combines them.
///
/// Created by [`Validations::combine`] or [`Validation::combine`].
#[must_use = "a Combining does nothing until `apply` is called"]
pub struct Combining<Vs> {
    validations: Vs,
}

impl<Vs> Combining<Vs> {
    pub(crate) fn new(validations: Vs) -> Self {
        Self { validations }
    }

    /// Adds one more validation to combine.
    pub fn combine<V>(self, next: V) -> Combining<Vs::Output>
    where
        Vs: AppendValidation<V>,
    {
        Combining::new(self.validations.append(next))
    }
}

/// Like [`Combining`], but the failure carries the errors as one list.
///
/// Created by [`Validations::compose`] or [`Validation::compose`].
///
/// # Example
///
/// ```rust
/// use verdict::Validation;
///
/// let a: Validation<&str, i32> = Validation::failure(vec!["a"]);
/// let b: Validation<&str, i32> = Validation::failure(vec!["b"]);
/// let composed = a.compose(b).apply(|x, y| x + y);
/// assert_eq!(composed.into_errors(), vec![vec!["a", "b"]]);
/// ```
#[must_use = "a Composing does nothing until `apply` is called"]
pub struct Composing<Vs> {
    validations: Vs,
}

impl<Vs> Composing<Vs> {
    pub(crate) fn new(validations: Vs) -> Self {
        Self { validations }
    }

    /// Adds one more validation to compose.
    pub fn compose<V>(self, next: V) -> Composing<Vs::Output>
    where
        Vs: AppendValidation<V>,
    {
        Composing::new(self.validations.append(next))
    }
}

// Builds `move |a1: T1| move |a2: T2| ... f(a1, a2, ...)`.
macro_rules! curried {
    ($f:ident; [$($all:ident)+];) => {
        $f($($all),+)
    };
    ($f:ident; [$($all:ident)+]; $head:ident : $head_ty:ty $(, $rest:ident : $rest_ty:ty)*) => {
        move |$head: $head_ty| curried!($f; [$($all)+]; $($rest : $rest_ty),*)
    };
}

macro_rules! impl_fold_apply {
    ($($v:ident $a:ident $t:ident),+) => {
        impl<E, $($t),+> ValidationTuple for ($(Validation<E, $t>,)+) {
            type Error = E;
        }

        impl<E, $($t,)+ R, F> FoldApply<F> for ($(Validation<E, $t>,)+)
        where
            F: FnOnce($($t),+) -> R,
        {
            type Output = R;

            fn fold_apply(self, f: F) -> Validation<E, R> {
                let ($($v,)+) = self;
                let seed = Validation::success(curried!(f; [$($a)+]; $($a : $t),+));
                $(let seed = $v.apply(seed);)+
                seed
            }
        }

        impl<E, $($t),+> Combining<($(Validation<E, $t>,)+)> {
            /// Folds the validations against `f`.
            ///
            /// Returns `Success(f(v1, ..., vN))` if all succeeded, otherwise a
            /// failure with every error in positional order.
            pub fn apply<R, F>(self, f: F) -> Validation<E, R>
            where
                F: FnOnce($($t),+) -> R,
            {
                self.validations.fold_apply(f)
            }
        }

        impl<E, $($t),+> Composing<($(Validation<E, $t>,)+)> {
            /// Folds the validations against `f`, grouping all errors into a
            /// single `Vec` error.
            pub fn apply<R, F>(self, f: F) -> Validation<Vec<E>, R>
            where
                F: FnOnce($($t),+) -> R,
            {
                self.validations
                    .fold_apply(f)
                    .map_errors(|errors| NonEmptyVec::singleton(errors.into_vec()))
            }
        }
    };
}

macro_rules! impl_append {
    ($($v:ident $t:ident),+ => $next:ident) => {
        impl<E, $($t,)+ $next> AppendValidation<Validation<E, $next>> for ($(Validation<E, $t>,)+) {
            type Output = ($(Validation<E, $t>,)+ Validation<E, $next>);

            fn append(self, next: Validation<E, $next>) -> Self::Output {
                let ($($v,)+) = self;
                ($($v,)+ next)
            }
        }
    };
}

impl_fold_apply!(v1 a1 T1);
impl_fold_apply!(v1 a1 T1, v2 a2 T2);
impl_fold_apply!(v1 a1 T1, v2 a2 T2, v3 a3 T3);
impl_fold_apply!(v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4);
impl_fold_apply!(v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5);
impl_fold_apply!(v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6);
impl_fold_apply!(v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7);
impl_fold_apply!(
    v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7, v8 a8 T8
);
impl_fold_apply!(
    v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7, v8 a8 T8,
    v9 a9 T9
);
impl_fold_apply!(
    v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7, v8 a8 T8,
    v9 a9 T9, v10 a10 T10
);
impl_fold_apply!(
    v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7, v8 a8 T8,
    v9 a9 T9, v10 a10 T10, v11 a11 T11
);
impl_fold_apply!(
    v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7, v8 a8 T8,
    v9 a9 T9, v10 a10 T10, v11 a11 T11, v12 a12 T12
);
impl_fold_apply!(
    v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7, v8 a8 T8,
    v9 a9 T9, v10 a10 T10, v11 a11 T11, v12 a12 T12, v13 a13 T13
);
impl_fold_apply!(
    v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7, v8 a8 T8,
    v9 a9 T9, v10 a10 T10, v11 a11 T11, v12 a12 T12, v13 a13 T13, v14 a14 T14
);
impl_fold_apply!(
    v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7, v8 a8 T8,
    v9 a9 T9, v10 a10 T10, v11 a11 T11, v12 a12 T12, v13 a13 T13, v14 a14 T14, v15 a15 T15
);
impl_fold_apply!(
    v1 a1 T1, v2 a2 T2, v3 a3 T3, v4 a4 T4, v5 a5 T5, v6 a6 T6, v7 a7 T7, v8 a8 T8,
    v9 a9 T9, v10 a10 T10, v11 a11 T11, v12 a12 T12, v13 a13 T13, v14 a14 T14, v15 a15 T15,
    v16 a16 T16
);

impl_append!(v1 T1 => T2);
impl_append!(v1 T1, v2 T2 => T3);
impl_append!(v1 T1, v2 T2, v3 T3 => T4);
impl_append!(v1 T1, v2 T2, v3 T3, v4 T4 => T5);
impl_append!(v1 T1, v2 T2, v3 T3, v4 T4, v5 T5 => T6);
impl_append!(v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6 => T7);
impl_append!(v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6, v7 T7 => T8);
impl_append!(v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6, v7 T7, v8 T8 => T9);
impl_append!(v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6, v7 T7, v8 T8, v9 T9 => T10);
impl_append!(
    v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6, v7 T7, v8 T8, v9 T9, v10 T10 => T11
);
impl_append!(
    v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6, v7 T7, v8 T8, v9 T9, v10 T10, v11 T11 => T12
);
impl_append!(
    v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6, v7 T7, v8 T8, v9 T9, v10 T10, v11 T11,
    v12 T12 => T13
);
impl_append!(
    v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6, v7 T7, v8 T8, v9 T9, v10 T10, v11 T11,
    v12 T12, v13 T13 => T14
);
impl_append!(
    v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6, v7 T7, v8 T8, v9 T9, v10 T10, v11 T11,
    v12 T12, v13 T13, v14 T14 => T15
);
impl_append!(
    v1 T1, v2 T2, v3 T3, v4 T4, v5 T5, v6 T6, v7 T7, v8 T8, v9 T9, v10 T10, v11 T11,
    v12 T12, v13 T13, v14 T14, v15 T15 => T16
);

#[cfg(test)]
mod tests {
    use super::*;

    type V<T> = Validation<&'static str, T>;

    #[test]
    fn test_combine_all_success() {
        let result = Validations::combine((V::success(1), V::success(2))).apply(|a, b| a + b);
        assert_eq!(result, Validation::success(3));
    }

    #[test]
    fn test_combine_keeps_failures_in_position_order() {
        let result = Validations::combine((
            V::<&str>::success("A"),
            V::<&str>::failure(vec!["bad1"]),
            V::<&str>::failure(vec!["bad2"]),
        ))
        .apply(|a, b, c| format!("{}{}{}", a, b, c));
        assert_eq!(result.into_errors(), vec!["bad1", "bad2"]);
    }

    #[test]
    fn test_combine_multi_error_inputs_concatenate() {
        let result = Validations::combine((
            V::<i32>::failure(vec!["a1", "a2"]),
            V::<i32>::success(0),
            V::<i32>::failure(vec!["c1"]),
            V::<i32>::failure(vec!["d1", "d2"]),
        ))
        .apply(|a, b, c, d| a + b + c + d);
        assert_eq!(result.into_errors(), vec!["a1", "a2", "c1", "d1", "d2"]);
    }

    #[test]
    fn test_single_arity() {
        let result = Validations::combine((V::success(5),)).apply(|a| a * 2);
        assert_eq!(result, Validation::success(10));
    }

    #[test]
    fn test_chained_combine_matches_tuple_combine() {
        let chained = V::success(1)
            .combine(V::<i32>::failure_of("x"))
            .combine(V::success(3))
            .combine(V::<i32>::failure_of("y"))
            .apply(|a, b, c, d| a + b + c + d);
        assert_eq!(chained.into_errors(), vec!["x", "y"]);
    }

    #[test]
    fn test_combine_sixteen() {
        let result = Validations::combine((
            V::success(1),
            V::success(2),
            V::success(3),
            V::success(4),
            V::success(5),
            V::success(6),
            V::success(7),
            V::success(8),
            V::success(9),
            V::success(10),
            V::success(11),
            V::success(12),
            V::success(13),
            V::success(14),
            V::success(15),
            V::success(16),
        ))
        .apply(|a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p| {
            a + b + c + d + e + f + g + h + i + j + k + l + m + n + o + p
        });
        assert_eq!(result, Validation::success(136));
    }

    #[test]
    fn test_combine_sixteen_failures_ordered() {
        let names = [
            "e1", "e2", "e3", "e4", "e5", "e6", "e7", "e8", "e9", "e10", "e11", "e12", "e13",
            "e14", "e15", "e16",
        ];
        let f = |i: usize| V::<u8>::failure_of(names[i]);
        let result = Validations::combine((
            f(0),
            f(1),
            f(2),
            f(3),
            f(4),
            f(5),
            f(6),
            f(7),
            f(8),
            f(9),
            f(10),
            f(11),
            f(12),
            f(13),
            f(14),
            f(15),
        ))
        .apply(|_, _, _, _, _, _, _, _, _, _, _, _, _, _, _, _| ());
        assert_eq!(result.into_errors(), names.to_vec());
    }

    #[test]
    fn test_function_not_called_on_failure() {
        let result = Validations::combine((V::success(1), V::<i32>::failure_of("no")))
            .apply(|_, _| -> i32 { panic!("combining function must not run") });
        assert!(result.is_failure());
    }

    #[test]
    fn test_apply_free_function() {
        let result = Validations::apply(|a: i32, b: i32, c: i32| a * b * c, (
            V::success(2),
            V::success(3),
            V::success(4),
        ));
        assert_eq!(result, Validation::success(24));
    }

    #[test]
    fn test_compose_groups_errors() {
        let composed = V::<i32>::failure(vec!["a", "b"])
            .compose(V::success(2))
            .compose(V::<i32>::failure_of("c"))
            .apply(|a, b, c| a + b + c);
        assert_eq!(composed.into_errors(), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_compose_single_input() {
        let failed = Validations::compose((V::<i32>::failure(vec!["a", "b"]),)).apply(|n| n * 2);
        assert_eq!(failed.into_errors(), vec![vec!["a", "b"]]);

        let passed = Validations::compose((V::success(4),)).apply(|n| n * 2);
        assert_eq!(passed, Validation::success(8));
    }

    #[test]
    fn test_traverse_indexed_passes_positions() {
        let checked = Validations::traverse_indexed(vec![5, 0, 7, 0], |n, i| {
            if n > 0 {
                V::success(n * 10 + i as i32)
            } else {
                V::failure_of(if i == 1 { "zero at 1" } else { "zero at 3" })
            }
        });
        assert_eq!(checked.into_errors(), vec!["zero at 1", "zero at 3"]);

        let all = Validations::traverse_indexed(vec![1, 2], |n, i| V::success(n + i as i32));
        assert_eq!(all, Validation::success(vec![1, 3]));
    }

    #[test]
    fn test_compose_success() {
        let composed = V::success("x").compose(V::success(2)).apply(|s, n| s.repeat(n));
        assert_eq!(composed, Validation::success("xx".to_string()));
    }

    #[test]
    fn test_sequence() {
        let ok = Validations::sequence(vec![V::success(1), V::success(2)]);
        assert_eq!(ok, Validation::success(vec![1, 2]));

        let bad = Validations::sequence(vec![
            V::failure_of("a"),
            V::success(2),
            V::failure(vec!["b", "c"]),
        ]);
        assert_eq!(bad.into_errors(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sequence_empty_is_success() {
        let empty: Vec<V<i32>> = Vec::new();
        assert_eq!(Validations::sequence(empty), Validation::success(Vec::new()));
    }

    #[test]
    fn test_traverse_optional() {
        let none = Validations::traverse_optional(None::<i32>, |n| V::success(n + 1));
        assert_eq!(none, Validation::success(None));

        let some = Validations::traverse_optional(Some(1), |n| V::success(n + 1));
        assert_eq!(some, Validation::success(Some(2)));
    }
}
