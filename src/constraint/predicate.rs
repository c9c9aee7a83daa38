//! Single testable rules and their null-handling policy.
//!
//! A [`ConstraintPredicate`] pairs a test with the message metadata used when
//! the test fails. How an absent value (`None`) is treated is decided by the
//! predicate's [`NullHandling`], never by the test itself: value tests are not
//! invoked on absent values at all.
//!
//! Presence tests are the exception. `not_null` and `is_null` test whether a
//! value exists, so they always run, absent values included.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// How a predicate treats an absent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullHandling {
    /// Absent values pass. Used by shape and range rules.
    NullIsValid,
    /// Absent values fail without running the test.
    NullIsInvalid,
}

/// A message key together with the format used when no bundle overrides it.
///
/// The associated constants form the default catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViolationMessage {
    message_key: Cow<'static, str>,
    default_message_format: Cow<'static, str>,
}

impl ViolationMessage {
    pub const OBJECT_NOT_NULL: Self = Self::of("object.notNull", "\"{0}\" must not be null");
    pub const OBJECT_IS_NULL: Self = Self::of("object.isNull", "\"{0}\" must be null");
    pub const OBJECT_EQUAL_TO: Self = Self::of("object.equalTo", "\"{0}\" must be equal to {1}");
    pub const OBJECT_ONE_OF: Self = Self::of(
        "object.oneOf",
        "\"{0}\" must be one of the following values: {1}",
    );
    pub const CONTAINER_NOT_EMPTY: Self = Self::of("container.notEmpty", "\"{0}\" must not be empty");
    pub const CONTAINER_LESS_THAN: Self = Self::of(
        "container.lessThan",
        "The size of \"{0}\" must be less than {1}. The given size is {2}",
    );
    pub const CONTAINER_LESS_THAN_OR_EQUAL: Self = Self::of(
        "container.lessThanOrEqual",
        "The size of \"{0}\" must be less than or equal to {1}. The given size is {2}",
    );
    pub const CONTAINER_GREATER_THAN: Self = Self::of(
        "container.greaterThan",
        "The size of \"{0}\" must be greater than {1}. The given size is {2}",
    );
    pub const CONTAINER_GREATER_THAN_OR_EQUAL: Self = Self::of(
        "container.greaterThanOrEqual",
        "The size of \"{0}\" must be greater than or equal to {1}. The given size is {2}",
    );
    pub const CONTAINER_FIXED_SIZE: Self = Self::of(
        "container.fixedSize",
        "The size of \"{0}\" must be {1}. The given size is {2}",
    );
    pub const COLLECTION_CONTAINS: Self = Self::of("collection.contains", "\"{0}\" must contain {1}");
    pub const NUMERIC_GREATER_THAN: Self =
        Self::of("numeric.greaterThan", "\"{0}\" must be greater than {1}");
    pub const NUMERIC_GREATER_THAN_OR_EQUAL: Self = Self::of(
        "numeric.greaterThanOrEqual",
        "\"{0}\" must be greater than or equal to {1}",
    );
    pub const NUMERIC_LESS_THAN: Self = Self::of("numeric.lessThan", "\"{0}\" must be less than {1}");
    pub const NUMERIC_LESS_THAN_OR_EQUAL: Self = Self::of(
        "numeric.lessThanOrEqual",
        "\"{0}\" must be less than or equal to {1}",
    );
    pub const NUMERIC_BETWEEN: Self = Self::of(
        "numeric.between",
        "\"{0}\" must be between {1} and {2}",
    );
    pub const NUMERIC_POSITIVE: Self = Self::of("numeric.positive", "\"{0}\" must be positive");
    pub const NUMERIC_POSITIVE_OR_ZERO: Self =
        Self::of("numeric.positiveOrZero", "\"{0}\" must be positive or zero");
    pub const NUMERIC_NEGATIVE: Self = Self::of("numeric.negative", "\"{0}\" must be negative");
    pub const NUMERIC_NEGATIVE_OR_ZERO: Self =
        Self::of("numeric.negativeOrZero", "\"{0}\" must be negative or zero");
    pub const BOOLEAN_IS_TRUE: Self = Self::of("boolean.isTrue", "\"{0}\" must be true");
    pub const BOOLEAN_IS_FALSE: Self = Self::of("boolean.isFalse", "\"{0}\" must be false");
    pub const CHAR_SEQUENCE_NOT_BLANK: Self =
        Self::of("charSequence.notBlank", "\"{0}\" must not be blank");
    pub const CHAR_SEQUENCE_CONTAINS: Self =
        Self::of("charSequence.contains", "\"{0}\" must contain {1}");
    pub const CHAR_SEQUENCE_STARTS_WITH: Self =
        Self::of("charSequence.startsWith", "\"{0}\" must start with \"{1}\"");
    pub const CHAR_SEQUENCE_ENDS_WITH: Self =
        Self::of("charSequence.endsWith", "\"{0}\" must end with \"{1}\"");
    pub const CHAR_SEQUENCE_EMAIL: Self =
        Self::of("charSequence.email", "\"{0}\" must be a valid email address");
    pub const CHAR_SEQUENCE_IPV4: Self = Self::of("charSequence.ipv4", "\"{0}\" must be a valid IPv4");
    pub const CHAR_SEQUENCE_IPV6: Self = Self::of("charSequence.ipv6", "\"{0}\" must be a valid IPv6");
    pub const CHAR_SEQUENCE_PATTERN: Self = Self::of("charSequence.pattern", "\"{0}\" must match {1}");
    pub const CHAR_SEQUENCE_INTEGER: Self = Self::of(
        "charSequence.integer",
        "\"{0}\" must be a valid representation of an integer.",
    );
    pub const TEMPORAL_BEFORE: Self = Self::of("temporal.before", "\"{0}\" has to be before {1}");
    pub const TEMPORAL_AFTER: Self = Self::of("temporal.after", "\"{0}\" has to be after {1}");
    pub const TEMPORAL_BETWEEN: Self =
        Self::of("temporal.between", "\"{0}\" has to be between {1} and {2}");
    pub const TEMPORAL_PAST: Self = Self::of("temporal.past", "\"{0}\" must be a past date");
    pub const TEMPORAL_PAST_OR_PRESENT: Self =
        Self::of("temporal.pastOrPresent", "\"{0}\" must be a date in the past or in the present");
    pub const TEMPORAL_FUTURE: Self = Self::of("temporal.future", "\"{0}\" must be a future date");
    pub const TEMPORAL_FUTURE_OR_PRESENT: Self = Self::of(
        "temporal.futureOrPresent",
        "\"{0}\" must be a date in the present or in the future",
    );

    /// Creates a message from static strings, usable in constants.
    pub const fn of(message_key: &'static str, default_message_format: &'static str) -> Self {
        Self {
            message_key: Cow::Borrowed(message_key),
            default_message_format: Cow::Borrowed(default_message_format),
        }
    }

    /// Creates a message from owned or borrowed strings.
    pub fn new(
        message_key: impl Into<Cow<'static, str>>,
        default_message_format: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            message_key: message_key.into(),
            default_message_format: default_message_format.into(),
        }
    }

    /// Returns the message key, for example `object.notNull`.
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    /// Returns the default format, for example `"{0}" must not be null`.
    pub fn default_message_format(&self) -> &str {
        &self.default_message_format
    }
}

type ValueTest<V> = Box<dyn Fn(&V) -> bool + Send + Sync>;
type ArgsSupplier = Box<dyn Fn() -> Vec<Value> + Send + Sync>;
type ValueProjection<V> = Box<dyn Fn(&V) -> Value + Send + Sync>;

enum PredicateTest<V: ?Sized> {
    /// Runs only on present values; absence is decided by the null policy.
    Value(ValueTest<V>),
    /// Runs on presence itself, absent values included.
    Presence(fn(bool) -> bool),
}

/// One rule over a field value.
///
/// # Example
///
/// ```rust
/// use verdict::{ConstraintPredicate, NullHandling, ViolationMessage};
///
/// let positive = ConstraintPredicate::new(
///     |n: &i32| *n > 0,
///     ViolationMessage::NUMERIC_POSITIVE,
///     NullHandling::NullIsValid,
/// );
///
/// assert!(!positive.is_violated(Some(&3)));
/// assert!(positive.is_violated(Some(&-3)));
/// assert!(!positive.is_violated(None));
/// ```
pub struct ConstraintPredicate<V: ?Sized> {
    test: PredicateTest<V>,
    message: ViolationMessage,
    args: ArgsSupplier,
    null_handling: NullHandling,
    violated_value: Option<ValueProjection<V>>,
}

impl<V: ?Sized> ConstraintPredicate<V> {
    /// Creates a predicate over present values.
    pub fn new<F>(test: F, message: ViolationMessage, null_handling: NullHandling) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self {
            test: PredicateTest::Value(Box::new(test)),
            message,
            args: Box::new(Vec::new),
            null_handling,
            violated_value: None,
        }
    }

    /// Creates a predicate over presence. It runs on absent values too.
    pub(crate) fn presence(test: fn(bool) -> bool, message: ViolationMessage) -> Self {
        Self {
            test: PredicateTest::Presence(test),
            message,
            args: Box::new(Vec::new),
            null_handling: NullHandling::NullIsInvalid,
            violated_value: None,
        }
    }

    /// Sets the supplier of message arguments.
    ///
    /// The supplier runs once per violation, never when the predicate is
    /// built, so it may read state that changes over time.
    pub fn with_args<A>(mut self, args: A) -> Self
    where
        A: Fn() -> Vec<Value> + Send + Sync + 'static,
    {
        self.args = Box::new(args);
        self
    }

    /// Reports a projection of the value (its size, say) as the violated value.
    pub fn with_violated_value<P>(mut self, projection: P) -> Self
    where
        P: Fn(&V) -> Value + Send + Sync + 'static,
    {
        self.violated_value = Some(Box::new(projection));
        self
    }

    pub fn message_key(&self) -> &str {
        self.message.message_key()
    }

    pub fn default_message_format(&self) -> &str {
        self.message.default_message_format()
    }

    pub fn null_handling(&self) -> NullHandling {
        self.null_handling
    }

    /// Returns true for `not_null` and `is_null` style predicates.
    pub fn is_presence_test(&self) -> bool {
        matches!(self.test, PredicateTest::Presence(_))
    }

    /// Resolves the message arguments.
    pub fn args(&self) -> Vec<Value> {
        (self.args)()
    }

    /// Returns the projected violated value, if this predicate defines one.
    pub fn violated_value(&self, value: &V) -> Option<Value> {
        self.violated_value.as_ref().map(|projection| projection(value))
    }

    /// Tests a possibly absent value. Returns true when the rule is broken.
    ///
    /// A value test is never invoked with an absent value: its
    /// [`NullHandling`] decides instead.
    pub fn is_violated(&self, value: Option<&V>) -> bool {
        match (&self.test, value) {
            (PredicateTest::Presence(test), value) => !test(value.is_some()),
            (PredicateTest::Value(test), Some(value)) => !test(value),
            (PredicateTest::Value(_), None) => self.null_handling == NullHandling::NullIsInvalid,
        }
    }

    pub(crate) fn set_default_message_format(&mut self, format: Cow<'static, str>) {
        self.message.default_message_format = format;
    }
}

impl<V: ?Sized> fmt::Debug for ConstraintPredicate<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintPredicate")
            .field("message_key", &self.message.message_key())
            .field("null_handling", &self.null_handling)
            .field("presence", &self.is_presence_test())
            .finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConstraintPredicate<str>>();
    assert_sync::<ConstraintPredicate<str>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_null_is_invalid_never_runs_test() {
        let calls = Arc::new(AtomicUsize::new(0));
        let spy = Arc::clone(&calls);
        let predicate = ConstraintPredicate::new(
            move |_: &str| {
                spy.fetch_add(1, Ordering::SeqCst);
                true
            },
            ViolationMessage::CHAR_SEQUENCE_NOT_BLANK,
            NullHandling::NullIsInvalid,
        );

        assert!(predicate.is_violated(None));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(!predicate.is_violated(Some("x")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_null_is_valid_never_runs_test() {
        let predicate = ConstraintPredicate::new(
            |_: &i32| -> bool { panic!("must not run on absent values") },
            ViolationMessage::NUMERIC_POSITIVE,
            NullHandling::NullIsValid,
        );
        assert!(!predicate.is_violated(None));
    }

    #[test]
    fn test_presence_tests_run_on_absent_values() {
        let is_null: ConstraintPredicate<i32> =
            ConstraintPredicate::presence(|present| !present, ViolationMessage::OBJECT_IS_NULL);
        assert_eq!(is_null.null_handling(), NullHandling::NullIsInvalid);
        assert!(!is_null.is_violated(None));
        assert!(is_null.is_violated(Some(&1)));

        let not_null: ConstraintPredicate<i32> =
            ConstraintPredicate::presence(|present| present, ViolationMessage::OBJECT_NOT_NULL);
        assert!(not_null.is_violated(None));
        assert!(!not_null.is_violated(Some(&1)));
    }

    #[test]
    fn test_args_are_resolved_lazily() {
        let calls = Arc::new(AtomicUsize::new(0));
        let spy = Arc::clone(&calls);
        let predicate = ConstraintPredicate::new(
            |n: &i32| *n > 0,
            ViolationMessage::NUMERIC_GREATER_THAN,
            NullHandling::NullIsValid,
        )
        .with_args(move || vec![json!(spy.fetch_add(1, Ordering::SeqCst))]);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(predicate.args(), vec![json!(0)]);
        assert_eq!(predicate.args(), vec![json!(1)]);
    }

    #[test]
    fn test_violated_value_projection() {
        let predicate = ConstraintPredicate::new(
            |s: &str| s.len() < 3,
            ViolationMessage::CONTAINER_LESS_THAN,
            NullHandling::NullIsValid,
        )
        .with_violated_value(|s: &str| json!(s.chars().count()));

        assert_eq!(predicate.violated_value("abcd"), Some(json!(4)));
    }

    #[test]
    fn test_custom_message() {
        let message = ViolationMessage::new("custom.key".to_string(), "\"{0}\" is odd");
        assert_eq!(message.message_key(), "custom.key");
        assert_eq!(message.default_message_format(), "\"{0}\" is odd");
    }
}
