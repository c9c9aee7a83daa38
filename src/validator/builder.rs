//! Fluent construction of [`Validator`]s.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::SystemTime;

use serde::Serialize;

use crate::constraint::{
    BooleanConstraint, Constraint, ContainerConstraint, HasLen, NumericConstraint,
    ObjectConstraint, StringConstraint, TemporalConstraint, ViolationMessage,
};
use crate::context::{ConstraintContext, ConstraintGroup};
use crate::message::{MessageFormatter, SimpleMessageFormatter};

use super::field::{
    ConditionalEntry, ConstraintEntry, Extractor, FieldEntry, ForEachEntry, NestedEntry,
    TargetEntry,
};
use super::Validator;

/// Builds a [`Validator`] field by field.
///
/// Fields are evaluated in the order they are registered. Every field takes a
/// name, an extractor returning `None` when the value is absent, and either a
/// finished constraint or a closure that refines a fresh one.
///
/// # Example
///
/// ```rust
/// use verdict::{Constraint, Validator};
///
/// struct Address {
///     city: String,
/// }
///
/// struct Customer {
///     nickname: Option<String>,
///     address: Option<Address>,
/// }
///
/// let address = Validator::<Address>::builder()
///     .string("city", |a: &Address| Some(a.city.as_str()), |c| c.not_blank())
///     .build();
///
/// let validator = Validator::<Customer>::builder()
///     .string("nickname", |c: &Customer| c.nickname.as_deref(), |c| c.less_than_or_equal(8))
///     .nest("address", |c: &Customer| c.address.as_ref(), address)
///     .build();
///
/// let violations = validator.validate(&Customer {
///     nickname: None,
///     address: Some(Address { city: "".into() }),
/// });
/// assert_eq!(violations.get(0).unwrap().name(), "address.city");
/// ```
pub struct ValidatorBuilder<T> {
    entries: Vec<Box<dyn FieldEntry<T>>>,
    formatter: Arc<dyn MessageFormatter>,
    separator: String,
    fail_fast: bool,
}

impl<T: 'static> ValidatorBuilder<T> {
    /// Creates a builder with no fields, the simple formatter and `.` as the
    /// nested name separator.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            formatter: Arc::new(SimpleMessageFormatter),
            separator: ".".to_string(),
            fail_fast: false,
        }
    }

    /// Registers a field with a finished constraint.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Constraint, ObjectConstraint, Validator};
    ///
    /// #[derive(serde::Serialize, PartialEq)]
    /// enum Plan { Free, Pro }
    ///
    /// struct Subscription {
    ///     plan: Plan,
    /// }
    ///
    /// let validator = Validator::<Subscription>::builder()
    ///     .constraint(
    ///         "plan",
    ///         |s: &Subscription| Some(&s.plan),
    ///         ObjectConstraint::new().equal_to(Plan::Pro),
    ///     )
    ///     .build();
    ///
    /// assert!(!validator.validate(&Subscription { plan: Plan::Free }).is_valid());
    /// ```
    pub fn constraint<V, C, F>(mut self, name: impl Into<String>, extractor: F, constraint: C) -> Self
    where
        V: Serialize + ?Sized + 'static,
        C: Constraint<V>,
        F: for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync + 'static,
    {
        self.entries.push(Box::new(ConstraintEntry {
            name: name.into(),
            extractor: Box::new(extractor),
            predicates: constraint.into_predicates(),
        }));
        self
    }

    /// Registers a string field.
    pub fn string<F, B>(self, name: impl Into<String>, extractor: F, build: B) -> Self
    where
        F: for<'a> Fn(&'a T) -> Option<&'a str> + Send + Sync + 'static,
        B: FnOnce(StringConstraint) -> StringConstraint,
    {
        self.constraint(name, extractor, build(StringConstraint::new()))
    }

    /// Registers a numeric field.
    pub fn number<V, F, B>(self, name: impl Into<String>, extractor: F, build: B) -> Self
    where
        V: Serialize + 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync + 'static,
        B: FnOnce(NumericConstraint<V>) -> NumericConstraint<V>,
    {
        self.constraint(name, extractor, build(NumericConstraint::new()))
    }

    /// Registers a boolean field.
    pub fn boolean<F, B>(self, name: impl Into<String>, extractor: F, build: B) -> Self
    where
        F: for<'a> Fn(&'a T) -> Option<&'a bool> + Send + Sync + 'static,
        B: FnOnce(BooleanConstraint) -> BooleanConstraint,
    {
        self.constraint(name, extractor, build(BooleanConstraint::new()))
    }

    /// Registers a collection field.
    pub fn container<V, F, B>(self, name: impl Into<String>, extractor: F, build: B) -> Self
    where
        V: HasLen + Serialize + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync + 'static,
        B: FnOnce(ContainerConstraint<V>) -> ContainerConstraint<V>,
    {
        self.constraint(name, extractor, build(ContainerConstraint::new()))
    }

    /// Registers a field of any serializable type.
    pub fn object<V, F, B>(self, name: impl Into<String>, extractor: F, build: B) -> Self
    where
        V: Serialize + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync + 'static,
        B: FnOnce(ObjectConstraint<V>) -> ObjectConstraint<V>,
    {
        self.constraint(name, extractor, build(ObjectConstraint::new()))
    }

    /// Registers a point-in-time field.
    pub fn temporal<V, F, B>(self, name: impl Into<String>, extractor: F, build: B) -> Self
    where
        V: Serialize + 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync + 'static,
        B: FnOnce(TemporalConstraint<V>) -> TemporalConstraint<V>,
    {
        self.constraint(name, extractor, build(TemporalConstraint::new()))
    }

    /// Registers a `SystemTime` field.
    pub fn instant<F, B>(self, name: impl Into<String>, extractor: F, build: B) -> Self
    where
        F: for<'a> Fn(&'a T) -> Option<&'a SystemTime> + Send + Sync + 'static,
        B: FnOnce(TemporalConstraint<SystemTime>) -> TemporalConstraint<SystemTime>,
    {
        self.temporal(name, extractor, build)
    }

    /// Registers a rule over the whole target, reported under `name`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::Validator;
    ///
    /// struct Range {
    ///     from: u32,
    ///     to: u32,
    /// }
    ///
    /// let validator = Validator::<Range>::builder()
    ///     .constraint_on_target(
    ///         |r: &Range| r.from <= r.to,
    ///         "to",
    ///         "range.order",
    ///         "\"{0}\" must not be before \"from\"",
    ///     )
    ///     .build();
    ///
    /// let violations = validator.validate(&Range { from: 5, to: 1 });
    /// assert_eq!(violations.messages(), vec!["\"to\" must not be before \"from\""]);
    /// ```
    pub fn constraint_on_target<P>(
        mut self,
        test: P,
        name: impl Into<String>,
        message_key: impl Into<Cow<'static, str>>,
        default_message_format: impl Into<Cow<'static, str>>,
    ) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.entries.push(Box::new(TargetEntry {
            name: name.into(),
            test: Box::new(test),
            message: ViolationMessage::new(message_key, default_message_format),
        }));
        self
    }

    /// Registers fields that are only checked when `condition` holds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Constraint, Validator};
    ///
    /// struct Shipping {
    ///     express: bool,
    ///     phone: Option<String>,
    /// }
    ///
    /// let validator = Validator::<Shipping>::builder()
    ///     .constraint_on_condition(
    ///         |s: &Shipping| s.express,
    ///         |b| b.string("phone", |s: &Shipping| s.phone.as_deref(), |c| c.not_blank()),
    ///     )
    ///     .build();
    ///
    /// assert!(validator.validate(&Shipping { express: false, phone: None }).is_valid());
    /// assert!(!validator.validate(&Shipping { express: true, phone: None }).is_valid());
    /// ```
    pub fn constraint_on_condition<C, B>(self, condition: C, build: B) -> Self
    where
        C: Fn(&T) -> bool + Send + Sync + 'static,
        B: FnOnce(ValidatorBuilder<T>) -> ValidatorBuilder<T>,
    {
        self.constraint_on_context(
            move |target: &T, _: &ConstraintContext| condition(target),
            build,
        )
    }

    /// Registers fields that are only checked when `condition` holds for the
    /// target and the [`ConstraintContext`] of the running validation.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{ConstraintContext, Locale, Validator};
    ///
    /// struct Upload {
    ///     size: u64,
    /// }
    ///
    /// let validator = Validator::<Upload>::builder()
    ///     .constraint_on_context(
    ///         |_: &Upload, ctx: &ConstraintContext| ctx.has_attribute_with_value("plan", "free"),
    ///         |b| b.number("size", |u: &Upload| Some(&u.size), |c| c.less_than_or_equal(10)),
    ///     )
    ///     .build();
    ///
    /// let upload = Upload { size: 50 };
    /// let free = ConstraintContext::new("upload").with_attribute("plan", "free");
    /// let paid = ConstraintContext::new("upload").with_attribute("plan", "paid");
    /// assert!(!validator.validate_with_context(&upload, &free, &Locale::root()).is_valid());
    /// assert!(validator.validate_with_context(&upload, &paid, &Locale::root()).is_valid());
    /// ```
    pub fn constraint_on_context<C, B>(mut self, condition: C, build: B) -> Self
    where
        C: Fn(&T, &ConstraintContext) -> bool + Send + Sync + 'static,
        B: FnOnce(ValidatorBuilder<T>) -> ValidatorBuilder<T>,
    {
        let group = build(ValidatorBuilder::new());
        self.entries.push(Box::new(ConditionalEntry {
            condition: Box::new(condition),
            entries: group.entries,
        }));
        self
    }

    /// Registers fields that are only checked when validating in `group`.
    ///
    /// See [`Validator::validate_with_group`].
    pub fn constraint_on_group<B>(self, group: ConstraintGroup, build: B) -> Self
    where
        B: FnOnce(ValidatorBuilder<T>) -> ValidatorBuilder<T>,
    {
        self.constraint_on_context(group.to_condition(), build)
    }

    /// Registers a nested value checked by `validator`.
    ///
    /// An absent nested value is reported as `object.notNull`.
    pub fn nest<U, F>(self, name: impl Into<String>, extractor: F, validator: Validator<U>) -> Self
    where
        U: 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a U> + Send + Sync + 'static,
    {
        self.push_nested(name.into(), Box::new(extractor), validator, true)
    }

    /// Registers a nested value checked by `validator` only when present.
    pub fn nest_if_present<U, F>(
        self,
        name: impl Into<String>,
        extractor: F,
        validator: Validator<U>,
    ) -> Self
    where
        U: 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a U> + Send + Sync + 'static,
    {
        self.push_nested(name.into(), Box::new(extractor), validator, false)
    }

    /// Registers a collection whose elements are each checked by `validator`.
    ///
    /// Violations are named after the element index, as in `items[0].name`.
    /// An absent collection is reported as `object.notNull`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use verdict::{Constraint, Validator};
    ///
    /// struct Line {
    ///     qty: u32,
    /// }
    ///
    /// struct Order {
    ///     lines: Vec<Line>,
    /// }
    ///
    /// let line = Validator::<Line>::builder()
    ///     .number("qty", |l: &Line| Some(&l.qty), |c| c.positive())
    ///     .build();
    ///
    /// let validator = Validator::<Order>::builder()
    ///     .for_each("lines", |o: &Order| Some(o.lines.as_slice()), line)
    ///     .build();
    ///
    /// let violations = validator.validate(&Order {
    ///     lines: vec![Line { qty: 1 }, Line { qty: 0 }],
    /// });
    /// assert_eq!(violations.get(0).unwrap().name(), "lines[1].qty");
    /// ```
    pub fn for_each<E, F>(self, name: impl Into<String>, extractor: F, validator: Validator<E>) -> Self
    where
        E: 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a [E]> + Send + Sync + 'static,
    {
        self.push_for_each(name.into(), Box::new(extractor), validator, true)
    }

    /// Registers a collection whose elements are checked only when it is present.
    pub fn for_each_if_present<E, F>(
        self,
        name: impl Into<String>,
        extractor: F,
        validator: Validator<E>,
    ) -> Self
    where
        E: 'static,
        F: for<'a> Fn(&'a T) -> Option<&'a [E]> + Send + Sync + 'static,
    {
        self.push_for_each(name.into(), Box::new(extractor), validator, false)
    }

    /// Stops each validation at the first violation.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Sets the formatter used to render violation messages.
    pub fn message_formatter<M>(mut self, formatter: M) -> Self
    where
        M: MessageFormatter + 'static,
    {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Sets the separator between nested field names. Defaults to `.`.
    pub fn message_key_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Finishes the validator.
    pub fn build(self) -> Validator<T> {
        tracing::trace!(entries = self.entries.len(), fail_fast = self.fail_fast, "validator built");
        Validator {
            entries: self.entries,
            formatter: self.formatter,
            separator: self.separator,
            fail_fast: self.fail_fast,
        }
    }

    fn push_nested<U: 'static>(
        mut self,
        name: String,
        extractor: Extractor<T, U>,
        validator: Validator<U>,
        required: bool,
    ) -> Self {
        self.entries.push(Box::new(NestedEntry {
            name,
            extractor,
            validator,
            required,
        }));
        self
    }

    fn push_for_each<E: 'static>(
        mut self,
        name: String,
        extractor: Extractor<T, [E]>,
        validator: Validator<E>,
        required: bool,
    ) -> Self {
        self.entries.push(Box::new(ForEachEntry {
            name,
            extractor,
            validator,
            required,
        }));
        self
    }
}

impl<T: 'static> Default for ValidatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Locale;
    use serde_json::Value;

    struct Pair {
        left: Option<i32>,
        right: Option<i32>,
    }

    #[test]
    fn test_fail_fast_stops_at_first_violation() {
        let validator = Validator::<Pair>::builder()
            .number("left", |p: &Pair| p.left.as_ref(), |c| c.not_null().positive())
            .number("right", |p: &Pair| p.right.as_ref(), |c| c.not_null())
            .fail_fast(true)
            .build();

        let violations = validator.validate(&Pair { left: None, right: None });
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.get(0).unwrap().name(), "left");
        assert!(validator.is_fail_fast());
    }

    #[test]
    fn test_without_fail_fast_every_violation_is_reported() {
        let validator = Validator::<Pair>::builder()
            .number("left", |p: &Pair| p.left.as_ref(), |c| c.not_null().positive())
            .number("right", |p: &Pair| p.right.as_ref(), |c| c.not_null())
            .build();

        let violations = validator.validate(&Pair { left: Some(-1), right: None });
        let keys: Vec<_> = violations.iter().map(|v| v.message_key()).collect();
        assert_eq!(keys, vec!["numeric.positive", "object.notNull"]);
    }

    #[test]
    fn test_custom_formatter_receives_locale() {
        let validator = Validator::<Pair>::builder()
            .number("left", |p: &Pair| p.left.as_ref(), |c| c.not_null())
            .message_formatter(|key: &str, _: &str, args: &[Value], locale: &Locale| {
                format!("{}|{}|{}", key, args[0], locale)
            })
            .build();

        let violations = validator.validate_with_locale(&Pair { left: None, right: None }, &Locale::new("fr"));
        assert_eq!(violations.messages(), vec!["object.notNull|\"left\"|fr"]);
    }

    #[test]
    fn test_condition_groups_keep_registration_order() {
        let validator = Validator::<Pair>::builder()
            .number("left", |p: &Pair| p.left.as_ref(), |c| c.not_null())
            .constraint_on_condition(
                |p: &Pair| p.left.is_none(),
                |b| b.number("right", |p: &Pair| p.right.as_ref(), |c| c.not_null()),
            )
            .build();

        let violations = validator.validate(&Pair { left: None, right: None });
        let names: Vec<_> = violations.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["left", "right"]);

        let violations = validator.validate(&Pair { left: Some(1), right: None });
        assert!(violations.is_valid());
    }

    #[test]
    fn test_condition_on_context_and_group() {
        let validator = Validator::<Pair>::builder()
            .constraint_on_context(
                |p: &Pair, ctx: &ConstraintContext| ctx.has_attribute("both") && p.left.is_some(),
                |b| b.number("right", |p: &Pair| p.right.as_ref(), |c| c.not_null()),
            )
            .constraint_on_group(ConstraintGroup::new("STRICT"), |b| {
                b.number("left", |p: &Pair| p.left.as_ref(), |c| c.not_null())
            })
            .build();

        let half = Pair { left: Some(1), right: None };
        let root = Locale::root();
        assert!(validator.validate(&half).is_valid());

        let both = ConstraintContext::new("pairs").with_attribute("both", true);
        assert_eq!(validator.validate_with_context(&half, &both, &root).len(), 1);

        let empty = Pair { left: None, right: None };
        let strict = ConstraintGroup::new("STRICT");
        assert_eq!(validator.validate_with_group(&empty, &strict).len(), 1);
    }

    #[test]
    fn test_separator() {
        let inner = Validator::<Pair>::builder()
            .number("left", |p: &Pair| p.left.as_ref(), |c| c.not_null())
            .build();
        let outer = Validator::<Vec<Pair>>::builder()
            .for_each("pairs", |v: &Vec<Pair>| Some(v.as_slice()), inner)
            .message_key_separator("_")
            .build();

        let violations = outer.validate(&vec![Pair { left: None, right: None }]);
        assert_eq!(violations.get(0).unwrap().name(), "pairs[0]_left");
        assert_eq!(outer.message_key_separator(), "_");
    }
}
