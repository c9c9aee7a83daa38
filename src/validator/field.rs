//! Type-erased field entries evaluated by a [`Validator`].
//!
//! Each entry knows how to reach its part of the target and how to turn
//! broken predicates into violations. Entries run in registration order and
//! report whether evaluation should stop (fail-fast).

use std::ops::ControlFlow;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};

use crate::constraint::{to_arg, ConstraintPredicate, ViolationMessage};
use crate::context::ConstraintContext;
use crate::error::{ConstraintViolation, ConstraintViolations};
use crate::message::{Locale, MessageFormatter};
use crate::path::FieldPath;

use super::Validator;

pub(crate) type Extractor<T, V> = Box<dyn for<'a> Fn(&'a T) -> Option<&'a V> + Send + Sync>;
pub(crate) type Check<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
pub(crate) type Condition<T> = Box<dyn Fn(&T, &ConstraintContext) -> bool + Send + Sync>;

/// Settings shared by every entry during one evaluation.
pub(crate) struct Scope<'a> {
    pub(crate) formatter: &'a Arc<dyn MessageFormatter>,
    pub(crate) locale: &'a Locale,
    pub(crate) context: &'a ConstraintContext,
    pub(crate) separator: &'a str,
    pub(crate) fail_fast: bool,
}

impl Scope<'_> {
    fn violation(
        &self,
        path: &FieldPath,
        message_key: &str,
        default_message_format: &str,
        predicate_args: Vec<Value>,
        violated_value: Value,
    ) -> ConstraintViolation {
        let name = path.render(self.separator);
        let mut args = Vec::with_capacity(predicate_args.len() + 2);
        args.push(json!(name));
        args.extend(predicate_args);
        args.push(violated_value);
        ConstraintViolation::new(
            name,
            message_key,
            default_message_format,
            args,
            Arc::clone(self.formatter),
            self.locale.clone(),
        )
    }

    /// Records a violation and tells the caller whether to keep going.
    fn report(&self, out: &mut ConstraintViolations, violation: ConstraintViolation) -> ControlFlow<()> {
        out.push(violation);
        if self.fail_fast {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn missing(&self, out: &mut ConstraintViolations, path: &FieldPath) -> ControlFlow<()> {
        let message = ViolationMessage::OBJECT_NOT_NULL;
        let violation = self.violation(
            path,
            message.message_key(),
            message.default_message_format(),
            Vec::new(),
            Value::Null,
        );
        self.report(out, violation)
    }
}

/// Something a validator evaluates against `&T`.
pub(crate) trait FieldEntry<T>: Send + Sync {
    fn evaluate(
        &self,
        target: &T,
        parent: &FieldPath,
        scope: &Scope<'_>,
        out: &mut ConstraintViolations,
    ) -> ControlFlow<()>;
}

/// One field and the predicates of its constraint.
pub(crate) struct ConstraintEntry<T, V: ?Sized> {
    pub(crate) name: String,
    pub(crate) extractor: Extractor<T, V>,
    pub(crate) predicates: Vec<ConstraintPredicate<V>>,
}

impl<T, V> FieldEntry<T> for ConstraintEntry<T, V>
where
    V: Serialize + ?Sized + 'static,
{
    fn evaluate(
        &self,
        target: &T,
        parent: &FieldPath,
        scope: &Scope<'_>,
        out: &mut ConstraintViolations,
    ) -> ControlFlow<()> {
        let value = (self.extractor)(target);
        let path = parent.field(self.name.as_str());
        for predicate in &self.predicates {
            if !predicate.is_violated(value) {
                continue;
            }
            let violated_value = match value {
                Some(v) => predicate.violated_value(v).unwrap_or_else(|| to_arg(v)),
                None => Value::Null,
            };
            let violation = scope.violation(
                &path,
                predicate.message_key(),
                predicate.default_message_format(),
                predicate.args(),
                violated_value,
            );
            scope.report(out, violation)?;
        }
        ControlFlow::Continue(())
    }
}

/// A rule over the whole target, usually relating several fields.
pub(crate) struct TargetEntry<T> {
    pub(crate) name: String,
    pub(crate) test: Check<T>,
    pub(crate) message: ViolationMessage,
}

impl<T> FieldEntry<T> for TargetEntry<T> {
    fn evaluate(
        &self,
        target: &T,
        parent: &FieldPath,
        scope: &Scope<'_>,
        out: &mut ConstraintViolations,
    ) -> ControlFlow<()> {
        if (self.test)(target) {
            return ControlFlow::Continue(());
        }
        let violation = scope.violation(
            &parent.field(self.name.as_str()),
            self.message.message_key(),
            self.message.default_message_format(),
            Vec::new(),
            Value::Null,
        );
        scope.report(out, violation)
    }
}

/// A group of entries that only runs when its condition holds.
pub(crate) struct ConditionalEntry<T> {
    pub(crate) condition: Condition<T>,
    pub(crate) entries: Vec<Box<dyn FieldEntry<T>>>,
}

impl<T> FieldEntry<T> for ConditionalEntry<T> {
    fn evaluate(
        &self,
        target: &T,
        parent: &FieldPath,
        scope: &Scope<'_>,
        out: &mut ConstraintViolations,
    ) -> ControlFlow<()> {
        if !(self.condition)(target, scope.context) {
            tracing::trace!(
                entries = self.entries.len(),
                context = scope.context.name(),
                "condition not met, skipping"
            );
            return ControlFlow::Continue(());
        }
        for entry in &self.entries {
            entry.evaluate(target, parent, scope, out)?;
        }
        ControlFlow::Continue(())
    }
}

/// A nested value checked by its own validator.
pub(crate) struct NestedEntry<T, U> {
    pub(crate) name: String,
    pub(crate) extractor: Extractor<T, U>,
    pub(crate) validator: Validator<U>,
    pub(crate) required: bool,
}

impl<T, U> FieldEntry<T> for NestedEntry<T, U> {
    fn evaluate(
        &self,
        target: &T,
        parent: &FieldPath,
        scope: &Scope<'_>,
        out: &mut ConstraintViolations,
    ) -> ControlFlow<()> {
        let path = parent.field(self.name.as_str());
        match (self.extractor)(target) {
            Some(nested) => self.validator.evaluate_into(nested, &path, scope, out),
            None if self.required => scope.missing(out, &path),
            None => ControlFlow::Continue(()),
        }
    }
}

/// Every element of a collection checked by one validator.
pub(crate) struct ForEachEntry<T, E> {
    pub(crate) name: String,
    pub(crate) extractor: Extractor<T, [E]>,
    pub(crate) validator: Validator<E>,
    pub(crate) required: bool,
}

impl<T, E> FieldEntry<T> for ForEachEntry<T, E> {
    fn evaluate(
        &self,
        target: &T,
        parent: &FieldPath,
        scope: &Scope<'_>,
        out: &mut ConstraintViolations,
    ) -> ControlFlow<()> {
        let path = parent.field(self.name.as_str());
        match (self.extractor)(target) {
            Some(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    self.validator.evaluate_into(element, &path.index(i), scope, out)?;
                }
                ControlFlow::Continue(())
            }
            None if self.required => scope.missing(out, &path),
            None => ControlFlow::Continue(()),
        }
    }
}
