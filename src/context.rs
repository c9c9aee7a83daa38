//! Evaluation contexts and constraint groups.
//!
//! Every validation runs inside a [`ConstraintContext`]: a name plus optional
//! attributes. Conditional field groups can look at the context to decide
//! whether they apply, which is how one validator serves several use cases
//! (for example different rules on create and on update).
//!
//! A [`ConstraintGroup`] is a context that only has a name. Plain
//! [`Validator::validate`](crate::Validator::validate) runs in
//! [`ConstraintGroup::DEFAULT`].
//!
//! # Example
//!
//! ```rust
//! use verdict::{Constraint, ConstraintGroup, Validator};
//!
//! const CREATE: ConstraintGroup = ConstraintGroup::new("CREATE");
//!
//! struct Article {
//!     id: Option<u64>,
//! }
//!
//! let validator = Validator::<Article>::builder()
//!     .constraint_on_group(CREATE, |b| {
//!         b.object("id", |a: &Article| a.id.as_ref(), |c| c.is_null())
//!     })
//!     .build();
//!
//! let existing = Article { id: Some(7) };
//! assert!(validator.validate(&existing).is_valid());
//! assert!(!validator.validate_with_group(&existing, &CREATE).is_valid());
//! ```

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::constraint::to_arg;

/// A named group of constraints.
///
/// Groups compare by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConstraintGroup {
    name: Cow<'static, str>,
}

impl ConstraintGroup {
    /// The group used when none is given.
    pub const DEFAULT: ConstraintGroup = ConstraintGroup::new("DEFAULT");

    /// Creates a group from a static name, usable in constants.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// Creates a group with any name.
    pub fn of(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A condition that holds when the validation runs in this group.
    pub fn to_condition<T: 'static>(
        &self,
    ) -> impl Fn(&T, &ConstraintContext) -> bool + Send + Sync + 'static {
        let name = self.name.clone();
        move |_: &T, context: &ConstraintContext| context.name() == name
    }
}

impl Default for ConstraintGroup {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The name and attributes a validation runs under.
///
/// # Example
///
/// ```rust
/// use verdict::ConstraintContext;
///
/// let context = ConstraintContext::new("import")
///     .with_attribute("country", "JP")
///     .with_attribute("strict", true);
///
/// assert_eq!(context.name(), "import");
/// assert!(context.has_attribute("strict"));
/// assert!(context.has_attribute_with_value("country", "JP"));
/// assert!(context.attribute("region").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintContext {
    name: Cow<'static, str>,
    attributes: IndexMap<String, Value>,
}

impl ConstraintContext {
    /// Creates a context with no attributes.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Creates an unnamed context from key/value pairs.
    pub fn from_attributes<K, V, I>(attributes: I) -> Self
    where
        K: Into<String>,
        V: Serialize,
        I: IntoIterator<Item = (K, V)>,
    {
        attributes
            .into_iter()
            .fold(Self::new("attributes"), |context, (key, value)| {
                context.with_attribute(key, value)
            })
    }

    /// Adds or replaces an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.attributes.insert(key.into(), to_arg(&value));
        self
    }

    /// Returns the context name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute stored under `key`.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns true if an attribute is stored under `key`.
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Returns true if the attribute under `key` equals `value`.
    pub fn has_attribute_with_value(&self, key: &str, value: impl Serialize) -> bool {
        self.attribute(key) == Some(&to_arg(&value))
    }

    /// Returns true if this context runs in `group`.
    pub fn is_group(&self, group: &ConstraintGroup) -> bool {
        self.name() == group.name()
    }
}

impl Default for ConstraintContext {
    fn default() -> Self {
        ConstraintGroup::DEFAULT.into()
    }
}

impl From<ConstraintGroup> for ConstraintContext {
    fn from(group: ConstraintGroup) -> Self {
        Self::new(group.name)
    }
}

impl From<&ConstraintGroup> for ConstraintContext {
    fn from(group: &ConstraintGroup) -> Self {
        Self::new(group.name.clone())
    }
}
