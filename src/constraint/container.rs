//! Size constraints for collections.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use serde_json::json;

use super::predicate::{ConstraintPredicate, NullHandling, ViolationMessage};
use super::to_arg;
use super::traits::Constraint;

/// Anything with a number of elements.
pub trait HasLen {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns true if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> HasLen for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T> HasLen for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> HasLen for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<K, V, S> HasLen for HashMap<K, V, S> {
    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

impl<T, S> HasLen for HashSet<T, S> {
    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<K, V> HasLen for BTreeMap<K, V> {
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl<T> HasLen for BTreeSet<T> {
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

impl<K, V, S> HasLen for IndexMap<K, V, S> {
    fn len(&self) -> usize {
        IndexMap::len(self)
    }
}

impl<T, S> HasLen for IndexSet<T, S> {
    fn len(&self) -> usize {
        IndexSet::len(self)
    }
}

/// Constraints on the number of elements of a collection.
///
/// # Example
///
/// ```rust
/// use verdict::{Constraint, ContainerConstraint};
///
/// let tags = ContainerConstraint::<Vec<String>>::new().not_empty().less_than_or_equal(2);
/// let three = vec!["a".to_string(), "b".to_string(), "c".to_string()];
/// assert!(tags.predicates()[1].is_violated(Some(&three)));
/// ```
#[derive(Debug)]
pub struct ContainerConstraint<V: ?Sized> {
    predicates: Vec<ConstraintPredicate<V>>,
}

impl<V: ?Sized> ContainerConstraint<V> {
    /// Creates a container constraint with no predicates.
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }
}

impl<V: ?Sized> Default for ContainerConstraint<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized + 'static> Constraint<V> for ContainerConstraint<V> {
    fn predicates(&self) -> &[ConstraintPredicate<V>] {
        &self.predicates
    }

    fn predicates_mut(&mut self) -> &mut Vec<ConstraintPredicate<V>> {
        &mut self.predicates
    }

    fn into_predicates(self) -> Vec<ConstraintPredicate<V>> {
        self.predicates
    }
}

impl<V: HasLen + ?Sized + 'static> ContainerConstraint<V> {
    /// Requires a present collection with at least one element.
    pub fn not_empty(self) -> Self {
        self.constrain(ConstraintPredicate::new(
            |v: &V| !v.is_empty(),
            ViolationMessage::CONTAINER_NOT_EMPTY,
            NullHandling::NullIsInvalid,
        ))
    }

    /// Requires fewer than `max` elements.
    pub fn less_than(self, max: usize) -> Self {
        self.size(max, ViolationMessage::CONTAINER_LESS_THAN, |len, max| len < max)
    }

    /// Requires at most `max` elements.
    pub fn less_than_or_equal(self, max: usize) -> Self {
        self.size(max, ViolationMessage::CONTAINER_LESS_THAN_OR_EQUAL, |len, max| len <= max)
    }

    /// Requires more than `min` elements.
    pub fn greater_than(self, min: usize) -> Self {
        self.size(min, ViolationMessage::CONTAINER_GREATER_THAN, |len, min| len > min)
    }

    /// Requires at least `min` elements.
    pub fn greater_than_or_equal(self, min: usize) -> Self {
        self.size(min, ViolationMessage::CONTAINER_GREATER_THAN_OR_EQUAL, |len, min| len >= min)
    }

    /// Requires exactly `size` elements.
    pub fn fixed_size(self, size: usize) -> Self {
        self.size(size, ViolationMessage::CONTAINER_FIXED_SIZE, |len, size| len == size)
    }

    fn size(self, limit: usize, message: ViolationMessage, check: fn(usize, usize) -> bool) -> Self {
        self.constrain(
            ConstraintPredicate::new(move |v: &V| check(v.len(), limit), message, NullHandling::NullIsValid)
                .with_args(move || vec![json!(limit)])
                .with_violated_value(|v: &V| json!(v.len())),
        )
    }
}

impl<E> ContainerConstraint<Vec<E>>
where
    E: PartialEq + Serialize + Send + Sync + 'static,
{
    /// Requires the collection to contain `element`.
    pub fn contains(self, element: E) -> Self {
        let arg = to_arg(&element);
        self.constrain(
            ConstraintPredicate::new(
                move |v: &Vec<E>| v.contains(&element),
                ViolationMessage::COLLECTION_CONTAINS,
                NullHandling::NullIsValid,
            )
            .with_args(move || vec![arg.clone()]),
        )
    }
}
