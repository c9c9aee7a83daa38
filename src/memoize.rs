//! Lazily computed, single-assignment values.
//!
//! [`Memoized`] wraps a supplier and caches the first value committed to it.
//! It backs the lazy reference values of temporal constraints (for example a
//! "now" captured on first use) and can be shared freely across threads.
//!
//! The supplier runs outside the cell. Under contention several threads may
//! each compute a candidate, but only one is committed and every caller,
//! including the losers, observes that committed value.

use std::fmt;
use std::sync::OnceLock;

/// A supplier whose first committed result is cached forever.
///
/// # Example
///
/// ```rust
/// use verdict::Memoized;
///
/// let answer = Memoized::new(|| 6 * 7);
/// assert!(!answer.is_initialized());
/// assert_eq!(*answer.get(), 42);
/// assert!(answer.is_initialized());
/// ```
pub struct Memoized<V, F = fn() -> V> {
    supplier: F,
    slot: OnceLock<V>,
}

impl<V, F> Memoized<V, F>
where
    F: Fn() -> V,
{
    /// Creates an empty memo around `supplier`.
    pub fn new(supplier: F) -> Self {
        Self {
            supplier,
            slot: OnceLock::new(),
        }
    }

    /// Returns the committed value, computing and committing one if needed.
    pub fn get(&self) -> &V {
        if let Some(value) = self.slot.get() {
            return value;
        }
        let candidate = (self.supplier)();
        // A candidate that loses the race is dropped here.
        self.slot.get_or_init(move || {
            tracing::trace!("memoized value committed");
            candidate
        })
    }

    /// Returns true once a value has been committed.
    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<V: fmt::Debug, F> fmt::Debug for Memoized<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized").field("value", &self.slot.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_supplier_runs_once_without_contention() {
        let calls = AtomicUsize::new(0);
        let memo = Memoized::new(|| calls.fetch_add(1, Ordering::SeqCst) + 100);

        assert_eq!(*memo.get(), 100);
        assert_eq!(*memo.get(), 100);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_racing_threads_observe_one_value() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memo = Arc::new(Memoized::new(move || counter.fetch_add(1, Ordering::SeqCst)));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let memo = Arc::clone(&memo);
                std::thread::spawn(move || *memo.get())
            })
            .collect();

        let seen: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let committed = *memo.get();
        assert!(seen.iter().all(|v| *v == committed));
        assert!(calls.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_debug_shows_state() {
        let memo = Memoized::new(|| 1);
        assert_eq!(format!("{:?}", memo), "Memoized { value: None }");
        memo.get();
        assert_eq!(format!("{:?}", memo), "Memoized { value: Some(1) }");
    }
}
