use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Shared widget state with interior mutability.
///
/// Cloning a `State<T>` clones the handle, not the value: the host keeps one
/// handle and the handlers a widget registers keep others, so a click can
/// update state that the next build reads. A poisoned lock is recovered
/// rather than propagated.
///
/// # Example
///
/// ```ignore
/// let sort = State::new(TableState::default());
/// let element = Table::new().rows(&users).columns(&columns).state(&sort).build(&registry);
///
/// // later, after dispatching events
/// if sort.is_dirty() {
///     sort.clear_dirty();
///     // rebuild
/// }
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
}

impl<T> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Set a new value
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Update the value using a closure
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut *guard);
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_value_and_dirty_flag() {
        let state = State::new(1);
        let handle = state.clone();

        assert!(!state.is_dirty());
        handle.update(|v| *v += 1);

        assert_eq!(state.get(), 2);
        assert!(state.is_dirty());

        state.clear_dirty();
        assert!(!handle.is_dirty());
    }

    #[test]
    fn with_reads_without_clone() {
        let state = State::new(vec![1, 2, 3]);
        assert_eq!(state.with(|v| v.len()), 3);
        assert!(!state.is_dirty());
    }
}
