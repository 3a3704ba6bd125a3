//! Observable cells.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

impl SubscriptionId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__subscription_{}", self.0)
    }
}

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Shared<T> {
    value: RwLock<T>,
    dirty: AtomicBool,
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber<T>)>>,
}

/// Shared, observable value.
///
/// `Observable<T>` is a cheap-to-clone handle; clones see the same value and
/// the same subscribers. Writers mark the cell dirty and then notify every
/// subscriber synchronously, after the write lock has been released, with a
/// snapshot of the new value. A subscriber may therefore read or write any
/// observable, including this one.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use gridkit_state::Observable;
///
/// let count = Observable::new(0);
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let sink = Arc::clone(&seen);
/// count.subscribe(move |v| sink.lock().unwrap().push(*v));
///
/// count.set(1);
/// count.update(|v| *v += 1);
/// assert!(!count.set_if_changed(2));
///
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// ```
pub struct Observable<T> {
    inner: Arc<Shared<T>>,
}

impl<T> Observable<T> {
    /// Create a new observable holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Shared {
                value: RwLock::new(value),
                dirty: AtomicBool::new(false),
                subscribers: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read the current value without cloning it.
    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        let guard = self.inner.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T)
    where
        T: Clone,
    {
        self.update(|current| *current = value);
    }

    /// Modify the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Clone,
    {
        let snapshot = {
            let mut guard = self.inner.value.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard);
            guard.clone()
        };
        self.inner.dirty.store(true, Ordering::SeqCst);
        self.notify(&snapshot);
    }

    /// Replace the value only when it differs from the current one.
    ///
    /// Returns whether the value changed. Subscribers are not notified
    /// otherwise.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: Clone + PartialEq,
    {
        if !self.replace_quietly(value.clone()) {
            return false;
        }
        self.notify(&value);
        true
    }

    /// Like [`set_if_changed`](Self::set_if_changed) without notifying.
    ///
    /// Callers that batch several writes under their own lock announce the
    /// change afterwards with [`notify_current`](Self::notify_current).
    pub(crate) fn replace_quietly(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        let mut guard = self.inner.value.write().unwrap_or_else(PoisonError::into_inner);
        if *guard == value {
            return false;
        }
        *guard = value;
        self.inner.dirty.store(true, Ordering::SeqCst);
        true
    }

    /// Like [`update`](Self::update) without notifying.
    pub(crate) fn update_quietly(&self, f: impl FnOnce(&mut T)) {
        let mut guard = self.inner.value.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
        self.inner.dirty.store(true, Ordering::SeqCst);
    }

    /// Notify subscribers with the value as it is now.
    pub(crate) fn notify_current(&self)
    where
        T: Clone,
    {
        let snapshot = self.get();
        self.notify(&snapshot);
    }

    /// Register a callback run after every change.
    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(f)));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(sub, _)| *sub != id);
        subscribers.len() != before
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the value has been modified since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.inner.dirty.store(false, Ordering::SeqCst);
    }

    /// Create a weak handle that does not keep the value alive.
    pub fn downgrade(&self) -> WeakObservable<T> {
        WeakObservable {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Whether two handles point to the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self, value: &T) {
        // Snapshot so subscribers can (un)subscribe while being called
        let subscribers: Vec<Subscriber<T>> = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, f)| Arc::clone(f))
            .collect();
        for subscriber in subscribers {
            subscriber(value);
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| {
            f.debug_struct("Observable")
                .field("value", value)
                .field("dirty", &self.is_dirty())
                .finish()
        })
    }
}

/// Weak handle to an [`Observable`].
pub struct WeakObservable<T> {
    inner: Weak<Shared<T>>,
}

impl<T> WeakObservable<T> {
    /// Get the observable back if it is still alive.
    pub fn upgrade(&self) -> Option<Observable<T>> {
        self.inner.upgrade().map(|inner| Observable { inner })
    }
}

impl<T> Clone for WeakObservable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

/// Read-only view of a value maintained by its owner.
///
/// Only this crate can write through a `Derived`; everyone else can read
/// and subscribe.
pub struct Derived<T> {
    source: Observable<T>,
}

impl<T> Derived<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            source: Observable::new(value),
        }
    }

    pub(crate) fn source(&self) -> &Observable<T> {
        &self.source
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.source.get()
    }

    /// Read the current value without cloning it.
    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        self.source.with(f)
    }

    /// Register a callback run after every change.
    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.source.subscribe(f)
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.source.unsubscribe(id)
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("Derived").field(value).finish())
    }
}
