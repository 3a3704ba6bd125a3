//! Rows of a [`RowCollection`](crate::RowCollection).

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::observable::{Derived, Observable};

/// Stable identifier of a row, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(usize);

impl RowId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__row_{}", self.0)
    }
}

/// One record in a collection, with its selection and current-row flags.
///
/// `Row` is a handle: clones share the same data and flags. Two handles are
/// equal when they refer to the same row.
pub struct Row<R> {
    id: RowId,
    data: Observable<R>,
    is_selected: Observable<bool>,
    is_current: Derived<bool>,
}

impl<R> Row<R> {
    pub(crate) fn new(data: R) -> Self {
        Self {
            id: RowId::new(),
            data: Observable::new(data),
            is_selected: Observable::new(false),
            is_current: Derived::new(false),
        }
    }

    /// The row's identifier.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// The record. Replace it with `data().set(..)`.
    pub fn data(&self) -> &Observable<R> {
        &self.data
    }

    /// Whether the row is selected.
    pub fn is_selected(&self) -> &Observable<bool> {
        &self.is_selected
    }

    /// Whether the row is its collection's current row.
    ///
    /// Changed only through `RowCollection::set_current_row`.
    pub fn is_current(&self) -> &Derived<bool> {
        &self.is_current
    }

    /// Flip the current flag without notifying. Returns whether it changed.
    pub(crate) fn mark_current(&self, current: bool) -> bool {
        self.is_current.source().replace_quietly(current)
    }
}

impl<R> Clone for Row<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            data: self.data.clone(),
            is_selected: self.is_selected.clone(),
            is_current: self.is_current.clone(),
        }
    }
}

impl<R> PartialEq for Row<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<R> Eq for Row<R> {}

impl<R> fmt::Debug for Row<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id)
            .field("is_selected", &self.is_selected.get())
            .field("is_current", &self.is_current.get())
            .finish_non_exhaustive()
    }
}
