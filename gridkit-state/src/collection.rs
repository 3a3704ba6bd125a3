//! The reactive row collection behind a grid.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

use log::{trace, warn};

use crate::observable::{Derived, Observable, SubscriptionId};
use crate::row::{Row, RowId};

type RowCallback<R> = Arc<dyn Fn(&Row<R>) + Send + Sync>;

struct Callbacks<R> {
    selected: Option<RowCallback<R>>,
    added: Option<RowCallback<R>>,
    saved: Option<RowCallback<R>>,
    deleted: Option<RowCallback<R>>,
}

impl<R> Default for Callbacks<R> {
    fn default() -> Self {
        Self {
            selected: None,
            added: None,
            saved: None,
            deleted: None,
        }
    }
}

struct Inner<R> {
    rows: Derived<Vec<Row<R>>>,
    current_row: Derived<Option<Row<R>>>,
    is_selectable: Observable<bool>,
    empty_grid_message: Observable<String>,
    has_any_row: Derived<bool>,
    any_selected: Derived<bool>,
    selection_watch: Mutex<HashMap<RowId, SubscriptionId>>,
    callbacks: RwLock<Callbacks<R>>,
    // Serializes every read-modify-write of the derived state above
    transition: Mutex<()>,
}

/// What a transition wrote quietly; announced once the lock is released.
struct Changes<R> {
    flipped: Vec<Row<R>>,
    current_row: bool,
    rows: bool,
    has_any_row: bool,
    any_selected: bool,
}

impl<R> Changes<R> {
    fn new() -> Self {
        Self {
            flipped: Vec::new(),
            current_row: false,
            rows: false,
            has_any_row: false,
            any_selected: false,
        }
    }
}

impl<R> Inner<R> {
    fn lock_transition(&self) -> MutexGuard<'_, ()> {
        self.transition.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Point `current_row` at `next`, flipping both rows' flags.
    ///
    /// Must be called with the transition lock held.
    fn replace_current(&self, next: Option<&Row<R>>, changes: &mut Changes<R>) {
        let previous = self.current_row.get();
        if previous.as_ref() == next {
            return;
        }
        if let Some(previous) = previous
            && previous.mark_current(false)
        {
            changes.flipped.push(previous);
        }
        if let Some(next) = next
            && next.mark_current(true)
        {
            changes.flipped.push(next.clone());
        }
        trace!(
            "current row -> {}",
            next.map_or_else(|| "none".to_string(), |r| r.id().to_string())
        );
        changes.current_row = self.current_row.source().replace_quietly(next.cloned());
    }

    /// Recompute `has_any_row` and `any_selected` from the rows.
    ///
    /// Must be called with the transition lock held.
    fn recompute_flags(&self, changes: &mut Changes<R>) {
        let (has_any_row, any_selected) = self.rows.with(|rows| {
            (
                !rows.is_empty(),
                rows.iter().any(|row| row.is_selected().get()),
            )
        });
        if self.has_any_row.source().replace_quietly(has_any_row) {
            trace!("has_any_row -> {has_any_row}");
            changes.has_any_row = true;
        }
        if self.any_selected.source().replace_quietly(any_selected) {
            trace!("any_selected -> {any_selected}");
            changes.any_selected = true;
        }
    }

    fn announce(&self, changes: Changes<R>) {
        for row in &changes.flipped {
            row.is_current().source().notify_current();
        }
        if changes.current_row {
            self.current_row.source().notify_current();
        }
        if changes.rows {
            self.rows.source().notify_current();
        }
        if changes.has_any_row {
            self.has_any_row.source().notify_current();
        }
        if changes.any_selected {
            self.any_selected.source().notify_current();
        }
    }

    fn refresh_any_selected(&self) {
        let mut changes = Changes::new();
        {
            let _transition = self.lock_transition();
            self.recompute_flags(&mut changes);
        }
        self.announce(changes);
    }
}

/// Ordered, observable collection of [`Row`]s.
///
/// Structural changes (adding and removing rows) notify `rows` subscribers
/// once per operation. `has_any_row` and `any_selected` are kept up to date
/// synchronously and only notify when they flip. At most one row is the
/// current row.
///
/// `RowCollection` is a handle; clones share the same rows.
///
/// # Example
///
/// ```
/// use gridkit_state::RowCollection;
///
/// let grid = RowCollection::new();
/// assert!(!grid.has_any_row().get());
///
/// let first = grid.add_row("alpha");
/// grid.add_rows(["beta", "gamma"]);
/// assert_eq!(grid.len(), 3);
///
/// first.is_selected().set(true);
/// assert!(grid.any_selected().get());
///
/// grid.set_current_row(Some(&first));
/// assert!(first.is_current().get());
///
/// grid.remove_all_rows();
/// assert!(grid.current_row().get().is_none());
/// assert!(!grid.any_selected().get());
/// ```
pub struct RowCollection<R> {
    inner: Arc<Inner<R>>,
}

impl<R: Send + Sync + 'static> Default for RowCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Send + Sync + 'static> RowCollection<R> {
    /// Create an empty collection. Rows are not selectable until
    /// [`with_selectable`](Self::with_selectable) opts in.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                rows: Derived::new(Vec::new()),
                current_row: Derived::new(None),
                is_selectable: Observable::new(false),
                empty_grid_message: Observable::new(String::new()),
                has_any_row: Derived::new(false),
                any_selected: Derived::new(false),
                selection_watch: Mutex::new(HashMap::new()),
                callbacks: RwLock::new(Callbacks::default()),
                transition: Mutex::new(()),
            }),
        }
    }

    /// Set the message shown when the grid has no rows.
    pub fn with_empty_grid_message(self, message: impl Into<String>) -> Self {
        self.inner.empty_grid_message.set(message.into());
        self.inner.empty_grid_message.clear_dirty();
        self
    }

    /// Set whether rows can be selected.
    pub fn with_selectable(self, selectable: bool) -> Self {
        self.inner.is_selectable.set(selectable);
        self.inner.is_selectable.clear_dirty();
        self
    }

    /// The rows, in order.
    pub fn rows(&self) -> &Derived<Vec<Row<R>>> {
        &self.inner.rows
    }

    /// The current row, if any.
    pub fn current_row(&self) -> &Derived<Option<Row<R>>> {
        &self.inner.current_row
    }

    /// Whether rows can be selected.
    pub fn is_selectable(&self) -> &Observable<bool> {
        &self.inner.is_selectable
    }

    /// Message shown when there are no rows.
    pub fn empty_grid_message(&self) -> &Observable<String> {
        &self.inner.empty_grid_message
    }

    /// Whether the collection has at least one row.
    pub fn has_any_row(&self) -> &Derived<bool> {
        &self.inner.has_any_row
    }

    /// Whether at least one row is selected.
    pub fn any_selected(&self) -> &Derived<bool> {
        &self.inner.any_selected
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.inner.rows.with(Vec::len)
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `row` belongs to this collection.
    pub fn contains(&self, row: &Row<R>) -> bool {
        self.inner.rows.with(|rows| rows.contains(row))
    }

    /// Append one record and return its row.
    pub fn add_row(&self, record: R) -> Row<R> {
        let row = self.watch(Row::new(record));
        trace!("adding row {}", row.id());
        self.append(vec![row.clone()]);
        row
    }

    /// Append several records with a single notification.
    ///
    /// Returns the new rows. An empty batch changes nothing.
    pub fn add_rows(&self, records: impl IntoIterator<Item = R>) -> Vec<Row<R>> {
        let new_rows: Vec<Row<R>> = records
            .into_iter()
            .map(|record| self.watch(Row::new(record)))
            .collect();
        if new_rows.is_empty() {
            return new_rows;
        }

        trace!("adding {} rows", new_rows.len());
        self.append(new_rows.clone());
        new_rows
    }

    /// Remove one row. Returns false if it is not in this collection.
    ///
    /// The current row is cleared first when it is the removed row.
    pub fn remove_row(&self, row: &Row<R>) -> bool {
        if !self.contains(row) {
            return false;
        }

        if self.inner.current_row.with(|current| current.as_ref() == Some(row)) {
            self.set_current_row(None);
        }

        let mut changes = Changes::new();
        {
            let _transition = self.inner.lock_transition();
            if !self.contains(row) {
                return false;
            }
            if self.inner.current_row.with(|current| current.as_ref() == Some(row)) {
                self.inner.replace_current(None, &mut changes);
            }
            trace!("removing row {}", row.id());
            self.inner
                .rows
                .source()
                .update_quietly(|rows| rows.retain(|candidate| candidate != row));
            changes.rows = true;
            self.inner.recompute_flags(&mut changes);
        }
        self.unwatch(row);
        self.inner.announce(changes);
        true
    }

    /// Remove every row.
    ///
    /// The current row is cleared before the rows are removed, so
    /// `current_row` subscribers never see a row that is already gone.
    pub fn remove_all_rows(&self) {
        self.set_current_row(None);

        let mut changes = Changes::new();
        let removed = {
            let _transition = self.inner.lock_transition();
            let removed = self.inner.rows.get();
            if removed.is_empty() {
                return;
            }
            trace!("removing all {} rows", removed.len());
            self.inner.replace_current(None, &mut changes);
            self.inner.rows.source().update_quietly(Vec::clear);
            changes.rows = true;
            self.inner.recompute_flags(&mut changes);
            removed
        };
        for row in &removed {
            self.unwatch(row);
        }
        self.inner.announce(changes);
    }

    /// Make `row` the current row, or clear the current row.
    ///
    /// A row from another collection is ignored. At most one row is
    /// current, even when several threads call this at once.
    pub fn set_current_row(&self, row: Option<&Row<R>>) {
        let mut changes = Changes::new();
        {
            let _transition = self.inner.lock_transition();
            if let Some(row) = row
                && !self.contains(row)
            {
                warn!("row {} is not in this collection; current row unchanged", row.id());
                return;
            }
            self.inner.replace_current(row, &mut changes);
        }
        self.inner.announce(changes);
    }

    /// Rows that are currently selected, in order.
    pub fn selected_rows(&self) -> Vec<Row<R>> {
        self.inner.rows.with(|rows| {
            rows.iter()
                .filter(|row| row.is_selected().get())
                .cloned()
                .collect()
        })
    }

    /// Select every row. Does nothing when the collection is not selectable.
    pub fn select_all(&self) {
        if !self.inner.is_selectable.get() {
            trace!("select_all ignored: collection is not selectable");
            return;
        }
        for row in self.inner.rows.get() {
            row.is_selected().set_if_changed(true);
        }
    }

    /// Deselect every row.
    pub fn clear_selection(&self) {
        for row in self.inner.rows.get() {
            row.is_selected().set_if_changed(false);
        }
    }

    /// Set the callback run by [`notify_row_selected`](Self::notify_row_selected).
    pub fn on_row_selected(&self, f: impl Fn(&Row<R>) + Send + Sync + 'static) {
        self.callbacks_mut().selected = Some(Arc::new(f));
    }

    /// Set the callback run by [`notify_row_added`](Self::notify_row_added).
    pub fn on_row_added(&self, f: impl Fn(&Row<R>) + Send + Sync + 'static) {
        self.callbacks_mut().added = Some(Arc::new(f));
    }

    /// Set the callback run by [`notify_row_saved`](Self::notify_row_saved).
    pub fn on_row_saved(&self, f: impl Fn(&Row<R>) + Send + Sync + 'static) {
        self.callbacks_mut().saved = Some(Arc::new(f));
    }

    /// Set the callback run by [`notify_row_deleted`](Self::notify_row_deleted).
    pub fn on_row_deleted(&self, f: impl Fn(&Row<R>) + Send + Sync + 'static) {
        self.callbacks_mut().deleted = Some(Arc::new(f));
    }

    /// Run the row-selected callback, if set.
    pub fn notify_row_selected(&self, row: &Row<R>) {
        let callback = self.callbacks().selected.clone();
        Self::invoke("selected", callback, row);
    }

    /// Run the row-added callback, if set.
    pub fn notify_row_added(&self, row: &Row<R>) {
        let callback = self.callbacks().added.clone();
        Self::invoke("added", callback, row);
    }

    /// Run the row-saved callback, if set.
    pub fn notify_row_saved(&self, row: &Row<R>) {
        let callback = self.callbacks().saved.clone();
        Self::invoke("saved", callback, row);
    }

    /// Run the row-deleted callback, if set.
    pub fn notify_row_deleted(&self, row: &Row<R>) {
        let callback = self.callbacks().deleted.clone();
        Self::invoke("deleted", callback, row);
    }

    fn invoke(event: &str, callback: Option<RowCallback<R>>, row: &Row<R>) {
        match callback {
            Some(callback) => {
                trace!("row {} {event}", row.id());
                callback(row);
            }
            None => trace!("row {} {event}: no callback", row.id()),
        }
    }

    fn callbacks(&self) -> std::sync::RwLockReadGuard<'_, Callbacks<R>> {
        self.inner.callbacks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn callbacks_mut(&self) -> std::sync::RwLockWriteGuard<'_, Callbacks<R>> {
        self.inner.callbacks.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Track the row's selection flag so `any_selected` follows it.
    fn watch(&self, row: Row<R>) -> Row<R> {
        let inner: Weak<Inner<R>> = Arc::downgrade(&self.inner);
        let id = row.is_selected().subscribe(move |_| {
            if let Some(inner) = inner.upgrade() {
                inner.refresh_any_selected();
            }
        });
        self.inner
            .selection_watch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(row.id(), id);
        row
    }

    fn unwatch(&self, row: &Row<R>) {
        let id = self
            .inner
            .selection_watch
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&row.id());
        if let Some(id) = id {
            row.is_selected().unsubscribe(id);
        }
    }

    fn append(&self, new_rows: Vec<Row<R>>) {
        let mut changes = Changes::new();
        {
            let _transition = self.inner.lock_transition();
            self.inner.rows.source().update_quietly(|rows| rows.extend(new_rows));
            changes.rows = true;
            self.inner.recompute_flags(&mut changes);
        }
        self.inner.announce(changes);
    }
}

impl<R> Clone for RowCollection<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> fmt::Debug for RowCollection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowCollection")
            .field("rows", &self.inner.rows.with(Vec::len))
            .field("current_row", &self.inner.current_row.with(|r| r.as_ref().map(Row::id)))
            .field("is_selectable", &self.inner.is_selectable.get())
            .field("has_any_row", &self.inner.has_any_row.get())
            .field("any_selected", &self.inner.any_selected.get())
            .finish()
    }
}
