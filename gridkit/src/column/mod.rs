//! Column definitions and the builder that produces them.
//!
//! Columns are configured through [`ColumnBuilder`] and frozen into
//! [`Columns`]. After that only shared, read-only access exists, so the
//! same `Columns` can be evaluated from several threads at once.

mod builder;
mod definition;

pub use builder::{ColumnBuilder, ColumnPropertyBuilder};
pub use definition::{ColumnAttribute, ColumnDefinition};

use std::sync::Arc;

use crate::options::FormatOptions;

/// An ordered, frozen set of column definitions keyed by column key.
pub struct Columns<R> {
    columns: Arc<[ColumnDefinition<R>]>,
    options: Arc<FormatOptions>,
}

impl<R> Columns<R> {
    pub(crate) fn new(columns: Vec<ColumnDefinition<R>>, options: Arc<FormatOptions>) -> Self {
        Self {
            columns: columns.into(),
            options,
        }
    }

    /// Iterates over the columns in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDefinition<R>> {
        self.columns.iter()
    }

    /// Looks up a column by key.
    ///
    /// Computed columns have an empty key and are only reachable by
    /// iteration.
    pub fn get(&self, key: &str) -> Option<&ColumnDefinition<R>> {
        if key.is_empty() {
            return None;
        }
        self.columns.iter().find(|column| column.key() == key)
    }

    /// Keys of all columns, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(ColumnDefinition::key)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether any column has a footer aggregator.
    pub fn has_footer(&self) -> bool {
        self.columns.iter().any(ColumnDefinition::has_footer)
    }

    /// Options the columns were built with.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }
}

impl<R> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self {
            columns: Arc::clone(&self.columns),
            options: Arc::clone(&self.options),
        }
    }
}

impl<R> std::fmt::Debug for Columns<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

impl<'a, R> IntoIterator for &'a Columns<R> {
    type Item = &'a ColumnDefinition<R>;
    type IntoIter = std::slice::Iter<'a, ColumnDefinition<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
