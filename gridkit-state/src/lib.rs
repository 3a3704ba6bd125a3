//! Reactive state for grids.
//!
//! [`RowCollection`] holds the rows a grid shows, tracks which row is
//! current and which rows are selected, and exposes everything as
//! [`Observable`] or [`Derived`] values that a view can subscribe to.

mod collection;
mod observable;
mod row;

pub use collection::RowCollection;
pub use observable::{Derived, Observable, SubscriptionId, WeakObservable};
pub use row::{Row, RowId};
