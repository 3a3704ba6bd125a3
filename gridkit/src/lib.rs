//! Typed, declaratively configured table columns.
//!
//! A grid is described by a set of [`ColumnDefinition`]s built with
//! [`ColumnBuilder`]. Each column reads a [`model::Value`] from a record
//! through an [`Accessor`], formats it by its declared type, and optionally
//! aggregates all records into a footer. [`grid::render_grid`] runs a full
//! pass and returns plain strings for a markup layer to consume.
//!
//! ```
//! use gridkit::{ColumnBuilder, Record};
//!
//! #[derive(Record)]
//! struct Invoice {
//!     #[column(name = "Customer")]
//!     customer: String,
//!     #[column(format = "N2")]
//!     amount: f64,
//! }
//!
//! let mut builder = ColumnBuilder::<Invoice>::new();
//! builder.bound("customer").unwrap();
//! builder
//!     .bound("amount")
//!     .unwrap()
//!     .footer(|all: &[Invoice]| all.iter().map(|i| i.amount).sum::<f64>());
//! let columns = builder.build().unwrap();
//!
//! let invoices = vec![
//!     Invoice { customer: "Contoso".into(), amount: 1250.0 },
//!     Invoice { customer: "Fabrikam".into(), amount: 99.5 },
//! ];
//! let grid = gridkit::grid::render_grid(&columns, &invoices).unwrap();
//! assert_eq!(grid.headers[0].title, "Customer");
//! assert_eq!(grid.rows[0][1].text.as_deref(), Some("1,250.00"));
//! assert_eq!(grid.footer.unwrap()[1].text.as_deref(), Some("1349.5"));
//! ```

extern crate self as gridkit;

pub mod accessor;
pub mod column;
pub mod error;
pub mod format;
pub mod grid;
pub mod model;

mod options;

pub use accessor::Accessor;
pub use accessor::ColumnValue;
pub use accessor::Record;
pub use column::ColumnAttribute;
pub use column::ColumnBuilder;
pub use column::ColumnDefinition;
pub use column::ColumnPropertyBuilder;
pub use column::Columns;
pub use error::BuildError;
pub use error::Error;
pub use error::FormatError;
pub use error::Result;
pub use model::types::DisplayEnum;
pub use options::FormatOptions;

pub use gridkit_derive::*;
