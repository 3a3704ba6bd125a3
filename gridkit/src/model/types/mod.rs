//! Cell value types

mod enum_value;

pub use enum_value::*;
