//! Value model

pub mod metadata;
pub mod types;
mod value;

pub use value::*;
