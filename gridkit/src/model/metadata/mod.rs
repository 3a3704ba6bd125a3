//! Record metadata types

mod property;

pub use property::*;
