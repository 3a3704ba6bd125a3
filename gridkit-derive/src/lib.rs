mod macros;

use proc_macro::TokenStream;

/// Implements `gridkit::Record` for a struct with named fields.
///
/// Every field becomes a property with its own `<field>_accessor()`
/// constructor. Fields accept `#[column(name = "...", format = "...",
/// description = "...")]`, or `#[column(skip)]` to leave them out.
#[proc_macro_derive(Record, attributes(column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    macros::record::expand(input.into()).into()
}

/// Implements `gridkit::DisplayEnum` and `gridkit::ColumnValue` for a
/// fieldless enum.
///
/// Variants accept `#[display(name = "...")]` and `#[description("...")]`.
#[proc_macro_derive(DisplayEnum, attributes(display, description))]
pub fn derive_display_enum(input: TokenStream) -> TokenStream {
    macros::display_enum::expand(input.into()).into()
}
