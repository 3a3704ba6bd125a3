use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse2};

use super::attrs::parse_column_attrs;

/// Expand `#[derive(Record)]`.
///
/// Generates, for a struct with named fields:
/// - one `<field>_accessor()` constructor per exposed field
/// - an impl of `gridkit::Record` whose `properties()` is a `const` table
///   and whose `accessor(name)` matches on the field name
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Record)]
/// struct Order {
///     #[column(name = "Order no.")]
///     number: u32,
///     #[column(format = "N2")]
///     total: Decimal,
///     #[column(skip)]
///     cache: Vec<u8>,
/// }
/// ```
pub fn expand(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(input) => input,
        Err(e) => return e.to_compile_error(),
    };

    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "#[derive(Record)] does not support generic structs",
        )
        .to_compile_error();
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "#[derive(Record)] only supports structs with named fields",
                )
                .to_compile_error();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "#[derive(Record)] only supports structs")
                .to_compile_error();
        }
    };

    let mut properties = Vec::new();
    let mut constructors = Vec::new();
    let mut arms = Vec::new();

    for field in fields {
        let attrs = match parse_column_attrs(&field.attrs) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error(),
        };
        if attrs.skip {
            continue;
        }

        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let ty = &field.ty;
        let key = ident.to_string();
        let key = key.strip_prefix("r#").unwrap_or(&key).to_string();
        let index = properties.len();

        // Metadata entry, built in const context
        let mut metadata = quote! {
            ::gridkit::model::metadata::PropertyMetadata::new(
                #key,
                <#ty as ::gridkit::ColumnValue>::TYPE_TAG,
            )
        };
        if let Some(display_name) = &attrs.name {
            metadata = quote! { #metadata.with_display_name(#display_name) };
        }
        if let Some(format) = &attrs.format {
            metadata = quote! { #metadata.with_display_format(#format) };
        }
        if let Some(description) = &attrs.description {
            metadata = quote! { #metadata.with_description(#description) };
        }
        properties.push(metadata);

        let constructor = format_ident!("{}_accessor", key);
        let doc = format!("Accessor for the `{key}` property.");
        constructors.push(quote! {
            #[doc = #doc]
            pub fn #constructor() -> ::gridkit::Accessor<Self> {
                ::gridkit::Accessor::property(
                    <Self as ::gridkit::Record>::properties()[#index].clone(),
                    |record: &Self| ::gridkit::ColumnValue::to_value(&record.#ident),
                )
            }
        });

        arms.push(quote! {
            #key => ::core::option::Option::Some(Self::#constructor())
        });
    }

    let record_name = name.to_string();

    quote! {
        impl #name {
            #(#constructors)*
        }

        impl ::gridkit::Record for #name {
            fn record_name() -> &'static str {
                #record_name
            }

            fn properties() -> &'static [::gridkit::model::metadata::PropertyMetadata] {
                const PROPERTIES: &[::gridkit::model::metadata::PropertyMetadata] = &[
                    #(#properties,)*
                ];
                PROPERTIES
            }

            fn accessor(name: &str) -> ::core::option::Option<::gridkit::Accessor<Self>> {
                match name {
                    #(#arms,)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
