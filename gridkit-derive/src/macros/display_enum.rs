use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse2};

use super::attrs::{parse_variant_attrs, quote_option};

/// Expand `#[derive(DisplayEnum)]`.
///
/// Each unit variant maps to an `EnumValue` carrying its name and labels.
/// The enum also becomes usable as a column value with the
/// `Enumeration` type tag.
pub fn expand(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match parse2(input) {
        Ok(input) => input,
        Err(e) => return e.to_compile_error(),
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input, "#[derive(DisplayEnum)] only supports enums")
            .to_compile_error();
    };

    let mut arms = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(
                variant,
                "#[derive(DisplayEnum)] only supports unit variants",
            )
            .to_compile_error();
        }

        let attrs = match parse_variant_attrs(&variant.attrs) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error(),
        };

        let ident = &variant.ident;
        let member = ident.to_string();
        let display_name = quote_option(attrs.display_name.as_ref());
        let description = quote_option(attrs.description.as_ref());

        arms.push(quote! {
            Self::#ident => ::gridkit::model::types::EnumValue::from_static(
                #member,
                #display_name,
                #description,
            )
        });
    }

    quote! {
        impl #impl_generics ::gridkit::model::types::DisplayEnum for #name #ty_generics #where_clause {
            fn enum_value(&self) -> ::gridkit::model::types::EnumValue {
                match *self {
                    #(#arms,)*
                }
            }
        }

        impl #impl_generics ::gridkit::ColumnValue for #name #ty_generics #where_clause {
            const TYPE_TAG: ::gridkit::model::TypeTag = ::gridkit::model::TypeTag::Enumeration;

            fn to_value(&self) -> ::gridkit::model::Value {
                ::gridkit::model::Value::Enum(
                    ::gridkit::model::types::DisplayEnum::enum_value(self),
                )
            }
        }
    }
}
