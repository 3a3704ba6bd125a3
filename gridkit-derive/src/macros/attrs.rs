//! Helper attribute parsing shared by the derives.

use syn::{Attribute, LitStr};

/// Options from `#[column(...)]` on a record field.
#[derive(Default)]
pub struct ColumnAttrs {
    pub name: Option<LitStr>,
    pub format: Option<LitStr>,
    pub description: Option<LitStr>,
    pub skip: bool,
}

/// Parse all `#[column(...)]` attributes of a field.
pub fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut out = ColumnAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("column") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                out.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("format") {
                out.format = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("description") {
                out.description = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("skip") {
                out.skip = true;
            } else {
                return Err(meta.error("expected `name`, `format`, `description` or `skip`"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// Labels from `#[display(...)]` and `#[description(...)]` on a variant.
#[derive(Default)]
pub struct VariantAttrs {
    pub display_name: Option<LitStr>,
    pub description: Option<LitStr>,
}

/// Parse the label attributes of an enum variant.
pub fn parse_variant_attrs(attrs: &[Attribute]) -> syn::Result<VariantAttrs> {
    let mut out = VariantAttrs::default();
    for attr in attrs {
        if attr.path().is_ident("display") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    out.display_name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("description") {
                    out.description = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("expected `name` or `description`"));
                }
                Ok(())
            })?;
        } else if attr.path().is_ident("description") {
            out.description = Some(attr.parse_args()?);
        }
    }
    Ok(out)
}

/// Quote an optional string literal as `Some("..")` or `None`.
pub fn quote_option(lit: Option<&LitStr>) -> proc_macro2::TokenStream {
    match lit {
        Some(lit) => quote::quote! { ::core::option::Option::Some(#lit) },
        None => quote::quote! { ::core::option::Option::None },
    }
}
