use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, Result};

use crate::paths;

/// Parsed `#[record(primary_key, column = "...")]` field.
struct PrimaryKey<'a> {
    field: &'a syn::Ident,
    column: String,
}

pub(crate) fn derive_record(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let table = table_name(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut primary_keys = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let mut is_primary = false;
        let mut column = None;

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("record")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("primary_key") {
                    is_primary = true;
                    Ok(())
                } else if meta.path.is_ident("column") {
                    let lit: LitStr = meta.value()?.parse()?;
                    column = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `primary_key` or `column = \"...\"`"))
                }
            })?;
        }

        if is_primary {
            primary_keys.push(PrimaryKey {
                field: ident,
                column: column.unwrap_or_else(|| ident.unraw().to_string()),
            });
        } else if column.is_some() {
            return Err(syn::Error::new_spanned(
                ident,
                "`column` is only meaningful on the #[record(primary_key)] field",
            ));
        }
    }

    let pk = match primary_keys.as_slice() {
        [pk] => pk,
        [] => {
            return Err(syn::Error::new_spanned(
                name,
                "Record needs exactly one field marked #[record(primary_key)]",
            ));
        }
        [_, second, ..] => {
            return Err(syn::Error::new_spanned(
                second.field,
                "Record supports a single primary key; found more than one #[record(primary_key)]",
            ));
        }
    };

    let record = paths::core::record();
    let descriptor = paths::core::table_descriptor();
    let criterion = paths::core::criterion();
    let into = paths::std::into();
    let clone = paths::std::clone();

    let field = pk.field;
    let column = &pk.column;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #record for #name #ty_generics #where_clause {
            const DESCRIPTOR: #descriptor = #descriptor::new(#table, #column);

            fn primary_key_value(&self) -> #criterion {
                #into::into(#clone::clone(&self.#field))
            }
        }
    })
}

/// `#[record(table = "...")]`, defaulting to the struct name.
fn table_name(input: &DeriveInput) -> Result<String> {
    let mut table = None;
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let lit: LitStr = meta.value()?.parse()?;
                table = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `table = \"...\"`"))
            }
        })?;
    }
    Ok(table.unwrap_or_else(|| input.ident.unraw().to_string()))
}
