#![recursion_limit = "128"]

extern crate proc_macro;

mod paths;
mod record;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Implements `pgrest::core::Record` for a struct.
///
/// The table name comes from `#[record(table = "...")]` (defaulting to the
/// struct name). Exactly one field must carry `#[record(primary_key)]`; its
/// column defaults to the field name and can be overridden with
/// `#[record(primary_key, column = "...")]`.
///
/// # Example
///
/// ```rust,ignore
/// use pgrest::prelude::*;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Record)]
/// #[record(table = "users")]
/// struct User {
///     #[record(primary_key)]
///     username: String,
///     status: Option<String>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match record::derive_record(input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
