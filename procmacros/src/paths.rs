//! Fully-qualified paths used in generated code.
//!
//! Paths use the `pgrest::` prefix (without leading `::`) so doc tests in
//! subcrates can shim a `mod pgrest { ... }` that re-exports the current crate.

use proc_macro2::TokenStream;
use quote::quote;

pub mod std {
    use super::*;

    pub fn into() -> TokenStream {
        quote!(::std::convert::Into)
    }

    pub fn clone() -> TokenStream {
        quote!(::std::clone::Clone)
    }
}

pub mod core {
    use super::*;

    pub fn record() -> TokenStream {
        quote!(pgrest::core::Record)
    }

    pub fn table_descriptor() -> TokenStream {
        quote!(pgrest::core::TableDescriptor)
    }

    pub fn criterion() -> TokenStream {
        quote!(pgrest::core::Criterion)
    }
}
