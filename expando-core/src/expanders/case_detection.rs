//! `#[derive(CaseDetection)]`: one `is_<case>` predicate per enum variant

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Item, ItemEnum};
use tracing::debug;

use crate::error::{ExpandError, Result};
use crate::naming::case_predicate_name;

pub fn expand(item: TokenStream) -> Result<TokenStream> {
    let item: Item = syn::parse2(item)?;
    match item {
        Item::Enum(item) => Ok(synthesize(&item)),
        _ => Err(ExpandError::UnsupportedTarget {
            expander: "#[derive(CaseDetection)]",
            expected: "an enum",
        }
        .at(Span::call_site())),
    }
}

pub fn synthesize(item: &ItemEnum) -> TokenStream {
    let ident = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    debug!(target_type = %ident, cases = item.variants.len(), "synthesizing case predicates");

    let predicates = item.variants.iter().map(|variant| {
        let case = &variant.ident;
        let predicate = format_ident!("{}", case_predicate_name(&case.to_string()));
        quote! {
            pub fn #predicate(&self) -> bool {
                matches!(self, Self::#case { .. })
            }
        }
    });

    quote! {
        #[automatically_derived]
        impl #impl_generics #ident #ty_generics #where_clause {
            #( #predicates )*
        }
    }
}

#[cfg(test)]
#[path = "case_detection_tests.rs"]
mod case_detection_tests;
