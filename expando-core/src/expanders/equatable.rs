//! `#[derive(Equatable)]`: field-wise `PartialEq` over stored properties

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{parse_quote, GenericParam, Item, ItemStruct};
use tracing::debug;

use crate::error::{ExpandError, Result};
use crate::introspect::stored_instance_fields;

pub fn expand(item: TokenStream) -> Result<TokenStream> {
    let item: Item = syn::parse2(item)?;
    match item {
        Item::Struct(item) => Ok(synthesize(&item)),
        _ => Err(ExpandError::UnsupportedTarget {
            expander: "#[derive(Equatable)]",
            expected: "a struct",
        }
        .at(Span::call_site())),
    }
}

/// Compare every stored instance field in declaration order. Type-level
/// fields never take part; a struct without stored fields is always equal.
pub fn synthesize(item: &ItemStruct) -> TokenStream {
    let ident = &item.ident;
    let stored = stored_instance_fields(&item.fields);
    debug!(target_type = %ident, compared = stored.len(), "synthesizing equality");

    let mut generics = item.generics.clone();
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(param) = param {
            param.bounds.push(parse_quote!(::core::cmp::PartialEq));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let (other, comparison) = if stored.is_empty() {
        (quote!(_), quote!(true))
    } else {
        let terms = stored.iter().map(|field| {
            let member = &field.member;
            quote!(self.#member == other.#member)
        });
        (quote!(other), quote!(#(#terms)&&*))
    };

    quote! {
        #[automatically_derived]
        impl #impl_generics ::core::cmp::PartialEq for #ident #ty_generics #where_clause {
            fn eq(&self, #other: &Self) -> bool {
                #comparison
            }
        }
    }
}

#[cfg(test)]
#[path = "equatable_tests.rs"]
mod equatable_tests;
