//! `#[derive(Copyable)]`: rebuild an instance with some fields replaced
//!
//! Generates `copy(&self, ..)` taking one `Option` per stored field, where
//! `None` keeps the current value (cloned), and a consuming `with_<field>`
//! per stored field. `PhantomData` markers are carried over untouched.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Item, ItemStruct};
use tracing::debug;

use crate::error::{ExpandError, Result};
use crate::introspect::{fields_shape, stored_instance_fields, type_level_fields, FieldsShape};

pub fn expand(item: TokenStream) -> Result<TokenStream> {
    let item: Item = syn::parse2(item)?;
    match item {
        Item::Struct(item) if fields_shape(&item.fields) == FieldsShape::Named => {
            Ok(synthesize(&item))
        }
        _ => Err(ExpandError::UnsupportedTarget {
            expander: "#[derive(Copyable)]",
            expected: "a struct with named fields",
        }
        .at(Span::call_site())),
    }
}

pub fn synthesize(item: &ItemStruct) -> TokenStream {
    let ident = &item.ident;
    let vis = &item.vis;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let stored = stored_instance_fields(&item.fields);
    let markers = type_level_fields(&item.fields);
    debug!(target_type = %ident, stored = stored.len(), "synthesizing copy");

    let params = stored.iter().map(|field| {
        let binding = &field.binding;
        let ty = field.ty();
        quote!(#binding: ::core::option::Option<#ty>)
    });
    let values = stored.iter().map(|field| {
        let binding = &field.binding;
        let member = &field.member;
        quote! {
            #member: #binding.unwrap_or_else(|| ::core::clone::Clone::clone(&self.#member))
        }
    });
    let marker_values = markers.iter().map(|field| {
        let member = &field.member;
        quote!(#member: ::core::marker::PhantomData)
    });

    let withers = stored.iter().map(|field| {
        let binding = &field.binding;
        let member = &field.member;
        let ty = field.ty();
        let wither = format_ident!("with_{}", binding);
        quote! {
            #vis fn #wither(self, #binding: #ty) -> Self {
                Self { #member: #binding, ..self }
            }
        }
    });

    quote! {
        #[automatically_derived]
        impl #impl_generics #ident #ty_generics #where_clause {
            #vis fn copy(&self, #( #params ),*) -> Self {
                Self {
                    #( #values, )*
                    #( #marker_values, )*
                }
            }

            #( #withers )*
        }
    }
}

#[cfg(test)]
#[path = "copyable_tests.rs"]
mod copyable_tests;
