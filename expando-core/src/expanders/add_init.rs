//! `#[add_init]`: memberwise initializer synthesis

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{Fields, Item, ItemStruct, Path};
use tracing::debug;

use crate::args::{ArgumentList, ArgumentSpec, Positional};
use crate::context::ExpansionContext;
use crate::error::{ExpandError, Result};
use crate::introspect::{
    field_binding, field_facts, fields_shape, stored_instance_fields, struct_facts, FieldsShape,
};

const ARGS: ArgumentSpec = ArgumentSpec {
    expander: "#[add_init]",
    labels: &["extends"],
    required: &[],
    positional: Positional::Forbidden,
};

pub fn expand(cx: &mut ExpansionContext, args: TokenStream, item: TokenStream) -> Result<TokenStream> {
    let args = ArgumentList::parse(args)?;
    args.validate(&ARGS)?;
    let extends = args.path("extends")?;

    let item: Item = syn::parse2(item)?;
    let item = match item {
        Item::Struct(item) => item,
        _ => {
            return Err(ExpandError::UnsupportedTarget {
                expander: "#[add_init]",
                expected: "a struct",
            }
            .at(Span::call_site()))
        }
    };

    let initializer = synthesize(cx, &item, extends.as_ref());
    Ok(quote! {
        #item
        #initializer
    })
}

/// Build the initializer impl for `item`.
///
/// Without stored properties the initializer takes no parameters and, when a
/// supertype is declared, implements that supertype's `new` instead of being
/// an inherent method.
pub fn synthesize(cx: &mut ExpansionContext, item: &ItemStruct, extends: Option<&Path>) -> TokenStream {
    let facts = struct_facts(item, extends);
    let stored = stored_instance_fields(&item.fields);
    let ident = &item.ident;
    let vis = &item.vis;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let construct = construct_self(&item.fields);

    debug!(
        target_type = %ident,
        stored = stored.len(),
        supertype = facts.declared_supertype.is_some(),
        "synthesizing initializer"
    );

    if !facts.has_stored_instance_property {
        return match &facts.declared_supertype {
            Some(supertype) => quote! {
                impl #impl_generics #supertype for #ident #ty_generics #where_clause {
                    fn new() -> Self {
                        #construct
                    }
                }
            },
            None => quote! {
                impl #impl_generics #ident #ty_generics #where_clause {
                    #vis fn new() -> Self {
                        #construct
                    }
                }
            },
        };
    }

    if let Some(supertype) = &facts.declared_supertype {
        cx.warn(
            supertype.span(),
            format!(
                "`extends` is ignored because `{}` has stored properties; an inherent `new` is generated instead",
                ident
            ),
        );
    }

    let params = stored.iter().map(|field| {
        let binding = &field.binding;
        let ty = field.ty();
        quote!(#binding: #ty)
    });

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #vis fn new(#(#params),*) -> Self {
                #construct
            }
        }
    }
}

/// `Self { .. }` / `Self(..)` / `Self` assigning every parameter to its
/// field in declaration order; type-level fields get `PhantomData`
fn construct_self(fields: &Fields) -> TokenStream {
    let values = fields.iter().enumerate().map(|(index, field)| {
        if field_facts(field).is_stored_instance_property {
            let binding = field_binding(index, field);
            quote!(#binding)
        } else {
            quote!(::core::marker::PhantomData)
        }
    });

    match fields_shape(fields) {
        FieldsShape::Named => {
            let inits = fields.iter().zip(values).map(|(field, value)| {
                let name = &field.ident;
                if field_facts(field).is_stored_instance_property {
                    quote!(#name)
                } else {
                    quote!(#name: #value)
                }
            });
            quote!(Self { #(#inits),* })
        }
        FieldsShape::Unnamed => quote!(Self(#(#values),*)),
        FieldsShape::Unit => quote!(Self),
    }
}

#[cfg(test)]
#[path = "add_init_tests.rs"]
mod add_init_tests;
