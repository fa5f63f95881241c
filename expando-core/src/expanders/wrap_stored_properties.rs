//! `#[wrap_stored_properties("attr")]`: add one attribute to every stored
//! field of a struct

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{parse_quote, Item, Meta};
use tracing::debug;

use crate::args::{expect_string, ArgumentList, ArgumentSpec, Positional};
use crate::error::{ExpandError, Result};
use crate::introspect::field_facts;

const ARGS: ArgumentSpec = ArgumentSpec {
    expander: "#[wrap_stored_properties]",
    labels: &[],
    required: &[],
    positional: Positional::Required("attribute text such as `\"deprecated\"`"),
};

pub fn expand(args: TokenStream, item: TokenStream) -> Result<TokenStream> {
    let args = ArgumentList::parse(args)?;
    args.validate(&ARGS)?;
    let text = match args.positional() {
        Some(expr) => expect_string(expr, "attribute")?,
        None => {
            return Err(ExpandError::MissingArgument {
                what: "attribute text".to_string(),
            }
            .at(args.span()))
        }
    };
    let meta: Meta = text.parse().map_err(|_| {
        ExpandError::InvalidArgument {
            label: "attribute".to_string(),
            expected: "the body of an attribute, e.g. `\"deprecated(note = \\\"..\\\")\"`",
        }
        .at(text.span())
    })?;

    let item: Item = syn::parse2(item)?;
    let mut item = match item {
        Item::Struct(item) => item,
        _ => {
            return Err(ExpandError::UnsupportedTarget {
                expander: "#[wrap_stored_properties]",
                expected: "a struct",
            }
            .at(Span::call_site()))
        }
    };

    let mut wrapped = 0usize;
    for field in item.fields.iter_mut() {
        if field_facts(field).is_stored_instance_property {
            field.attrs.push(parse_quote!(#[#meta]));
            wrapped += 1;
        }
    }
    debug!(target_type = %item.ident, wrapped, "wrapped stored properties");
    Ok(quote!(#item))
}

#[cfg(test)]
#[path = "wrap_stored_properties_tests.rs"]
mod wrap_stored_properties_tests;
