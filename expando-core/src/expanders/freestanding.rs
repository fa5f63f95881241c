//! Function-like expanders: `stringify_expr!`, `warning!` and `url!`

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Expr, LitStr};
use tracing::debug;

use crate::context::ExpansionContext;
use crate::error::{ExpandError, Result};

/// `stringify_expr!(a + b)` becomes `(a + b, "a + b")`
pub fn stringify(input: TokenStream) -> Result<TokenStream> {
    let expr = parse_required::<Expr>(input, "an expression to stringify")?;
    let text = quote!(#expr).to_string();
    Ok(quote!((#expr, #text)))
}

/// `warning!("text")` reports `text` as a warning and emits nothing else
pub fn warning(cx: &mut ExpansionContext, input: TokenStream) -> Result<TokenStream> {
    let message = parse_required::<LitStr>(input, "a string literal message")?;
    cx.warn(message.span(), message.value());
    Ok(TokenStream::new())
}

/// `url!("https://..")` checks the literal now and parses it again at run
/// time; the run-time failure arm can only be reached if the two parsers
/// disagree
pub fn url(cx: &mut ExpansionContext, input: TokenStream) -> Result<TokenStream> {
    let literal = parse_required::<LitStr>(input, "a string literal URL")?;
    let parsed = url::Url::parse(&literal.value()).map_err(|err| {
        ExpandError::InvalidUrl {
            reason: err.to_string(),
        }
        .at(literal.span())
    })?;
    debug!(url = %parsed, "validated url literal");

    let krate = cx
        .config()
        .crate_path()
        .map_err(|err| err.at(literal.span()))?;
    Ok(quote! {
        match #krate::__private::Url::parse(#literal) {
            ::core::result::Result::Ok(url) => url,
            ::core::result::Result::Err(err) => {
                ::core::panic!("url! literal {:?} was accepted at compile time but failed: {}", #literal, err)
            }
        }
    })
}

fn parse_required<T: syn::parse::Parse>(input: TokenStream, what: &str) -> Result<T> {
    if input.is_empty() {
        return Err(ExpandError::MissingArgument {
            what: what.to_string(),
        }
        .at(input.span()));
    }
    Ok(syn::parse2(input)?)
}

#[cfg(test)]
#[path = "freestanding_tests.rs"]
mod freestanding_tests;
