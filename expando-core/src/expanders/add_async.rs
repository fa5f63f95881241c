//! `#[add_async]`: async peers for completion-handler functions

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{
    Expr, FnArg, GenericArgument, GenericParam, Ident, Item, ItemFn, Lifetime,
    ParenthesizedGenericArguments, Pat, PatIdent, PathArguments, ReturnType, Signature, Type,
    TypeBareFn, TypeParamBound, TypeReference, WherePredicate,
};
use tracing::debug;

use crate::args::{ArgumentList, ArgumentSpec, Positional};
use crate::context::ExpansionContext;
use crate::error::{ExpandError, Result};
use crate::introspect::{is_unit, strip_attribute};

const ARGS: ArgumentSpec = ArgumentSpec {
    expander: "#[add_async]",
    labels: &["crate"],
    required: &[],
    positional: Positional::Optional,
};

const IN_IMPL: &str = "in_impl";

/// How the completion handler parameter is typed
#[derive(Debug, Clone, PartialEq, Eq)]
enum HandlerShape {
    /// `impl Fn(T)`
    Impl,
    /// `Box<dyn Fn(T)>`
    Boxed,
    /// `&dyn Fn(T)` or `&mut dyn FnMut(T)`
    Borrowed { mutable: bool },
    /// `H` where `H: Fn(T)`
    Generic(Ident),
}

/// The completion handler found in last parameter position
#[derive(Debug, Clone)]
struct Handler {
    shape: HandlerShape,
    inputs: Vec<Type>,
    output: ReturnType,
}

impl Handler {
    fn payload(&self) -> Option<&Type> {
        self.inputs.first()
    }
}

/// `Result<T, E>` with both arguments spelled out
fn is_two_armed_result(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            match type_path.path.segments.last() {
                Some(segment) if segment.ident == "Result" => match &segment.arguments {
                    PathArguments::AngleBracketed(args) => {
                        args.args
                            .iter()
                            .filter(|arg| matches!(arg, GenericArgument::Type(_)))
                            .count()
                            == 2
                    }
                    _ => false,
                },
                _ => false,
            }
        }
        _ => false,
    }
}

pub fn expand(cx: &mut ExpansionContext, args: TokenStream, item: TokenStream) -> Result<TokenStream> {
    let args = ArgumentList::parse(args)?;
    args.validate(&ARGS)?;
    let in_impl = in_impl_flag(&args)?;
    let krate = cx.crate_path(&args)?;

    let item: Item = syn::parse2(item)?;
    let func = match item {
        Item::Fn(func) => func,
        _ => {
            return Err(ExpandError::UnsupportedTarget {
                expander: "#[add_async]",
                expected: "a function",
            }
            .at(Span::call_site()))
        }
    };

    let handler = validate_signature(&func.sig)?;
    let suffix = cx.config().async_suffix.clone();
    let peer = synthesize_peer(&func, &handler, in_impl, &krate, &suffix);
    debug!(
        function = %func.sig.ident,
        payload = handler.payload().is_some(),
        fallible = handler.payload().map_or(false, is_two_armed_result),
        "synthesizing async peer"
    );

    Ok(quote! {
        #func
        #peer
    })
}

fn in_impl_flag(args: &ArgumentList) -> Result<bool> {
    match args.positional() {
        None => Ok(false),
        Some(Expr::Path(path)) if path.path.is_ident(IN_IMPL) => Ok(true),
        Some(other) => Err(ExpandError::InvalidArgument {
            label: IN_IMPL.to_string(),
            expected: "the bare flag `in_impl`",
        }
        .at(other.span())),
    }
}

/// Check the preconditions in order and return the completion handler
fn validate_signature(sig: &Signature) -> Result<Handler> {
    if let Some(asyncness) = &sig.asyncness {
        return Err(ExpandError::AlreadyAsync.at(asyncness.span()));
    }
    if let ReturnType::Type(_, ty) = &sig.output {
        if !is_unit(ty) {
            return Err(ExpandError::NonUnitReturn.at(ty.span()));
        }
    }

    let handler = match sig.inputs.last() {
        Some(FnArg::Typed(last)) => completion_handler(&last.ty, sig),
        _ => None,
    }
    .ok_or_else(|| ExpandError::MissingCompletionHandler.at(sig.ident.span()))?;

    if let ReturnType::Type(_, ty) = &handler.output {
        if !is_unit(ty) {
            return Err(ExpandError::CompletionHandlerReturnsValue.at(ty.span()));
        }
    }
    if handler.inputs.len() > 1 {
        return Err(ExpandError::CompletionHandlerArity.at(handler.inputs[1].span()));
    }
    if let Some(payload) = handler.payload() {
        let mut finder = ElidedLifetimes::default();
        finder.visit_type(payload);
        if let Some(span) = finder.first {
            return Err(ExpandError::ElidedPayloadLifetime {
                payload: quote!(#payload).to_string(),
            }
            .at(span));
        }
    }
    Ok(handler)
}

/// First elided (`&T`) or anonymous (`'_`) lifetime in a payload type.
/// Fn-pointer and `Fn(..)` sugar scope their own lifetimes and are skipped.
#[derive(Default)]
struct ElidedLifetimes {
    first: Option<Span>,
}

impl<'ast> Visit<'ast> for ElidedLifetimes {
    fn visit_type_reference(&mut self, reference: &'ast TypeReference) {
        if reference.lifetime.is_none() && self.first.is_none() {
            self.first = Some(reference.and_token.span());
        }
        visit::visit_type_reference(self, reference);
    }

    fn visit_lifetime(&mut self, lifetime: &'ast Lifetime) {
        if lifetime.ident == "_" && self.first.is_none() {
            self.first = Some(lifetime.span());
        }
    }

    fn visit_type_bare_fn(&mut self, _: &'ast TypeBareFn) {}

    fn visit_parenthesized_generic_arguments(&mut self, _: &'ast ParenthesizedGenericArguments) {}
}

fn completion_handler(ty: &Type, sig: &Signature) -> Option<Handler> {
    match ty {
        Type::Paren(inner) => completion_handler(&inner.elem, sig),
        Type::Group(inner) => completion_handler(&inner.elem, sig),
        Type::ImplTrait(imp) => fn_bound(imp.bounds.iter()).map(|(inputs, output)| Handler {
            shape: HandlerShape::Impl,
            inputs,
            output,
        }),
        Type::Reference(reference) => match &*reference.elem {
            Type::TraitObject(object) => fn_bound(object.bounds.iter()).map(|(inputs, output)| Handler {
                shape: HandlerShape::Borrowed {
                    mutable: reference.mutability.is_some(),
                },
                inputs,
                output,
            }),
            _ => None,
        },
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segment = type_path.path.segments.last()?;
            if segment.ident == "Box" {
                let PathArguments::AngleBracketed(args) = &segment.arguments else {
                    return None;
                };
                let Some(GenericArgument::Type(Type::TraitObject(object))) = args.args.first() else {
                    return None;
                };
                return fn_bound(object.bounds.iter()).map(|(inputs, output)| Handler {
                    shape: HandlerShape::Boxed,
                    inputs,
                    output,
                });
            }
            let ident = type_path.path.get_ident()?;
            generic_fn_bound(ident, sig).map(|(inputs, output)| Handler {
                shape: HandlerShape::Generic(ident.clone()),
                inputs,
                output,
            })
        }
        _ => None,
    }
}

/// Inputs and output of the first `Fn`, `FnMut` or `FnOnce` bound
fn fn_bound<'a>(
    bounds: impl Iterator<Item = &'a TypeParamBound>,
) -> Option<(Vec<Type>, ReturnType)> {
    bounds.into_iter().find_map(|bound| {
        let TypeParamBound::Trait(trait_bound) = bound else {
            return None;
        };
        let segment = trait_bound.path.segments.last()?;
        if !matches!(segment.ident.to_string().as_str(), "Fn" | "FnMut" | "FnOnce") {
            return None;
        }
        match &segment.arguments {
            PathArguments::Parenthesized(args) => {
                Some((args.inputs.iter().cloned().collect(), args.output.clone()))
            }
            _ => None,
        }
    })
}

/// A function bound on generic parameter `ident`, inline or in the where
/// clause
fn generic_fn_bound(ident: &Ident, sig: &Signature) -> Option<(Vec<Type>, ReturnType)> {
    let inline = sig.generics.params.iter().find_map(|param| match param {
        GenericParam::Type(param) if param.ident == *ident => fn_bound(param.bounds.iter()),
        _ => None,
    });
    inline.or_else(|| {
        sig.generics.where_clause.as_ref()?.predicates.iter().find_map(|predicate| {
            match predicate {
                WherePredicate::Type(predicate) if type_is_ident(&predicate.bounded_ty, ident) => {
                    fn_bound(predicate.bounds.iter())
                }
                _ => None,
            }
        })
    })
}

fn type_is_ident(ty: &Type, ident: &Ident) -> bool {
    matches!(ty, Type::Path(type_path) if type_path.qself.is_none() && type_path.path.is_ident(ident))
}

fn synthesize_peer(
    func: &ItemFn,
    handler: &Handler,
    in_impl: bool,
    krate: &syn::Path,
    suffix: &str,
) -> TokenStream {
    let original = &func.sig.ident;
    let mut sig = func.sig.clone();
    sig.asyncness = Some(Default::default());
    sig.constness = None;
    sig.ident = format_ident!("{}{}", original, suffix);
    sig.output = match handler.payload() {
        Some(payload) => ReturnType::Type(Default::default(), Box::new(payload.clone())),
        None => ReturnType::Default,
    };
    sig.inputs.pop();
    if let Some(last) = sig.inputs.pop() {
        sig.inputs.push(last.into_value());
    }
    if let HandlerShape::Generic(ident) = &handler.shape {
        remove_generic(&mut sig, ident);
    }

    let forwarded = forward_arguments(&mut sig);
    let continuation = Ident::new("continuation", Span::mixed_site());
    let resumption = Ident::new("resumption", Span::mixed_site());
    let value = Ident::new("value", Span::mixed_site());

    let closure = match handler.payload() {
        Some(payload) => quote!(move |#value: #payload| #resumption.resume(#value)),
        None => quote!(move || #resumption.resume(())),
    };
    let closure = match &handler.shape {
        HandlerShape::Impl | HandlerShape::Generic(_) => closure,
        HandlerShape::Boxed => quote!(::std::boxed::Box::new(#closure)),
        HandlerShape::Borrowed { mutable: false } => quote!(&#closure),
        HandlerShape::Borrowed { mutable: true } => quote!(&mut #closure),
    };
    let callee = if sig.receiver().is_some() {
        quote!(self.#original)
    } else if in_impl {
        quote!(Self::#original)
    } else {
        quote!(#original)
    };
    let origin = original.to_string();

    let mut attrs = func.attrs.clone();
    strip_attribute(&mut attrs, "add_async");
    let vis = &func.vis;

    quote! {
        #(#attrs)*
        #vis #sig {
            let (#continuation, #resumption) = #krate::__private::continuation();
            #callee(#(#forwarded,)* #closure);
            #continuation.wait(#origin).await
        }
    }
}

fn remove_generic(sig: &mut Signature, ident: &Ident) {
    let params = std::mem::take(&mut sig.generics.params);
    sig.generics.params = params
        .into_iter()
        .filter(|param| !matches!(param, GenericParam::Type(param) if param.ident == *ident))
        .collect();
    if sig.generics.params.is_empty() {
        sig.generics.lt_token = None;
        sig.generics.gt_token = None;
    }
    if let Some(where_clause) = sig.generics.where_clause.as_mut() {
        let predicates = std::mem::take(&mut where_clause.predicates);
        where_clause.predicates = predicates
            .into_iter()
            .filter(|predicate| {
                !matches!(predicate, WherePredicate::Type(predicate) if type_is_ident(&predicate.bounded_ty, ident))
            })
            .collect();
        if where_clause.predicates.is_empty() {
            sig.generics.where_clause = None;
        }
    }
}

/// Names to forward each typed parameter under. Patterns that are not a
/// plain identifier are rebound to `arg_<index>`.
fn forward_arguments(sig: &mut Signature) -> Vec<Ident> {
    let mut forwarded = Vec::new();
    for (index, input) in sig.inputs.iter_mut().enumerate() {
        let FnArg::Typed(typed) = input else {
            continue;
        };
        match &*typed.pat {
            Pat::Ident(PatIdent {
                ident,
                by_ref: None,
                subpat: None,
                ..
            }) => forwarded.push(ident.clone()),
            _ => {
                let ident = Ident::new(&format!("arg_{}", index), Span::mixed_site());
                *typed.pat = Pat::Ident(PatIdent {
                    attrs: Vec::new(),
                    by_ref: None,
                    mutability: None,
                    ident: ident.clone(),
                    subpat: None,
                });
                forwarded.push(ident);
            }
        }
    }
    forwarded
}

#[cfg(test)]
#[path = "add_async_tests.rs"]
mod add_async_tests;
