//! `#[stored_access]`: fields backed by a key-value store
//!
//! Every field marked `#[stored(default_value = .., key = "..", store = ..)]`
//! is removed from the struct and replaced by a getter and a `set_` setter.
//! The getter falls back to `default_value` when the store has nothing under
//! the key. The reader used is picked from the kind of the default:
//!
//! | default            | reader                        |
//! |--------------------|-------------------------------|
//! | `true` / `false`   | `bool`                        |
//! | integer literal    | `decode` into the field type  |
//! | string literal     | `string`                      |
//! | float literal      | `float`                       |
//! | `Path::TO_CONST`   | `decode` (serde)              |

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{Expr, ExprLit, ExprUnary, Field, Fields, Item, ItemStruct, Lit, LitStr, Path, UnOp};
use tracing::debug;

use crate::args::{ArgumentList, ArgumentSpec, Positional};
use crate::context::ExpansionContext;
use crate::error::{ExpandError, Result};
use crate::introspect::{find_attribute, strip_attribute};

const ARGS: ArgumentSpec = ArgumentSpec {
    expander: "#[stored_access]",
    labels: &["crate"],
    required: &[],
    positional: Positional::Forbidden,
};

const FIELD_ARGS: ArgumentSpec = ArgumentSpec {
    expander: "#[stored]",
    labels: &["default_value", "key", "store"],
    required: &["default_value"],
    positional: Positional::Forbidden,
};

pub const STORED_ATTR: &str = "stored";

/// The literal kind of a `default_value`, which selects the typed reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKind {
    Bool,
    Integer,
    String,
    Float,
    Constant,
}

impl DefaultKind {
    pub fn of(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Lit(ExprLit { lit, .. }) => match lit {
                Lit::Bool(_) => Some(DefaultKind::Bool),
                Lit::Int(_) => Some(DefaultKind::Integer),
                Lit::Str(_) => Some(DefaultKind::String),
                Lit::Float(_) => Some(DefaultKind::Float),
                _ => None,
            },
            Expr::Unary(ExprUnary {
                op: UnOp::Neg(_),
                expr,
                ..
            }) => match DefaultKind::of(expr)? {
                kind @ (DefaultKind::Integer | DefaultKind::Float) => Some(kind),
                _ => None,
            },
            Expr::Path(path) if path.qself.is_none() => Some(DefaultKind::Constant),
            Expr::Group(group) => DefaultKind::of(&group.expr),
            Expr::Paren(paren) => DefaultKind::of(&paren.expr),
            _ => None,
        }
    }
}

/// One field turned into accessors
#[derive(Debug, Clone)]
struct StoredProperty {
    field: Field,
    key: LitStr,
    default: Expr,
    kind: DefaultKind,
    store: Expr,
}

pub fn expand(cx: &mut ExpansionContext, args: TokenStream, item: TokenStream) -> Result<TokenStream> {
    let args = ArgumentList::parse(args)?;
    args.validate(&ARGS)?;
    let krate = cx.crate_path(&args)?;
    let default_store = cx
        .config()
        .default_store_expr(&krate)
        .map_err(|err| err.at(args.span()))?;

    let item: Item = syn::parse2(item)?;
    let mut item = match item {
        Item::Struct(item) => item,
        _ => {
            return Err(ExpandError::UnsupportedTarget {
                expander: "#[stored_access]",
                expected: "a struct",
            }
            .at(Span::call_site()))
        }
    };

    let properties = take_stored_properties(&mut item, &default_store)?;
    if properties.is_empty() {
        return Err(ExpandError::NoStoredFields.at(item.ident.span()));
    }
    debug!(target_type = %item.ident, accessors = properties.len(), "synthesizing stored accessors");

    let accessors = properties.iter().map(|property| accessor_pair(property, &krate));
    let ident = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    Ok(quote! {
        #item

        impl #impl_generics #ident #ty_generics #where_clause {
            #( #accessors )*
        }
    })
}

/// The struct with its `#[stored]` markers removed, used when expansion
/// fails
pub fn strip_helpers(item: TokenStream) -> TokenStream {
    match syn::parse2::<ItemStruct>(item.clone()) {
        Ok(mut item) => {
            for field in item.fields.iter_mut() {
                strip_attribute(&mut field.attrs, STORED_ATTR);
            }
            quote!(#item)
        }
        Err(_) => item,
    }
}

/// Remove every `#[stored]` field from `item`, keeping the others in order
fn take_stored_properties(item: &mut ItemStruct, default_store: &Expr) -> Result<Vec<StoredProperty>> {
    let named = match &mut item.fields {
        Fields::Named(named) => named,
        Fields::Unnamed(unnamed) => {
            return match unnamed
                .unnamed
                .iter()
                .find_map(|field| find_attribute(&field.attrs, STORED_ATTR))
            {
                Some(attr) => Err(ExpandError::UnsupportedTarget {
                    expander: "#[stored]",
                    expected: "a named field",
                }
                .at(attr.span())),
                None => Ok(Vec::new()),
            }
        }
        Fields::Unit => return Ok(Vec::new()),
    };

    let mut properties = Vec::new();
    let fields = std::mem::take(&mut named.named);
    for pair in fields.into_pairs() {
        let (mut field, comma) = pair.into_tuple();
        let marker = find_attribute(&field.attrs, STORED_ATTR)
            .map(ArgumentList::from_attribute)
            .transpose()?;
        let Some(args) = marker else {
            named.named.push_value(field);
            if let Some(comma) = comma {
                named.named.push_punct(comma);
            }
            continue;
        };

        args.validate(&FIELD_ARGS)?;
        let default = args
            .value("default_value")
            .cloned()
            .ok_or_else(|| ExpandError::MissingArgument {
                what: "`default_value` argument".to_string(),
            }
            .at(args.span()))?;
        let kind = DefaultKind::of(&default)
            .ok_or_else(|| ExpandError::UnsupportedDefaultValue.at(default.span()))?;
        let key = match args.string("key")? {
            Some(key) => key,
            None => {
                let name = field.ident.as_ref().map(|ident| ident.to_string()).unwrap_or_default();
                LitStr::new(&name, field.span())
            }
        };
        let store = args.value("store").cloned().unwrap_or_else(|| default_store.clone());

        strip_attribute(&mut field.attrs, STORED_ATTR);
        properties.push(StoredProperty {
            field,
            key,
            default,
            kind,
            store,
        });
    }
    Ok(properties)
}

fn accessor_pair(property: &StoredProperty, krate: &Path) -> TokenStream {
    let StoredProperty {
        field,
        key,
        default,
        kind,
        store,
    } = property;
    let vis = &field.vis;
    let ty = &field.ty;
    let attrs = field.attrs.iter().filter(|attr| attr.path().is_ident("doc"));
    let getter = field
        .ident
        .clone()
        .unwrap_or_else(|| format_ident!("value"));
    let setter = format_ident!("set_{}", getter);

    let read = match kind {
        DefaultKind::Bool => quote!(store.bool(#key).unwrap_or(#default)),
        DefaultKind::Integer | DefaultKind::Constant => {
            quote!(store.decode::<#ty>(#key).unwrap_or(#default))
        }
        DefaultKind::String => quote! {
            match store.string(#key) {
                ::core::option::Option::Some(value) => ::core::convert::Into::<#ty>::into(value),
                ::core::option::Option::None => ::core::convert::Into::<#ty>::into(#default),
            }
        },
        DefaultKind::Float => quote! {
            store
                .float(#key)
                .map(|value| value as #ty)
                .unwrap_or(#default)
        },
    };

    quote! {
        #( #attrs )*
        #vis fn #getter(&self) -> #ty {
            use #krate::KeyValueStore as _;
            let store = &#store;
            #read
        }

        #vis fn #setter(&self, new_value: #ty) {
            use #krate::KeyValueStore as _;
            let store = &#store;
            let _ = store.store(#key, &new_value);
        }
    }
}

#[cfg(test)]
#[path = "stored_access_tests.rs"]
mod stored_access_tests;
