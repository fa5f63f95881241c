//! Attribute argument lists
//!
//! Arguments are written `label = value` or, for the first argument only,
//! as a bare positional value. Every list is validated against an
//! [`ArgumentSpec`] before an expander looks at any value, so a bad list
//! never produces partial output.

use proc_macro2::{Span, TokenStream};
use rustc_hash::FxHashSet;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream, Parser};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Expr, ExprLit, ExprPath, Ident, Lit, LitStr, Path, Token};

use crate::error::{ExpandError, Result};

/// A single `label = value` or positional argument
#[derive(Debug, Clone)]
pub struct Argument {
    pub label: Option<Ident>,
    pub value: Expr,
}

impl Argument {
    pub fn span(&self) -> Span {
        match &self.label {
            Some(label) => label.span(),
            None => self.value.span(),
        }
    }
}

impl Parse for Argument {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Ident::peek_any) && input.peek2(Token![=]) && !input.peek2(Token![==]) {
            let label = Ident::parse_any(input)?;
            input.parse::<Token![=]>()?;
            let value = input.parse()?;
            Ok(Argument {
                label: Some(label),
                value,
            })
        } else {
            Ok(Argument {
                label: None,
                value: input.parse()?,
            })
        }
    }
}

/// Whether an expander accepts a leading positional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positional {
    Forbidden,
    Optional,
    Required(&'static str),
}

/// The shape of the argument list an expander accepts
#[derive(Debug, Clone, Copy)]
pub struct ArgumentSpec {
    pub expander: &'static str,
    pub labels: &'static [&'static str],
    pub required: &'static [&'static str],
    pub positional: Positional,
}

/// Ordered arguments of one attribute or macro invocation
#[derive(Debug, Clone)]
pub struct ArgumentList {
    args: Vec<Argument>,
    span: Span,
}

impl ArgumentList {
    pub fn empty() -> Self {
        Self {
            args: Vec::new(),
            span: Span::call_site(),
        }
    }

    /// Parse the tokens between the parentheses of an attribute
    pub fn parse(tokens: TokenStream) -> Result<Self> {
        if tokens.is_empty() {
            return Ok(Self::empty());
        }
        let span = tokens
            .clone()
            .into_iter()
            .next()
            .map(|tt| tt.span())
            .unwrap_or_else(Span::call_site);
        let parsed = Punctuated::<Argument, Token![,]>::parse_terminated.parse2(tokens)?;
        Ok(Self {
            args: parsed.into_iter().collect(),
            span,
        })
    }

    /// Parse the contents of a helper attribute such as `#[stored(..)]`
    pub fn from_attribute(attr: &syn::Attribute) -> Result<Self> {
        match &attr.meta {
            syn::Meta::Path(_) => Ok(Self {
                args: Vec::new(),
                span: attr.span(),
            }),
            syn::Meta::List(list) => {
                let mut parsed = Self::parse(list.tokens.clone())?;
                parsed.span = attr.span();
                Ok(parsed)
            }
            syn::Meta::NameValue(nv) => Err(ExpandError::InvalidArgument {
                label: path_name(&nv.path),
                expected: "a parenthesised argument list",
            }
            .at(nv.span())),
        }
    }

    /// Reject unknown or duplicate labels, misplaced positionals and
    /// missing required labels
    pub fn validate(&self, spec: &ArgumentSpec) -> Result<()> {
        let mut seen = FxHashSet::default();
        for (index, arg) in self.args.iter().enumerate() {
            match &arg.label {
                Some(label) => {
                    let name = label.unraw().to_string();
                    if !spec.labels.contains(&name.as_str()) {
                        return Err(ExpandError::UnknownArgument {
                            expander: spec.expander,
                            label: name,
                        }
                        .at(label.span()));
                    }
                    if !seen.insert(name.clone()) {
                        return Err(ExpandError::DuplicateArgument { label: name }.at(label.span()));
                    }
                }
                None => {
                    if index != 0 || spec.positional == Positional::Forbidden {
                        return Err(ExpandError::UnexpectedPositional {
                            expander: spec.expander,
                        }
                        .at(arg.value.span()));
                    }
                }
            }
        }
        if let Positional::Required(what) = spec.positional {
            if self.positional().is_none() {
                return Err(ExpandError::MissingArgument {
                    what: what.to_string(),
                }
                .at(self.span));
            }
        }
        for required in spec.required {
            if !seen.contains(*required) {
                return Err(ExpandError::MissingArgument {
                    what: format!("`{}` argument", required),
                }
                .at(self.span));
            }
        }
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<&Argument> {
        self.args
            .iter()
            .find(|arg| arg.label.as_ref().map_or(false, |l| l.unraw() == label))
    }

    pub fn value(&self, label: &str) -> Option<&Expr> {
        self.get(label).map(|arg| &arg.value)
    }

    pub fn positional(&self) -> Option<&Expr> {
        self.args
            .first()
            .filter(|arg| arg.label.is_none())
            .map(|arg| &arg.value)
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.args.iter()
    }

    /// `label = some::path`
    pub fn path(&self, label: &str) -> Result<Option<Path>> {
        match self.value(label) {
            None => Ok(None),
            Some(Expr::Path(ExprPath { path, qself: None, .. })) => Ok(Some(path.clone())),
            Some(other) => Err(ExpandError::InvalidArgument {
                label: label.to_string(),
                expected: "a path",
            }
            .at(other.span())),
        }
    }

    /// `label = Ident`
    pub fn ident(&self, label: &str) -> Result<Option<Ident>> {
        match self.path(label)? {
            None => Ok(None),
            Some(path) => match path.get_ident() {
                Some(ident) => Ok(Some(ident.clone())),
                None => Err(ExpandError::InvalidArgument {
                    label: label.to_string(),
                    expected: "an identifier",
                }
                .at(path.span())),
            },
        }
    }

    /// `label = "text"`
    pub fn string(&self, label: &str) -> Result<Option<LitStr>> {
        match self.value(label) {
            None => Ok(None),
            Some(expr) => expect_string(expr, label).map(Some),
        }
    }

    /// `label = [A, B, C]`, each element an identifier
    pub fn ident_list(&self, label: &str) -> Result<Vec<Ident>> {
        let invalid = |span: Span| {
            ExpandError::InvalidArgument {
                label: label.to_string(),
                expected: "a list of identifiers such as `[A, B]`",
            }
            .at(span)
        };
        match self.value(label) {
            None => Ok(Vec::new()),
            Some(Expr::Array(array)) => array
                .elems
                .iter()
                .map(|elem| match elem {
                    Expr::Path(ExprPath { path, qself: None, .. }) => {
                        path.get_ident().cloned().ok_or_else(|| invalid(elem.span()))
                    }
                    other => Err(invalid(other.span())),
                })
                .collect(),
            Some(other) => Err(invalid(other.span())),
        }
    }
}

/// Require a plain string literal
pub fn expect_string(expr: &Expr, label: &str) -> Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.clone()),
        other => Err(ExpandError::InvalidArgument {
            label: label.to_string(),
            expected: "a string literal",
        }
        .at(other.span())),
    }
}

fn path_name(path: &Path) -> String {
    path.segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod args_tests;
