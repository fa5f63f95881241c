//! Diagnostic reporting shared by every expander
//!
//! Reporting never stops an expansion on its own. An expander that hits a
//! fatal condition returns an error, and [`ExpansionContext`] turns it into a
//! diagnostic and substitutes the empty expansion.
//!
//! [`ExpansionContext`]: crate::ExpansionContext

use proc_macro2::{Span, TokenStream};
use quote::quote_spanned;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A message for the host compiler, anchored at a source span
#[derive(Debug, Clone)]
pub struct Diagnostic {
    message: String,
    severity: Severity,
    span: Span,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, severity: Severity, span: Span) -> Self {
        Self {
            message: message.into(),
            severity,
            span,
        }
    }

    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error, span)
    }

    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning, span)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// The diagnostic sink of one expansion call
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        debug!(
            severity = %diagnostic.severity,
            message = %diagnostic.message,
            "diagnostic reported"
        );
        self.items.push(diagnostic);
    }

    pub fn warn(&mut self, span: Span, message: impl Into<String>) {
        self.report(Diagnostic::warning(span, message));
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| !d.is_error())
    }

    /// Render every error as a `compile_error!` invocation at its span
    pub fn errors_to_tokens(&self) -> TokenStream {
        let mut combined: Option<syn::Error> = None;
        for diagnostic in self.errors() {
            let err = syn::Error::new(diagnostic.span, &diagnostic.message);
            match combined.as_mut() {
                Some(existing) => existing.combine(err),
                None => combined = Some(err),
            }
        }
        combined
            .map(|err| err.to_compile_error())
            .unwrap_or_default()
    }

    /// Render every warning as an item that makes rustc print it.
    ///
    /// Procedural macros have no stable warning API, so each warning becomes a
    /// deprecated unit struct that is immediately used inside an anonymous
    /// constant. Only valid in item or statement position.
    pub fn warnings_to_tokens(&self) -> TokenStream {
        self.warnings()
            .map(|diagnostic| {
                let message = &diagnostic.message;
                quote_spanned! {diagnostic.span=>
                    const _: () = {
                        #[deprecated(note = #message)]
                        #[allow(non_camel_case_types)]
                        struct expando_warning;
                        let _ = expando_warning;
                    };
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod diagnostics_tests;
