//! Expando expansion engine
//!
//! This crate provides:
//! - Declaration introspection and name derivation over `syn` trees
//! - A uniform diagnostic layer for graceful expansion failures
//! - The expanders behind every `expando` macro
//! - The registry and dispatch function the proc-macro crate calls into

pub mod args;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod expanders;
pub mod introspect;
pub mod naming;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use args::{Argument, ArgumentList, ArgumentSpec, Positional};
pub use config::{ExpansionConfig, CONFIG_ENV};
pub use context::ExpansionContext;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ErrorCategory, ExpandError, Result, SpannedError};
pub use registry::{ExpanderKind, ExpansionSite, MacroForm};

use proc_macro2::TokenStream;
use tracing::debug_span;

/// Run one expander with the configuration from the environment
pub fn expand(kind: ExpanderKind, args: TokenStream, item: TokenStream) -> TokenStream {
    expand_with(ExpansionContext::from_env(), kind, args, item)
}

/// Run one expander inside an existing context
pub fn expand_with(
    mut cx: ExpansionContext,
    kind: ExpanderKind,
    args: TokenStream,
    item: TokenStream,
) -> TokenStream {
    let _span = debug_span!("expand", expander = kind.name()).entered();
    let outcome = expanders::run(&mut cx, kind, args, &item);
    let fallback = expanders::fallback(kind, item);
    cx.finish(kind, outcome, fallback)
}
