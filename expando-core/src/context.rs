//! Per-call expansion state

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Path;
use tracing::{debug, warn};

use crate::args::ArgumentList;
use crate::config::ExpansionConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{Result, SpannedError};
use crate::registry::{ExpanderKind, ExpansionSite};

/// Configuration and diagnostic sink handed to an expander.
///
/// A context lives for exactly one expansion call.
#[derive(Debug, Default)]
pub struct ExpansionContext {
    config: ExpansionConfig,
    diagnostics: Diagnostics,
}

impl ExpansionContext {
    pub fn new(config: ExpansionConfig) -> Self {
        Self {
            config,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Build a context from [`ExpansionConfig::load`]. A broken override is
    /// reported and the defaults are used instead.
    pub fn from_env() -> Self {
        match ExpansionConfig::load() {
            Ok(config) => Self::new(config),
            Err(err) => {
                warn!(error = %err, "falling back to default expansion config");
                let mut cx = Self::new(ExpansionConfig::default());
                cx.report(err.at(Span::call_site()));
                cx
            }
        }
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn report(&mut self, err: SpannedError) {
        self.diagnostics.report(err.into_diagnostic());
    }

    pub fn warn(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.report(Diagnostic::warning(span, message));
    }

    /// Runtime crate path, honouring a `crate = path` argument
    pub fn crate_path(&self, args: &ArgumentList) -> Result<Path> {
        match args.path("crate")? {
            Some(path) => Ok(path),
            None => self
                .config
                .crate_path()
                .map_err(|err| err.at(args.span())),
        }
    }

    /// Combine an expander's outcome with the collected diagnostics.
    ///
    /// A failed expansion is replaced by `fallback`, which is the annotated
    /// item for attributes and nothing for derives and function-like macros.
    pub fn finish(
        mut self,
        kind: ExpanderKind,
        outcome: Result<TokenStream>,
        fallback: TokenStream,
    ) -> TokenStream {
        let body = match outcome {
            Ok(tokens) => tokens,
            Err(err) => {
                debug!(
                    expander = %kind.display_name(),
                    category = ?err.error.category(),
                    error = %err.error,
                    "expansion failed"
                );
                self.report(err);
                fallback
            }
        };

        let errors = self.diagnostics.errors_to_tokens();
        let warnings = self.diagnostics.warnings_to_tokens();
        match kind.site() {
            ExpansionSite::FreestandingExpression if !self.diagnostics.is_empty() => {
                quote! {
                    {
                        #errors
                        #warnings
                        #body
                    }
                }
            }
            _ => quote! {
                #body
                #warnings
                #errors
            },
        }
    }
}
