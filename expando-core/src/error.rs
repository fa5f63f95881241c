//! Error types for expansion

use proc_macro2::Span;
use thiserror::Error;

use crate::diagnostics::{Diagnostic, Severity};

/// Broad classes of expansion failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The annotated item is not of a kind the expander supports
    Shape,
    /// A required attribute argument is missing or malformed
    Argument,
    /// A function signature does not fit the expander's precondition
    Signature,
    /// The expansion configuration could not be loaded
    Configuration,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("`{expander}` can only be applied to {expected}")]
    UnsupportedTarget {
        expander: &'static str,
        expected: &'static str,
    },

    #[error("`#[sealed]` requires an inline module with a body")]
    ModuleWithoutBody,

    #[error("`#[variant]` can only be applied to a struct")]
    VariantNotStruct,

    #[error("`{name}` is generated by `#[sealed]` and clashes with an item of the same name")]
    GeneratedNameClash { name: String },

    #[error("`#[stored_access]` requires at least one field marked `#[stored(..)]`")]
    NoStoredFields,

    #[error("unknown argument `{label}` for `{expander}`")]
    UnknownArgument {
        expander: &'static str,
        label: String,
    },

    #[error("duplicate argument `{label}`")]
    DuplicateArgument { label: String },

    #[error("`{expander}` does not take a positional argument here")]
    UnexpectedPositional { expander: &'static str },

    #[error("missing {what}")]
    MissingArgument { what: String },

    #[error("`{label}` expects {expected}")]
    InvalidArgument {
        label: String,
        expected: &'static str,
    },

    #[error("unsupported default value; expected a bool, integer, string or float literal, or a qualified constant")]
    UnsupportedDefaultValue,

    #[error("role `{role}` is not listed in `roles`")]
    UndeclaredRole { role: String },

    #[error("roles `{first}` and `{second}` both derive the discriminator name `{name}`")]
    DiscriminatorNameClash {
        first: String,
        second: String,
        name: String,
    },

    #[error("malformed URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("`#[add_async]` requires a function that is not already async")]
    AlreadyAsync,

    #[error("`#[add_async]` requires a function that returns `()`")]
    NonUnitReturn,

    #[error("`#[add_async]` requires a function that has a completion handler as last parameter")]
    MissingCompletionHandler,

    #[error("`#[add_async]` requires a completion handler that returns `()`")]
    CompletionHandlerReturnsValue,

    #[error("`#[add_async]` requires a completion handler taking at most one argument")]
    CompletionHandlerArity,

    #[error("`#[add_async]` cannot return `{payload}` from the async peer; name its lifetime or pass an owned value")]
    ElidedPayloadLifetime { payload: String },

    #[error("{0}")]
    Syntax(String),

    #[error("invalid expansion configuration: {0}")]
    Config(String),
}

impl ExpandError {
    pub fn category(&self) -> ErrorCategory {
        use ExpandError::*;
        match self {
            UnsupportedTarget { .. }
            | ModuleWithoutBody
            | VariantNotStruct
            | GeneratedNameClash { .. }
            | NoStoredFields => ErrorCategory::Shape,
            UnknownArgument { .. }
            | DuplicateArgument { .. }
            | UnexpectedPositional { .. }
            | MissingArgument { .. }
            | InvalidArgument { .. }
            | UnsupportedDefaultValue
            | UndeclaredRole { .. }
            | DiscriminatorNameClash { .. }
            | InvalidUrl { .. }
            | Syntax(_) => ErrorCategory::Argument,
            AlreadyAsync
            | NonUnitReturn
            | MissingCompletionHandler
            | CompletionHandlerReturnsValue
            | CompletionHandlerArity
            | ElidedPayloadLifetime { .. } => ErrorCategory::Signature,
            Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Every expansion error is fatal to the expansion that raised it
    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Attach the source location the error should be reported at
    pub fn at(self, span: Span) -> SpannedError {
        SpannedError { span, error: self }
    }
}

/// An [`ExpandError`] together with the span it is reported at
#[derive(Debug, Clone)]
pub struct SpannedError {
    pub span: Span,
    pub error: ExpandError,
}

impl SpannedError {
    pub fn into_diagnostic(self) -> Diagnostic {
        Diagnostic::new(self.error.to_string(), self.error.severity(), self.span)
    }
}

impl From<syn::Error> for SpannedError {
    fn from(err: syn::Error) -> Self {
        ExpandError::Syntax(err.to_string()).at(err.span())
    }
}

pub type Result<T> = std::result::Result<T, SpannedError>;
