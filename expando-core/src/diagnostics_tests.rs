#[cfg(test)]
mod tests {
    use crate::diagnostics::*;
    use crate::error::{ErrorCategory, ExpandError};
    use proc_macro2::Span;

    #[test]
    fn test_empty_sink_renders_nothing() {
        let diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        assert!(!diagnostics.has_errors());
        assert!(diagnostics.errors_to_tokens().is_empty());
        assert!(diagnostics.warnings_to_tokens().is_empty());
    }

    #[test]
    fn test_errors_and_warnings_are_separated() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(Span::call_site(), "role `Observer` has no variants");
        diagnostics.report(Diagnostic::error(Span::call_site(), "boom"));

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.errors().count(), 1);
        assert_eq!(diagnostics.warnings().count(), 1);
        assert_eq!(diagnostics.errors().next().unwrap().message(), "boom");
    }

    #[test]
    fn test_errors_render_as_compile_error() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Diagnostic::error(Span::call_site(), "first"));
        diagnostics.report(Diagnostic::error(Span::call_site(), "second"));
        let rendered = diagnostics.errors_to_tokens().to_string();
        assert_eq!(rendered.matches("compile_error").count(), 2);
        assert!(rendered.contains("\"first\""));
        assert!(rendered.contains("\"second\""));
    }

    #[test]
    fn test_warnings_render_as_deprecated_items() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(Span::call_site(), "careful");
        let tokens = diagnostics.warnings_to_tokens();
        let file: syn::File = syn::parse2(tokens.clone()).unwrap();
        assert_eq!(file.items.len(), 1);
        let rendered = tokens.to_string();
        assert!(rendered.contains("deprecated"));
        assert!(rendered.contains("\"careful\""));
    }

    #[test]
    fn test_display() {
        let warning = Diagnostic::warning(Span::call_site(), "unused role");
        assert_eq!(warning.to_string(), "warning: unused role");
        assert_eq!(warning.severity(), Severity::Warning);
        assert!(!warning.is_error());
    }

    #[test]
    fn test_expand_error_conversion() {
        let diagnostic = ExpandError::AlreadyAsync.at(Span::call_site()).into_diagnostic();
        assert!(diagnostic.is_error());
        assert_eq!(
            diagnostic.message(),
            "`#[add_async]` requires a function that is not already async"
        );
        assert_eq!(ExpandError::AlreadyAsync.category(), ErrorCategory::Signature);
        assert_eq!(ExpandError::NoStoredFields.category(), ErrorCategory::Shape);
        assert_eq!(
            ExpandError::Config("x".to_string()).category(),
            ErrorCategory::Configuration
        );
    }
}
