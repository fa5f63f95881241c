//! Dispatch and rendering through the public `expand_with` entry point

use expando_core::{expand_with, ExpanderKind, ExpansionConfig, ExpansionContext, MacroForm};
use pretty_assertions::assert_eq;
use quote::quote;

fn default_cx() -> ExpansionContext {
    ExpansionContext::new(ExpansionConfig::default())
}

#[test]
fn test_successful_attribute_expansion_has_no_diagnostics() {
    let output = expand_with(
        default_cx(),
        ExpanderKind::AddInit,
        quote!(),
        quote!(struct S { id: i32 }),
    )
    .to_string();
    assert!(output.contains("fn new (id : i32) -> Self"));
    assert!(!output.contains("compile_error"));
}

#[test]
fn test_failed_attribute_echoes_item_with_error() {
    let output = expand_with(
        default_cx(),
        ExpanderKind::AddInit,
        quote!(),
        quote!(enum E { A }),
    );
    let file: syn::File = syn::parse2(output.clone()).unwrap();
    assert_eq!(file.items.len(), 2);
    assert!(matches!(file.items[0], syn::Item::Enum(_)));
    assert!(output.to_string().contains("compile_error"));
}

#[test]
fn test_failed_derive_emits_only_the_error() {
    let output = expand_with(
        default_cx(),
        ExpanderKind::CaseDetection,
        quote!(),
        quote!(struct NotAnEnum;),
    )
    .to_string();
    assert!(output.starts_with(":: core :: compile_error !"));
    assert!(!output.contains("NotAnEnum"));
}

#[test]
fn test_failed_sealed_strips_variant_markers() {
    let output = expand_with(
        default_cx(),
        ExpanderKind::Sealed,
        quote!(roles = [Known]),
        quote! {
            mod m {
                #[variant(Unknown)]
                pub struct A;
            }
        },
    )
    .to_string();
    assert!(output.contains("mod m { pub struct A ; }"));
    assert!(output.contains("role `Unknown` is not listed in `roles`"));
}

#[test]
fn test_warnings_keep_the_expansion() {
    let output = expand_with(
        default_cx(),
        ExpanderKind::AddInit,
        quote!(extends = Base),
        quote!(struct S { id: i32 }),
    )
    .to_string();
    assert!(output.contains("fn new (id : i32)"));
    assert!(output.contains("deprecated"));
    assert!(!output.contains("compile_error"));
}

#[test]
fn test_freestanding_expression_with_error_is_a_block() {
    let output = expand_with(default_cx(), ExpanderKind::Url, quote!("::bad"), quote!());
    let expr: syn::Expr = syn::parse2(output).unwrap();
    assert!(matches!(expr, syn::Expr::Block(_)));
}

#[test]
fn test_freestanding_expression_without_diagnostics_is_bare() {
    let output = expand_with(default_cx(), ExpanderKind::Stringify, quote!(1 + 2), quote!());
    let expr: syn::Expr = syn::parse2(output).unwrap();
    assert!(matches!(expr, syn::Expr::Tuple(_)));
}

#[test]
fn test_warning_macro_renders_a_deprecated_item() {
    let output = expand_with(default_cx(), ExpanderKind::Warning, quote!("todo: remove"), quote!());
    let file: syn::File = syn::parse2(output.clone()).unwrap();
    assert_eq!(file.items.len(), 1);
    assert!(output.to_string().contains("\"todo: remove\""));
}

#[test]
fn test_configured_names_are_used() {
    let config = ExpansionConfig::from_json(
        r#"{ "sealed_suffix": "Kind", "aggregate_classifier": "kind", "async_suffix": "_awaiting" }"#,
    )
    .unwrap();
    let sealed = expand_with(
        ExpansionContext::new(config.clone()),
        ExpanderKind::Sealed,
        quote!(base = Shape),
        quote! {
            mod shape {
                #[variant] pub struct Square;
            }
        },
    )
    .to_string();
    assert!(sealed.contains("pub enum Kind {"));
    assert!(sealed.contains("pub fn kind (& self) -> Kind"));

    let peer = expand_with(
        ExpansionContext::new(config),
        ExpanderKind::AddAsync,
        quote!(),
        quote!(fn ping(done: impl Fn()) {}),
    )
    .to_string();
    assert!(peer.contains("async fn ping_awaiting ()"));
}

#[test]
fn test_every_kind_is_dispatchable() {
    for kind in ExpanderKind::ALL {
        // Garbage input never panics; it turns into a diagnostic
        let output = expand_with(default_cx(), kind, quote!(), quote!(42));
        let rendered = output.to_string();
        assert!(rendered.contains("compile_error"), "{:?}", kind);
        match kind.form() {
            MacroForm::Attribute => assert!(rendered.starts_with("42"), "{:?}", kind),
            MacroForm::Derive | MacroForm::FunctionLike => {
                assert!(!rendered.starts_with("42"), "{:?}", kind)
            }
        }
    }
}
