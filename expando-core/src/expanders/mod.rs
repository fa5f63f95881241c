//! One module per expander, and the dispatch over [`ExpanderKind`]

pub mod add_async;
pub mod add_init;
pub mod case_detection;
pub mod copyable;
pub mod equatable;
pub mod freestanding;
pub mod sealed;
pub mod stored_access;
pub mod wrap_stored_properties;

use proc_macro2::TokenStream;

use crate::context::ExpansionContext;
use crate::error::Result;
use crate::registry::{ExpanderKind, MacroForm};

/// Run the expander for `kind`.
///
/// Attribute expanders receive their argument tokens and the annotated item;
/// derives only the item; function-like expanders receive the invocation
/// tokens as `args` and an empty item.
pub(crate) fn run(
    cx: &mut ExpansionContext,
    kind: ExpanderKind,
    args: TokenStream,
    item: &TokenStream,
) -> Result<TokenStream> {
    let item = item.clone();
    match kind {
        ExpanderKind::Stringify => freestanding::stringify(args),
        ExpanderKind::Warning => freestanding::warning(cx, args),
        ExpanderKind::Url => freestanding::url(cx, args),
        ExpanderKind::AddAsync => add_async::expand(cx, args, item),
        ExpanderKind::CaseDetection => case_detection::expand(item),
        ExpanderKind::WrapStoredProperties => wrap_stored_properties::expand(args, item),
        ExpanderKind::StoredAccess => stored_access::expand(cx, args, item),
        ExpanderKind::Equatable => equatable::expand(item),
        ExpanderKind::Copyable => copyable::expand(item),
        ExpanderKind::Sealed => sealed::expand(cx, args, item),
        ExpanderKind::AddInit => add_init::expand(cx, args, item),
    }
}

/// What replaces the annotated item when expansion fails
pub(crate) fn fallback(kind: ExpanderKind, item: TokenStream) -> TokenStream {
    match kind {
        ExpanderKind::Sealed => sealed::strip_helpers(item),
        ExpanderKind::StoredAccess => stored_access::strip_helpers(item),
        _ => match kind.form() {
            MacroForm::Attribute => item,
            MacroForm::Derive | MacroForm::FunctionLike => TokenStream::new(),
        },
    }
}
