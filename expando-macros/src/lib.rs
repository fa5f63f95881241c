// Expando Macros - Procedural macro entry points
//
// Every macro hands its tokens to `expando_core::expand`; diagnostics come back
// rendered into the returned tokens.

use expando_core::ExpanderKind;
use proc_macro::TokenStream;

fn attribute(kind: ExpanderKind, args: TokenStream, item: TokenStream) -> TokenStream {
    expando_core::expand(kind, args.into(), item.into()).into()
}

fn derive(kind: ExpanderKind, item: TokenStream) -> TokenStream {
    expando_core::expand(kind, proc_macro2::TokenStream::new(), item.into()).into()
}

fn function_like(kind: ExpanderKind, input: TokenStream) -> TokenStream {
    expando_core::expand(kind, input.into(), proc_macro2::TokenStream::new()).into()
}

/// Adds a memberwise `new` constructor to a struct
///
/// # Example
/// ```ignore
/// #[add_init]
/// struct Point { x: i32, y: i32 }
///
/// let p = Point::new(1, 2);
/// ```
///
/// `#[add_init(extends = Server)]` places `new` in an `impl Server for T`
/// block instead of an inherent one.
#[proc_macro_attribute]
pub fn add_init(args: TokenStream, item: TokenStream) -> TokenStream {
    attribute(ExpanderKind::AddInit, args, item)
}

/// Turns a module of `#[variant]` structs into a closed hierarchy
///
/// # Example
/// ```ignore
/// #[sealed(roles = [Shape])]
/// mod figure {
///     #[variant]
///     pub struct Empty;
///
///     #[variant(Shape)]
///     pub struct Circle { pub radius: f64 }
/// }
///
/// let figure = figure::Figure::from(figure::Empty);
/// assert!(matches!(figure.sealed_type(), figure::SealedType::Empty));
/// ```
#[proc_macro_attribute]
pub fn sealed(args: TokenStream, item: TokenStream) -> TokenStream {
    attribute(ExpanderKind::Sealed, args, item)
}

/// Generates an `async` peer of a callback-style function
///
/// The last parameter must be a completion handler (`impl Fn(T)`,
/// `&dyn Fn(T)`, `Box<dyn Fn(T)>` or a generic bounded by `Fn(T)`). The peer
/// drops it and returns the value the handler would have received.
///
/// ```ignore
/// #[add_async]
/// fn fetch(id: u32, done: impl Fn(Result<String, Error>)) { /* ... */ }
///
/// let body = fetch_async(7).await?;
/// ```
///
/// Inside `impl` blocks write `#[add_async(in_impl)]`.
#[proc_macro_attribute]
pub fn add_async(args: TokenStream, item: TokenStream) -> TokenStream {
    attribute(ExpanderKind::AddAsync, args, item)
}

/// Replaces `#[stored(...)]` fields by accessors backed by a key-value store
///
/// ```ignore
/// #[stored_access]
/// struct Preferences {
///     #[stored(default_value = false, key = "onboarding_done")]
///     onboarded: bool,
/// }
///
/// let prefs = Preferences {};
/// prefs.set_onboarded(true);
/// ```
#[proc_macro_attribute]
pub fn stored_access(args: TokenStream, item: TokenStream) -> TokenStream {
    attribute(ExpanderKind::StoredAccess, args, item)
}

/// Adds the given attribute to every stored field of a struct
#[proc_macro_attribute]
pub fn wrap_stored_properties(args: TokenStream, item: TokenStream) -> TokenStream {
    attribute(ExpanderKind::WrapStoredProperties, args, item)
}

/// Derives one `is_<case>` predicate per enum variant
#[proc_macro_derive(CaseDetection)]
pub fn derive_case_detection(item: TokenStream) -> TokenStream {
    derive(ExpanderKind::CaseDetection, item)
}

/// Derives `PartialEq` over stored fields, ignoring `PhantomData` markers
#[proc_macro_derive(Equatable)]
pub fn derive_equatable(item: TokenStream) -> TokenStream {
    derive(ExpanderKind::Equatable, item)
}

/// Derives `copy(..)`, taking an `Option` per stored field, and one
/// consuming `with_<field>` per stored field
#[proc_macro_derive(Copyable)]
pub fn derive_copyable(item: TokenStream) -> TokenStream {
    derive(ExpanderKind::Copyable, item)
}

/// Pairs an expression with its source text: `(expr, "expr")`
#[proc_macro]
pub fn stringify_expr(input: TokenStream) -> TokenStream {
    function_like(ExpanderKind::Stringify, input)
}

/// Reports a compile-time warning with the given message
#[proc_macro]
pub fn warning(input: TokenStream) -> TokenStream {
    function_like(ExpanderKind::Warning, input)
}

/// Builds a `Url` from a literal that is validated at compile time
#[proc_macro]
pub fn url(input: TokenStream) -> TokenStream {
    function_like(ExpanderKind::Url, input)
}
