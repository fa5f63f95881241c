//! `#[sealed]`: closed hierarchies and their discriminator enums
//!
//! A sealed module lists its variants as `#[variant]` structs. The expander
//! generates, inside the module:
//!
//! - the owned base union `enum Base { A(A), B(B) }` with `From` impls,
//! - the aggregate discriminator `SealedType` and `Base::sealed_type`,
//! - per role, a discriminator enum, a classify trait implemented by every
//!   member and an optional classifier on the base.
//!
//! Discriminator cases borrow their variant when it has stored state and are
//! payload-free otherwise.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, ToTokens};
use rustc_hash::FxHashSet;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{parse_quote, Attribute, Ident, ImplItem, Item, ItemMod, Meta, Token, Visibility};
use tracing::{debug, trace};

use crate::args::{ArgumentList, ArgumentSpec, Positional};
use crate::context::ExpansionContext;
use crate::error::{ExpandError, Result};
use crate::introspect::{
    computed_properties_of, find_attribute, inherent_impls_of, item_attrs_mut, item_name,
    strip_attribute, struct_facts,
};
use crate::naming::{classifier_name, discriminator_name, role_stem, to_upper_camel_case};

const ARGS: ArgumentSpec = ArgumentSpec {
    expander: "#[sealed]",
    labels: &["base", "roles"],
    required: &[],
    positional: Positional::Forbidden,
};

pub const VARIANT_ATTR: &str = "variant";

#[derive(Debug, Clone)]
struct Variant {
    ident: Ident,
    vis: Visibility,
    has_payload: bool,
    roles: Vec<Ident>,
}

/// One discriminator enum and the classifier that produces it
#[derive(Debug, Clone)]
struct Bucket {
    /// `None` for the aggregate bucket
    role: Option<Ident>,
    discriminator: Ident,
    classifier: Ident,
    members: Vec<usize>,
}

struct Hierarchy {
    base: Ident,
    /// Shared by every generated item, so none exposes a more private variant
    vis: Visibility,
    variants: Vec<Variant>,
    buckets: Vec<Bucket>,
}

pub fn expand(cx: &mut ExpansionContext, args: TokenStream, item: TokenStream) -> Result<TokenStream> {
    let args = ArgumentList::parse(args)?;
    args.validate(&ARGS)?;
    let roles = declared_roles(&args)?;

    let item: Item = syn::parse2(item)?;
    let mut module = match item {
        Item::Mod(module) => module,
        _ => {
            return Err(ExpandError::UnsupportedTarget {
                expander: "#[sealed]",
                expected: "an inline module",
            }
            .at(Span::call_site()))
        }
    };
    let base = base_ident(&args, &module)?;
    let (brace, mut items) = module
        .content
        .take()
        .ok_or_else(|| ExpandError::ModuleWithoutBody.at(module.ident.span()))?;

    let variants = collect_variants(&mut items, &roles)?;
    if variants.is_empty() {
        debug!(module = %module.ident, "no variants; module left unchanged");
        module.content = Some((brace, items));
        return Ok(quote!(#module));
    }

    let hierarchy = Hierarchy::build(cx, base, &roles, variants, &items)?;
    debug!(
        base = %hierarchy.base,
        variants = hierarchy.variants.len(),
        buckets = hierarchy.buckets.len(),
        "synthesizing sealed hierarchy"
    );
    items.push(Item::Verbatim(hierarchy.generate()));
    module.content = Some((brace, items));
    Ok(quote!(#module))
}

/// The module with its `#[variant]` markers removed, used when expansion
/// fails so the helper attribute never reaches the compiler
pub fn strip_helpers(item: TokenStream) -> TokenStream {
    match syn::parse2::<ItemMod>(item.clone()) {
        Ok(mut module) => {
            if let Some((_, items)) = module.content.as_mut() {
                for item in items.iter_mut() {
                    if let Some(attrs) = item_attrs_mut(item) {
                        strip_attribute(attrs, VARIANT_ATTR);
                    }
                }
            }
            quote!(#module)
        }
        Err(_) => item,
    }
}

fn declared_roles(args: &ArgumentList) -> Result<Vec<Ident>> {
    let roles = args.ident_list("roles")?;
    let mut seen = FxHashSet::default();
    for role in &roles {
        if !seen.insert(role.to_string()) {
            return Err(ExpandError::DuplicateArgument {
                label: role.to_string(),
            }
            .at(role.span()));
        }
    }
    Ok(roles)
}

fn base_ident(args: &ArgumentList, module: &ItemMod) -> Result<Ident> {
    if let Some(base) = args.ident("base")? {
        return Ok(base);
    }
    let name = to_upper_camel_case(&module.ident.unraw().to_string());
    syn::parse_str::<Ident>(&name).map_err(|_| {
        ExpandError::InvalidArgument {
            label: "base".to_string(),
            expected: "an identifier; the module name does not convert to one",
        }
        .at(module.ident.span())
    })
}

/// Read and strip every `#[variant]` marker, in declaration order
fn collect_variants(items: &mut [Item], roles: &[Ident]) -> Result<Vec<Variant>> {
    let mut variants = Vec::new();
    for item in items.iter_mut() {
        let Some(attrs) = item_attrs_mut(item) else {
            continue;
        };
        let Some(marker) = find_attribute(attrs, VARIANT_ATTR) else {
            continue;
        };
        let marker_span = marker.span();
        let mut variant_roles = Vec::new();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident(VARIANT_ATTR)) {
            for role in variant_role_list(attr)? {
                if !roles.contains(&role) {
                    return Err(ExpandError::UndeclaredRole {
                        role: role.to_string(),
                    }
                    .at(role.span()));
                }
                if variant_roles.contains(&role) {
                    return Err(ExpandError::DuplicateArgument {
                        label: role.to_string(),
                    }
                    .at(role.span()));
                }
                variant_roles.push(role);
            }
        }
        strip_attribute(attrs, VARIANT_ATTR);

        let Item::Struct(strukt) = item else {
            return Err(ExpandError::VariantNotStruct.at(marker_span));
        };
        if !strukt.generics.params.is_empty() {
            return Err(ExpandError::UnsupportedTarget {
                expander: "#[variant]",
                expected: "a struct without generic parameters",
            }
            .at(strukt.generics.span()));
        }
        trace!(variant = %strukt.ident, roles = variant_roles.len(), "variant");
        variants.push(Variant {
            ident: strukt.ident.clone(),
            vis: strukt.vis.clone(),
            has_payload: struct_facts(strukt, None).has_stored_instance_property,
            roles: variant_roles,
        });
    }
    Ok(variants)
}

/// `#[variant]` or `#[variant(RoleA, RoleB)]`
fn variant_role_list(attr: &Attribute) -> Result<Vec<Ident>> {
    match &attr.meta {
        Meta::Path(_) => Ok(Vec::new()),
        Meta::List(_) => Ok(attr
            .parse_args_with(Punctuated::<Ident, Token![,]>::parse_terminated)?
            .into_iter()
            .collect()),
        Meta::NameValue(nv) => Err(ExpandError::InvalidArgument {
            label: VARIANT_ATTR.to_string(),
            expected: "a list of roles such as `#[variant(RoleA, RoleB)]`",
        }
        .at(nv.span())),
    }
}

/// The variants' common visibility. Mixed `pub` and `pub(crate)` narrow to
/// `pub(crate)`; any other mix falls back to private.
fn generated_visibility(variants: &[Variant]) -> Visibility {
    let rendered: Vec<String> = variants
        .iter()
        .map(|variant| variant.vis.to_token_stream().to_string())
        .collect();
    match variants.first() {
        Some(first) if rendered.iter().all(|vis| *vis == rendered[0]) => first.vis.clone(),
        _ if rendered.iter().all(|vis| vis == "pub" || vis == "pub (crate)") => {
            parse_quote!(pub(crate))
        }
        _ => Visibility::Inherited,
    }
}

impl Hierarchy {
    fn build(
        cx: &mut ExpansionContext,
        base: Ident,
        roles: &[Ident],
        variants: Vec<Variant>,
        items: &[Item],
    ) -> Result<Self> {
        let suffix = cx.config().sealed_suffix.clone();
        let aggregate = cx
            .config()
            .aggregate_discriminator()
            .map_err(|err| err.at(Span::call_site()))?;
        let aggregate_classifier = cx
            .config()
            .aggregate_classifier()
            .map_err(|err| err.at(Span::call_site()))?;
        let base_name = base.to_string();

        let mut buckets = vec![Bucket {
            role: None,
            discriminator: aggregate,
            classifier: aggregate_classifier,
            members: (0..variants.len()).collect(),
        }];

        for role in roles {
            let members: Vec<usize> = variants
                .iter()
                .enumerate()
                .filter(|(_, variant)| variant.roles.contains(role))
                .map(|(index, _)| index)
                .collect();
            if members.is_empty() {
                cx.warn(
                    role.span(),
                    format!("role `{}` has no variants; nothing is generated for it", role),
                );
                continue;
            }

            let role_name = role.to_string();
            let bucket = Bucket {
                role: Some(role.clone()),
                discriminator: format_ident!("{}", discriminator_name(&role_name, &base_name, &suffix)),
                classifier: format_ident!("{}", classifier_name(&role_stem(&role_name, &base_name))),
                members,
            };
            for existing in &buckets {
                let clash = if existing.discriminator == bucket.discriminator {
                    Some(bucket.discriminator.to_string())
                } else if existing.classifier == bucket.classifier {
                    Some(bucket.classifier.to_string())
                } else {
                    None
                };
                if let Some(name) = clash {
                    let first = existing
                        .role
                        .as_ref()
                        .map_or_else(|| base_name.clone(), Ident::to_string);
                    return Err(ExpandError::DiscriminatorNameClash {
                        first,
                        second: role.to_string(),
                        name,
                    }
                    .at(role.span()));
                }
            }
            buckets.push(bucket);
        }

        let hierarchy = Self {
            base,
            vis: generated_visibility(&variants),
            variants,
            buckets,
        };
        hierarchy.check_clashes(items)?;
        hierarchy.warn_shadowed_classifiers(cx, items);
        Ok(hierarchy)
    }

    /// Generated type names must be free in the module, and the base must
    /// not already declare a method the expander generates
    fn check_clashes(&self, items: &[Item]) -> Result<()> {
        let mut generated: Vec<&Ident> = vec![&self.base];
        for bucket in &self.buckets {
            generated.push(&bucket.discriminator);
            if let Some(role) = &bucket.role {
                generated.push(role);
            }
        }

        let mut seen = FxHashSet::default();
        for name in &generated {
            if !seen.insert(name.to_string()) {
                return Err(ExpandError::GeneratedNameClash {
                    name: name.to_string(),
                }
                .at(name.span()));
            }
        }
        for item in items {
            if let Some(ident) = item_name(item) {
                if seen.contains(&ident.to_string()) {
                    return Err(ExpandError::GeneratedNameClash {
                        name: ident.to_string(),
                    }
                    .at(ident.span()));
                }
            }
        }

        let classifiers: FxHashSet<String> = self
            .buckets
            .iter()
            .map(|bucket| bucket.classifier.to_string())
            .collect();
        for imp in inherent_impls_of(items, &self.base) {
            for item in &imp.items {
                if let ImplItem::Fn(method) = item {
                    if classifiers.contains(&method.sig.ident.to_string()) {
                        return Err(ExpandError::GeneratedNameClash {
                            name: format!("{}::{}", self.base, method.sig.ident),
                        }
                        .at(method.sig.ident.span()));
                    }
                }
            }
        }
        Ok(())
    }

    fn warn_shadowed_classifiers(&self, cx: &mut ExpansionContext, items: &[Item]) {
        for bucket in &self.buckets {
            let Some(role) = &bucket.role else {
                continue;
            };
            for &index in &bucket.members {
                let variant = &self.variants[index];
                for property in computed_properties_of(items, &variant.ident) {
                    if *property == bucket.classifier {
                        cx.warn(
                            property.span(),
                            format!(
                                "`{}::{}` shadows the classifier generated for role `{}`; \
                                 call it as `{}::{}(&value)`",
                                variant.ident, property, role, role, bucket.classifier
                            ),
                        );
                    }
                }
            }
        }
    }

    fn has_payload(&self, bucket: &Bucket) -> bool {
        bucket
            .members
            .iter()
            .any(|&index| self.variants[index].has_payload)
    }

    fn generate(&self) -> TokenStream {
        let base = &self.base;
        let vis = &self.vis;
        let idents: Vec<&Ident> = self.variants.iter().map(|variant| &variant.ident).collect();

        let conversions = idents.iter().map(|ident| {
            quote! {
                impl ::core::convert::From<#ident> for #base {
                    fn from(value: #ident) -> Self {
                        Self::#ident(value)
                    }
                }
            }
        });
        let discriminators = self.buckets.iter().map(|bucket| self.discriminator_enum(bucket));
        let classifiers = self.buckets.iter().map(|bucket| self.base_classifier(bucket));
        let role_traits = self
            .buckets
            .iter()
            .filter_map(|bucket| bucket.role.as_ref().map(|role| self.role_trait(role, bucket)));

        quote! {
            #vis enum #base {
                #( #idents(#idents), )*
            }

            #( #conversions )*

            #( #discriminators )*

            impl #base {
                #( #classifiers )*
            }

            #( #role_traits )*
        }
    }

    /// `<'a>` on the declaration and `<'_>` at use sites when any case
    /// borrows its variant
    fn lifetimes(&self, bucket: &Bucket) -> (TokenStream, TokenStream) {
        if self.has_payload(bucket) {
            (quote!(<'a>), quote!(<'_>))
        } else {
            (TokenStream::new(), TokenStream::new())
        }
    }

    fn discriminator_enum(&self, bucket: &Bucket) -> TokenStream {
        let name = &bucket.discriminator;
        let vis = &self.vis;
        let (declared, elided) = self.lifetimes(bucket);
        let members: Vec<&Variant> = bucket.members.iter().map(|&i| &self.variants[i]).collect();

        let cases = members.iter().map(|variant| {
            let ident = &variant.ident;
            if variant.has_payload {
                quote!(#ident(&'a #ident))
            } else {
                quote!(#ident)
            }
        });
        let eq_arms = members.iter().map(|variant| {
            let ident = &variant.ident;
            if variant.has_payload {
                quote!((Self::#ident(lhs), Self::#ident(rhs)) => ::core::ptr::eq(*lhs, *rhs))
            } else {
                quote!((Self::#ident, Self::#ident) => true)
            }
        });
        let debug_arms = members.iter().map(|variant| {
            let ident = &variant.ident;
            if variant.has_payload {
                let label = format!("{}(..)", ident);
                quote!(Self::#ident(_) => f.write_str(#label))
            } else {
                let label = ident.to_string();
                quote!(Self::#ident => f.write_str(#label))
            }
        });

        quote! {
            #[derive(Clone, Copy)]
            #vis enum #name #declared {
                #( #cases, )*
            }

            impl ::core::cmp::PartialEq for #name #elided {
                #[allow(unreachable_patterns)]
                fn eq(&self, other: &Self) -> bool {
                    match (self, other) {
                        #( #eq_arms, )*
                        _ => false,
                    }
                }
            }

            impl ::core::cmp::Eq for #name #elided {}

            impl ::core::fmt::Debug for #name #elided {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    match self {
                        #( #debug_arms, )*
                    }
                }
            }
        }
    }

    /// The aggregate classifier, or a role's optional classifier, on the base
    fn base_classifier(&self, bucket: &Bucket) -> TokenStream {
        let discriminator = &bucket.discriminator;
        let vis = &self.vis;
        let classifier = &bucket.classifier;
        let (_, elided) = self.lifetimes(bucket);

        match &bucket.role {
            None => {
                let arms = self.variants.iter().map(|variant| {
                    let ident = &variant.ident;
                    if variant.has_payload {
                        quote!(Self::#ident(value) => #discriminator::#ident(value))
                    } else {
                        quote!(Self::#ident(_) => #discriminator::#ident)
                    }
                });
                quote! {
                    #vis fn #classifier(&self) -> #discriminator #elided {
                        match self {
                            #( #arms, )*
                        }
                    }
                }
            }
            Some(role) => {
                let arms = self.variants.iter().enumerate().map(|(index, variant)| {
                    let ident = &variant.ident;
                    if bucket.members.contains(&index) {
                        quote! {
                            Self::#ident(value) => ::core::option::Option::Some(#role::#classifier(value))
                        }
                    } else {
                        quote!(Self::#ident(_) => ::core::option::Option::None)
                    }
                });
                quote! {
                    #vis fn #classifier(&self) -> ::core::option::Option<#discriminator #elided> {
                        match self {
                            #( #arms, )*
                        }
                    }
                }
            }
        }
    }

    fn role_trait(&self, role: &Ident, bucket: &Bucket) -> TokenStream {
        let discriminator = &bucket.discriminator;
        let vis = &self.vis;
        let classifier = &bucket.classifier;
        let (_, elided) = self.lifetimes(bucket);

        let impls = bucket.members.iter().map(|&index| {
            let variant = &self.variants[index];
            let ident = &variant.ident;
            let case = if variant.has_payload {
                quote!(#discriminator::#ident(self))
            } else {
                quote!(#discriminator::#ident)
            };
            quote! {
                impl #role for #ident {
                    fn #classifier(&self) -> #discriminator #elided {
                        #case
                    }
                }
            }
        });

        quote! {
            #vis trait #role {
                fn #classifier(&self) -> #discriminator #elided;
            }

            #( #impls )*
        }
    }
}

#[cfg(test)]
#[path = "sealed_tests.rs"]
mod sealed_tests;
