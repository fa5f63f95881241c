//! Read-only queries over declarations and their members

use proc_macro2::Span;
use quote::format_ident;
use syn::{
    Attribute, Field, Fields, FnArg, Ident, ImplItem, Item, ItemImpl, ItemStruct, Member, Path,
    ReturnType, Type,
};

/// What kind of state a member contributes to its type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberFacts {
    pub is_stored_instance_property: bool,
    pub is_computed_property: bool,
    pub is_type_level_property: bool,
}

/// Structural facts about a type declaration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeFacts {
    pub has_stored_instance_property: bool,
    pub declared_supertype: Option<Path>,
}

/// How a struct lays out its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldsShape {
    Named,
    Unnamed,
    Unit,
}

/// A stored instance field together with the name it is bound to in
/// generated parameter lists and patterns
#[derive(Debug, Clone)]
pub struct StoredField<'a> {
    pub binding: Ident,
    pub member: Member,
    pub field: &'a Field,
}

impl<'a> StoredField<'a> {
    pub fn ty(&self) -> &'a Type {
        &self.field.ty
    }
}

pub fn field_facts(field: &Field) -> MemberFacts {
    if is_phantom(&field.ty) {
        MemberFacts {
            is_type_level_property: true,
            ..MemberFacts::default()
        }
    } else {
        MemberFacts {
            is_stored_instance_property: true,
            ..MemberFacts::default()
        }
    }
}

/// A getter-like method (`&self` only, returning a value) counts as a
/// computed property; associated constants and types are type-level.
pub fn impl_item_facts(item: &ImplItem) -> MemberFacts {
    match item {
        ImplItem::Fn(method) => {
            let sig = &method.sig;
            let takes_only_shared_self = sig.inputs.len() == 1
                && matches!(
                    sig.inputs.first(),
                    Some(FnArg::Receiver(receiver))
                        if receiver.reference.is_some() && receiver.mutability.is_none()
                );
            let returns_value = match &sig.output {
                ReturnType::Default => false,
                ReturnType::Type(_, ty) => !is_unit(ty),
            };
            MemberFacts {
                is_computed_property: takes_only_shared_self
                    && returns_value
                    && sig.asyncness.is_none()
                    && sig.generics.params.is_empty(),
                ..MemberFacts::default()
            }
        }
        ImplItem::Const(_) | ImplItem::Type(_) => MemberFacts {
            is_type_level_property: true,
            ..MemberFacts::default()
        },
        _ => MemberFacts::default(),
    }
}

pub fn struct_facts(item: &ItemStruct, declared_supertype: Option<&Path>) -> TypeFacts {
    TypeFacts {
        has_stored_instance_property: item
            .fields
            .iter()
            .any(|field| field_facts(field).is_stored_instance_property),
        declared_supertype: declared_supertype.cloned(),
    }
}

pub fn fields_shape(fields: &Fields) -> FieldsShape {
    match fields {
        Fields::Named(_) => FieldsShape::Named,
        Fields::Unnamed(_) => FieldsShape::Unnamed,
        Fields::Unit => FieldsShape::Unit,
    }
}

/// The name a field is bound to: its own name, or `field_<index>` for
/// positional fields
pub fn field_binding(index: usize, field: &Field) -> Ident {
    match &field.ident {
        Some(ident) => ident.clone(),
        None => format_ident!("field_{}", index),
    }
}

pub fn field_member(index: usize, field: &Field) -> Member {
    match &field.ident {
        Some(ident) => Member::Named(ident.clone()),
        None => Member::Unnamed(syn::Index {
            index: index as u32,
            span: Span::call_site(),
        }),
    }
}

/// Stored instance fields in declaration order
pub fn stored_instance_fields(fields: &Fields) -> Vec<StoredField<'_>> {
    fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field_facts(field).is_stored_instance_property)
        .map(|(index, field)| StoredField {
            binding: field_binding(index, field),
            member: field_member(index, field),
            field,
        })
        .collect()
}

/// Type-level (`PhantomData`) fields in declaration order
pub fn type_level_fields(fields: &Fields) -> Vec<StoredField<'_>> {
    fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field_facts(field).is_type_level_property)
        .map(|(index, field)| StoredField {
            binding: field_binding(index, field),
            member: field_member(index, field),
            field,
        })
        .collect()
}

/// Inherent impl blocks for `ident` among sibling items
pub fn inherent_impls_of<'a>(items: &'a [Item], ident: &Ident) -> Vec<&'a ItemImpl> {
    items
        .iter()
        .filter_map(|item| match item {
            Item::Impl(imp) if imp.trait_.is_none() && self_type_is(&imp.self_ty, ident) => Some(imp),
            _ => None,
        })
        .collect()
}

/// Computed properties declared for `ident` among sibling items
pub fn computed_properties_of<'a>(items: &'a [Item], ident: &Ident) -> Vec<&'a Ident> {
    inherent_impls_of(items, ident)
        .into_iter()
        .flat_map(|imp| imp.items.iter())
        .filter(|item| impl_item_facts(item).is_computed_property)
        .filter_map(|item| match item {
            ImplItem::Fn(method) => Some(&method.sig.ident),
            _ => None,
        })
        .collect()
}

/// Name of the item a module-level item declares, if any
pub fn item_name(item: &Item) -> Option<&Ident> {
    match item {
        Item::Const(i) => Some(&i.ident),
        Item::Enum(i) => Some(&i.ident),
        Item::Fn(i) => Some(&i.sig.ident),
        Item::Mod(i) => Some(&i.ident),
        Item::Static(i) => Some(&i.ident),
        Item::Struct(i) => Some(&i.ident),
        Item::Trait(i) => Some(&i.ident),
        Item::TraitAlias(i) => Some(&i.ident),
        Item::Type(i) => Some(&i.ident),
        Item::Union(i) => Some(&i.ident),
        _ => None,
    }
}

/// Attributes of a module-level item, if it can carry any
pub fn item_attrs_mut(item: &mut Item) -> Option<&mut Vec<Attribute>> {
    match item {
        Item::Const(i) => Some(&mut i.attrs),
        Item::Enum(i) => Some(&mut i.attrs),
        Item::ExternCrate(i) => Some(&mut i.attrs),
        Item::Fn(i) => Some(&mut i.attrs),
        Item::ForeignMod(i) => Some(&mut i.attrs),
        Item::Impl(i) => Some(&mut i.attrs),
        Item::Macro(i) => Some(&mut i.attrs),
        Item::Mod(i) => Some(&mut i.attrs),
        Item::Static(i) => Some(&mut i.attrs),
        Item::Struct(i) => Some(&mut i.attrs),
        Item::Trait(i) => Some(&mut i.attrs),
        Item::TraitAlias(i) => Some(&mut i.attrs),
        Item::Type(i) => Some(&mut i.attrs),
        Item::Union(i) => Some(&mut i.attrs),
        Item::Use(i) => Some(&mut i.attrs),
        _ => None,
    }
}

pub fn is_phantom(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map_or(false, |segment| segment.ident == "PhantomData"),
        _ => false,
    }
}

pub fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

pub fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

/// Remove every attribute called `name`, returning how many were removed
pub fn strip_attribute(attrs: &mut Vec<Attribute>, name: &str) -> usize {
    let before = attrs.len();
    attrs.retain(|attr| !attr.path().is_ident(name));
    before - attrs.len()
}

fn self_type_is(ty: &Type, ident: &Ident) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map_or(false, |segment| segment.ident == *ident),
        _ => false,
    }
}

#[cfg(test)]
#[path = "introspect_tests.rs"]
mod introspect_tests;
