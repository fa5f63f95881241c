#[cfg(test)]
mod tests {
    use crate::introspect::*;
    use syn::{parse_quote, Fields, ImplItem, Item, ItemStruct, Path, Type};

    fn fields_of(item: &ItemStruct) -> &Fields {
        &item.fields
    }

    // ===== Member Facts =====

    #[test]
    fn test_plain_field_is_stored() {
        let item: ItemStruct = parse_quote!(struct S { id: i32 });
        let facts = field_facts(item.fields.iter().next().unwrap());
        assert!(facts.is_stored_instance_property);
        assert!(!facts.is_type_level_property);
        assert!(!facts.is_computed_property);
    }

    #[test]
    fn test_phantom_field_is_type_level() {
        let item: ItemStruct = parse_quote!(struct S<T> { marker: std::marker::PhantomData<T> });
        let facts = field_facts(item.fields.iter().next().unwrap());
        assert!(facts.is_type_level_property);
        assert!(!facts.is_stored_instance_property);
    }

    #[test]
    fn test_getter_is_computed() {
        let getter: ImplItem = parse_quote! {
            fn label(&self) -> String { String::new() }
        };
        assert!(impl_item_facts(&getter).is_computed_property);

        let setter: ImplItem = parse_quote! {
            fn set_label(&mut self, label: String) {}
        };
        assert_eq!(impl_item_facts(&setter), MemberFacts::default());

        let constant: ImplItem = parse_quote!(const LIMIT: usize = 3;);
        assert!(impl_item_facts(&constant).is_type_level_property);
    }

    #[test]
    fn test_async_or_generic_methods_are_not_computed() {
        let async_getter: ImplItem = parse_quote! {
            async fn label(&self) -> String { String::new() }
        };
        assert!(!impl_item_facts(&async_getter).is_computed_property);

        let generic_getter: ImplItem = parse_quote! {
            fn label<T: Default>(&self) -> T { T::default() }
        };
        assert!(!impl_item_facts(&generic_getter).is_computed_property);
    }

    // ===== Type Facts =====

    #[test]
    fn test_struct_facts() {
        let stateful: ItemStruct = parse_quote!(struct S { id: i32 });
        let stateless: ItemStruct = parse_quote!(struct T;);
        let marker_only: ItemStruct = parse_quote!(struct U<X>(PhantomData<X>););
        let supertype: Path = parse_quote!(Server);

        assert!(struct_facts(&stateful, None).has_stored_instance_property);
        assert!(!struct_facts(&stateless, None).has_stored_instance_property);
        assert!(!struct_facts(&marker_only, None).has_stored_instance_property);
        assert_eq!(
            struct_facts(&stateless, Some(&supertype)).declared_supertype,
            Some(supertype)
        );
        assert_eq!(struct_facts(&stateless, None).declared_supertype, None);
    }

    // ===== Field Queries =====

    #[test]
    fn test_stored_fields_keep_declaration_order() {
        let item: ItemStruct = parse_quote! {
            struct S<T> { b: u8, marker: PhantomData<T>, a: String }
        };
        let stored = stored_instance_fields(fields_of(&item));
        let names: Vec<String> = stored.iter().map(|f| f.binding.to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(type_level_fields(fields_of(&item)).len(), 1);
    }

    #[test]
    fn test_positional_fields_get_bindings() {
        let item: ItemStruct = parse_quote!(struct P(i32, String););
        let stored = stored_instance_fields(fields_of(&item));
        assert_eq!(stored[0].binding, "field_0");
        assert_eq!(stored[1].binding, "field_1");
        assert_eq!(fields_shape(fields_of(&item)), FieldsShape::Unnamed);
        let ty: Type = parse_quote!(String);
        assert_eq!(stored[1].ty(), &ty);
    }

    // ===== Sibling Items =====

    #[test]
    fn test_computed_properties_of_sibling_impls() {
        let items: Vec<Item> = vec![
            parse_quote!(struct A { x: i32 }),
            parse_quote! {
                impl A {
                    fn doubled(&self) -> i32 { self.x * 2 }
                    fn reset(&mut self) {}
                }
            },
            parse_quote! {
                impl Clone for A {
                    fn clone(&self) -> Self { A { x: self.x } }
                }
            },
        ];
        let ident = parse_quote!(A);
        let computed = computed_properties_of(&items, &ident);
        assert_eq!(computed.len(), 1);
        assert_eq!(computed[0], "doubled");
        assert_eq!(inherent_impls_of(&items, &ident).len(), 1);
        assert_eq!(item_name(&items[0]).map(|i| i.to_string()), Some("A".to_string()));
        assert_eq!(item_name(&items[1]), None);
    }

    // ===== Attributes =====

    #[test]
    fn test_attribute_helpers() {
        let mut item: ItemStruct = parse_quote! {
            #[variant]
            #[derive(Debug)]
            #[variant(Role)]
            struct V;
        };
        assert!(find_attribute(&item.attrs, "variant").is_some());
        assert!(find_attribute(&item.attrs, "derive").is_some());
        assert_eq!(strip_attribute(&mut item.attrs, "variant"), 2);
        assert!(find_attribute(&item.attrs, "variant").is_none());
        assert_eq!(item.attrs.len(), 1);
    }

    #[test]
    fn test_type_predicates() {
        assert!(is_unit(&parse_quote!(())));
        assert!(!is_phantom(&parse_quote!(Vec<u8>)));
    }
}
