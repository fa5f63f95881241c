#[cfg(test)]
mod tests {
    use crate::error::ExpandError;
    use crate::expanders::wrap_stored_properties::expand;
    use crate::test_support::assert_tokens_eq;
    use quote::quote;

    #[test]
    fn test_attribute_added_to_stored_fields_only() {
        let output = expand(
            quote!("deprecated(note = \"hands off my data\")"),
            quote! {
                struct OldStorage<T> {
                    x: i32,
                    marker: PhantomData<T>,
                }
            },
        )
        .unwrap();
        assert_tokens_eq(
            &output,
            &quote! {
                struct OldStorage<T> {
                    #[deprecated(note = "hands off my data")]
                    x: i32,
                    marker: PhantomData<T>,
                }
            },
        );
    }

    #[test]
    fn test_requires_attribute_text() {
        let err = expand(quote!(), quote!(struct S { x: i32 })).unwrap_err();
        assert!(matches!(err.error, ExpandError::MissingArgument { .. }));

        let err = expand(quote!("not an attribute ("), quote!(struct S { x: i32 })).unwrap_err();
        assert!(matches!(err.error, ExpandError::InvalidArgument { .. }));
    }

    #[test]
    fn test_non_struct_is_rejected() {
        let err = expand(quote!("allow(dead_code)"), quote!(fn f() {})).unwrap_err();
        assert!(matches!(err.error, ExpandError::UnsupportedTarget { .. }));
    }
}
