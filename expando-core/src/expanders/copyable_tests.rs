#[cfg(test)]
mod tests {
    use crate::error::ExpandError;
    use crate::expanders::copyable::expand;
    use crate::test_support::assert_tokens_eq;
    use quote::quote;

    #[test]
    fn test_copy_and_withers() {
        let output = expand(quote! {
            pub struct ViewState {
                title: String,
                count: Option<i32>,
            }
        })
        .unwrap();
        assert_tokens_eq(
            &output,
            &quote! {
                #[automatically_derived]
                impl ViewState {
                    pub fn copy(
                        &self,
                        title: ::core::option::Option<String>,
                        count: ::core::option::Option<Option<i32> >
                    ) -> Self {
                        Self {
                            title: title.unwrap_or_else(|| ::core::clone::Clone::clone(&self.title)),
                            count: count.unwrap_or_else(|| ::core::clone::Clone::clone(&self.count)),
                        }
                    }

                    pub fn with_title(self, title: String) -> Self {
                        Self { title: title, ..self }
                    }

                    pub fn with_count(self, count: Option<i32>) -> Self {
                        Self { count: count, ..self }
                    }
                }
            },
        );
    }

    #[test]
    fn test_phantom_markers_are_not_parameters() {
        let output = expand(quote! {
            struct Id<T> {
                raw: u64,
                marker: PhantomData<T>,
            }
        })
        .unwrap()
        .to_string();
        assert!(output.contains("impl < T > Id < T >"));
        assert!(output.contains("fn copy (& self , raw : :: core :: option :: Option < u64 >) -> Self"));
        assert!(output.contains("marker : :: core :: marker :: PhantomData ,"));
        assert!(!output.contains("with_marker"));
    }

    #[test]
    fn test_empty_struct_copies_without_parameters() {
        let output = expand(quote!(struct Empty {})).unwrap().to_string();
        assert!(output.contains("fn copy (& self ,) -> Self { Self { } }"));
    }

    #[test]
    fn test_requires_named_fields() {
        for item in [quote!(struct P(u8);), quote!(struct U;), quote!(enum E { A })] {
            let err = expand(item).unwrap_err();
            assert!(matches!(
                err.error,
                ExpandError::UnsupportedTarget { expander: "#[derive(Copyable)]", .. }
            ));
        }
    }
}
