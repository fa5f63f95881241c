//! Helpers shared by the expander unit tests

use proc_macro2::TokenStream;
use syn::{File, Item, ItemImpl};

/// Compare two token streams through their printed form
pub fn assert_tokens_eq(actual: &TokenStream, expected: &TokenStream) {
    pretty_assertions::assert_eq!(actual.to_string(), expected.to_string());
}

pub fn parse_file(tokens: TokenStream) -> File {
    match syn::parse2(tokens.clone()) {
        Ok(file) => file,
        Err(err) => panic!("expansion is not a list of items ({}):\n{}", err, tokens),
    }
}

/// Items of the first inline module in `file`
pub fn module_items(file: &File) -> Vec<Item> {
    file.items
        .iter()
        .find_map(|item| match item {
            Item::Mod(module) => module.content.as_ref().map(|(_, items)| items.clone()),
            _ => None,
        })
        .expect("no inline module in expansion")
}

/// Every impl block, in order
pub fn impls(items: &[Item]) -> Vec<&ItemImpl> {
    items
        .iter()
        .filter_map(|item| match item {
            Item::Impl(imp) => Some(imp),
            _ => None,
        })
        .collect()
}

/// Render a syntax node for substring assertions
pub fn render(node: &impl quote::ToTokens) -> String {
    node.to_token_stream().to_string()
}

pub fn render_items(items: &[Item]) -> String {
    items.iter().map(render).collect::<Vec<_>>().join("\n")
}
