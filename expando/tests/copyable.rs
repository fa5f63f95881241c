//! `#[derive(Copyable)]`

use expando::Copyable;
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Copyable)]
pub struct ViewState {
    pub title: String,
    pub count: Option<i32>,
}

#[derive(Debug, PartialEq, Copyable)]
struct Handle<T> {
    id: u32,
    label: &'static str,
    marker: PhantomData<T>,
}

fn state() -> ViewState {
    ViewState {
        title: "1".to_string(),
        count: Some(1),
    }
}

#[test]
fn test_copy_replaces_only_given_fields() {
    let original = state();
    let copy = original.copy(Some("2".to_string()), None);
    assert_eq!(copy.title, "2");
    assert_eq!(copy.count, Some(1));
    // The source is left untouched
    assert_eq!(original, state());
}

#[test]
fn test_copy_can_clear_optional_field() {
    let copy = state().copy(None, Some(None));
    assert_eq!(
        copy,
        ViewState {
            title: "1".to_string(),
            count: None,
        }
    );
}

#[test]
fn test_withers_chain() {
    let copy = state().with_title("3".to_string()).with_count(Some(7));
    assert_eq!(copy.title, "3");
    assert_eq!(copy.count, Some(7));
}

#[test]
fn test_generic_struct_with_marker() {
    let handle: Handle<String> = Handle {
        id: 1,
        label: "a",
        marker: PhantomData,
    };
    let copy = handle.copy(Some(2), None);
    assert_eq!(copy.id, 2);
    assert_eq!(copy.label, "a");
    assert_eq!(copy.with_id(5).with_label("b").id, 5);
}
