//! Function-like macros and `#[wrap_stored_properties]`

use expando::{stringify_expr, url, wrap_stored_properties};
use serde::Deserialize;

#[wrap_stored_properties("serde(default)")]
#[derive(Debug, Deserialize)]
struct RetryOptions {
    retries: u32,
    verbose: bool,
}

#[test]
fn test_stringify_expr() {
    let a = 4;
    let (value, text) = stringify_expr!(a * 2 + 1);
    assert_eq!(value, 9);
    assert_eq!(text, "a * 2 + 1");
}

#[test]
fn test_url_literal() {
    let endpoint = url!("https://api.example.com/v1/items?page=2");
    assert_eq!(endpoint.host_str(), Some("api.example.com"));
    assert_eq!(endpoint.path(), "/v1/items");
    assert_eq!(endpoint.query(), Some("page=2"));
}

#[test]
fn test_wrapped_fields_take_the_attribute() {
    let options: RetryOptions = serde_json::from_str(r#"{ "retries": 2 }"#).unwrap();
    assert_eq!(options.retries, 2);
    assert!(!options.verbose);
}
