//! `#[sealed]` hierarchies used from outside the module

use expando::sealed;

#[sealed(base = Action, roles = [NavigationAction])]
mod action {
    #[variant]
    pub struct Refresh;

    #[variant(NavigationAction)]
    pub struct OpenUrl {
        pub url: String,
    }

    #[variant(NavigationAction)]
    pub struct Back;

    /// Not part of the hierarchy
    pub struct Helper;
}

#[sealed]
mod payment_state {
    #[variant]
    pub struct Pending;

    #[variant]
    pub struct Paid {
        pub amount: u32,
    }
}

use action::{Action, NavigationAction, NavigationSealedType, SealedType};
use payment_state::PaymentState;

fn describe(state: &PaymentState) -> String {
    match state.sealed_type() {
        payment_state::SealedType::Pending => "pending".to_string(),
        payment_state::SealedType::Paid(paid) => format!("paid {}", paid.amount),
    }
}

#[test]
fn test_aggregate_classification() {
    let refresh = Action::from(action::Refresh);
    assert_eq!(refresh.sealed_type(), SealedType::Refresh);

    let open = Action::from(action::OpenUrl {
        url: "https://example.com".to_string(),
    });
    let Action::OpenUrl(inner) = &open else {
        panic!("conversion picked the wrong case");
    };
    assert_eq!(open.sealed_type(), SealedType::OpenUrl(inner));
    match open.sealed_type() {
        SealedType::OpenUrl(payload) => assert_eq!(payload.url, "https://example.com"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_role_classification() {
    assert_eq!(Action::from(action::Refresh).navigation_type(), None);
    assert_eq!(
        Action::from(action::Back).navigation_type(),
        Some(NavigationSealedType::Back)
    );
    assert_eq!(action::Back.navigation_type(), NavigationSealedType::Back);
}

#[test]
fn test_payload_identity() {
    let first = action::OpenUrl { url: "a".to_string() };
    let second = action::OpenUrl { url: "a".to_string() };
    assert_eq!(first.navigation_type(), first.navigation_type());
    assert_ne!(first.navigation_type(), second.navigation_type());
}

#[test]
fn test_base_named_after_module() {
    assert_eq!(describe(&PaymentState::from(payment_state::Pending)), "pending");
    assert_eq!(
        describe(&PaymentState::from(payment_state::Paid { amount: 12 })),
        "paid 12"
    );
}

#[test]
fn test_debug_output() {
    let open = Action::from(action::OpenUrl { url: String::new() });
    assert_eq!(format!("{:?}", open.sealed_type()), "OpenUrl(..)");
    assert_eq!(format!("{:?}", Action::from(action::Back).sealed_type()), "Back");
    let _ = action::Helper;
}
