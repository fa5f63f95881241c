//! `#[stored_access]` accessors against real stores

use expando::{stored_access, Defaults, KeyValueStore};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum Theme {
    Light,
    Dark,
}

#[stored_access]
struct Preferences {
    /// Whether onboarding finished
    #[stored(default_value = false, key = "e2e.onboarded")]
    pub onboarded: bool,
    #[stored(default_value = 3, key = "e2e.launches")]
    launches: u32,
    #[stored(default_value = 1.5, key = "e2e.scale")]
    scale: f32,
    #[stored(default_value = "guest", key = "e2e.user_name")]
    user_name: String,
    #[stored(default_value = Theme::Light, key = "e2e.theme")]
    theme: Theme,
}

#[stored_access]
struct Untouched {
    #[stored(default_value = false, key = "e2e.untouched.flag")]
    flag: bool,
    #[stored(default_value = -2, key = "e2e.untouched.offset")]
    offset: i16,
    #[stored(default_value = "guest", key = "e2e.untouched.name")]
    name: String,
    #[stored(default_value = Theme::Light, key = "e2e.untouched.theme")]
    theme: Theme,
}

#[stored_access]
struct Corrupted {
    #[stored(default_value = 1.5, key = "e2e.corrupted.scale")]
    scale: f64,
    #[stored(default_value = 3, key = "e2e.corrupted.count")]
    count: u32,
}

#[stored_access]
struct Session {
    #[stored(default_value = 0, store = self.store)]
    visits: i64,
    #[stored(default_value = 0, store = self.store)]
    counter: u64,
    #[stored(default_value = -1, store = self.store)]
    balance: i128,
    store: Defaults,
    label: &'static str,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_defaults_when_unset() {
    let untouched = Untouched {};
    assert!(!untouched.flag());
    assert_eq!(untouched.offset(), -2);
    assert_eq!(untouched.name(), "guest");
    assert_eq!(untouched.theme(), Theme::Light);
}

#[test]
fn test_writes_go_to_the_standard_store() {
    let prefs = Preferences {};
    prefs.set_onboarded(true);
    prefs.set_launches(11);
    prefs.set_scale(2.0);
    prefs.set_user_name("ada".to_string());
    prefs.set_theme(Theme::Dark);

    assert!(prefs.onboarded());
    assert_eq!(prefs.launches(), 11);
    assert_eq!(prefs.scale(), 2.0);
    assert_eq!(prefs.user_name(), "ada");
    assert_eq!(prefs.theme(), Theme::Dark);

    let standard = Defaults::standard();
    assert_eq!(standard.value("e2e.onboarded"), Some(json!(true)));
    assert_eq!(standard.value("e2e.theme"), Some(json!("Dark")));
}

#[test]
fn test_mismatched_value_falls_back_to_default() {
    init_tracing();
    let standard = Defaults::standard();
    standard.set_value("e2e.corrupted.scale", json!("not a number"));
    assert_eq!(Corrupted {}.scale(), 1.5);

    standard.set_value("e2e.corrupted.count", json!(-1));
    assert_eq!(Corrupted {}.count(), 3);
}

#[test]
fn test_custom_store_expression() {
    let first = Session { store: Defaults::new(), label: "first" };
    let second = Session { store: Defaults::new(), label: "second" };
    first.set_visits(4);
    assert_eq!(first.visits(), 4);
    assert_eq!(second.visits(), 0);
    assert_eq!(first.store.keys(), vec!["visits"]);
    first.set_counter(u64::MAX);
    assert_eq!(first.counter(), u64::MAX);
    assert_eq!(second.counter(), 0);
    assert_ne!(first.label, second.label);
}

#[test]
fn test_wide_integers_round_trip() {
    let session = Session { store: Defaults::new(), label: "wide" };
    session.set_counter(u64::MAX);
    assert_eq!(session.counter(), u64::MAX);
    assert_eq!(session.balance(), -1);
    session.set_balance(i128::from(u64::MAX));
    assert_eq!(session.balance(), i128::from(u64::MAX));
}
