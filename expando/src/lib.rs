//! Expando: declaration-level code generation
//!
//! This crate provides:
//! - The `expando` macros (`#[add_init]`, `#[sealed]`, `#[add_async]`,
//!   `#[stored_access]`, `#[wrap_stored_properties]`, `#[derive(CaseDetection)]`,
//!   `#[derive(Equatable)]`, `#[derive(Copyable)]`, `stringify_expr!`,
//!   `warning!`, `url!`)
//! - The key-value store that `#[stored_access]` accessors read and write
//! - The continuation bridge used by `#[add_async]` peers

pub mod continuation;
pub mod error;
pub mod store;

pub use continuation::{Continuation, Resumption};
pub use error::{Result, StoreError};
pub use expando_macros::{
    add_async, add_init, sealed, stored_access, stringify_expr, url, warning,
    wrap_stored_properties, CaseDetection, Copyable, Equatable,
};
pub use store::{Defaults, KeyValueStore};

/// Items referenced by generated code. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::continuation::continuation;
    pub use ::serde_json;
    pub use ::url::Url;
}
