//! Key-value storage behind `#[stored_access]` accessors
//!
//! Values are kept as `serde_json::Value` so any serde type can be stored;
//! the typed readers return `None` both for missing keys and for values of
//! the wrong type, letting the accessor fall back to its default.

use crate::error::{Result, StoreError};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{trace, warn};

/// A string-keyed store of JSON values
pub trait KeyValueStore {
    fn value(&self, key: &str) -> Option<Value>;

    fn set_value(&self, key: &str, value: Value);

    /// Remove a key, returning the previous value
    fn remove(&self, key: &str) -> Option<Value>;

    fn contains_key(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    fn bool(&self, key: &str) -> Option<bool> {
        self.value(key)?.as_bool()
    }

    fn integer(&self, key: &str) -> Option<i64> {
        self.value(key)?.as_i64()
    }

    /// Integers are widened to floats
    fn float(&self, key: &str) -> Option<f64> {
        self.value(key)?.as_f64()
    }

    fn string(&self, key: &str) -> Option<String> {
        match self.value(key)? {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// Deserialize the value under `key`; `Ok(None)` when the key is absent
    fn try_decode<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.value(key) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StoreError::Decode {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Like [`KeyValueStore::try_decode`], logging and discarding decode failures
    fn decode<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        match self.try_decode(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "stored value does not match the accessor type");
                None
            }
        }
    }

    fn store<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.set_value(key, value);
                Ok(())
            }
            Err(source) => {
                warn!(key, error = %source, "value could not be stored");
                Err(StoreError::Encode {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }
}

static STANDARD: Lazy<Defaults> = Lazy::new(Defaults::new);

/// In-memory [`KeyValueStore`]
///
/// `Defaults::standard()` is the process-wide instance generated accessors use
/// unless a `store = ...` expression is given; `Defaults::new()` creates an
/// isolated one.
#[derive(Debug, Default)]
pub struct Defaults {
    values: RwLock<FxHashMap<String, Value>>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> &'static Defaults {
        &STANDARD
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Keys currently present, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn clear(&self) {
        self.values.write().clear();
    }
}

impl KeyValueStore for Defaults {
    fn value(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    fn set_value(&self, key: &str, value: Value) {
        trace!(key, "store write");
        self.values.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> Option<Value> {
        self.values.write().remove(key)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
