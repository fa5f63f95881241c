//! Error types for the expando runtime

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot encode value for key `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot decode value for key `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
