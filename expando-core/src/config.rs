//! Expansion configuration

use serde::{Deserialize, Serialize};
use syn::{Expr, Ident, Path};

use crate::error::ExpandError;

/// Environment variable holding a JSON override of [`ExpansionConfig`]
pub const CONFIG_ENV: &str = "EXPANDO_CONFIG";

/// Settings shared by every expander
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Path of the runtime crate referenced by generated code
    pub crate_path: String,

    /// Suffix of every discriminator enum generated by `#[sealed]`
    pub sealed_suffix: String,

    /// Name of the classify method generated on a sealed base
    pub aggregate_classifier: String,

    /// Suffix appended to the name of an async peer
    pub async_suffix: String,

    /// Store expression used by `#[stored(..)]` without `store = ..`,
    /// relative to `crate_path`
    pub default_store: String,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            crate_path: "::expando".to_string(),
            sealed_suffix: "SealedType".to_string(),
            aggregate_classifier: "sealed_type".to_string(),
            async_suffix: "_async".to_string(),
            default_store: "Defaults::standard()".to_string(),
        }
    }
}

impl ExpansionConfig {
    /// Load the configuration, honouring an [`CONFIG_ENV`] override
    pub fn load() -> Result<Self, ExpandError> {
        match std::env::var(CONFIG_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }

    /// Parse and validate a JSON configuration; missing keys keep defaults
    pub fn from_json(raw: &str) -> Result<Self, ExpandError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ExpandError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every configured fragment is valid Rust syntax
    pub fn validate(&self) -> Result<(), ExpandError> {
        self.crate_path()?;
        self.aggregate_classifier()?;
        self.default_store_expr(&self.crate_path()?)?;
        self.aggregate_discriminator()?;
        let candidate = format!("run{}", self.async_suffix);
        syn::parse_str::<Ident>(&candidate).map_err(|_| {
            ExpandError::Config(format!("`async_suffix` `{}` is not an identifier fragment", self.async_suffix))
        })?;
        Ok(())
    }

    pub fn crate_path(&self) -> Result<Path, ExpandError> {
        syn::parse_str(&self.crate_path).map_err(|_| {
            ExpandError::Config(format!("`crate_path` `{}` is not a path", self.crate_path))
        })
    }

    pub fn aggregate_classifier(&self) -> Result<Ident, ExpandError> {
        syn::parse_str(&self.aggregate_classifier).map_err(|_| {
            ExpandError::Config(format!(
                "`aggregate_classifier` `{}` is not an identifier",
                self.aggregate_classifier
            ))
        })
    }

    /// Name of the aggregate discriminator enum, which is the bare suffix
    pub fn aggregate_discriminator(&self) -> Result<Ident, ExpandError> {
        syn::parse_str(&self.sealed_suffix).map_err(|_| {
            ExpandError::Config(format!("`sealed_suffix` `{}` is not an identifier", self.sealed_suffix))
        })
    }

    /// The default store expression, rooted at `crate_path`
    pub fn default_store_expr(&self, crate_path: &Path) -> Result<Expr, ExpandError> {
        let crate_path = quote::ToTokens::to_token_stream(crate_path);
        let raw = format!("{}::{}", crate_path, self.default_store);
        syn::parse_str(&raw).map_err(|_| {
            ExpandError::Config(format!("`default_store` `{}` is not an expression", self.default_store))
        })
    }
}
