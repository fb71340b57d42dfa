//! Declarative plugin configuration.
//!
//! Everything is optional; omitted values fall back to what the attached
//! specification implies (reference template) or to
//! [`DEFINITIONS_KEYS`](apispec_core::document::DEFINITIONS_KEYS).
//!
//! ```rust
//! use apispec_schemars::config::SchemarsPluginConfig;
//!
//! let config = SchemarsPluginConfig::from_yaml_str(
//!     "ref_template: '#/components/schemas/{model}'\n",
//! ).unwrap();
//! assert_eq!(config.ref_template.as_deref(), Some("#/components/schemas/{model}"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SchemarsPluginError;

/// Environment variable read by
/// [`SchemarsPluginBuilder::new_from_env`](crate::SchemarsPluginBuilder::new_from_env).
pub const REF_TEMPLATE_ENV: &str = "APISPEC_REF_TEMPLATE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemarsPluginConfig {
    /// Pointer template with a trailing `{model}` placeholder.
    pub ref_template: Option<String>,
    /// Keys holding nested definitions, checked in order.
    pub definition_keys: Option<Vec<String>>,
}

impl SchemarsPluginConfig {
    pub fn from_json_str(input: &str) -> Result<Self, SchemarsPluginError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_yaml_str(input: &str) -> Result<Self, SchemarsPluginError> {
        Ok(serde_yaml::from_str(input)?)
    }
}
