use std::env;

use apispec_core::{
    document::DEFINITIONS_KEYS,
    error::Result,
    model::{ModelRef, ModelRegistry, ReferenceTemplate},
};
use schemars::JsonSchema;

use crate::{
    config::{REF_TEMPLATE_ENV, SchemarsPluginConfig},
    error::SchemarsPluginError,
    resolver::SchemaResolver,
};

/// Plugin wiring [`schemars`] models into an
/// [`ApiSpec`](apispec_core::ApiSpec).
///
/// * Declaring a schema with a model (`SchemaOptions::from_model`) stores the
///   model's schema, its nested types lifted into separate components.
/// * Declaring a path replaces model markers in the operations with
///   references, registering models on first use.
///
/// The type exposes no user-facing methods besides a few accessors; all
/// functionality sits behind the [`Plugin`](apispec_core::plugin::Plugin)
/// hooks once the plugin is attached.
pub struct SchemarsPlugin {
    pub(crate) ref_template: Option<ReferenceTemplate>,
    pub(crate) definition_keys: Vec<String>,
    pub(crate) models: ModelRegistry,
    pub(crate) resolver: Option<SchemaResolver>,
}

impl SchemarsPlugin {
    /// Models known by name to the operation resolver.
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// The resolver, once `init_spec` has run.
    pub fn resolver(&self) -> Option<&SchemaResolver> {
        self.resolver.as_ref()
    }
}

impl Default for SchemarsPlugin {
    fn default() -> Self {
        Self {
            ref_template: None,
            definition_keys: DEFINITIONS_KEYS.iter().map(|key| key.to_string()).collect(),
            models: ModelRegistry::new(),
            resolver: None,
        }
    }
}

/// Builder for [`SchemarsPlugin`].
///
/// # Typical usage
///
/// ```rust
/// use apispec_schemars::SchemarsPluginBuilder;
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// struct Pet { name: String }
///
/// let plugin = SchemarsPluginBuilder::new_from_env()
///     .with_model::<Pet>()
///     .build()
///     .expect("APISPEC_REF_TEMPLATE must end in `{model}` when set");
/// ```
///
/// The builder pattern keeps future options backwards compatible without
/// breaking existing `build()` calls.
#[derive(Debug, Default)]
pub struct SchemarsPluginBuilder {
    pub(crate) ref_template: Option<String>,
    pub(crate) definition_keys: Option<Vec<String>>,
    pub(crate) models: ModelRegistry,
}

impl SchemarsPluginBuilder {
    /// Create an *empty* builder; the reference template will follow the
    /// specification's OpenAPI version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor that tries to load the `APISPEC_REF_TEMPLATE`
    /// environment variable.
    ///
    /// # Panics
    ///
    /// Never panics. Invalid templates only surface during [`Self::build`].
    pub fn new_from_env() -> Self {
        Self {
            ref_template: env::var(REF_TEMPLATE_ENV).ok(),
            ..Self::default()
        }
    }

    /// Start from a declarative configuration.
    pub fn from_config(config: SchemarsPluginConfig) -> Self {
        Self {
            ref_template: config.ref_template,
            definition_keys: config.definition_keys,
            models: ModelRegistry::new(),
        }
    }

    pub fn with_ref_template(mut self, template: impl Into<String>) -> Self {
        self.ref_template = Some(template.into());
        self
    }

    /// Replace the keys checked for nested definitions.
    pub fn with_definition_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.definition_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Make `T` resolvable by its schema name.
    pub fn with_model<T: JsonSchema>(mut self) -> Self {
        self.models.register(ModelRef::of::<T>());
        self
    }

    /// Make `T` resolvable as `name`.
    pub fn with_model_as<T: JsonSchema>(mut self, name: impl Into<String>) -> Self {
        self.models.register_as(name, ModelRef::of::<T>());
        self
    }

    /// Finalise the builder.
    ///
    /// # Errors
    ///
    /// * [`ApiSpecError::InvalidReferenceTemplate`](apispec_core::error::ApiSpecError::InvalidReferenceTemplate)
    ///   – the template does not end in `{model}`.
    /// * [`ApiSpecError::Plugin`](apispec_core::error::ApiSpecError::Plugin) –
    ///   the definitions keys are empty or blank.
    pub fn build(self) -> Result<SchemarsPlugin> {
        let ref_template = self
            .ref_template
            .as_deref()
            .map(ReferenceTemplate::new)
            .transpose()?;

        let definition_keys = match self.definition_keys {
            None => DEFINITIONS_KEYS.iter().map(|key| key.to_string()).collect(),
            Some(keys) if keys.is_empty() => return Err(SchemarsPluginError::NoDefinitionKeys.into()),
            Some(keys) if keys.iter().any(|key| key.trim().is_empty()) => {
                return Err(SchemarsPluginError::BlankDefinitionKey.into());
            }
            Some(keys) => keys,
        };

        Ok(SchemarsPlugin {
            ref_template,
            definition_keys,
            models: self.models,
            resolver: None,
        })
    }
}
