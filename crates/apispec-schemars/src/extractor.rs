//! Turns a data model into a component schema whose nested types live in
//! the component store.
//!
//! The model renders every nested type as a `$ref` pointing into the
//! component namespace and ships the referenced bodies in a definitions
//! block. Extraction lifts that block into [`Components`] (first
//! registration wins) and strips it from the returned document.

use apispec_core::{
    components::{Components, Registration},
    document::{DEFINITIONS_KEYS, SchemaDocument, take_definitions},
    error::{ApiSpecError, Result},
    model::{DataModel, ReferenceTemplate},
    version::OpenApiVersion,
};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct SchemaExtractor {
    template: ReferenceTemplate,
    version: OpenApiVersion,
    definition_keys: Vec<String>,
}

impl SchemaExtractor {
    pub fn new(template: ReferenceTemplate, version: OpenApiVersion) -> Self {
        Self {
            template,
            version,
            definition_keys: DEFINITIONS_KEYS.iter().map(|key| key.to_string()).collect(),
        }
    }

    pub fn with_definition_keys(mut self, keys: Vec<String>) -> Self {
        self.definition_keys = keys;
        self
    }

    pub fn template(&self) -> &ReferenceTemplate {
        &self.template
    }

    pub fn version(&self) -> &OpenApiVersion {
        &self.version
    }

    pub fn definition_keys(&self) -> &[String] {
        &self.definition_keys
    }

    /// Produce `model`'s schema and lift its nested definitions.
    ///
    /// Calling this twice with the same model leaves the store unchanged the
    /// second time and returns an equal document.
    ///
    /// # Errors
    ///
    /// * Whatever the model returns while producing its schema.
    /// * [`ApiSpecError::InvalidSchema`] – a definitions block or a nested
    ///   definition is not a JSON object. Nothing is registered in that case.
    pub fn extract(
        &self,
        model: &dyn DataModel,
        components: &mut Components,
    ) -> Result<SchemaDocument> {
        self.extract_inner(model, None, components)
    }

    /// Like [`Self::extract`], but leaves a definition named `name` for the
    /// caller to register.
    ///
    /// Self-referential models list themselves among their own definitions;
    /// the caller is about to store the top-level document under `name`, so
    /// lifting it here would only produce a clash.
    pub fn extract_for(
        &self,
        name: &str,
        model: &dyn DataModel,
        components: &mut Components,
    ) -> Result<SchemaDocument> {
        self.extract_inner(model, Some(name), components)
    }

    fn extract_inner(
        &self,
        model: &dyn DataModel,
        reserved: Option<&str>,
        components: &mut Components,
    ) -> Result<SchemaDocument> {
        let mut schema = model.json_schema(&self.template, &self.version)?;
        let lifted = take_definitions(&mut schema, &self.definition_keys)?;

        let mut definitions = Vec::with_capacity(lifted.len());
        for (name, fragment) in lifted {
            match fragment {
                Value::Object(fragment) => definitions.push((name, fragment)),
                other => {
                    return Err(ApiSpecError::InvalidSchema {
                        name,
                        reason: format!(
                            "nested definition of `{}` is not an object: `{other}`",
                            model.name()
                        ),
                    });
                }
            }
        }

        for (name, fragment) in definitions {
            if reserved == Some(name.as_str()) {
                continue;
            }

            match components.insert_schema_if_absent(name.as_str(), fragment) {
                Registration::Inserted => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(component = %name, model = %model.name(), "lifted nested definition");
                }
                Registration::AlreadyPresent => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(component = %name, model = %model.name(), "component already registered; keeping existing body");
                }
            }
        }

        Ok(schema)
    }
}
