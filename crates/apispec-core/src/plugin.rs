//! Extension points of the host specification.
//!
//! A **plugin** observes declarations made on an
//! [`ApiSpec`](crate::spec::ApiSpec) and may reshape them before they are
//! stored. The trait is intentionally minimal:
//!
//! * **`init_spec`** – called once when the plugin is attached.
//! * **`schema_helper`** – a component schema was declared with a name.
//! * **`operation_helper`** – the operations of a path were declared.
//!
//! Every hook has a no-op default so a plugin only implements what it needs.
//! Hooks are synchronous and receive the component store by mutable
//! reference, which is the only state shared between calls.

use serde_json::{Map, Value};

use crate::{
    components::Components,
    document::{Operations, SchemaDocument},
    error::Result,
    model::ModelRef,
    version::OpenApiVersion,
};

/// Read-only facts about the specification a plugin is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecInfo {
    pub title: String,
    pub version: String,
    pub openapi_version: OpenApiVersion,
}

/// Keyword arguments accompanying a schema declaration.
///
/// Plugins consume the options they understand (e.g. [`Self::take_model`])
/// so later plugins do not act on them twice.
#[derive(Debug, Clone, Default)]
pub struct SchemaOptions {
    pub definition: SchemaDocument,
    pub model: Option<ModelRef>,
    pub extra: Map<String, Value>,
}

impl SchemaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options backed by a data model.
    pub fn from_model(model: ModelRef) -> Self {
        Self {
            model: Some(model),
            ..Self::default()
        }
    }

    /// Options carrying a literal schema body.
    pub fn from_definition(definition: SchemaDocument) -> Self {
        Self {
            definition,
            ..Self::default()
        }
    }

    pub fn with_model(mut self, model: ModelRef) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Remove and return the model, if any.
    pub fn take_model(&mut self) -> Option<ModelRef> {
        self.model.take()
    }
}

pub trait Plugin {
    /// Called once when the plugin is attached to a specification.
    fn init_spec(&mut self, info: &SpecInfo) -> Result<()> {
        let _ = info;
        Ok(())
    }

    /// Return the schema to store for component `name`, or `None` if this
    /// plugin does not handle the declaration.
    fn schema_helper(
        &mut self,
        name: &str,
        definition: &SchemaDocument,
        options: &mut SchemaOptions,
        components: &mut Components,
    ) -> Result<Option<SchemaDocument>> {
        let _ = (name, definition, options, components);
        Ok(None)
    }

    /// Reshape `operations` in place before they are added to `path`.
    fn operation_helper(
        &mut self,
        path: Option<&str>,
        operations: Option<&mut Operations>,
        components: &mut Components,
    ) -> Result<()> {
        let _ = (path, operations, components);
        Ok(())
    }
}
