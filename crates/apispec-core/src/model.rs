//! Data-model handles and the lookup table used to resolve model markers.
//!
//! A *model* is anything that can describe itself as a JSON Schema document.
//! For Rust types this is [`schemars::JsonSchema`]; [`ModelRef::of`] erases
//! the concrete type so models can be stored side by side, embedded in
//! [`SchemaOptions`](crate::plugin::SchemaOptions) or looked up by name.
//!
//! ```rust
//! use apispec_core::model::{DataModel, ModelRef, ModelRegistry};
//! use schemars::JsonSchema;
//!
//! #[derive(JsonSchema)]
//! struct Pet { name: String }
//!
//! let mut registry = ModelRegistry::new();
//! registry.register(ModelRef::of::<Pet>());
//!
//! assert_eq!(registry.get("Pet").map(|m| m.name().into_owned()), Some("Pet".to_string()));
//! ```

use std::{borrow::Cow, collections::HashMap, fmt, str::FromStr};

use schemars::JsonSchema;

use crate::{
    document::SchemaDocument,
    error::{ApiSpecError, Result},
    schema_util::model_json_schema,
    version::OpenApiVersion,
};

/// Placeholder substituted with a model name when rendering a reference.
pub const MODEL_PLACEHOLDER: &str = "{model}";

/// Pointer template such as `#/components/schemas/{model}`.
///
/// The placeholder must appear exactly once, at the very end, because the
/// schema generator can only prepend a fixed prefix to definition names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceTemplate {
    prefix: String,
}

impl ReferenceTemplate {
    /// Parse a template string.
    ///
    /// # Errors
    ///
    /// [`ApiSpecError::InvalidReferenceTemplate`] if `{model}` is missing,
    /// repeated or not the final component.
    pub fn new(template: &str) -> Result<Self> {
        match template.strip_suffix(MODEL_PLACEHOLDER) {
            Some(prefix) if !prefix.contains(MODEL_PLACEHOLDER) => Ok(Self {
                prefix: prefix.to_owned(),
            }),
            _ => Err(ApiSpecError::InvalidReferenceTemplate(template.to_owned())),
        }
    }

    /// Default template for the given version.
    pub fn for_version(version: &OpenApiVersion) -> Self {
        Self {
            prefix: version
                .default_ref_template()
                .trim_end_matches(MODEL_PLACEHOLDER)
                .to_owned(),
        }
    }

    /// Everything before the placeholder.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Substitute `name` into the template.
    pub fn render(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }
}

impl Default for ReferenceTemplate {
    fn default() -> Self {
        Self::for_version(&OpenApiVersion::default())
    }
}

impl FromStr for ReferenceTemplate {
    type Err = ApiSpecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for ReferenceTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{MODEL_PLACEHOLDER}", self.prefix)
    }
}

/// Something that can produce its own JSON Schema document.
pub trait DataModel {
    /// Canonical name; used as component name unless the caller picks another.
    fn name(&self) -> Cow<'_, str>;

    /// Produce the schema, rendering nested references with `template`.
    fn json_schema(
        &self,
        template: &ReferenceTemplate,
        version: &OpenApiVersion,
    ) -> Result<SchemaDocument>;
}

/// Type-erased handle to a [`JsonSchema`] type.
///
/// Only two function pointers are stored, so cloning is free and the handle
/// is `Send + Sync` regardless of `T`.
#[derive(Clone, Copy)]
pub struct ModelRef {
    name: fn() -> String,
    schema: fn(&ReferenceTemplate, &OpenApiVersion) -> Result<SchemaDocument>,
}

impl ModelRef {
    pub fn of<T>() -> Self
    where
        T: JsonSchema + ?Sized,
    {
        Self {
            name: T::schema_name,
            schema: model_json_schema::<T>,
        }
    }
}

impl DataModel for ModelRef {
    fn name(&self) -> Cow<'_, str> {
        Cow::Owned((self.name)())
    }

    fn json_schema(
        &self,
        template: &ReferenceTemplate,
        version: &OpenApiVersion,
    ) -> Result<SchemaDocument> {
        (self.schema)(template, version)
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelRef").field(&(self.name)()).finish()
    }
}

/// Name → model lookup used when operations mention models by name.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelRef>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `model` under its canonical name. Returns `false` (and keeps
    /// the existing entry) if the name is already taken.
    pub fn register(&mut self, model: ModelRef) -> bool {
        let name = model.name().into_owned();
        self.register_as(name, model)
    }

    /// Register `model` under an explicit name.
    pub fn register_as(&mut self, name: impl Into<String>, model: ModelRef) -> bool {
        match self.models.entry(name.into()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(model);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ModelRef> {
        self.models.get(name)
    }

    /// Like [`Self::get`] but fails with [`ApiSpecError::ModelNotFound`].
    pub fn get_or_not_found(&self, name: &str) -> Result<&ModelRef> {
        self.get(name).ok_or_else(|| ApiSpecError::ModelNotFound {
            name: name.to_owned(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
