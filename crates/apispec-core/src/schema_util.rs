//! Helpers for turning Rust type information into JSON Schema documents that
//! reference their nested types through a caller-chosen pointer prefix.
//!
//! The JSON is produced with [`schemars`]. Nested types are **not** inlined:
//! they come back under the generator's definitions block, with every use
//! site replaced by a `$ref` pointing at `template.prefix() + name`. Lifting
//! that block into the component store is the job of a plugin.

use schemars::{r#gen::SchemaSettings, JsonSchema};
use serde_json::Value;

use crate::{
    document::SchemaDocument,
    error::{ApiSpecError, Result},
    model::ReferenceTemplate,
    version::OpenApiVersion,
};

/// Generator settings matching the dialect of `version`.
///
/// * 3.0 uses the OpenAPI 3.0 dialect (`nullable: true`, no boolean schemas).
/// * 3.1 and later embed full JSON Schema, so optional values get `null` in
///   their type arrays instead of `nullable`.
/// * 2.x uses draft-07 without `null` in type arrays, which Swagger rejects.
///
/// In both cases the `$schema` meta key is dropped since component schemas
/// are embedded in a larger document.
pub fn schema_settings(template: &ReferenceTemplate, version: &OpenApiVersion) -> SchemaSettings {
    let mut settings = if version.is_v2() {
        let mut settings = SchemaSettings::draft07();
        settings.option_add_null_type = false;
        settings
    } else if version.minor >= 1 {
        SchemaSettings::draft2019_09()
    } else {
        SchemaSettings::openapi3()
    };

    settings.definitions_path = template.prefix().to_owned();
    settings.meta_schema = None;
    settings
}

/// Generate the JSON Schema of `T`, nested definitions included.
///
/// # Errors
///
/// * [`ApiSpecError::Serialization`] – the root schema could not be turned
///   into JSON.
/// * [`ApiSpecError::InvalidSchema`] – the generated schema is not a JSON
///   object (e.g. a boolean schema).
///
/// # Example
///
/// ```
/// use apispec_core::{model::ReferenceTemplate, schema_util::model_json_schema,
///                    version::OpenApiVersion};
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// struct Foo { bar: String }
///
/// let template = ReferenceTemplate::default();
/// let schema = model_json_schema::<Foo>(&template, &OpenApiVersion::V3_0).unwrap();
/// assert_eq!(schema["type"], "object");
/// ```
pub fn model_json_schema<T>(
    template: &ReferenceTemplate,
    version: &OpenApiVersion,
) -> Result<SchemaDocument>
where
    T: JsonSchema + ?Sized,
{
    let generator = schema_settings(template, version).into_generator();
    let root = generator.into_root_schema_for::<T>();

    match serde_json::to_value(root)? {
        Value::Object(document) => Ok(document),
        other => Err(ApiSpecError::InvalidSchema {
            name: T::schema_name(),
            reason: format!("expected a JSON object, got `{other}`"),
        }),
    }
}
