//! Rewrites model markers inside operation definitions into references.
//!
//! A **marker** is a bare string sitting where a schema belongs, e.g.
//! `"schema": "Pet"`. Since a schema is never a plain string, markers are
//! unambiguous. Each marker is replaced by `{"$ref": "<template>Pet"}`,
//! registering the model first if the component store does not know it yet.
//!
//! Schema positions visited per OpenAPI major version:
//!
//! | Location                         | 2.x | 3.x |
//! |----------------------------------|-----|-----|
//! | `parameters[].schema`            |  ✓  |  ✓  |
//! | `parameters[].content.*.schema`  |     |  ✓  |
//! | `requestBody.content.*.schema`   |     |  ✓  |
//! | `responses.*.schema`             |  ✓  |     |
//! | `responses.*.content.*.schema`   |     |  ✓  |
//! | `responses.*.headers.*.schema`   |     |  ✓  |
//!
//! Within a slot, markers are also replaced in `items`,
//! `additionalProperties`, `not` and the members of `allOf`/`anyOf`/`oneOf`.

use apispec_core::{
    components::Components,
    document::{Operations, REF_KEY, reference},
    error::{ApiSpecError, Result},
    model::{ModelRegistry, ReferenceTemplate},
    operation::HttpMethod,
    version::OpenApiVersion,
};
use serde_json::{Map, Value};

use crate::extractor::SchemaExtractor;

const NESTED_SCHEMA_KEYS: &[&str] = &["items", "additionalProperties", "not"];
const SCHEMA_LIST_KEYS: &[&str] = &["allOf", "anyOf", "oneOf"];

#[derive(Debug, Clone)]
pub struct SchemaResolver {
    extractor: SchemaExtractor,
}

/// Per-call borrows threaded through the walk.
struct Scope<'a> {
    models: &'a ModelRegistry,
    components: &'a mut Components,
}

impl SchemaResolver {
    pub fn new(extractor: SchemaExtractor) -> Self {
        Self { extractor }
    }

    pub fn template(&self) -> &ReferenceTemplate {
        self.extractor.template()
    }

    pub fn version(&self) -> &OpenApiVersion {
        self.extractor.version()
    }

    pub fn extractor(&self) -> &SchemaExtractor {
        &self.extractor
    }

    /// Resolve every marker in `operations` in place. `None` is a no-op.
    ///
    /// # Errors
    ///
    /// * [`ApiSpecError::ModelNotFound`] – a marker names neither a component
    ///   nor a model in `models`.
    /// * [`ApiSpecError::InvalidOperation`] – a method entry is not an object.
    /// * Anything raised while extracting a model.
    pub fn resolve_operations(
        &self,
        path: Option<&str>,
        operations: Option<&mut Operations>,
        models: &ModelRegistry,
        components: &mut Components,
    ) -> Result<()> {
        let Some(operations) = operations else {
            return Ok(());
        };

        let mut scope = Scope { models, components };

        for (key, operation) in operations.iter_mut() {
            if key == "parameters" {
                self.resolve_parameters(operation, &mut scope)?;
                continue;
            }

            if !HttpMethod::is_method_key(key) {
                continue;
            }

            let Value::Object(operation) = operation else {
                return Err(ApiSpecError::InvalidOperation {
                    path: path.map(str::to_owned),
                    method: key.clone(),
                    reason: "operation must be an object".into(),
                });
            };

            self.resolve_operation(operation, &mut scope)?;
        }

        Ok(())
    }

    /// Resolve a single schema value (marker, literal or reference).
    pub fn resolve_schema_value(
        &self,
        schema: &mut Value,
        models: &ModelRegistry,
        components: &mut Components,
    ) -> Result<()> {
        self.resolve_schema(schema, &mut Scope { models, components })
    }

    fn resolve_operation(&self, operation: &mut Map<String, Value>, scope: &mut Scope<'_>) -> Result<()> {
        if let Some(parameters) = operation.get_mut("parameters") {
            self.resolve_parameters(parameters, scope)?;
        }

        if self.version().is_v3() {
            if let Some(body) = operation.get_mut("requestBody") {
                self.resolve_content(body, scope)?;
            }
        }

        if let Some(Value::Object(responses)) = operation.get_mut("responses") {
            for response in responses.values_mut() {
                self.resolve_response(response, scope)?;
            }
        }

        Ok(())
    }

    fn resolve_parameters(&self, parameters: &mut Value, scope: &mut Scope<'_>) -> Result<()> {
        let Value::Array(parameters) = parameters else {
            return Ok(());
        };

        for parameter in parameters.iter_mut() {
            if let Some(schema) = parameter.get_mut("schema") {
                self.resolve_schema(schema, scope)?;
            }
            if self.version().is_v3() {
                self.resolve_content(parameter, scope)?;
            }
        }

        Ok(())
    }

    fn resolve_response(&self, response: &mut Value, scope: &mut Scope<'_>) -> Result<()> {
        if self.version().is_v2() {
            if let Some(schema) = response.get_mut("schema") {
                self.resolve_schema(schema, scope)?;
            }
            return Ok(());
        }

        self.resolve_content(response, scope)?;

        if let Some(Value::Object(headers)) = response.get_mut("headers") {
            for header in headers.values_mut() {
                if let Some(schema) = header.get_mut("schema") {
                    self.resolve_schema(schema, scope)?;
                }
            }
        }

        Ok(())
    }

    /// `holder.content.<media type>.schema`
    fn resolve_content(&self, holder: &mut Value, scope: &mut Scope<'_>) -> Result<()> {
        let Some(Value::Object(content)) = holder.get_mut("content") else {
            return Ok(());
        };

        for media_type in content.values_mut() {
            if let Some(schema) = media_type.get_mut("schema") {
                self.resolve_schema(schema, scope)?;
            }
        }

        Ok(())
    }

    fn resolve_schema(&self, schema: &mut Value, scope: &mut Scope<'_>) -> Result<()> {
        match schema {
            Value::String(name) => {
                let pointer = self.reference_for(name, scope)?;
                *schema = reference(pointer);
            }
            Value::Object(map) if !map.contains_key(REF_KEY) => {
                for key in NESTED_SCHEMA_KEYS {
                    if let Some(nested) = map.get_mut(*key) {
                        self.resolve_schema(nested, scope)?;
                    }
                }
                for key in SCHEMA_LIST_KEYS {
                    if let Some(Value::Array(members)) = map.get_mut(*key) {
                        for member in members.iter_mut() {
                            self.resolve_schema(member, scope)?;
                        }
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Pointer for marker `name`, registering the model on first sight.
    fn reference_for(&self, name: &str, scope: &mut Scope<'_>) -> Result<String> {
        let pointer = self.template().render(name);

        if scope.components.contains_schema(name) {
            #[cfg(feature = "tracing")]
            tracing::trace!(model = %name, %pointer, "marker points at registered component");
            return Ok(pointer);
        }

        let model = *scope.models.get_or_not_found(name)?;
        let schema = self.extractor.extract_for(name, &model, scope.components)?;
        let _ = scope.components.insert_schema_if_absent(name, schema);

        #[cfg(feature = "tracing")]
        tracing::debug!(model = %name, %pointer, "registered model referenced by operation");

        Ok(pointer)
    }
}
