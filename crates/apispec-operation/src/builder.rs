//! Builder-style helper for constructing **operation definitions**.
//!
//! Writing nested `json!` literals for every endpoint is tedious and easy to
//! get subtly wrong (`requestBody` vs. `body` parameters, `content` maps, …).
//! `OperationBuilder` offers a fluent API that emits the right shape for the
//! target OpenAPI version. Every method returns `self`, enabling
//! call-chaining:
//!
//! ```rust
//! use apispec_operation::builder::{OperationBuilder, ParameterLocation, SchemaSlot};
//!
//! let op = OperationBuilder::new()
//!     .summary("Fetch a pet")
//!     .operation_id("getPet")
//!     .parameter(ParameterLocation::Path, "id", true, SchemaSlot::inline_type("integer"))
//!     .json_response(200, "The pet", SchemaSlot::model("Pet"))
//!     .response(404, "No such pet", None)
//!     .finalize();
//!
//! assert_eq!(op["responses"]["200"]["content"]["application/json"]["schema"], "Pet");
//! ```
//!
//! Model slots are emitted as **markers**: the bare model name where a schema
//! belongs. A resolver plugin later swaps each marker for a `$ref` to the
//! registered component.

use apispec_core::version::OpenApiVersion;
use serde_json::{Map, Value, json};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content of a schema position inside an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSlot {
    /// Marker naming a model or component.
    Model(String),
    /// Array whose items are the named model.
    ArrayOf(String),
    /// Literal schema, kept as-is.
    Inline(Value),
}

impl SchemaSlot {
    pub fn model(name: impl Into<String>) -> Self {
        SchemaSlot::Model(name.into())
    }

    pub fn array_of(name: impl Into<String>) -> Self {
        SchemaSlot::ArrayOf(name.into())
    }

    /// Shorthand for `{"type": <ty>}`.
    pub fn inline_type(ty: &str) -> Self {
        SchemaSlot::Inline(json!({ "type": ty }))
    }

    pub fn into_value(self) -> Value {
        match self {
            SchemaSlot::Model(name) => Value::String(name),
            SchemaSlot::ArrayOf(name) => json!({ "type": "array", "items": name }),
            SchemaSlot::Inline(value) => value,
        }
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

/// Fluent helper to produce a single operation object.
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    version: OpenApiVersion,
    operation: Map<String, Value>,
}

impl Default for OperationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationBuilder {
    /// Builder emitting OpenAPI 3.x shapes.
    pub fn new() -> Self {
        Self::for_version(OpenApiVersion::default())
    }

    pub fn for_version(version: OpenApiVersion) -> Self {
        Self {
            version,
            operation: Map::new(),
        }
    }

    pub fn summary(self, summary: impl Into<String>) -> Self {
        self.field("summary", Value::String(summary.into()))
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.field("description", Value::String(description.into()))
    }

    pub fn operation_id(self, id: impl Into<String>) -> Self {
        self.field("operationId", Value::String(id.into()))
    }

    /// Append a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        push(&mut self.operation, "tags", Value::String(tag.into()));
        self
    }

    /// Set an arbitrary field (`deprecated`, `security`, `x-…`).
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.operation.insert(key.into(), value);
        self
    }

    /// Add a non-body parameter. Path parameters are always required.
    ///
    /// On 2.x an inline slot is flattened into the parameter (`type`,
    /// `format`, …) since Swagger parameters carry no `schema` outside the
    /// body.
    pub fn parameter(
        mut self,
        location: ParameterLocation,
        name: impl Into<String>,
        required: bool,
        slot: SchemaSlot,
    ) -> Self {
        let mut parameter = Map::new();
        parameter.insert("name".into(), Value::String(name.into()));
        parameter.insert("in".into(), Value::String(location.as_str().into()));
        parameter.insert(
            "required".into(),
            Value::Bool(required || location == ParameterLocation::Path),
        );

        match (self.version.is_v2(), slot) {
            (true, SchemaSlot::Inline(Value::Object(fields))) => parameter.extend(fields),
            (_, slot) => {
                parameter.insert("schema".into(), slot.into_value());
            }
        }

        push(&mut self.operation, "parameters", Value::Object(parameter));
        self
    }

    /// Describe the request body.
    pub fn request_body(mut self, content_type: &str, slot: SchemaSlot) -> Self {
        if self.version.is_v2() {
            let parameter = json!({
                "name": "body",
                "in": "body",
                "required": true,
                "schema": slot.into_value(),
            });
            push(&mut self.operation, "parameters", parameter);
            return self;
        }

        let body = self
            .operation
            .entry("requestBody")
            .or_insert_with(|| json!({ "required": true, "content": {} }));
        body["content"][content_type] = json!({ "schema": slot.into_value() });
        self
    }

    pub fn json_body(self, slot: SchemaSlot) -> Self {
        self.request_body(JSON_CONTENT_TYPE, slot)
    }

    /// Describe the response for `status`, optionally with a body.
    pub fn response(
        mut self,
        status: u16,
        description: impl Into<String>,
        body: Option<(&str, SchemaSlot)>,
    ) -> Self {
        let mut response = Map::new();
        response.insert("description".into(), Value::String(description.into()));

        if let Some((content_type, slot)) = body {
            if self.version.is_v2() {
                response.insert("schema".into(), slot.into_value());
            } else {
                response.insert(
                    "content".into(),
                    json!({ content_type: { "schema": slot.into_value() } }),
                );
            }
        }

        let responses = self
            .operation
            .entry("responses")
            .or_insert_with(|| Value::Object(Map::new()));
        responses[status.to_string()] = Value::Object(response);
        self
    }

    pub fn json_response(self, status: u16, description: impl Into<String>, slot: SchemaSlot) -> Self {
        self.response(status, description, Some((JSON_CONTENT_TYPE, slot)))
    }

    /// Retrieve the assembled operation and consume the builder.
    pub fn finalize(self) -> Value {
        Value::Object(self.operation)
    }
}

fn push(operation: &mut Map<String, Value>, key: &str, value: Value) {
    let list = operation
        .entry(key)
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(list) = list {
        list.push(value);
    }
}
