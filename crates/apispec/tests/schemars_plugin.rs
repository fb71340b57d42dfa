use apispec::{
    ApiSpec,
    components::Registration,
    error::ApiSpecError,
    model::ModelRef,
    operation::HttpMethod,
    operations::{OperationBuilder, PathOperations, SchemaSlot},
    plugin::{Plugin, SchemaOptions},
    schemars_plugin::{SchemarsPlugin, SchemarsPluginBuilder, SchemarsPluginConfig},
};
use pretty_assertions::assert_eq;
use schemars::JsonSchema;
use serde_json::{Value, json};

#[allow(dead_code)]
#[derive(JsonSchema)]
struct Address {
    street: String,
    city: String,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct User {
    name: String,
    address: Address,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct Pet {
    name: String,
}

#[allow(dead_code)]
#[derive(JsonSchema)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

fn spec(openapi_version: &str) -> ApiSpec {
    ApiSpec::new("test", "1.0.0", openapi_version)
        .unwrap()
        .with_plugin(SchemarsPlugin::default())
        .unwrap()
}

#[test]
fn user_with_nested_address_becomes_two_components() {
    let mut spec = spec("3.0.2");

    spec.schema("User", SchemaOptions::from_model(ModelRef::of::<User>()))
        .unwrap();

    let components = spec.components();
    assert_eq!(components.schema_names().collect::<Vec<_>>(), vec!["Address", "User"]);

    let mut user = components.get_schema("User").unwrap().clone();
    let required = user.remove("required").unwrap();
    assert_eq!(
        Value::Object(user),
        json!({
            "title": "User",
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "address": { "$ref": "#/components/schemas/Address" }
            }
        })
    );

    let mut required: Vec<_> = required
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    required.sort_unstable();
    assert_eq!(required, vec!["address", "name"]);
}

#[test]
fn model_declared_then_referenced_round_trips() {
    let mut spec = spec("3.0.2");
    spec.schema("Pet", SchemaOptions::from_model(ModelRef::of::<Pet>()))
        .unwrap();

    spec.path(
        "/pets/{id}",
        PathOperations::new().with(
            HttpMethod::Get,
            OperationBuilder::new().json_response(200, "ok", SchemaSlot::model("Pet")),
        ),
    )
    .unwrap();

    let doc = spec.to_value();
    let pointer = doc["paths"]["/pets/{id}"]["get"]["responses"]["200"]["content"]["application/json"]
        ["schema"]["$ref"]
        .as_str()
        .unwrap();
    assert_eq!(pointer, "#/components/schemas/Pet");

    let name = pointer.rsplit('/').next().unwrap();
    assert!(doc["components"]["schemas"][name].is_object());
}

#[test]
fn operations_register_unseen_models_on_first_use() {
    let plugin = SchemarsPluginBuilder::new()
        .with_model::<User>()
        .build()
        .unwrap();
    let mut spec = ApiSpec::new("test", "1", "3.1.0")
        .unwrap()
        .with_plugin(plugin)
        .unwrap();

    spec.path(
        "/users",
        PathOperations::new()
            .with(HttpMethod::Post, OperationBuilder::new().json_body(SchemaSlot::model("User")))
            .with(
                HttpMethod::Get,
                OperationBuilder::new().json_response(200, "all", SchemaSlot::array_of("User")),
            ),
    )
    .unwrap();

    let names: Vec<_> = spec.components().schema_names().collect();
    assert_eq!(names, vec!["Address", "User"]);
    assert_eq!(
        spec.paths()["/users"]["get"]["responses"]["200"]["content"]["application/json"]["schema"],
        json!({ "type": "array", "items": { "$ref": "#/components/schemas/User" } })
    );
}

#[test]
fn unknown_model_marker_fails_the_whole_path() {
    let mut spec = spec("3.0.2");

    let err = spec
        .path(
            "/cats",
            PathOperations::new().with(
                HttpMethod::Get,
                OperationBuilder::new().json_response(200, "ok", SchemaSlot::model("Cat")),
            ),
        )
        .unwrap_err();

    assert!(matches!(err, ApiSpecError::ModelNotFound { ref name } if name == "Cat"));
    assert!(spec.paths().get("/cats").is_none());
    assert_eq!(err.to_string(), "model `Cat` is not registered");
}

/// Rejects every schema declaration.
struct RejectSchemas;

impl Plugin for RejectSchemas {
    fn schema_helper(
        &mut self,
        name: &str,
        _definition: &apispec::document::SchemaDocument,
        _options: &mut SchemaOptions,
        _components: &mut apispec::components::Components,
    ) -> apispec::error::Result<Option<apispec::document::SchemaDocument>> {
        Err(ApiSpecError::InvalidSchema {
            name: name.to_owned(),
            reason: "rejected".into(),
        })
    }
}

#[test]
fn failed_path_keeps_no_components_from_earlier_markers() {
    let plugin = SchemarsPluginBuilder::new()
        .with_model::<User>()
        .build()
        .unwrap();
    let mut spec = ApiSpec::new("test", "1", "3.0.2")
        .unwrap()
        .with_plugin(plugin)
        .unwrap();

    let err = spec
        .path(
            "/users",
            PathOperations::new().with(
                HttpMethod::Post,
                OperationBuilder::new()
                    .json_body(SchemaSlot::model("User"))
                    .json_response(400, "bad", SchemaSlot::model("Cat")),
            ),
        )
        .unwrap_err();

    assert!(matches!(err, ApiSpecError::ModelNotFound { ref name } if name == "Cat"));
    assert!(spec.paths().is_empty());
    assert!(spec.components().is_empty());
    assert!(spec.to_value().get("components").is_none());
}

#[test]
fn failed_schema_keeps_no_lifted_definitions() {
    let mut spec = spec("3.0.2").with_plugin(RejectSchemas).unwrap();

    let err = spec
        .schema("User", SchemaOptions::from_model(ModelRef::of::<User>()))
        .unwrap_err();

    assert!(matches!(err, ApiSpecError::InvalidSchema { ref name, .. } if name == "User"));
    assert!(!spec.components().contains_schema("Address"));
    assert!(spec.components().is_empty());
}

#[test]
fn resolver_used_before_attachment_is_a_usage_error() {
    let mut plugin = SchemarsPlugin::default();
    let mut components = apispec::components::Components::new();

    let err = plugin
        .operation_helper(Some("/x"), None, &mut components)
        .unwrap_err();

    assert!(matches!(err, ApiSpecError::ResolverNotInitialized));
}

#[test]
fn first_registered_body_wins_on_conflict() {
    let mut spec = spec("3.0.2");
    let existing = json!({ "type": "string", "description": "hand written" });
    assert_eq!(
        spec.components_mut()
            .insert_schema_if_absent("Address", existing.as_object().cloned().unwrap()),
        Registration::Inserted
    );

    spec.schema("User", SchemaOptions::from_model(ModelRef::of::<User>()))
        .unwrap();

    assert_eq!(
        Value::Object(spec.components().get_schema("Address").unwrap().clone()),
        existing
    );
}

#[test]
fn self_referential_models_register_once() {
    let mut spec = spec("3.0.2");

    spec.schema("TreeNode", SchemaOptions::from_model(ModelRef::of::<TreeNode>()))
        .unwrap();

    assert_eq!(
        spec.components().schema_names().collect::<Vec<_>>(),
        vec!["TreeNode"]
    );
    assert_eq!(
        spec.components().get_schema("TreeNode").unwrap()["properties"]["children"]["items"],
        json!({ "$ref": "#/components/schemas/TreeNode" })
    );
}

#[test]
fn swagger_documents_use_definitions() {
    let mut spec = spec("2.0");
    let version = *spec.openapi_version();
    spec.schema("User", SchemaOptions::from_model(ModelRef::of::<User>()))
        .unwrap();
    spec.path(
        "/users",
        PathOperations::new().with(
            HttpMethod::Post,
            OperationBuilder::for_version(version)
                .json_body(SchemaSlot::model("User"))
                .response(201, "created", None),
        ),
    )
    .unwrap();

    let doc = spec.to_value();
    assert_eq!(doc["swagger"], "2.0");
    assert!(doc.get("components").is_none());
    assert_eq!(
        doc["definitions"]["User"]["properties"]["address"],
        json!({ "$ref": "#/definitions/Address" })
    );
    assert_eq!(
        doc["paths"]["/users"]["post"]["parameters"][0]["schema"],
        json!({ "$ref": "#/definitions/User" })
    );
}

#[test]
fn plugin_configured_from_yaml() {
    let config = SchemarsPluginConfig::from_yaml_str(
        "ref_template: '#/components/schemas/{model}'\ndefinition_keys: ['definitions']\n",
    )
    .unwrap();
    let plugin = SchemarsPluginBuilder::from_config(config).build().unwrap();
    let mut spec = ApiSpec::new("test", "1", "3.0.0")
        .unwrap()
        .with_plugin(plugin)
        .unwrap();

    spec.schema("User", SchemaOptions::from_model(ModelRef::of::<User>()))
        .unwrap();

    assert!(spec.components().contains_schema("Address"));
    assert!(spec.to_yaml().unwrap().contains("#/components/schemas/Address"));
}
