use apispec::{
    ApiSpec,
    model::ModelRef,
    operation::HttpMethod,
    operations::{OperationBuilder, ParameterLocation, PathOperations, SchemaSlot},
    plugin::SchemaOptions,
    schemars_plugin::SchemarsPluginBuilder,
};
use schemars::JsonSchema;
use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Example  –  Petstore document from `schemars` models
///
/// **Running the demo**
/// ```bash
/// cargo run -p apispec --example petstore            # YAML
/// cargo run -p apispec --example petstore -- --json  # JSON
/// ```
///
/// `Category` and `Tag` are never declared explicitly: they are lifted out of
/// `Pet`'s schema into `components/schemas`. `ApiError` is only mentioned by
/// name inside an operation and is registered on first use.
/// ---------------------------------------------------------------------------

#[allow(dead_code)]
#[derive(Serialize, JsonSchema)]
struct Category {
    id: u64,
    name: String,
}

#[allow(dead_code)]
#[derive(Serialize, JsonSchema)]
struct Tag {
    id: u64,
    name: String,
}

#[allow(dead_code)]
#[derive(Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
enum PetStatus {
    Available,
    Pending,
    Sold,
}

/// A pet for sale in the pet store.
#[allow(dead_code)]
#[derive(Serialize, JsonSchema)]
struct Pet {
    id: u64,
    name: String,
    category: Option<Category>,
    tags: Vec<Tag>,
    status: PetStatus,
}

#[allow(dead_code)]
#[derive(Serialize, JsonSchema)]
struct ApiError {
    code: u16,
    message: String,
}

fn main() -> anyhow::Result<()> {
    let plugin = SchemarsPluginBuilder::new_from_env()
        .with_model::<ApiError>()
        .build()?;

    let mut spec = ApiSpec::new("Swagger Petstore", "1.0.0", "3.0.2")?.with_plugin(plugin)?;

    spec.schema("Pet", SchemaOptions::from_model(ModelRef::of::<Pet>()))?;

    spec.path(
        "/pet",
        PathOperations::new()
            .with(
                HttpMethod::Post,
                OperationBuilder::new()
                    .summary("Add a new pet to the store")
                    .operation_id("addPet")
                    .tag("pet")
                    .json_body(SchemaSlot::model("Pet"))
                    .json_response(200, "Successful operation", SchemaSlot::model("Pet"))
                    .json_response(400, "Invalid input", SchemaSlot::model("ApiError")),
            )
            .with(
                HttpMethod::Get,
                OperationBuilder::new()
                    .summary("List pets")
                    .operation_id("listPets")
                    .tag("pet")
                    .parameter(
                        ParameterLocation::Query,
                        "status",
                        false,
                        SchemaSlot::model("PetStatus"),
                    )
                    .json_response(200, "Successful operation", SchemaSlot::array_of("Pet")),
            ),
    )?;

    spec.path(
        "/pet/{petId}",
        PathOperations::new().with(
            HttpMethod::Get,
            OperationBuilder::new()
                .summary("Find pet by ID")
                .operation_id("getPetById")
                .parameter(
                    ParameterLocation::Path,
                    "petId",
                    true,
                    SchemaSlot::inline_type("integer"),
                )
                .json_response(200, "Successful operation", SchemaSlot::model("Pet"))
                .json_response(404, "Pet not found", SchemaSlot::model("ApiError")),
        ),
    )?;

    if std::env::args().any(|arg| arg == "--json") {
        println!("{}", spec.to_json_pretty()?);
    } else {
        println!("{}", spec.to_yaml()?);
    }

    Ok(())
}
