//! # `apispec` – The umbrella crate
//!
//! This crate is a *one-stop import* that glues together the building-block
//! crates in the workspace
//!
//! | Crate                   | What it provides                                                            |
//! |-------------------------|-----------------------------------------------------------------------------|
//! | **`apispec-core`**      | `ApiSpec`, component store, `Plugin` hooks, model handles, errors           |
//! | **`apispec-operation`** | Fluent builders for operations carrying model markers                       |
//! | **`apispec-schemars`**  | Plugin lifting `schemars` definitions into components *(default feature)*   |
//!
//! Enabling the `tracing` feature makes the schemars plugin emit debug events
//! whenever it lifts a definition, keeps an existing component or resolves a
//! marker.
//!
//! ## Quick example
//!
//! ```rust
//! use apispec::{
//!     ApiSpec,
//!     model::ModelRef,
//!     operation::HttpMethod,
//!     operations::{OperationBuilder, PathOperations, SchemaSlot},
//!     plugin::SchemaOptions,
//!     schemars_plugin::SchemarsPlugin,
//! };
//!
//! #[derive(schemars::JsonSchema)]
//! struct Address { street: String }
//!
//! #[derive(schemars::JsonSchema)]
//! struct User { name: String, address: Address }
//!
//! # fn main() -> apispec::error::Result<()> {
//! let mut spec = ApiSpec::new("Users", "1.0.0", "3.0.2")?
//!     .with_plugin(SchemarsPlugin::default())?;
//!
//! spec.schema("User", SchemaOptions::from_model(ModelRef::of::<User>()))?;
//! spec.path(
//!     "/users",
//!     PathOperations::new().with(
//!         HttpMethod::Get,
//!         OperationBuilder::new().json_response(200, "A user", SchemaSlot::model("User")),
//!     ),
//! )?;
//!
//! let doc = spec.to_value();
//! assert!(doc["components"]["schemas"]["Address"].is_object());
//! assert_eq!(
//!     doc["paths"]["/users"]["get"]["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
//!     "#/components/schemas/User"
//! );
//! # Ok(())
//! # }
//! ```
#![doc(html_root_url = "https://docs.rs/apispec/latest")]

pub use apispec_core::*;
pub use apispec_operation as operations;

#[cfg(feature = "schemars")]
pub use apispec_schemars as schemars_plugin;
