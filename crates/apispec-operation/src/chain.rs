//! Simple **builder** that lines up the operations of a single path.
//!
//! ```text
//! ┌──────────────────┐   with(Get, …)    ┌──────────────────────┐
//! │ OperationBuilder │ ─────────────────►│ "get":  { … }        │
//! ├──────────────────┤   with(Post, …)   ├──────────────────────┤
//! │ OperationBuilder │ ─────────────────►│ "post": { … }        │
//! └──────────────────┘                   └──────────────────────┘
//!                                                   │
//!                          ApiSpec::path(…) ◄───────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use apispec_core::operation::{HttpMethod, IntoOperations};
//! use apispec_operation::{builder::{OperationBuilder, SchemaSlot}, chain::PathOperations};
//!
//! let operations = PathOperations::new()
//!     .with(HttpMethod::Get, OperationBuilder::new().json_response(200, "ok", SchemaSlot::model("Pet")))
//!     .with(HttpMethod::Delete, OperationBuilder::new().response(204, "gone", None))
//!     .into_operations();
//!
//! assert_eq!(operations.keys().collect::<Vec<_>>(), vec!["get", "delete"]);
//! ```
use apispec_core::{
    document::Operations,
    operation::{HttpMethod, IntoOperations},
};
use serde_json::Value;

use crate::builder::OperationBuilder;

/// Accumulates method → operation pairs for one path.
///
/// Adding the same method twice replaces the earlier operation.
#[derive(Debug, Clone, Default)]
pub struct PathOperations(Operations);

impl PathOperations {
    pub fn new() -> Self {
        Self(Operations::new())
    }

    pub fn with(mut self, method: HttpMethod, operation: OperationBuilder) -> Self {
        self.0
            .insert(method.as_str().to_owned(), operation.finalize());
        self
    }

    /// Add a hand-written operation object.
    pub fn with_value(mut self, method: HttpMethod, operation: Value) -> Self {
        self.0.insert(method.as_str().to_owned(), operation);
        self
    }

    /// Path-level parameters shared by every operation.
    pub fn with_parameters(mut self, parameters: Vec<Value>) -> Self {
        self.0
            .insert("parameters".to_owned(), Value::Array(parameters));
        self
    }

    /// Consume the builder and return the accumulated operations.
    pub fn build(self) -> Operations {
        self.0
    }
}

impl IntoOperations for PathOperations {
    fn into_operations(self) -> Operations {
        self.build()
    }
}
