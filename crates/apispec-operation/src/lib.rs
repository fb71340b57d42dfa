//! Fluent builders for operation definitions.
//!
//! * [`builder::OperationBuilder`] – one operation (`get`, `post`, …).
//! * [`chain::PathOperations`] – all operations of a path, ready for
//!   `ApiSpec::path`.

pub mod builder;
pub mod chain;

pub use builder::{OperationBuilder, ParameterLocation, SchemaSlot};
pub use chain::PathOperations;
