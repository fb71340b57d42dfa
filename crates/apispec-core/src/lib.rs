//! Building blocks of the **apispec** workspace: the host specification,
//! its component store, the plugin hooks and the shared error type.
//!
//! Plugin crates (e.g. `apispec-schemars`) depend on this crate only; users
//! usually go through the `apispec` umbrella crate instead.

pub mod components;
pub mod document;
pub mod error;
pub mod model;
pub mod operation;
pub mod plugin;
pub mod schema_util;
pub mod spec;
pub mod version;

pub use spec::ApiSpec;
