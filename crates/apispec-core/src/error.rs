//! Unified error type exposed by **`apispec-core`**.
//!
//! Plugin crates should convert their internal errors into one of these
//! variants before bubbling them up to the [`ApiSpec`](crate::spec::ApiSpec).
//! Callers only ever match on a single enum, no matter which plugin raised
//! the failure.

use thiserror::Error;

use crate::components::ComponentKind;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ApiSpecError>;

#[derive(Debug, Error)]
pub enum ApiSpecError {
    /// An operation hook ran on a plugin whose `init_spec` was never called.
    #[error("schema resolver was not initialized; register the plugin with an `ApiSpec` first")]
    ResolverNotInitialized,

    /// A strict registration hit a component name that is already taken.
    #[error("another {kind} component with name `{name}` is already registered")]
    DuplicateComponentName { kind: ComponentKind, name: String },

    /// A model marker inside an operation names neither a registered component
    /// nor a known model.
    #[error("model `{name}` is not registered")]
    ModelNotFound { name: String },

    #[error("unsupported OpenAPI version `{0}`")]
    InvalidOpenApiVersion(String),

    #[error("invalid reference template `{0}`: expected a single trailing `{{model}}` placeholder")]
    InvalidReferenceTemplate(String),

    /// The data-model library produced something that is not a JSON object.
    #[error("invalid schema for `{name}`: {reason}")]
    InvalidSchema { name: String, reason: String },

    #[error("invalid operation `{method}` on path `{}`: {reason}", .path.as_deref().unwrap_or("<none>"))]
    InvalidOperation {
        path: Option<String>,
        method: String,
        reason: String,
    },

    /// Failure while serialising or deserialising JSON documents.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("yaml serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic forwarding of any plugin-specific error that doesn't fit another
    /// category.
    #[error("plugin returned an error: {0}")]
    Plugin(Box<dyn std::error::Error + Send + Sync + 'static>),
}
