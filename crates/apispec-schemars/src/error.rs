use apispec_core::error::ApiSpecError;

/// Failure modes specific to configuring the schemars plugin.
#[derive(Debug, thiserror::Error)]
pub enum SchemarsPluginError {
    #[error("at least one definitions key is required")]
    NoDefinitionKeys,

    #[error("definitions keys must not be blank")]
    BlankDefinitionKey,

    #[error("couldn’t parse plugin config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("couldn’t parse plugin config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<SchemarsPluginError> for ApiSpecError {
    fn from(value: SchemarsPluginError) -> Self {
        ApiSpecError::Plugin(Box::new(value))
    }
}
