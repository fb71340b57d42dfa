use apispec_core::{
    components::Components,
    document::{Operations, SchemaDocument},
    error::{ApiSpecError, Result},
    model::ReferenceTemplate,
    plugin::{Plugin, SchemaOptions, SpecInfo},
    version::OpenApiVersion,
};

use crate::{SchemarsPlugin, extractor::SchemaExtractor, resolver::SchemaResolver};

impl SchemarsPlugin {
    fn extractor_for(&self, version: OpenApiVersion) -> SchemaExtractor {
        let template = self
            .ref_template
            .clone()
            .unwrap_or_else(|| ReferenceTemplate::for_version(&version));

        SchemaExtractor::new(template, version).with_definition_keys(self.definition_keys.clone())
    }
}

impl Plugin for SchemarsPlugin {
    fn init_spec(&mut self, info: &SpecInfo) -> Result<()> {
        let extractor = self.extractor_for(info.openapi_version);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            openapi_version = %info.openapi_version,
            ref_template = %extractor.template(),
            "schemars plugin attached"
        );

        self.resolver = Some(SchemaResolver::new(extractor));
        Ok(())
    }

    /// Handles declarations carrying a model; anything else is left to
    /// other plugins.
    ///
    /// Works before `init_spec` too, falling back to the default OpenAPI
    /// version for the reference template.
    fn schema_helper(
        &mut self,
        name: &str,
        _definition: &SchemaDocument,
        options: &mut SchemaOptions,
        components: &mut Components,
    ) -> Result<Option<SchemaDocument>> {
        let Some(model) = options.take_model() else {
            return Ok(None);
        };

        let schema = match &self.resolver {
            Some(resolver) => resolver.extractor().extract_for(name, &model, components)?,
            None => self
                .extractor_for(OpenApiVersion::default())
                .extract_for(name, &model, components)?,
        };

        self.models.register_as(name, model);

        Ok(Some(schema))
    }

    fn operation_helper(
        &mut self,
        path: Option<&str>,
        operations: Option<&mut Operations>,
        components: &mut Components,
    ) -> Result<()> {
        let resolver = self
            .resolver
            .as_ref()
            .ok_or(ApiSpecError::ResolverNotInitialized)?;

        resolver.resolve_operations(path, operations, &self.models, components)
    }
}
