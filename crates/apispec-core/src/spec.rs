//! The host specification object.
//!
//! [`ApiSpec`] accumulates component schemas and path operations and renders
//! them as an OpenAPI document. Attached [`Plugin`]s get a chance to reshape
//! every declaration before it is stored:
//!
//! ```rust
//! use apispec_core::{plugin::SchemaOptions, spec::ApiSpec};
//! use serde_json::json;
//!
//! let mut spec = ApiSpec::new("Petstore", "1.0.0", "3.0.2").unwrap();
//! let body = json!({ "type": "object" }).as_object().cloned().unwrap();
//! spec.schema("Pet", SchemaOptions::from_definition(body)).unwrap();
//!
//! let doc = spec.to_value();
//! assert_eq!(doc["openapi"], "3.0.2");
//! assert_eq!(doc["components"]["schemas"]["Pet"]["type"], "object");
//! ```
//!
//! Declarations are processed synchronously and in call order. Share one
//! `ApiSpec` across threads only behind external synchronisation.
use std::fmt;

use serde_json::{Map, Value};

use crate::{
    components::{ComponentKind, Components},
    document::Operations,
    error::{ApiSpecError, Result},
    operation::IntoOperations,
    plugin::{Plugin, SchemaOptions, SpecInfo},
    version::OpenApiVersion,
};

pub struct ApiSpec {
    info: SpecInfo,
    components: Components,
    paths: Map<String, Value>,
    extra: Map<String, Value>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl ApiSpec {
    /// Create an empty specification.
    ///
    /// # Errors
    ///
    /// [`ApiSpecError::InvalidOpenApiVersion`] if `openapi_version` is not a
    /// 2.x or 3.x version string.
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        openapi_version: &str,
    ) -> Result<Self> {
        Ok(Self {
            info: SpecInfo {
                title: title.into(),
                version: version.into(),
                openapi_version: openapi_version.parse()?,
            },
            components: Components::new(),
            paths: Map::new(),
            extra: Map::new(),
            plugins: Vec::new(),
        })
    }

    /// Attach `plugin`, running its `init_spec` hook first.
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Result<Self> {
        self.register_plugin(plugin)?;
        Ok(self)
    }

    pub fn register_plugin(&mut self, mut plugin: impl Plugin + 'static) -> Result<&mut Self> {
        plugin.init_spec(&self.info)?;
        self.plugins.push(Box::new(plugin));
        Ok(self)
    }

    /// Extra top-level document field (`servers`, `tags`, …).
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn info(&self) -> &SpecInfo {
        &self.info
    }

    pub fn openapi_version(&self) -> &OpenApiVersion {
        &self.info.openapi_version
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    pub fn paths(&self) -> &Map<String, Value> {
        &self.paths
    }

    /// Declare component schema `name`.
    ///
    /// Each plugin's `schema_helper` sees the literal definition; whatever
    /// they return is merged over it, in plugin order.
    ///
    /// # Errors
    ///
    /// * [`ApiSpecError::DuplicateComponentName`] – `name` is already taken.
    /// * Anything a plugin hook returns.
    ///
    /// On error the component store is left as it was; anything a plugin
    /// registered before the failure is discarded.
    pub fn schema(&mut self, name: impl Into<String>, mut options: SchemaOptions) -> Result<&mut Self> {
        let name = name.into();
        if self.components.contains_schema(&name) {
            return Err(ApiSpecError::DuplicateComponentName {
                kind: ComponentKind::Schema,
                name,
            });
        }

        let definition = std::mem::take(&mut options.definition);
        let mut schema = definition.clone();
        let mut staged = self.components.clone();

        for plugin in self.plugins.iter_mut() {
            if let Some(resolved) =
                plugin.schema_helper(&name, &definition, &mut options, &mut staged)?
            {
                schema.extend(resolved);
            }
        }

        staged.schema(name, schema)?;
        self.components = staged;
        Ok(self)
    }

    /// Declare the operations of `path`.
    ///
    /// Plugins reshape the operations first; the result is merged into any
    /// operations already declared for the same path.
    ///
    /// If any plugin fails, neither the path nor the components registered
    /// while resolving it are kept.
    pub fn path(
        &mut self,
        path: impl Into<String>,
        operations: impl IntoOperations,
    ) -> Result<&mut Self> {
        let path = path.into();
        let mut operations: Operations = operations.into_operations();
        let mut staged = self.components.clone();

        for plugin in self.plugins.iter_mut() {
            plugin.operation_helper(Some(&path), Some(&mut operations), &mut staged)?;
        }
        self.components = staged;

        let item = self
            .paths
            .entry(path)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item) = item {
            item.extend(operations);
        }

        Ok(self)
    }

    /// Render the whole document.
    pub fn to_value(&self) -> Value {
        let version = &self.info.openapi_version;
        let mut doc = Map::new();

        let version_key = if version.is_v2() { "swagger" } else { "openapi" };
        let version_string = if version.is_v2() {
            format!("{}.{}", version.major, version.minor)
        } else {
            version.to_string()
        };
        doc.insert(version_key.to_owned(), Value::String(version_string));

        let mut info = Map::new();
        info.insert("title".into(), Value::String(self.info.title.clone()));
        info.insert("version".into(), Value::String(self.info.version.clone()));
        doc.insert("info".into(), Value::Object(info));

        doc.insert("paths".into(), Value::Object(self.paths.clone()));
        doc.extend(self.components.to_sections(version));
        doc.extend(self.extra.clone());

        Value::Object(doc)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_value())?)
    }
}

impl fmt::Debug for ApiSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSpec")
            .field("info", &self.info)
            .field("components", &self.components)
            .field("paths", &self.paths)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SchemaDocument;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// Records every hook invocation and tags declarations it sees.
    #[derive(Default)]
    struct Tagging {
        initialised_with: Option<OpenApiVersion>,
    }

    impl Plugin for Tagging {
        fn init_spec(&mut self, info: &SpecInfo) -> Result<()> {
            self.initialised_with = Some(info.openapi_version);
            Ok(())
        }

        fn schema_helper(
            &mut self,
            _name: &str,
            _definition: &SchemaDocument,
            options: &mut SchemaOptions,
            _components: &mut Components,
        ) -> Result<Option<SchemaDocument>> {
            let Some(tag) = options.extra.remove("x-tag") else {
                return Ok(None);
            };
            let mut doc = SchemaDocument::new();
            doc.insert("x-tag".into(), tag);
            Ok(Some(doc))
        }

        fn operation_helper(
            &mut self,
            path: Option<&str>,
            operations: Option<&mut Operations>,
            _components: &mut Components,
        ) -> Result<()> {
            let initialised = self.initialised_with.is_some();
            if let Some(operations) = operations {
                for operation in operations.values_mut() {
                    operation["x-path"] = json!(path);
                    operation["x-init"] = json!(initialised);
                }
            }
            Ok(())
        }
    }

    /// Registers a component on every hook, then leaves the rest to `Failing`.
    struct Registering;

    impl Plugin for Registering {
        fn schema_helper(
            &mut self,
            _name: &str,
            _definition: &SchemaDocument,
            _options: &mut SchemaOptions,
            components: &mut Components,
        ) -> Result<Option<SchemaDocument>> {
            let _ = components.insert_schema_if_absent("Lifted", SchemaDocument::new());
            Ok(None)
        }

        fn operation_helper(
            &mut self,
            _path: Option<&str>,
            _operations: Option<&mut Operations>,
            components: &mut Components,
        ) -> Result<()> {
            let _ = components.insert_schema_if_absent("Lifted", SchemaDocument::new());
            Ok(())
        }
    }

    struct Failing;

    impl Plugin for Failing {
        fn schema_helper(
            &mut self,
            _name: &str,
            _definition: &SchemaDocument,
            _options: &mut SchemaOptions,
            _components: &mut Components,
        ) -> Result<Option<SchemaDocument>> {
            Err(ApiSpecError::Plugin("schema rejected".into()))
        }

        fn operation_helper(
            &mut self,
            _path: Option<&str>,
            _operations: Option<&mut Operations>,
            _components: &mut Components,
        ) -> Result<()> {
            Err(ApiSpecError::Plugin("operations rejected".into()))
        }
    }

    fn ops(value: Value) -> Operations {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn schema_merges_plugin_output_over_definition() {
        let mut spec = ApiSpec::new("t", "1", "3.0.2")
            .unwrap()
            .with_plugin(Tagging::default())
            .unwrap();

        let definition = json!({ "type": "object" }).as_object().cloned().unwrap();
        spec.schema(
            "Pet",
            SchemaOptions::from_definition(definition).with_extra("x-tag", json!("pets")),
        )
        .unwrap();

        assert_eq!(
            Value::Object(spec.components().get_schema("Pet").unwrap().clone()),
            json!({ "type": "object", "x-tag": "pets" })
        );
    }

    #[test]
    fn schema_rejects_duplicate_names_before_running_plugins() {
        let mut spec = ApiSpec::new("t", "1", "3.0.2").unwrap();
        spec.schema("Pet", SchemaOptions::new()).unwrap();

        let err = spec.schema("Pet", SchemaOptions::new()).unwrap_err();
        assert!(matches!(err, ApiSpecError::DuplicateComponentName { .. }));
    }

    #[test]
    fn path_runs_operation_hooks_and_merges_methods() {
        let mut spec = ApiSpec::new("t", "1", "3.1.0")
            .unwrap()
            .with_plugin(Tagging::default())
            .unwrap();

        spec.path("/pets", ops(json!({ "get": { "summary": "list" } })))
            .unwrap()
            .path("/pets", ops(json!({ "post": { "summary": "create" } })))
            .unwrap();

        assert_eq!(
            spec.paths()["/pets"],
            json!({
                "get": { "summary": "list", "x-path": "/pets", "x-init": true },
                "post": { "summary": "create", "x-path": "/pets", "x-init": true }
            })
        );
    }

    #[test]
    fn failed_declarations_leave_components_untouched() {
        let mut spec = ApiSpec::new("t", "1", "3.0.2")
            .unwrap()
            .with_plugin(Registering)
            .unwrap()
            .with_plugin(Failing)
            .unwrap();

        let err = spec.schema("Pet", SchemaOptions::new()).unwrap_err();
        assert_eq!(err.to_string(), "plugin returned an error: schema rejected");
        assert!(spec.components().is_empty());

        let err = spec
            .path("/pets", ops(json!({ "get": { "summary": "list" } })))
            .unwrap_err();
        assert!(matches!(err, ApiSpecError::Plugin(_)));
        assert!(spec.components().is_empty());
        assert!(spec.paths().is_empty());
    }

    #[test]
    fn successful_declarations_keep_plugin_registrations() {
        let mut spec = ApiSpec::new("t", "1", "3.0.2")
            .unwrap()
            .with_plugin(Registering)
            .unwrap();

        spec.path("/pets", ops(json!({ "get": {} }))).unwrap();

        assert!(spec.components().contains_schema("Lifted"));
    }

    #[test]
    fn renders_v2_layout() {
        let mut spec = ApiSpec::new("Legacy", "0.1", "2.0")
            .unwrap()
            .with_field("basePath", json!("/api"));
        spec.schema("Pet", SchemaOptions::new()).unwrap();

        assert_eq!(
            spec.to_value(),
            json!({
                "swagger": "2.0",
                "info": { "title": "Legacy", "version": "0.1" },
                "paths": {},
                "definitions": { "Pet": {} },
                "basePath": "/api"
            })
        );
        assert!(spec.to_yaml().unwrap().contains("swagger: '2.0'"));
    }

    #[test]
    fn rejects_unknown_versions() {
        assert!(matches!(
            ApiSpec::new("t", "1", "5.0.0"),
            Err(ApiSpecError::InvalidOpenApiVersion(_))
        ));
    }
}
