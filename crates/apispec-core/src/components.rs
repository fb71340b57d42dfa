//! The component store of a specification.
//!
//! Components are reusable, named fragments (schemas, parameters, responses)
//! that operations point at instead of inlining them. Two insertion styles
//! are offered:
//!
//! * **Strict** – [`Components::schema`] and friends reject a name that is
//!   already taken with [`ApiSpecError::DuplicateComponentName`]. This is what
//!   a user declaring components by hand wants.
//! * **Insert-if-absent** – [`Components::insert_schema_if_absent`] never
//!   fails; it reports through [`Registration`] whether the schema was
//!   stored. Plugins lifting nested definitions use this one, so the first
//!   registered body always wins.

use std::fmt;

use serde_json::{Map, Value};

use crate::{
    document::SchemaDocument,
    error::{ApiSpecError, Result},
    version::OpenApiVersion,
};

/// Section of the component store a name lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schema,
    Parameter,
    Response,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Schema => write!(f, "schema"),
            ComponentKind::Parameter => write!(f, "parameter"),
            ComponentKind::Response => write!(f, "response"),
        }
    }
}

/// Outcome of an insert-if-absent registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Registration {
    /// The schema was stored under the requested name.
    Inserted,
    /// A schema with that name already existed and was kept as-is.
    AlreadyPresent,
}

impl Registration {
    pub fn is_inserted(self) -> bool {
        matches!(self, Registration::Inserted)
    }
}

/// Name-keyed store of reusable component documents.
///
/// Entries are append-only: nothing in the public API updates or removes a
/// stored component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Components {
    schemas: Map<String, Value>,
    parameters: Map<String, Value>,
    responses: Map<String, Value>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema under `name`, failing if the name is taken.
    pub fn schema(&mut self, name: impl Into<String>, schema: SchemaDocument) -> Result<&mut Self> {
        insert_strict(
            &mut self.schemas,
            ComponentKind::Schema,
            name.into(),
            Value::Object(schema),
        )?;
        Ok(self)
    }

    /// Register a reusable parameter object, failing if the name is taken.
    pub fn parameter(&mut self, name: impl Into<String>, parameter: Value) -> Result<&mut Self> {
        insert_strict(
            &mut self.parameters,
            ComponentKind::Parameter,
            name.into(),
            parameter,
        )?;
        Ok(self)
    }

    /// Register a reusable response object, failing if the name is taken.
    pub fn response(&mut self, name: impl Into<String>, response: Value) -> Result<&mut Self> {
        insert_strict(
            &mut self.responses,
            ComponentKind::Response,
            name.into(),
            response,
        )?;
        Ok(self)
    }

    /// Store `schema` under `name` unless the name is already taken.
    ///
    /// ```rust
    /// use apispec_core::components::{Components, Registration};
    /// use serde_json::json;
    ///
    /// let mut components = Components::new();
    /// let first = json!({ "type": "string" }).as_object().cloned().unwrap();
    /// let second = json!({ "type": "integer" }).as_object().cloned().unwrap();
    ///
    /// assert_eq!(components.insert_schema_if_absent("Id", first.clone()), Registration::Inserted);
    /// assert_eq!(components.insert_schema_if_absent("Id", second), Registration::AlreadyPresent);
    /// assert_eq!(components.get_schema("Id"), Some(&first));
    /// ```
    pub fn insert_schema_if_absent(
        &mut self,
        name: impl Into<String>,
        schema: SchemaDocument,
    ) -> Registration {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Registration::AlreadyPresent;
        }

        self.schemas.insert(name, Value::Object(schema));
        Registration::Inserted
    }

    pub fn contains_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn get_schema(&self, name: &str) -> Option<&SchemaDocument> {
        self.schemas.get(name).and_then(Value::as_object)
    }

    /// Registered schema names in insertion order.
    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn get_parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    pub fn get_response(&self, name: &str) -> Option<&Value> {
        self.responses.get(name)
    }

    /// Total number of registered components across all kinds.
    pub fn len(&self) -> usize {
        self.schemas.len() + self.parameters.len() + self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the store in the layout `version` expects.
    ///
    /// The returned pairs are top-level keys of the final document: a single
    /// `components` entry for 3.x, or `definitions` / `parameters` /
    /// `responses` for 2.x. Empty sections are left out.
    pub fn to_sections(&self, version: &OpenApiVersion) -> Vec<(String, Value)> {
        let (schema_key, parameter_key, response_key) = if version.is_v2() {
            ("definitions", "parameters", "responses")
        } else {
            ("schemas", "parameters", "responses")
        };

        let sections: Vec<(String, Value)> = [
            (schema_key, &self.schemas),
            (parameter_key, &self.parameters),
            (response_key, &self.responses),
        ]
        .into_iter()
        .filter(|(_, map)| !map.is_empty())
        .map(|(key, map)| (key.to_owned(), Value::Object(map.clone())))
        .collect();

        if version.is_v2() || sections.is_empty() {
            return sections;
        }

        vec![(
            "components".to_owned(),
            Value::Object(sections.into_iter().collect()),
        )]
    }
}

fn insert_strict(
    section: &mut Map<String, Value>,
    kind: ComponentKind,
    name: String,
    value: Value,
) -> Result<()> {
    if section.contains_key(&name) {
        return Err(ApiSpecError::DuplicateComponentName { kind, name });
    }

    section.insert(name, value);
    Ok(())
}
