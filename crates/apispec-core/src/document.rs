//! Document types shared by the host specification and its plugins.
//!
//! Every schema handled by this workspace is a plain, insertion-ordered JSON
//! object. Keeping it as a [`serde_json::Map`] rather than a strongly-typed
//! OpenAPI model lets plugins shape documents exactly the way the host
//! expects without a lossy conversion in between.

use serde_json::{Map, Value};

use crate::error::{ApiSpecError, Result};

/// A JSON-Schema-shaped mapping describing a single data shape.
pub type SchemaDocument = Map<String, Value>;

/// HTTP method (lower-case) → operation object.
pub type Operations = Map<String, Value>;

/// Reserved keys under which a schema may carry its locally-scoped
/// sub-schemas, checked in this order.
///
/// * `definitions` – draft-07 and OpenAPI 2.x style output.
/// * `$defs` – draft 2019-09 / 2020-12 style output.
pub const DEFINITIONS_KEYS: &[&str] = &["definitions", "$defs"];

/// Key used by pointer-style references.
pub const REF_KEY: &str = "$ref";

/// Remove every recognised definitions block from `document` and return the
/// lifted `(name, schema)` pairs.
///
/// Keys are processed in the order given by `keys`, and entries within each
/// block keep their document order. Empty blocks are removed and yield
/// nothing.
///
/// # Errors
///
/// [`ApiSpecError::InvalidSchema`] if a block is present but is not an
/// object. `document` is left untouched in that case.
///
/// ```rust
/// use apispec_core::document::{take_definitions, DEFINITIONS_KEYS};
/// use serde_json::json;
///
/// let mut doc = json!({
///     "type": "object",
///     "$defs": { "Address": { "type": "object" } }
/// });
/// let lifted = take_definitions(doc.as_object_mut().unwrap(), DEFINITIONS_KEYS).unwrap();
///
/// assert_eq!(lifted[0].0, "Address");
/// assert!(doc.get("$defs").is_none());
/// ```
pub fn take_definitions<K>(
    document: &mut SchemaDocument,
    keys: &[K],
) -> Result<Vec<(String, Value)>>
where
    K: AsRef<str>,
{
    for key in keys {
        let key = key.as_ref();
        if let Some(block) = document.get(key).filter(|block| !block.is_object()) {
            return Err(ApiSpecError::InvalidSchema {
                name: key.to_owned(),
                reason: format!("definitions block is not an object: `{block}`"),
            });
        }
    }

    let mut lifted = Vec::new();
    for key in keys {
        if let Some(Value::Object(block)) = document.shift_remove(key.as_ref()) {
            lifted.extend(block);
        }
    }

    Ok(lifted)
}

/// Build a `{"$ref": pointer}` schema.
pub fn reference(pointer: impl Into<String>) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(REF_KEY.to_owned(), Value::String(pointer.into()));
    Value::Object(map)
}

/// `true` if `value` is a pointer-style reference object.
pub fn is_reference(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.get(REF_KEY).is_some_and(Value::is_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> SchemaDocument {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn take_definitions_lifts_both_spellings_in_table_order() {
        let mut doc = object(json!({
            "title": "User",
            "$defs": { "Address": { "type": "object" } },
            "definitions": { "Legacy": { "type": "string" } }
        }));

        let lifted = take_definitions(&mut doc, DEFINITIONS_KEYS).unwrap();

        let names: Vec<_> = lifted.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Legacy", "Address"]);
        assert_eq!(Value::Object(doc), json!({ "title": "User" }));
    }

    #[test]
    fn take_definitions_drops_empty_blocks() {
        let mut doc = object(json!({
            "type": "object",
            "$defs": {},
            "definitions": {}
        }));

        let lifted = take_definitions(&mut doc, DEFINITIONS_KEYS).unwrap();

        assert!(lifted.is_empty());
        assert_eq!(Value::Object(doc), json!({ "type": "object" }));
    }

    #[test]
    fn take_definitions_rejects_malformed_blocks() {
        let original = object(json!({
            "type": "object",
            "definitions": { "Address": { "type": "object" } },
            "$defs": "not a map"
        }));
        let mut doc = original.clone();

        let err = take_definitions(&mut doc, DEFINITIONS_KEYS).unwrap_err();

        assert!(matches!(err, ApiSpecError::InvalidSchema { ref name, .. } if name == "$defs"));
        assert_eq!(doc, original);
    }

    #[test]
    fn take_definitions_leaves_documents_without_blocks_untouched() {
        let original = object(json!({ "type": "string", "format": "uuid" }));
        let mut doc = original.clone();

        assert!(take_definitions(&mut doc, DEFINITIONS_KEYS).unwrap().is_empty());
        assert_eq!(doc, original);
    }

    #[test]
    fn reference_round_trips_through_is_reference() {
        let value = reference("#/components/schemas/Pet");

        assert_eq!(value, json!({ "$ref": "#/components/schemas/Pet" }));
        assert!(is_reference(&value));
        assert!(!is_reference(&json!({ "type": "object" })));
        assert!(!is_reference(&json!("Pet")));
    }
}
