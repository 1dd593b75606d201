//! JSON Schema materialization and compilation for JSKOS entity types.
//!
//! The schema document composes definitions with `allOf` (a concept is an
//! item is a resource). Composition is flattened here before compiling so
//! every object definition carries its complete property list; that list is
//! both the field vocabulary of the type and what strict mode closes with
//! `additionalProperties: false`.

use crate::error::{Error, Result};
use jsonschema::JSONSchema;
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use std::sync::Arc;

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";
const DEFINITION_REF_PREFIX: &str = "#/definitions/";

/// Result of materializing and compiling one entity schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
    pub raw: Arc<Value>,
    pub known_fields: BTreeSet<String>,
}

/// Controls how an entity schema is assembled from the definitions document.
pub(crate) struct SchemaLoadOptions<'a> {
    /// Definition the document root must satisfy (e.g., `concept`).
    pub root_definition: &'a str,
    /// Fields required at the document root in addition to the definition's own.
    pub root_required: &'a [&'a str],
    /// Where to find the schema version inside the definitions document.
    pub schema_version_pointer: &'a str,
    /// Close every object definition so unknown fields are violations.
    pub strict: bool,
}

impl<'a> Default for SchemaLoadOptions<'a> {
    fn default() -> Self {
        Self {
            root_definition: "resource",
            root_required: &["uri"],
            schema_version_pointer: "/schema_version",
            strict: false,
        }
    }
}

pub(crate) fn load_json_schema(
    document: &Value,
    options: SchemaLoadOptions<'_>,
) -> Result<SchemaLoadResult> {
    let schema_version = extract_schema_version(document, options.schema_version_pointer)
        .ok_or_else(|| {
            Error::InvalidSchema(format!(
                "schema document missing schema_version at {}",
                options.schema_version_pointer
            ))
        })?;

    let mut definitions = materialize_definitions(document)?;
    let root = definitions.get(options.root_definition).ok_or_else(|| {
        Error::InvalidSchema(format!(
            "schema document has no definition '{}'",
            options.root_definition
        ))
    })?;
    let known_fields = root
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default();

    if options.strict {
        close_object_definitions(&mut definitions);
    }

    let draft = document
        .get("$schema")
        .and_then(Value::as_str)
        .unwrap_or(DRAFT_07);
    let schema = json!({
        "$schema": draft,
        "definitions": definitions,
        "allOf": [{ "$ref": format!("{DEFINITION_REF_PREFIX}{}", options.root_definition) }],
        "required": options.root_required,
    });

    let compiled = JSONSchema::compile(&schema).map_err(|err| {
        Error::InvalidSchema(format!(
            "compiling schema for '{}': {err}",
            options.root_definition
        ))
    })?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
        raw: Arc::new(schema),
        known_fields,
    })
}

/// Flatten `allOf` references between definitions into one property list
/// per definition. Bases are merged first so a definition can narrow an
/// inherited property (mapping narrows `type`).
pub(crate) fn materialize_definitions(document: &Value) -> Result<Map<String, Value>> {
    let definitions = document
        .get("definitions")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::InvalidSchema("schema document has no definitions".to_string()))?;

    let mut materialized = Map::new();
    for name in definitions.keys() {
        let mut stack = Vec::new();
        let definition = materialize_one(definitions, name, &mut stack)?;
        materialized.insert(name.clone(), definition);
    }
    Ok(materialized)
}

fn materialize_one(
    definitions: &Map<String, Value>,
    name: &str,
    stack: &mut Vec<String>,
) -> Result<Value> {
    if stack.iter().any(|seen| seen == name) {
        return Err(Error::InvalidSchema(format!(
            "definition '{name}' inherits from itself via {}",
            stack.join(" -> ")
        )));
    }
    let definition = definitions
        .get(name)
        .ok_or_else(|| Error::InvalidSchema(format!("unknown definition '{name}'")))?;
    let Some(object) = definition.as_object() else {
        return Ok(definition.clone());
    };

    let mut result = object.clone();
    let Some(all_of) = object.get("allOf").and_then(Value::as_array) else {
        return Ok(definition.clone());
    };

    stack.push(name.to_string());
    let mut properties = Map::new();
    let mut required: Vec<Value> = Vec::new();
    let mut remaining = Vec::new();
    for part in all_of {
        let Some(base) = definition_ref(part) else {
            remaining.push(part.clone());
            continue;
        };
        let base = materialize_one(definitions, base, stack)?;
        merge_object_parts(&base, &mut properties, &mut required);
    }
    stack.pop();
    merge_object_parts(definition, &mut properties, &mut required);

    if remaining.is_empty() {
        result.remove("allOf");
    } else {
        result.insert("allOf".to_string(), Value::Array(remaining));
    }
    if !properties.is_empty() {
        result.insert("properties".to_string(), Value::Object(properties));
    }
    if !required.is_empty() {
        result.insert("required".to_string(), Value::Array(required));
    }
    Ok(Value::Object(result))
}

fn definition_ref(part: &Value) -> Option<&str> {
    let object = part.as_object()?;
    if object.len() != 1 {
        return None;
    }
    object
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|target| target.strip_prefix(DEFINITION_REF_PREFIX))
}

fn merge_object_parts(source: &Value, properties: &mut Map<String, Value>, required: &mut Vec<Value>) {
    if let Some(props) = source.get("properties").and_then(Value::as_object) {
        for (key, schema) in props {
            properties.insert(key.clone(), schema.clone());
        }
    }
    if let Some(fields) = source.get("required").and_then(Value::as_array) {
        for field in fields {
            if !required.contains(field) {
                required.push(field.clone());
            }
        }
    }
}

fn close_object_definitions(definitions: &mut Map<String, Value>) {
    for definition in definitions.values_mut() {
        if let Some(object) = definition.as_object_mut() {
            if object.contains_key("properties") {
                object.insert("additionalProperties".to_string(), Value::Bool(false));
            }
        }
    }
}

fn extract_schema_version(schema: &Value, pointer: &str) -> Option<String> {
    let version = schema.pointer(pointer).and_then(Value::as_str)?;
    if version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        Some(version.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Value {
        json!({
            "$schema": DRAFT_07,
            "schema_version": "test-1",
            "definitions": {
                "base": {
                    "type": "object",
                    "properties": {
                        "uri": {"type": "string"},
                        "type": {"type": "array"}
                    }
                },
                "child": {
                    "allOf": [{"$ref": "#/definitions/base"}],
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": {"type": "string"},
                        "type": {"type": "array", "items": {"enum": ["x"]}}
                    }
                }
            }
        })
    }

    #[test]
    fn materializes_inherited_properties() {
        let definitions = materialize_definitions(&sample_document()).unwrap();
        let child = &definitions["child"];
        assert!(child.get("allOf").is_none());
        let props = child["properties"].as_object().unwrap();
        let keys: Vec<&str> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "type", "uri"]);
        assert_eq!(props["type"]["items"]["enum"], json!(["x"]));
        assert_eq!(child["required"], json!(["name"]));
    }

    #[test]
    fn rejects_inheritance_cycles() {
        let document = json!({
            "schema_version": "test-1",
            "definitions": {
                "a": {"allOf": [{"$ref": "#/definitions/b"}]},
                "b": {"allOf": [{"$ref": "#/definitions/a"}]}
            }
        });
        let err = materialize_definitions(&document).unwrap_err();
        assert!(matches!(err, Error::InvalidSchema(msg) if msg.contains("inherits from itself")));
    }

    #[test]
    fn strict_load_closes_objects_and_lenient_does_not() {
        let document = sample_document();
        let value = json!({"uri": "urn:x", "name": "n", "extra": true});

        let lenient = load_json_schema(
            &document,
            SchemaLoadOptions {
                root_definition: "child",
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(lenient.schema_version, "test-1");
        assert!(lenient.compiled.is_valid(&value));
        assert!(lenient.known_fields.contains("uri"));
        assert!(!lenient.known_fields.contains("extra"));

        let strict = load_json_schema(
            &document,
            SchemaLoadOptions {
                root_definition: "child",
                strict: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!strict.compiled.is_valid(&value));
        assert_eq!(
            strict.raw.pointer("/definitions/child/additionalProperties"),
            Some(&Value::Bool(false))
        );
    }

    #[test]
    fn root_requires_uri_by_default() {
        let schema = load_json_schema(
            &sample_document(),
            SchemaLoadOptions {
                root_definition: "child",
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!schema.compiled.is_valid(&json!({"name": "n"})));
    }

    #[test]
    fn missing_version_is_rejected() {
        let mut document = sample_document();
        document["schema_version"] = json!("bad version!");
        let err = load_json_schema(&document, SchemaLoadOptions::default()).err();
        assert!(matches!(err, Some(Error::InvalidSchema(_))));
    }
}
