//! Compiled schemas for every JSKOS entity type.
//!
//! A registry is immutable once built. The built-in one is compiled on first
//! use from the definitions embedded at build time and shared for the life of
//! the process.

use crate::error::{Error, Result};
use crate::model::EntityType;
use crate::schema_loader::{SchemaLoadOptions, load_json_schema};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

const BUILTIN_SCHEMA: &str = include_str!("../schema/jskos.schema.json");
const KOS_DEFINITION: &str = "kos";

static BUILTIN: OnceLock<std::result::Result<SchemaRegistry, String>> = OnceLock::new();

/// Lenient and strict schema for one entity type plus its field vocabulary.
pub struct EntitySchema {
    entity_type: EntityType,
    lenient: JSONSchema,
    strict: JSONSchema,
    known_fields: BTreeSet<String>,
    raw: Arc<Value>,
}

impl EntitySchema {
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn compiled(&self, strict: bool) -> &JSONSchema {
        if strict { &self.strict } else { &self.lenient }
    }

    /// Top-level fields the entity type defines.
    pub fn known_fields(&self) -> &BTreeSet<String> {
        &self.known_fields
    }

    pub fn knows(&self, field: &str) -> bool {
        self.known_fields.contains(field)
    }

    /// The assembled (lenient) schema document, for inspection.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Lenient and strict schema for the KOS wrapper document.
pub struct KosSchema {
    lenient: JSONSchema,
    strict: JSONSchema,
    raw: Arc<Value>,
}

impl KosSchema {
    pub fn compiled(&self, strict: bool) -> &JSONSchema {
        if strict { &self.strict } else { &self.lenient }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Maps each [`EntityType`] to its compiled schema.
pub struct SchemaRegistry {
    schema_version: String,
    schemas: BTreeMap<EntityType, EntitySchema>,
    vocabulary: BTreeSet<String>,
    kos: Option<KosSchema>,
}

impl SchemaRegistry {
    /// The registry compiled from the embedded JSKOS definitions.
    pub fn builtin() -> Result<&'static SchemaRegistry> {
        let loaded = BUILTIN.get_or_init(|| {
            let document: Value = serde_json::from_str(BUILTIN_SCHEMA)
                .map_err(|err| format!("embedded schema is not JSON: {err}"))?;
            SchemaRegistry::from_json(&document).map_err(|err| err.to_string())
        });
        loaded
            .as_ref()
            .map_err(|msg| Error::InvalidSchema(msg.clone()))
    }

    /// Build a registry from a definitions document shaped like
    /// `schema/jskos.schema.json`: a `schema_version` string and one
    /// definition per entity type under `definitions`. A `kos` definition is
    /// optional.
    pub fn from_json(document: &Value) -> Result<Self> {
        let mut schemas = BTreeMap::new();
        let mut vocabulary = BTreeSet::new();
        let mut schema_version = String::new();

        for entity_type in EntityType::ALL {
            let lenient = load_json_schema(
                document,
                SchemaLoadOptions {
                    root_definition: entity_type.definition(),
                    ..Default::default()
                },
            )?;
            let strict = load_json_schema(
                document,
                SchemaLoadOptions {
                    root_definition: entity_type.definition(),
                    strict: true,
                    ..Default::default()
                },
            )?;
            if lenient.known_fields.is_empty() {
                return Err(Error::InvalidSchema(format!(
                    "definition '{}' declares no properties",
                    entity_type.definition()
                )));
            }
            vocabulary.extend(lenient.known_fields.iter().cloned());
            schema_version = lenient.schema_version;
            schemas.insert(
                entity_type,
                EntitySchema {
                    entity_type,
                    lenient: lenient.compiled,
                    strict: strict.compiled,
                    known_fields: lenient.known_fields,
                    raw: lenient.raw,
                },
            );
        }

        let kos = if document.pointer(&format!("/definitions/{KOS_DEFINITION}")).is_some() {
            Some(compile_kos(document)?)
        } else {
            None
        };

        tracing::debug!(
            schema_version = %schema_version,
            entity_types = schemas.len(),
            kos = kos.is_some(),
            "compiled JSKOS schema registry"
        );
        Ok(SchemaRegistry {
            schema_version,
            schemas,
            vocabulary,
            kos,
        })
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn schema_for(&self, entity_type: EntityType) -> &EntitySchema {
        // from_json registers every variant of EntityType::ALL or fails.
        &self.schemas[&entity_type]
    }

    /// Look up a schema by type name or `type` URI.
    pub fn schema_for_tag(&self, tag: &str) -> Result<&EntitySchema> {
        let entity_type: EntityType = tag.parse()?;
        Ok(self.schema_for(entity_type))
    }

    pub fn known_fields(&self, entity_type: EntityType) -> &BTreeSet<String> {
        self.schema_for(entity_type).known_fields()
    }

    /// Union of the top-level fields of all entity types.
    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    pub fn entity_types(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.schemas.keys().copied()
    }

    pub fn kos_schema(&self) -> Result<&KosSchema> {
        self.kos.as_ref().ok_or_else(|| {
            Error::InvalidSchema(format!("schema document has no definition '{KOS_DEFINITION}'"))
        })
    }
}

fn compile_kos(document: &Value) -> Result<KosSchema> {
    let options = |strict| SchemaLoadOptions {
        root_definition: KOS_DEFINITION,
        root_required: &[],
        strict,
        ..Default::default()
    };
    let lenient = load_json_schema(document, options(false))?;
    let strict = load_json_schema(document, options(true))?;
    Ok(KosSchema {
        lenient: lenient.compiled,
        strict: strict.compiled,
        raw: lenient.raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_registry_covers_every_entity_type() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert_eq!(registry.schema_version(), "jskos-0.5");
        assert_eq!(registry.entity_types().count(), EntityType::ALL.len());
        for entity_type in EntityType::ALL {
            let schema = registry.schema_for(entity_type);
            assert_eq!(schema.entity_type(), entity_type);
            assert!(schema.knows("uri"), "{entity_type} should know uri");
            assert!(schema.knows("prefLabel"));
        }
    }

    #[test]
    fn vocabulary_reflects_entity_specific_fields() {
        let registry = SchemaRegistry::builtin().unwrap();
        assert!(registry.known_fields(EntityType::Concept).contains("broader"));
        assert!(!registry.known_fields(EntityType::Mapping).contains("broader"));
        assert!(registry.known_fields(EntityType::Mapping).contains("from"));
        assert!(registry.vocabulary().contains("topConcepts"));
        assert!(!registry.vocabulary().contains("x-internal"));
    }

    #[test]
    fn lookup_by_tag_accepts_names_and_type_uris() {
        let registry = SchemaRegistry::builtin().unwrap();
        let by_name = registry.schema_for_tag("conceptScheme").unwrap();
        assert_eq!(by_name.entity_type(), EntityType::ConceptScheme);
        let by_uri = registry
            .schema_for_tag("http://www.w3.org/2004/02/skos/core#Concept")
            .unwrap();
        assert_eq!(by_uri.entity_type(), EntityType::Concept);
        assert!(matches!(
            registry.schema_for_tag("Collection"),
            Err(Error::UnknownEntityType(_))
        ));
    }

    #[test]
    fn strict_schema_rejects_what_lenient_accepts() {
        let registry = SchemaRegistry::builtin().unwrap();
        let schema = registry.schema_for(EntityType::Concept);
        let doc = json!({"uri": "http://example.org/c1", "x-note": "kept"});
        assert!(schema.compiled(false).is_valid(&doc));
        assert!(!schema.compiled(true).is_valid(&doc));
    }

    #[test]
    fn kos_schema_is_compiled_when_defined() {
        let registry = SchemaRegistry::builtin().unwrap();
        let kos = registry.kos_schema().unwrap();
        let doc = json!({
            "id": "https://example.org/kos",
            "type": "ConceptScheme",
            "title": {"en": "Example"},
            "description": {"en": "Example"},
            "x-origin": "skohub"
        });
        assert!(kos.compiled(false).is_valid(&doc));
        assert!(!kos.compiled(true).is_valid(&doc));
        assert!(!kos.compiled(false).is_valid(&json!({"id": "https://example.org/kos"})));
    }

    #[test]
    fn document_missing_a_definition_is_invalid() {
        let document = json!({
            "schema_version": "custom-1",
            "definitions": {
                "concept": {"type": "object", "properties": {"uri": {"type": "string"}}}
            }
        });
        let err = SchemaRegistry::from_json(&document).err();
        assert!(matches!(err, Some(Error::InvalidSchema(msg)) if msg.contains("conceptScheme")));
    }
}
