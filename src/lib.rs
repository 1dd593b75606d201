//! JSKOS (JSON Knowledge Organization Systems) for Rust.
//!
//! The crate validates raw JSON against the built-in JSKOS schemas, turns
//! valid documents into typed entities, and writes entities back out without
//! losing fields it does not model. The public surface is small:
//!
//! - [`validate`] checks a document and names its entity type.
//! - [`load`] / [`load_value`] / [`load_many`] validate and build entities.
//! - [`dump`] / [`dump_value`] serialize entities back to JSON.
//! - [`read_kos`] / [`load_kos`] / [`dump_kos`] do the same for a KOS
//!   wrapper document (`id`, `title`, `description`, `hasTopConcept`).
//!
//! Lower layers ([`SchemaRegistry`], [`Validator`], [`mapper`]) are public
//! for callers that need custom schemas or reports without loading.

pub mod curie;
pub mod error;
pub mod mapper;
pub mod model;
pub mod process;
pub mod registry;
pub mod validator;

mod schema_loader;

use serde_json::Value;
use std::fs;
use std::path::Path;

pub use curie::{Converter, Curie};
pub use error::{Error, Result};
pub use model::{
    Access, Annotation, AnnotationTarget, Concept, ConceptBundle, ConceptScheme, Concordance,
    Context, Description, DocumentKind, Entity, EntityType, Extensions, Item, Kos, LanguageMap,
    LanguageMapOfList, Literal, Mapping, MappingType, Members, Occurrence, OneOrMany, Qualified,
    QualifiedDate, QualifiedLiteral, QualifiedRelation, Qualifiers, Rank, Registry, Resource, Set,
    Uri,
};
pub use process::{
    Process, ProcessedAnnotation, ProcessedAnnotationTarget, ProcessedConcept,
    ProcessedConceptBundle, ProcessedConceptScheme, ProcessedConcordance, ProcessedEntity,
    ProcessedItem, ProcessedKos, ProcessedMapping, ProcessedOccurrence, ProcessedQualified,
    ProcessedQualifiedDate, ProcessedQualifiedLiteral, ProcessedQualifiedRelation,
    ProcessedQualifiers,
};
pub use registry::{EntitySchema, KosSchema, SchemaRegistry};
pub use validator::{JsonPath, PathSegment, ValidationReport, Validator, Violation};

/// How documents are validated on the way in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Reject fields outside the JSKOS vocabulary instead of preserving them.
    pub strict: bool,
    /// Skip inference and validate every document as this type.
    pub entity_type_hint: Option<EntityType>,
}

impl LoadOptions {
    pub fn strict() -> Self {
        LoadOptions {
            strict: true,
            ..Default::default()
        }
    }

    pub fn with_hint(mut self, entity_type: EntityType) -> Self {
        self.entity_type_hint = Some(entity_type);
        self
    }
}

fn validator_for(options: &LoadOptions) -> Result<Validator<'static>> {
    Ok(Validator::new(SchemaRegistry::builtin()?).strict(options.strict))
}

/// Validate `value` and return the entity type it was validated as.
pub fn validate(value: &Value, options: &LoadOptions) -> Result<EntityType> {
    validator_for(options)?.validate(value, options.entity_type_hint)
}

/// Parse, validate and load one JSKOS document.
pub fn load(text: &str, options: &LoadOptions) -> Result<Entity> {
    let value: Value = serde_json::from_str(text)?;
    load_value(value, options)
}

pub fn load_value(value: Value, options: &LoadOptions) -> Result<Entity> {
    let entity_type = validate(&value, options)?;
    mapper::parse(value, entity_type)
}

/// How a multi-document input was laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// One JSON object.
    Single,
    /// A JSON array of objects.
    Array,
    /// Newline-delimited JSON, one object per line.
    Lines,
}

/// Split `text` into JSON documents without validating them.
///
/// Empty input is an error. NDJSON parse errors name the offending line.
pub fn read_documents(text: &str) -> Result<(Layout, Vec<Value>)> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::MalformedInput("no input provided".to_string()));
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Array(items) => Ok((Layout::Array, items)),
            Value::Object(_) => Ok((Layout::Single, vec![value])),
            _ => Err(Error::MalformedInput(
                "expected a JSON object, an array of objects, or NDJSON".to_string(),
            )),
        };
    }

    let mut documents = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line)
            .map_err(|err| Error::MalformedInput(format!("line {}: {err}", idx + 1)))?;
        documents.push(value);
    }
    Ok((Layout::Lines, documents))
}

/// Load a stream of documents: a single object, a JSON array of objects, or
/// newline-delimited JSON.
///
/// For array and NDJSON input, violations carry the document index as the
/// first path segment.
pub fn load_many(text: &str, options: &LoadOptions) -> Result<Vec<Entity>> {
    load_documents(text, options).map(|(_, entities)| entities)
}

/// [`load_many`] that also returns the layout of the input, so callers can
/// write results back in the same shape.
pub fn load_documents(text: &str, options: &LoadOptions) -> Result<(Layout, Vec<Entity>)> {
    let (layout, documents) = read_documents(text)?;
    let entities = documents
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            load_value(value, options).map_err(|err| match layout {
                Layout::Single => err,
                Layout::Array | Layout::Lines => locate(err, index),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((layout, entities))
}

fn locate(err: Error, index: usize) -> Error {
    match err {
        Error::SchemaViolation(report) => Error::SchemaViolation(report.within(index)),
        Error::MalformedInput(msg) => Error::MalformedInput(format!("document {index}: {msg}")),
        other => other,
    }
}

/// Serialize an entity as pretty-printed JSON.
pub fn dump(entity: &Entity) -> Result<String> {
    let value = dump_value(entity)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn dump_value(entity: &Entity) -> Result<Value> {
    mapper::serialize(entity)
}

/// Validate `value` as a KOS wrapper document. `entity_type_hint` does not
/// apply; top concepts are always checked as concepts.
pub fn validate_kos(value: &Value, options: &LoadOptions) -> Result<()> {
    validator_for(options)?.validate_kos(value)
}

/// Parse, validate and load a KOS wrapper document.
pub fn load_kos(text: &str, options: &LoadOptions) -> Result<Kos> {
    let value: Value = serde_json::from_str(text)?;
    load_kos_value(value, options)
}

pub fn load_kos_value(value: Value, options: &LoadOptions) -> Result<Kos> {
    validate_kos(&value, options)?;
    mapper::parse_kos(value)
}

/// Read a KOS wrapper document from a local file.
pub fn read_kos(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Kos> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_kos(&text, options)
}

pub fn dump_kos(kos: &Kos) -> Result<String> {
    let value = dump_kos_value(kos)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn dump_kos_value(kos: &Kos) -> Result<Value> {
    mapper::serialize_kos(kos)
}
