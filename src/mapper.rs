//! Conversion between validated JSON and typed entities.
//!
//! `parse` assumes its input already passed validation for the given type;
//! `serialize` refuses entities that lost the fields validation guarantees.
//! The KOS wrapper document has its own pair, `parse_kos` / `serialize_kos`.

use crate::error::{Error, Result};
use crate::model::{
    Concept, ConceptBundle, ConceptScheme, Concordance, DocumentKind, Entity, EntityType, Kos,
    Mapping, Registry,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Build the typed entity for a validated document.
pub fn parse(value: Value, entity_type: EntityType) -> Result<Entity> {
    let entity = match entity_type {
        EntityType::Concept => Entity::Concept(decode::<Concept>(value, entity_type)?),
        EntityType::ConceptScheme => {
            Entity::ConceptScheme(decode::<ConceptScheme>(value, entity_type)?)
        }
        EntityType::Mapping => Entity::Mapping(decode::<Mapping>(value, entity_type)?),
        EntityType::Registry => Entity::Registry(decode::<Registry>(value, entity_type)?),
        EntityType::Concordance => {
            Entity::Concordance(decode::<Concordance>(value, entity_type)?)
        }
    };
    Ok(entity)
}

/// Turn an entity back into JSON with the field names it was read with.
/// Unknown fields come back unchanged.
pub fn serialize(entity: &Entity) -> Result<Value> {
    ensure_complete(entity)?;
    match entity {
        Entity::Concept(concept) => encode(concept, EntityType::Concept),
        Entity::ConceptScheme(scheme) => encode(scheme, EntityType::ConceptScheme),
        Entity::Mapping(mapping) => encode(mapping, EntityType::Mapping),
        Entity::Registry(registry) => encode(registry, EntityType::Registry),
        Entity::Concordance(concordance) => encode(concordance, EntityType::Concordance),
    }
}

/// Build a [`Kos`] from a document validated against the KOS schema.
pub fn parse_kos(value: Value) -> Result<Kos> {
    decode(value, DocumentKind::Kos)
}

pub fn serialize_kos(kos: &Kos) -> Result<Value> {
    if kos.id.trim().is_empty() {
        return Err(incomplete(DocumentKind::Kos, "id", "KOS has a blank id"));
    }
    encode(kos, DocumentKind::Kos)
}

fn decode<T: DeserializeOwned>(value: Value, kind: impl Into<DocumentKind>) -> Result<T> {
    let kind = kind.into();
    serde_json::from_value(value)
        .map_err(|err| Error::MalformedInput(format!("document does not decode as {kind}: {err}")))
}

fn encode<T: Serialize>(entity: &T, kind: impl Into<DocumentKind>) -> Result<Value> {
    let kind = kind.into();
    serde_json::to_value(entity)
        .map_err(|err| Error::MalformedInput(format!("{kind} cannot be written as JSON: {err}")))
}

fn ensure_complete(entity: &Entity) -> Result<()> {
    let entity_type = entity.entity_type();
    let has_uri = entity
        .uri()
        .is_some_and(|uri| !uri.as_str().trim().is_empty());
    if !has_uri {
        return Err(incomplete(
            entity_type.into(),
            "uri",
            "top-level entity has no uri",
        ));
    }
    if let Entity::Mapping(mapping) = entity {
        check_bundle(&mapping.from, "from")?;
        check_bundle(&mapping.to, "to")?;
    }
    Ok(())
}

fn check_bundle(bundle: &ConceptBundle, field: &'static str) -> Result<()> {
    if bundle.is_empty() {
        return Err(incomplete(
            EntityType::Mapping.into(),
            field,
            &format!("mapping '{field}' has no member concepts"),
        ));
    }
    Ok(())
}

fn incomplete(entity: DocumentKind, field: &'static str, reason: &str) -> Error {
    tracing::error!(
        document = %entity,
        field,
        reason,
        "refusing to serialize an entity that no longer satisfies its schema"
    );
    Error::IncompleteEntity {
        entity,
        field,
        reason: reason.to_string(),
    }
}
