use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const CONCEPT_TYPE: &str = "http://www.w3.org/2004/02/skos/core#Concept";
const SCHEME_TYPE: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";
const MAPPING_TYPE: &str = "http://www.w3.org/2004/02/skos/core#mappingRelation";
const REGISTRY_TYPE: &str = "http://purl.org/cld/cdtype/CatalogueOrIndex";
const CONCORDANCE_TYPE: &str = "http://rdfs.org/ns/void#Linkset";

/// Identifier of a JSKOS resource (e.g., `http://example.org/c1`).
///
/// URIs are kept verbatim; they are never dereferenced or normalized so
/// documents serialize back exactly as they were read.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(pub String);

impl Uri {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Uri(value.to_string())
    }
}

impl From<String> for Uri {
    fn from(value: String) -> Self {
        Uri(value)
    }
}

/// The finite set of JSKOS entity types a document can be loaded as.
///
/// Each variant owns one definition in the schema registry and one typed
/// model in [`crate::model`]; inference never falls back to a default.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum EntityType {
    Concept,
    ConceptScheme,
    Mapping,
    Registry,
    Concordance,
}

impl EntityType {
    pub const ALL: [EntityType; 5] = [
        EntityType::Concept,
        EntityType::ConceptScheme,
        EntityType::Mapping,
        EntityType::Registry,
        EntityType::Concordance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Concept => "Concept",
            EntityType::ConceptScheme => "ConceptScheme",
            EntityType::Mapping => "Mapping",
            EntityType::Registry => "Registry",
            EntityType::Concordance => "Concordance",
        }
    }

    /// Name of the matching entry under `definitions` in the schema document.
    pub fn definition(&self) -> &'static str {
        match self {
            EntityType::Concept => "concept",
            EntityType::ConceptScheme => "conceptScheme",
            EntityType::Mapping => "mapping",
            EntityType::Registry => "registry",
            EntityType::Concordance => "concordance",
        }
    }

    /// Canonical `type` URI that marks a document as this entity type.
    pub fn type_uri(&self) -> &'static str {
        match self {
            EntityType::Concept => CONCEPT_TYPE,
            EntityType::ConceptScheme => SCHEME_TYPE,
            EntityType::Mapping => MAPPING_TYPE,
            EntityType::Registry => REGISTRY_TYPE,
            EntityType::Concordance => CONCORDANCE_TYPE,
        }
    }

    /// Resolve a `type` URI. Specific mapping relations count as mappings.
    pub fn from_type_uri(uri: &str) -> Option<Self> {
        if MappingType::from_uri(uri).is_some() {
            return Some(EntityType::Mapping);
        }
        EntityType::ALL
            .into_iter()
            .find(|entity_type| entity_type.type_uri() == uri)
    }

    /// Fields whose presence suggests this type when a document has no `type`.
    pub fn signature_fields(&self) -> &'static [&'static str] {
        match self {
            EntityType::Concept => &[
                "broader",
                "narrower",
                "related",
                "previous",
                "next",
                "ancestors",
                "inScheme",
                "topConceptOf",
                "occurrences",
                "deprecated",
            ],
            EntityType::ConceptScheme => &[
                "topConcepts",
                "namespace",
                "uriPattern",
                "notationPattern",
                "notationExamples",
            ],
            EntityType::Mapping => &["from", "to", "mappingRelevance", "justification"],
            EntityType::Registry => &["schemes", "registries", "concordances"],
            EntityType::Concordance => &["mappings", "fromScheme", "toScheme"],
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    /// Accepts the type name in any case (`concept`, `ConceptScheme`,
    /// `concept-scheme`, `concept_scheme`) or a `type` URI.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        if let Some(found) = EntityType::from_type_uri(tag) {
            return Ok(found);
        }
        let normalized: String = tag
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "concept" => Ok(EntityType::Concept),
            "conceptscheme" | "scheme" => Ok(EntityType::ConceptScheme),
            "mapping" => Ok(EntityType::Mapping),
            "registry" => Ok(EntityType::Registry),
            "concordance" => Ok(EntityType::Concordance),
            _ => Err(Error::UnknownEntityType(tag.to_string())),
        }
    }
}

impl Serialize for EntityType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// What a document was validated as: one of the entity types, or the KOS
/// wrapper document.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum DocumentKind {
    Entity(EntityType),
    Kos,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Entity(entity_type) => entity_type.as_str(),
            DocumentKind::Kos => "KOS",
        }
    }

    pub fn entity_type(&self) -> Option<EntityType> {
        match self {
            DocumentKind::Entity(entity_type) => Some(*entity_type),
            DocumentKind::Kos => None,
        }
    }
}

impl From<EntityType> for DocumentKind {
    fn from(entity_type: EntityType) -> Self {
        DocumentKind::Entity(entity_type)
    }
}

impl PartialEq<EntityType> for DocumentKind {
    fn eq(&self, other: &EntityType) -> bool {
        self.entity_type() == Some(*other)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DocumentKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Kind of correspondence asserted by a mapping, carried in its `type` list.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MappingType {
    Exact,
    Close,
    Broad,
    Narrow,
    Related,
}

impl MappingType {
    pub const ALL: [MappingType; 5] = [
        MappingType::Exact,
        MappingType::Close,
        MappingType::Broad,
        MappingType::Narrow,
        MappingType::Related,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MappingType::Exact => "exact",
            MappingType::Close => "close",
            MappingType::Broad => "broad",
            MappingType::Narrow => "narrow",
            MappingType::Related => "related",
        }
    }

    pub fn uri(&self) -> &'static str {
        match self {
            MappingType::Exact => "http://www.w3.org/2004/02/skos/core#exactMatch",
            MappingType::Close => "http://www.w3.org/2004/02/skos/core#closeMatch",
            MappingType::Broad => "http://www.w3.org/2004/02/skos/core#broadMatch",
            MappingType::Narrow => "http://www.w3.org/2004/02/skos/core#narrowMatch",
            MappingType::Related => "http://www.w3.org/2004/02/skos/core#relatedMatch",
        }
    }

    pub fn from_uri(uri: &str) -> Option<Self> {
        MappingType::ALL.into_iter().find(|kind| kind.uri() == uri)
    }
}

impl Serialize for MappingType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Rank of a statement (`preferred`, `normal`, `deprecated`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Preferred,
    Normal,
    Deprecated,
}

/// JSON-LD `@context`: a single URI or a list of them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Context {
    Single(Uri),
    Multiple(Vec<Uri>),
}

impl<'de> Deserialize<'de> for EntityType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
