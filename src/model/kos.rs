use crate::model::concept::Concept;
use crate::model::resource::{Extensions, LanguageMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A knowledge organization system published as one JSON-LD document
/// (SkoHub style): `id`, `type`, `title`, `description` and the top concepts
/// under `hasTopConcept`.
///
/// This wrapper is not a JSKOS entity type; it has its own schema and is
/// never inferred from an entity document. `@context` may be any JSON-LD
/// context and is kept as read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kos {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: LanguageMap,
    pub description: LanguageMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_top_concept: Option<Vec<Concept>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Kos {
    pub fn top_concepts(&self) -> impl Iterator<Item = &Concept> {
        self.has_top_concept.iter().flatten()
    }

    pub fn title(&self, language: &str) -> Option<&str> {
        self.title.get(language).map(String::as_str)
    }
}
