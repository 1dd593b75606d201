use crate::model::concept::Concept;
use crate::model::identity::Uri;
use crate::model::mapping::{Concordance, Mapping};
use crate::model::resource::{Access, Description, Extensions, Item, Resource, Set};
use serde::{Deserialize, Serialize};

/// A named collection of concepts (e.g., a controlled vocabulary).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConceptScheme {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub description: Description,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_concepts: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation_examples: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concepts: Option<Access<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Access<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distributions: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<Set<Item>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ConceptScheme {
    pub fn with_uri(uri: impl Into<Uri>) -> Self {
        ConceptScheme {
            resource: Resource::with_uri(uri),
            ..Default::default()
        }
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.resource.uri.as_ref()
    }

    /// Scheme title: the preferred label in `language`.
    pub fn title(&self, language: &str) -> Option<&str> {
        self.description.label(language)
    }

    pub fn top_concepts(&self) -> impl Iterator<Item = &Concept> {
        self.top_concepts.iter().flatten().flatten()
    }
}

/// A registry of schemes, concepts and mappings with access endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Registry {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub description: Description,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concepts: Option<Access<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Access<ConceptScheme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Access<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Access<Mapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registries: Option<Access<Registry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concordances: Option<Access<Concordance>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<Access<Item>>,
    /// JSKOS extension URIs declared by the registry. Unrelated to the
    /// `extensions` map of unknown fields below.
    #[serde(rename = "extensions", skip_serializing_if = "Option::is_none")]
    pub extension_uris: Option<Vec<Uri>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<Set<Item>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Registry {
    pub fn with_uri(uri: impl Into<Uri>) -> Self {
        Registry {
            resource: Resource::with_uri(uri),
            ..Default::default()
        }
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.resource.uri.as_ref()
    }

    /// Endpoint URI for `schemes` when the registry publishes one.
    pub fn schemes_endpoint(&self) -> Option<&Uri> {
        match self.schemes.as_ref()? {
            Access::Endpoint(uri) => Some(uri),
            Access::Members(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scheme_round_trips_with_inline_concepts() {
        let input = json!({
            "uri": "http://example.org/animals",
            "prefLabel": {"en": "Animals"},
            "topConcepts": [{"uri": "http://example.org/c1"}],
            "concepts": [{"uri": "http://example.org/c1"}, {"uri": "http://example.org/c2"}],
            "namespace": "http://example.org/",
            "notationPattern": "[a-z]+",
            "languages": ["en", "de"]
        });
        let scheme: ConceptScheme = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(scheme.title("en"), Some("Animals"));
        assert_eq!(scheme.top_concepts().count(), 1);
        assert_eq!(
            scheme.concepts.as_ref().map(|access| access.members().count()),
            Some(2)
        );
        assert_eq!(serde_json::to_value(&scheme).unwrap(), input);
    }

    #[test]
    fn registry_keeps_endpoints_and_extension_uris_apart() {
        let input = json!({
            "uri": "http://example.org/registry",
            "schemes": "https://api.example.org/voc",
            "mappings": "https://api.example.org/mappings",
            "extensions": ["http://example.org/ext/1"],
            "api": [{"url": "https://api.example.org/"}]
        });
        let registry: Registry = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(
            registry.schemes_endpoint().map(Uri::as_str),
            Some("https://api.example.org/voc")
        );
        assert_eq!(registry.extension_uris.as_ref().map(Vec::len), Some(1));
        assert!(registry.extensions.contains_key("api"));
        assert!(!registry.extensions.contains_key("extensions"));
        assert_eq!(serde_json::to_value(&registry).unwrap(), input);
    }
}
