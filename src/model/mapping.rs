use crate::model::concept::ConceptBundle;
use crate::model::identity::{EntityType, MappingType, Uri};
use crate::model::resource::{Access, Description, Extensions, Item, Resource, Set};
use crate::model::scheme::ConceptScheme;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// An asserted correspondence between concepts, usually across schemes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Mapping {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub description: Description,
    pub from: ConceptBundle,
    pub to: ConceptBundle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_scheme: Option<Box<ConceptScheme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_scheme: Option<Box<ConceptScheme>>,
    /// Kept as a JSON number so `1` and `1.0` serialize back unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_relevance: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Uri>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Mapping {
    /// Mapping between two concept URIs with the given relation.
    pub fn between(
        uri: impl Into<Uri>,
        from: impl Into<Uri>,
        to: impl Into<Uri>,
        kind: MappingType,
    ) -> Self {
        Mapping {
            resource: Resource {
                uri: Some(uri.into()),
                types: Some(vec![
                    Uri::from(EntityType::Mapping.type_uri()),
                    Uri::from(kind.uri()),
                ]),
                ..Default::default()
            },
            from: ConceptBundle::from_uris([from]),
            to: ConceptBundle::from_uris([to]),
            ..Default::default()
        }
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.resource.uri.as_ref()
    }

    /// Specific relation from `type`; `None` for a generic mapping relation.
    pub fn mapping_type(&self) -> Option<MappingType> {
        self.resource
            .types
            .iter()
            .flatten()
            .find_map(|uri| MappingType::from_uri(uri.as_str()))
    }

    /// Relevance as a float, when present and representable.
    pub fn relevance(&self) -> Option<f64> {
        self.mapping_relevance.as_ref().and_then(Number::as_f64)
    }
}

/// A set of mappings between two concept schemes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Concordance {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub description: Description,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_scheme: Option<ConceptScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_scheme: Option<ConceptScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Access<Mapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distributions: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<String>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Concordance {
    pub fn uri(&self) -> Option<&Uri> {
        self.resource.uri.as_ref()
    }

    /// Inline mappings; empty when the concordance only links an endpoint.
    pub fn mappings(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.iter().flat_map(|access| access.members())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mapping_type_comes_from_type_list() {
        let mapping = Mapping::between(
            "http://example.org/m1",
            "http://example.org/a/1",
            "http://example.org/b/9",
            MappingType::Close,
        );
        assert_eq!(mapping.mapping_type(), Some(MappingType::Close));

        let generic: Mapping = serde_json::from_value(json!({
            "type": ["http://www.w3.org/2004/02/skos/core#mappingRelation"],
            "from": {"memberSet": [{"uri": "urn:a"}]},
            "to": {"memberSet": [{"uri": "urn:b"}]}
        }))
        .unwrap();
        assert_eq!(generic.mapping_type(), None);
    }

    #[test]
    fn relevance_keeps_integer_form() {
        let input = json!({
            "uri": "http://example.org/m1",
            "from": {"memberSet": [{"uri": "urn:a"}]},
            "to": {"memberSet": [{"uri": "urn:b"}], "x-note": "kept"},
            "mappingRelevance": 1
        });
        let mapping: Mapping = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(mapping.relevance(), Some(1.0));
        assert_eq!(mapping.to.extensions.get("x-note"), Some(&json!("kept")));
        assert_eq!(serde_json::to_value(&mapping).unwrap(), input);
    }

    #[test]
    fn concordance_iterates_inline_mappings() {
        let input = json!({
            "uri": "http://example.org/concordance",
            "fromScheme": {"uri": "http://example.org/a"},
            "toScheme": {"uri": "http://example.org/b"},
            "mappings": [
                {"from": {"memberSet": [{"uri": "urn:a"}]}, "to": {"memberSet": [{"uri": "urn:b"}]}},
                null
            ],
            "extent": "1"
        });
        let concordance: Concordance = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(concordance.mappings().count(), 1);
        assert_eq!(serde_json::to_value(&concordance).unwrap(), input);
    }
}
