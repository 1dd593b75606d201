use crate::model::identity::Uri;
use crate::model::mapping::Mapping;
use crate::model::resource::{Description, Extensions, Item, Resource, Set};
use crate::model::scheme::ConceptScheme;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Member lists of a concept bundle. Embedded in both [`Concept`] and
/// [`ConceptBundle`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Members {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_set: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_list: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_choice: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_roles: Option<Map<String, Value>>,
}

impl Members {
    /// All non-null members in document order: set, then list, then choice.
    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        [&self.member_set, &self.member_list, &self.member_choice]
            .into_iter()
            .flatten()
            .flat_map(|members| members.iter().flatten())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Concept bundle used as the `from`/`to` side of a mapping.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConceptBundle {
    #[serde(flatten)]
    pub members: Members,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ConceptBundle {
    /// Bundle holding `uris` as a `memberSet`.
    pub fn from_uris<I, U>(uris: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<Uri>,
    {
        let members = uris
            .into_iter()
            .map(|uri| Some(Concept::with_uri(uri)))
            .collect();
        ConceptBundle {
            members: Members {
                member_set: Some(members),
                ..Default::default()
            },
            extensions: Extensions::new(),
        }
    }

    /// URIs of the bundle members that carry one.
    pub fn uris(&self) -> impl Iterator<Item = &Uri> {
        self.members
            .iter()
            .filter_map(|concept| concept.resource.uri.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A single knowledge-organization entry (e.g., a subject heading).
///
/// Hierarchy lists keep document order; JSKOS consumers display them as
/// given.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Concept {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub description: Description,
    #[serde(flatten)]
    pub members: Members,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrower: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broader: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Set<Concept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_scheme: Option<Set<ConceptScheme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_concept_of: Option<Set<ConceptScheme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Set<Mapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<Set<Occurrence>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Concept {
    pub fn with_uri(uri: impl Into<Uri>) -> Self {
        Concept {
            resource: Resource::with_uri(uri),
            ..Default::default()
        }
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.resource.uri.as_ref()
    }

    pub fn broader_uris(&self) -> impl Iterator<Item = &Uri> {
        set_uris(&self.broader)
    }

    pub fn narrower_uris(&self) -> impl Iterator<Item = &Uri> {
        set_uris(&self.narrower)
    }

    pub fn related_uris(&self) -> impl Iterator<Item = &Uri> {
        set_uris(&self.related)
    }

    pub fn scheme_uris(&self) -> impl Iterator<Item = &Uri> {
        self.in_scheme
            .iter()
            .flatten()
            .flatten()
            .filter_map(|scheme| scheme.resource.uri.as_ref())
    }

    /// True when the concept lists itself as broader or narrower.
    pub fn is_self_referencing(&self) -> bool {
        let Some(own) = self.uri() else {
            return false;
        };
        self.broader_uris()
            .chain(self.narrower_uris())
            .any(|uri| uri == own)
    }
}

/// Usage statistics of a concept (or a combination of concepts) in some
/// database.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Occurrence {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub members: Members,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<Box<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Set<ConceptScheme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

fn set_uris(set: &Option<Set<Concept>>) -> impl Iterator<Item = &Uri> {
    set.iter()
        .flatten()
        .flatten()
        .filter_map(|concept| concept.resource.uri.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn concept_round_trips_relations_in_order() {
        let input = json!({
            "uri": "http://example.org/c2",
            "prefLabel": {"en": "Cat", "de": "Katze"},
            "broader": [{"uri": "http://example.org/c1"}],
            "narrower": [
                {"uri": "http://example.org/c4"},
                {"uri": "http://example.org/c3"},
                null
            ],
            "inScheme": [{"uri": "http://example.org/scheme"}],
            "deprecated": false
        });
        let concept: Concept = serde_json::from_value(input.clone()).unwrap();
        let narrower: Vec<&str> = concept.narrower_uris().map(Uri::as_str).collect();
        assert_eq!(narrower, ["http://example.org/c4", "http://example.org/c3"]);
        assert_eq!(
            concept.scheme_uris().next().map(Uri::as_str),
            Some("http://example.org/scheme")
        );
        assert!(concept.extensions.is_empty());
        assert_eq!(serde_json::to_value(&concept).unwrap(), input);
    }

    #[test]
    fn nested_concepts_keep_their_own_extensions() {
        let input = json!({
            "uri": "http://example.org/c2",
            "broader": [{"uri": "http://example.org/c1", "x-weight": 3}],
            "customField": 42
        });
        let concept: Concept = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(concept.extensions.get("customField"), Some(&json!(42)));
        let parent = concept.broader.as_ref().unwrap()[0].as_ref().unwrap();
        assert_eq!(parent.extensions.get("x-weight"), Some(&json!(3)));
        assert_eq!(serde_json::to_value(&concept).unwrap(), input);
    }

    #[test]
    fn occurrences_are_typed_and_lossless() {
        let input = json!({
            "uri": "http://example.org/c1",
            "occurrences": [
                {
                    "database": {"uri": "http://example.org/db"},
                    "count": 163,
                    "frequency": 0.25,
                    "memberSet": [{"uri": "http://example.org/c1"}],
                    "x-sample": true
                },
                null
            ]
        });
        let concept: Concept = serde_json::from_value(input.clone()).unwrap();
        let occurrence = concept.occurrences.as_ref().unwrap()[0].as_ref().unwrap();
        assert_eq!(occurrence.count, Some(163));
        assert_eq!(occurrence.members.iter().count(), 1);
        assert_eq!(occurrence.extensions.get("x-sample"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&concept).unwrap(), input);
    }

    #[test]
    fn detects_self_reference() {
        let mut concept = Concept::with_uri("http://example.org/c1");
        assert!(!concept.is_self_referencing());
        concept.narrower = Some(vec![Some(Concept::with_uri("http://example.org/c1"))]);
        assert!(concept.is_self_referencing());
    }

    #[test]
    fn bundle_members_and_emptiness() {
        let bundle = ConceptBundle::from_uris(["urn:a", "urn:b"]);
        assert!(!bundle.is_empty());
        assert_eq!(bundle.uris().count(), 2);

        let open_only: ConceptBundle =
            serde_json::from_value(json!({"memberSet": [null]})).unwrap();
        assert!(open_only.is_empty());
        assert!(ConceptBundle::default().is_empty());
    }
}
