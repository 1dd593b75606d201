//! Field groups shared by every JSKOS entity.
//!
//! JSKOS layers its types: every object is a *resource*, most are also
//! *items* (labels, notes, dates, places). Entities embed these groups with
//! `#[serde(flatten)]` and end with an [`Extensions`] map that captures any
//! field the groups do not name, so unknown data survives a round trip.

use crate::model::identity::{Context, Rank, Uri};
use crate::model::statement::{
    Annotation, Qualified, QualifiedDate, QualifiedLiteral, QualifiedRelation,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Language tag to string (e.g., `{"en": "Cat"}`).
pub type LanguageMap = BTreeMap<String, String>;

/// Language tag to a list of strings (notes, alternative labels).
pub type LanguageMapOfList = BTreeMap<String, Vec<String>>;

/// Ordered JSKOS set. A `None` member marks the set as open (more unknown
/// members exist).
pub type Set<T> = Vec<Option<T>>;

/// Fields present in the input but not part of the JSKOS vocabulary.
pub type Extensions = Map<String, Value>;

/// Either an API endpoint to fetch members from, or the members inline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Access<T> {
    Endpoint(Uri),
    Members(Set<T>),
}

impl<T> Access<T> {
    /// Inline members, skipping `null` placeholders. Endpoints yield nothing.
    pub fn members(&self) -> impl Iterator<Item = &T> {
        let members: &[Option<T>] = match self {
            Access::Endpoint(_) => &[],
            Access::Members(members) => members,
        };
        members.iter().flatten()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Uri>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<Uri>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Annotation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_relations: Option<Qualified<QualifiedRelation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_dates: Option<Qualified<QualifiedDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_literals: Option<Qualified<QualifiedLiteral>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
}

impl Resource {
    pub fn with_uri(uri: impl Into<Uri>) -> Self {
        Resource {
            uri: Some(uri.into()),
            ..Default::default()
        }
    }

    /// True when `type` lists `uri`.
    pub fn has_type(&self, uri: &str) -> bool {
        self.types
            .as_ref()
            .is_some_and(|types| types.iter().any(|t| t.as_str() == uri))
    }
}

/// Item-level description: notation, labels, notes, dates and places.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Description {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pref_label: Option<LanguageMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_label: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_label: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_note: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_note: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editorial_note: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_note: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_dates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_place: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_place: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_of: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depiction: Option<Vec<Uri>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_tracker: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_of: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Uri>,
}

impl Description {
    /// Preferred label in `language`, if present.
    pub fn label(&self, language: &str) -> Option<&str> {
        self.pref_label
            .as_ref()
            .and_then(|labels| labels.get(language))
            .map(String::as_str)
    }
}

/// Generic JSKOS item, used where the vocabulary allows any resource
/// (creators, places, licenses, distributions).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(flatten)]
    pub description: Description,
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_keeps_unknown_fields_in_extensions() {
        let input = json!({
            "uri": "http://example.org/person/1",
            "prefLabel": {"en": "Ada"},
            "orcid": "0000-0001",
            "nested": {"deep": [1, 2]}
        });
        let item: Item = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(item.resource.uri, Some(Uri::from("http://example.org/person/1")));
        assert_eq!(item.description.label("en"), Some("Ada"));
        assert_eq!(item.extensions.len(), 2);
        assert_eq!(item.extensions.get("orcid"), Some(&json!("0000-0001")));
        assert_eq!(serde_json::to_value(&item).unwrap(), input);
    }

    #[test]
    fn open_sets_keep_null_members() {
        let input = json!({"creator": [{"prefLabel": {"en": "A"}}, null]});
        let item: Item = serde_json::from_value(input.clone()).unwrap();
        let creators = item.resource.creator.as_ref().unwrap();
        assert_eq!(creators.len(), 2);
        assert!(creators[1].is_none());
        assert_eq!(serde_json::to_value(&item).unwrap(), input);
    }

    #[test]
    fn access_distinguishes_endpoint_and_members() {
        let endpoint: Access<Item> = serde_json::from_value(json!("https://api.example.org/concepts")).unwrap();
        assert!(matches!(endpoint, Access::Endpoint(_)));
        assert_eq!(endpoint.members().count(), 0);

        let inline: Access<Item> =
            serde_json::from_value(json!([{"uri": "urn:x:1"}, null])).unwrap();
        assert_eq!(inline.members().count(), 1);
    }

    #[test]
    fn statements_are_typed_and_round_trip() {
        let input = json!({
            "uri": "http://example.org/person/1",
            "annotations": [{"id": "http://example.org/a/1", "target": "http://example.org/person/1"}],
            "qualifiedRelations": {
                "http://schema.org/knows": [{"resource": {"uri": "http://example.org/person/2"}, "startDate": "1833"}]
            },
            "qualifiedLiterals": {
                "http://schema.org/name": {"literal": {"string": "Ada", "language": "en"}}
            }
        });
        let item: Item = serde_json::from_value(input.clone()).unwrap();
        let relations = item.resource.qualified_relations.as_ref().unwrap();
        let knows = relations[&Uri::from("http://schema.org/knows")].iter().next().unwrap();
        assert_eq!(knows.qualifiers.start_date.as_deref(), Some("1833"));
        assert_eq!(item.resource.annotations.as_ref().map(Vec::len), Some(1));
        assert!(item.extensions.is_empty());
        assert_eq!(serde_json::to_value(&item).unwrap(), input);
    }

    #[test]
    fn empty_lists_are_not_dropped() {
        let input = json!({"notation": [], "identifier": []});
        let item: Item = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&item).unwrap(), input);
    }
}
