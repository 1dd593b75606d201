//! Statements attached to a resource: annotations and qualified values.
//!
//! Qualified values are keyed by the URI of the property they qualify
//! (e.g., `qualifiedDates["http://schema.org/birthDate"]`). JSKOS data uses
//! both a single value and a list per key, so both are kept as read.

use crate::model::identity::{Context, Rank, Uri};
use crate::model::resource::{Extensions, Item, Set};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single value or a list of values under one key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let values: &[T] = match self {
            OneOrMany::Many(values) => values,
            OneOrMany::One(value) => std::slice::from_ref(value),
        };
        values.iter()
    }

    pub fn try_map<U, E>(&self, mut f: impl FnMut(&T) -> Result<U, E>) -> Result<OneOrMany<U>, E> {
        Ok(match self {
            OneOrMany::Many(values) => {
                OneOrMany::Many(values.iter().map(f).collect::<Result<Vec<_>, E>>()?)
            }
            OneOrMany::One(value) => OneOrMany::One(f(value)?),
        })
    }
}

/// Property URI to qualified value(s).
pub type Qualified<T> = BTreeMap<Uri, OneOrMany<T>>;

/// Validity period, provenance and rank shared by all qualified values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Qualifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Set<Item>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualifiedRelation {
    pub resource: Item,
    #[serde(flatten)]
    pub qualifiers: Qualifiers,
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualifiedDate {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<Set<Item>>,
    #[serde(flatten)]
    pub qualifiers: Qualifiers,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// String with an optional language tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualifiedLiteral {
    pub literal: Literal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<Uri>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<Uri>>,
    #[serde(flatten)]
    pub qualifiers: Qualifiers,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Web annotation on a resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub id: Uri,
    pub target: AnnotationTarget,
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// What an annotation is about: a URI, another annotation, or an inline
/// resource. An object with `id` and `target` is read as an annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationTarget {
    Uri(Uri),
    Annotation(Box<Annotation>),
    Resource(Box<Item>),
}
