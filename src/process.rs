//! Compact views of entities with URIs replaced by CURIEs.
//!
//! Processing is strict: every URI that is turned into a reference must
//! fall under a prefix of the converter, otherwise `UnknownPrefix` is
//! returned. This covers the property keys of qualified values too, which
//! appear as `prefix:identifier` strings. `type` URIs of resources are passed
//! through unchanged.

use crate::curie::{Converter, Curie};
use crate::error::Result;
use crate::model::{
    Access, Annotation, AnnotationTarget, Concept, ConceptBundle, ConceptScheme, Concordance,
    Context, Description, Entity, Item, Kos, LanguageMap, LanguageMapOfList, Literal, Mapping,
    Members, Occurrence, OneOrMany, Qualified, QualifiedDate, QualifiedLiteral,
    QualifiedRelation, Qualifiers, Rank, Registry, Resource, Set, Uri,
};
use serde::Serialize;
use serde_json::Number;
use std::collections::BTreeMap;

/// Conversion of a model value into its compact form.
pub trait Process {
    type Output;

    fn process(&self, converter: &Converter) -> Result<Self::Output>;
}

/// Qualified values keyed by the CURIE of their property.
pub type ProcessedQualified<T> = BTreeMap<String, OneOrMany<T>>;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Curie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Vec<Curie>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<Uri>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<Set<ProcessedItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<Set<ProcessedItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Set<ProcessedItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<Set<ProcessedItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of: Option<Set<ProcessedItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<ProcessedAnnotation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_relations: Option<ProcessedQualified<ProcessedQualifiedRelation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_dates: Option<ProcessedQualified<ProcessedQualifiedDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_literals: Option<ProcessedQualified<ProcessedQualifiedLiteral>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_label: Option<LanguageMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_label: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_label: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_note: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<LanguageMapOfList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<LanguageMapOfList>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessedAnnotation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// From `id`.
    pub reference: Curie,
    pub target: ProcessedAnnotationTarget,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProcessedAnnotationTarget {
    Reference(Curie),
    Annotation(Box<ProcessedAnnotation>),
    Resource(Box<ProcessedItem>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessedQualifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Set<ProcessedItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessedQualifiedRelation {
    #[serde(flatten)]
    pub qualifiers: ProcessedQualifiers,
    pub resource: ProcessedItem,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessedQualifiedDate {
    #[serde(flatten)]
    pub qualifiers: ProcessedQualifiers,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Set<ProcessedItem>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessedQualifiedLiteral {
    #[serde(flatten)]
    pub qualifiers: ProcessedQualifiers,
    pub literal: Literal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<Curie>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<Curie>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessedConceptBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_set: Option<Set<ProcessedConcept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_list: Option<Set<ProcessedConcept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_choice: Option<Set<ProcessedConcept>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessedConcept {
    #[serde(flatten)]
    pub item: ProcessedItem,
    #[serde(flatten)]
    pub members: ProcessedConceptBundle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrower: Option<Set<ProcessedConcept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broader: Option<Set<ProcessedConcept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Set<ProcessedConcept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_scheme: Option<Set<ProcessedConceptScheme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Set<ProcessedMapping>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<Set<ProcessedOccurrence>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessedOccurrence {
    #[serde(flatten)]
    pub item: ProcessedItem,
    #[serde(flatten)]
    pub members: ProcessedConceptBundle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<Box<ProcessedItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<Curie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Set<ProcessedConceptScheme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessedConceptScheme {
    #[serde(flatten)]
    pub item: ProcessedItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_concepts: Option<Set<ProcessedConcept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Uri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation_examples: Option<Vec<String>>,
    /// Inline concepts; `None` when the scheme only links an endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concepts: Option<Set<ProcessedConcept>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessedMapping {
    #[serde(flatten)]
    pub item: ProcessedItem,
    pub from_bundle: ProcessedConceptBundle,
    pub to_bundle: ProcessedConceptBundle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_scheme: Option<Box<ProcessedConceptScheme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_scheme: Option<Box<ProcessedConceptScheme>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_relevance: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<Curie>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProcessedConcordance {
    #[serde(flatten)]
    pub item: ProcessedItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_scheme: Option<ProcessedConceptScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_scheme: Option<ProcessedConceptScheme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Set<ProcessedMapping>>,
}

/// Compact view of a KOS wrapper document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessedKos {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: LanguageMap,
    pub description: LanguageMap,
    pub concepts: Vec<ProcessedConcept>,
}

/// Compact view of any entity. Registries are reduced to their item fields.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProcessedEntity {
    Concept(ProcessedConcept),
    ConceptScheme(ProcessedConceptScheme),
    Mapping(ProcessedMapping),
    Registry(ProcessedItem),
    Concordance(ProcessedConcordance),
}

fn process_item(
    resource: &Resource,
    description: &Description,
    converter: &Converter,
) -> Result<ProcessedItem> {
    Ok(ProcessedItem {
        notation: description.notation.clone(),
        preferred_label: description.pref_label.clone(),
        alternative_label: description.alt_label.clone(),
        hidden_label: description.hidden_label.clone(),
        scope_note: description.scope_note.clone(),
        definition: description.definition.clone(),
        example: description.example.clone(),
        ..process_resource(resource, converter)?
    })
}

fn process_resource(resource: &Resource, converter: &Converter) -> Result<ProcessedItem> {
    Ok(ProcessedItem {
        context: resource.context.clone(),
        reference: parse_optional(resource.uri.as_ref(), converter)?,
        identifier: parse_many(resource.identifier.as_deref(), converter)?,
        types: resource.types.clone(),
        created: resource.created.clone(),
        issued: resource.issued.clone(),
        modified: resource.modified.clone(),
        creator: process_set(resource.creator.as_deref(), converter)?,
        contributor: process_set(resource.contributor.as_deref(), converter)?,
        source: process_set(resource.source.as_deref(), converter)?,
        publisher: process_set(resource.publisher.as_deref(), converter)?,
        part_of: process_set(resource.part_of.as_deref(), converter)?,
        annotations: resource
            .annotations
            .as_ref()
            .map(|annotations| {
                annotations
                    .iter()
                    .map(|annotation| annotation.process(converter))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?,
        qualified_relations: process_qualified(resource.qualified_relations.as_ref(), converter)?,
        qualified_dates: process_qualified(resource.qualified_dates.as_ref(), converter)?,
        qualified_literals: process_qualified(resource.qualified_literals.as_ref(), converter)?,
        rank: resource.rank,
        ..Default::default()
    })
}

fn process_qualified<T: Process>(
    qualified: Option<&Qualified<T>>,
    converter: &Converter,
) -> Result<Option<ProcessedQualified<T::Output>>> {
    let Some(qualified) = qualified else {
        return Ok(None);
    };
    qualified
        .iter()
        .map(|(property, values)| {
            let key = converter.parse_uri(property)?.to_string();
            Ok((key, values.try_map(|value| value.process(converter))?))
        })
        .collect::<Result<ProcessedQualified<_>>>()
        .map(Some)
}

fn process_qualifiers(
    qualifiers: &Qualifiers,
    converter: &Converter,
) -> Result<ProcessedQualifiers> {
    Ok(ProcessedQualifiers {
        start_date: qualifiers.start_date.clone(),
        end_date: qualifiers.end_date.clone(),
        source: process_set(qualifiers.source.as_deref(), converter)?,
        rank: qualifiers.rank,
    })
}

fn parse_optional(uri: Option<&Uri>, converter: &Converter) -> Result<Option<Curie>> {
    uri.map(|uri| converter.parse_uri(uri)).transpose()
}

fn parse_many(uris: Option<&[Uri]>, converter: &Converter) -> Result<Option<Vec<Curie>>> {
    uris.map(|uris| {
        uris.iter()
            .map(|uri| converter.parse_uri(uri))
            .collect::<Result<Vec<_>>>()
    })
    .transpose()
}

fn process_set<T: Process>(
    set: Option<&[Option<T>]>,
    converter: &Converter,
) -> Result<Option<Set<T::Output>>> {
    let Some(set) = set else {
        return Ok(None);
    };
    set.iter()
        .map(|member| member.as_ref().map(|m| m.process(converter)).transpose())
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn process_access<T: Process>(
    access: &Option<Access<T>>,
    converter: &Converter,
) -> Result<Option<Set<T::Output>>> {
    match access {
        Some(Access::Members(set)) => process_set(Some(set.as_slice()), converter),
        Some(Access::Endpoint(_)) | None => Ok(None),
    }
}

fn process_members(members: &Members, converter: &Converter) -> Result<ProcessedConceptBundle> {
    Ok(ProcessedConceptBundle {
        member_set: process_set(members.member_set.as_deref(), converter)?,
        member_list: process_set(members.member_list.as_deref(), converter)?,
        member_choice: process_set(members.member_choice.as_deref(), converter)?,
    })
}

impl Process for Item {
    type Output = ProcessedItem;

    fn process(&self, converter: &Converter) -> Result<ProcessedItem> {
        process_item(&self.resource, &self.description, converter)
    }
}

impl Process for Annotation {
    type Output = ProcessedAnnotation;

    fn process(&self, converter: &Converter) -> Result<ProcessedAnnotation> {
        let target = match &self.target {
            AnnotationTarget::Uri(uri) => {
                ProcessedAnnotationTarget::Reference(converter.parse_uri(uri)?)
            }
            AnnotationTarget::Annotation(annotation) => {
                ProcessedAnnotationTarget::Annotation(Box::new(annotation.process(converter)?))
            }
            AnnotationTarget::Resource(item) => {
                ProcessedAnnotationTarget::Resource(Box::new(item.process(converter)?))
            }
        };
        Ok(ProcessedAnnotation {
            context: self.context.clone(),
            kind: self.kind.clone(),
            reference: converter.parse_uri(&self.id)?,
            target,
        })
    }
}

impl Process for QualifiedRelation {
    type Output = ProcessedQualifiedRelation;

    fn process(&self, converter: &Converter) -> Result<ProcessedQualifiedRelation> {
        Ok(ProcessedQualifiedRelation {
            qualifiers: process_qualifiers(&self.qualifiers, converter)?,
            resource: self.resource.process(converter)?,
        })
    }
}

impl Process for QualifiedDate {
    type Output = ProcessedQualifiedDate;

    fn process(&self, converter: &Converter) -> Result<ProcessedQualifiedDate> {
        Ok(ProcessedQualifiedDate {
            qualifiers: process_qualifiers(&self.qualifiers, converter)?,
            date: self.date.clone(),
            place: process_set(self.place.as_deref(), converter)?,
        })
    }
}

impl Process for QualifiedLiteral {
    type Output = ProcessedQualifiedLiteral;

    fn process(&self, converter: &Converter) -> Result<ProcessedQualifiedLiteral> {
        Ok(ProcessedQualifiedLiteral {
            qualifiers: process_qualifiers(&self.qualifiers, converter)?,
            literal: self.literal.clone(),
            reference: parse_optional(self.uri.as_ref(), converter)?,
            types: parse_many(self.types.as_deref(), converter)?,
        })
    }
}

impl Process for Occurrence {
    type Output = ProcessedOccurrence;

    fn process(&self, converter: &Converter) -> Result<ProcessedOccurrence> {
        Ok(ProcessedOccurrence {
            item: process_resource(&self.resource, converter)?,
            members: process_members(&self.members, converter)?,
            database: self
                .database
                .as_deref()
                .map(|database| database.process(converter).map(Box::new))
                .transpose()?,
            count: self.count,
            frequency: self.frequency.clone(),
            relation: parse_optional(self.relation.as_ref(), converter)?,
            schemes: process_set(self.schemes.as_deref(), converter)?,
            url: self.url.clone(),
            template: self.template.clone(),
            separator: self.separator.clone(),
        })
    }
}

impl Process for ConceptBundle {
    type Output = ProcessedConceptBundle;

    fn process(&self, converter: &Converter) -> Result<ProcessedConceptBundle> {
        process_members(&self.members, converter)
    }
}

impl Process for Concept {
    type Output = ProcessedConcept;

    fn process(&self, converter: &Converter) -> Result<ProcessedConcept> {
        Ok(ProcessedConcept {
            item: process_item(&self.resource, &self.description, converter)?,
            members: process_members(&self.members, converter)?,
            narrower: process_set(self.narrower.as_deref(), converter)?,
            broader: process_set(self.broader.as_deref(), converter)?,
            related: process_set(self.related.as_deref(), converter)?,
            in_scheme: process_set(self.in_scheme.as_deref(), converter)?,
            mappings: process_set(self.mappings.as_deref(), converter)?,
            occurrences: process_set(self.occurrences.as_deref(), converter)?,
            deprecated: self.deprecated,
        })
    }
}

impl Process for ConceptScheme {
    type Output = ProcessedConceptScheme;

    fn process(&self, converter: &Converter) -> Result<ProcessedConceptScheme> {
        Ok(ProcessedConceptScheme {
            item: process_item(&self.resource, &self.description, converter)?,
            top_concepts: process_set(self.top_concepts.as_deref(), converter)?,
            namespace: self.namespace.clone(),
            uri_pattern: self.uri_pattern.clone(),
            notation_pattern: self.notation_pattern.clone(),
            notation_examples: self.notation_examples.clone(),
            concepts: process_access(&self.concepts, converter)?,
        })
    }
}

impl Process for Mapping {
    type Output = ProcessedMapping;

    fn process(&self, converter: &Converter) -> Result<ProcessedMapping> {
        let scheme = |scheme: &Option<Box<ConceptScheme>>| -> Result<Option<Box<ProcessedConceptScheme>>> {
            scheme
                .as_deref()
                .map(|scheme| scheme.process(converter).map(Box::new))
                .transpose()
        };
        Ok(ProcessedMapping {
            item: process_item(&self.resource, &self.description, converter)?,
            from_bundle: self.from.process(converter)?,
            to_bundle: self.to.process(converter)?,
            from_scheme: scheme(&self.from_scheme)?,
            to_scheme: scheme(&self.to_scheme)?,
            mapping_relevance: self.mapping_relevance.clone(),
            justification: parse_optional(self.justification.as_ref(), converter)?,
        })
    }
}

impl Process for Concordance {
    type Output = ProcessedConcordance;

    fn process(&self, converter: &Converter) -> Result<ProcessedConcordance> {
        Ok(ProcessedConcordance {
            item: process_item(&self.resource, &self.description, converter)?,
            from_scheme: self
                .from_scheme
                .as_ref()
                .map(|scheme| scheme.process(converter))
                .transpose()?,
            to_scheme: self
                .to_scheme
                .as_ref()
                .map(|scheme| scheme.process(converter))
                .transpose()?,
            mappings: process_access(&self.mappings, converter)?,
        })
    }
}

impl Process for Registry {
    type Output = ProcessedItem;

    fn process(&self, converter: &Converter) -> Result<ProcessedItem> {
        process_item(&self.resource, &self.description, converter)
    }
}

impl Process for Kos {
    type Output = ProcessedKos;

    fn process(&self, converter: &Converter) -> Result<ProcessedKos> {
        Ok(ProcessedKos {
            id: self.id.clone(),
            kind: self.kind.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            concepts: self
                .top_concepts()
                .map(|concept| concept.process(converter))
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

impl Process for Entity {
    type Output = ProcessedEntity;

    fn process(&self, converter: &Converter) -> Result<ProcessedEntity> {
        Ok(match self {
            Entity::Concept(concept) => ProcessedEntity::Concept(concept.process(converter)?),
            Entity::ConceptScheme(scheme) => {
                ProcessedEntity::ConceptScheme(scheme.process(converter)?)
            }
            Entity::Mapping(mapping) => ProcessedEntity::Mapping(mapping.process(converter)?),
            Entity::Registry(registry) => ProcessedEntity::Registry(registry.process(converter)?),
            Entity::Concordance(concordance) => {
                ProcessedEntity::Concordance(concordance.process(converter)?)
            }
        })
    }
}
