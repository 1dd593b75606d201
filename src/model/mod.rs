//! Typed JSKOS entities.
//!
//! The structs mirror the field layout of `schema/jskos.schema.json` so the
//! mapper can move between validated JSON and typed values with serde alone.
//! Every object level carries an `extensions` map for fields outside the
//! vocabulary.

pub mod concept;
pub mod entity;
pub mod identity;
pub mod kos;
pub mod mapping;
pub mod resource;
pub mod scheme;
pub mod statement;

pub use concept::{Concept, ConceptBundle, Members, Occurrence};
pub use entity::Entity;
pub use identity::{Context, DocumentKind, EntityType, MappingType, Rank, Uri};
pub use kos::Kos;
pub use mapping::{Concordance, Mapping};
pub use resource::{
    Access, Description, Extensions, Item, LanguageMap, LanguageMapOfList, Resource, Set,
};
pub use scheme::{ConceptScheme, Registry};
pub use statement::{
    Annotation, AnnotationTarget, Literal, OneOrMany, Qualified, QualifiedDate, QualifiedLiteral,
    QualifiedRelation, Qualifiers,
};
