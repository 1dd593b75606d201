use crate::model::concept::Concept;
use crate::model::identity::{EntityType, Uri};
use crate::model::mapping::{Concordance, Mapping};
use crate::model::resource::{Description, Extensions, Resource};
use crate::model::scheme::{ConceptScheme, Registry};

/// A loaded top-level JSKOS document, tagged by entity type.
///
/// Dispatch is a closed enumeration: every variant corresponds to exactly one
/// [`EntityType`] and one registered schema.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    Concept(Concept),
    ConceptScheme(ConceptScheme),
    Mapping(Mapping),
    Registry(Registry),
    Concordance(Concordance),
}

impl Entity {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Entity::Concept(_) => EntityType::Concept,
            Entity::ConceptScheme(_) => EntityType::ConceptScheme,
            Entity::Mapping(_) => EntityType::Mapping,
            Entity::Registry(_) => EntityType::Registry,
            Entity::Concordance(_) => EntityType::Concordance,
        }
    }

    pub fn resource(&self) -> &Resource {
        match self {
            Entity::Concept(concept) => &concept.resource,
            Entity::ConceptScheme(scheme) => &scheme.resource,
            Entity::Mapping(mapping) => &mapping.resource,
            Entity::Registry(registry) => &registry.resource,
            Entity::Concordance(concordance) => &concordance.resource,
        }
    }

    pub fn resource_mut(&mut self) -> &mut Resource {
        match self {
            Entity::Concept(concept) => &mut concept.resource,
            Entity::ConceptScheme(scheme) => &mut scheme.resource,
            Entity::Mapping(mapping) => &mut mapping.resource,
            Entity::Registry(registry) => &mut registry.resource,
            Entity::Concordance(concordance) => &mut concordance.resource,
        }
    }

    pub fn description(&self) -> &Description {
        match self {
            Entity::Concept(concept) => &concept.description,
            Entity::ConceptScheme(scheme) => &scheme.description,
            Entity::Mapping(mapping) => &mapping.description,
            Entity::Registry(registry) => &registry.description,
            Entity::Concordance(concordance) => &concordance.description,
        }
    }

    /// Unknown top-level fields preserved from the input document.
    pub fn extensions(&self) -> &Extensions {
        match self {
            Entity::Concept(concept) => &concept.extensions,
            Entity::ConceptScheme(scheme) => &scheme.extensions,
            Entity::Mapping(mapping) => &mapping.extensions,
            Entity::Registry(registry) => &registry.extensions,
            Entity::Concordance(concordance) => &concordance.extensions,
        }
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        match self {
            Entity::Concept(concept) => &mut concept.extensions,
            Entity::ConceptScheme(scheme) => &mut scheme.extensions,
            Entity::Mapping(mapping) => &mut mapping.extensions,
            Entity::Registry(registry) => &mut registry.extensions,
            Entity::Concordance(concordance) => &mut concordance.extensions,
        }
    }

    pub fn uri(&self) -> Option<&Uri> {
        self.resource().uri.as_ref()
    }

    pub fn as_concept(&self) -> Option<&Concept> {
        match self {
            Entity::Concept(concept) => Some(concept),
            _ => None,
        }
    }

    pub fn as_scheme(&self) -> Option<&ConceptScheme> {
        match self {
            Entity::ConceptScheme(scheme) => Some(scheme),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Entity::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    pub fn as_registry(&self) -> Option<&Registry> {
        match self {
            Entity::Registry(registry) => Some(registry),
            _ => None,
        }
    }

    pub fn as_concordance(&self) -> Option<&Concordance> {
        match self {
            Entity::Concordance(concordance) => Some(concordance),
            _ => None,
        }
    }
}

impl From<Concept> for Entity {
    fn from(concept: Concept) -> Self {
        Entity::Concept(concept)
    }
}

impl From<ConceptScheme> for Entity {
    fn from(scheme: ConceptScheme) -> Self {
        Entity::ConceptScheme(scheme)
    }
}

impl From<Mapping> for Entity {
    fn from(mapping: Mapping) -> Self {
        Entity::Mapping(mapping)
    }
}

impl From<Registry> for Entity {
    fn from(registry: Registry) -> Self {
        Entity::Registry(registry)
    }
}

impl From<Concordance> for Entity {
    fn from(concordance: Concordance) -> Self {
        Entity::Concordance(concordance)
    }
}
