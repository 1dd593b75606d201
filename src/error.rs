//! Error taxonomy shared by the registry, validator, mapper and facade.
//!
//! Every failure is a distinct variant so callers can branch on the kind of
//! problem without string matching. `SchemaViolation` carries the complete
//! report rather than the first offending constraint.

use crate::model::{DocumentKind, EntityType};
use crate::validator::ValidationReport;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Input is not JSON, or not a JSON object where one is required.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The entity type tag or `type` discriminator is not a JSKOS entity type.
    #[error("unknown entity type '{0}'")]
    UnknownEntityType(String),

    /// The document fits none or several entity types and no hint resolves it.
    #[error("{}", ambiguous_message(.candidates))]
    AmbiguousType { candidates: Vec<EntityType> },

    /// The document does not conform to the schema of its entity type.
    #[error("{0}")]
    SchemaViolation(ValidationReport),

    /// A typed entity lost a required field before serialization.
    #[error("incomplete {entity}: {reason}")]
    IncompleteEntity {
        entity: DocumentKind,
        field: &'static str,
        reason: String,
    },

    /// A schema document could not be materialized or compiled.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// A URI matched none of the prefixes of a CURIE converter.
    #[error("no prefix registered for URI '{0}'")]
    UnknownPrefix(String),

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The validation report carried by a `SchemaViolation`, if any.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Error::SchemaViolation(report) => Some(report),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedInput(err.to_string())
    }
}

fn ambiguous_message(candidates: &[EntityType]) -> String {
    if candidates.is_empty() {
        return "cannot infer entity type: no discriminator or shape matches; pass a type hint"
            .to_string();
    }
    let names = candidates
        .iter()
        .map(EntityType::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("ambiguous entity type: document fits {names}; pass a type hint")
}
