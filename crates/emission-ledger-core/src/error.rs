//! Error types for the Emission Ledger Core.

use thiserror::Error;

use crate::types::{CategoryId, CategoryKind, ElementId};

/// Core errors that can occur while building chains or encoding documents.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("schema validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid category kind {0:?}: expected \"hub\" or \"transport\"")]
    InvalidCategoryKind(String),

    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Structural and typed validation failures of a document.
///
/// Every variant is a schema validation error: the document is surfaced back
/// to the caller, never repaired.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("malformed {document}: {reason}")]
    Malformed {
        document: &'static str,
        reason: String,
    },

    #[error("footprint has no extension to hold the chain")]
    MissingExtension,

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("invalid mass {0}: must be finite and non-negative")]
    InvalidMass(f64),

    #[error("invalid distance {value} on element {element}: must be finite and non-negative")]
    InvalidDistance { element: ElementId, value: f64 },

    #[error("element {0} references both a hub and a transport category")]
    AmbiguousCategory(ElementId),

    #[error("element id {0} appears more than once in the chain")]
    DuplicateElementId(ElementId),

    #[error("lineage broken at position {position}: element {element} does not extend its predecessor's ancestry")]
    BrokenLineage { position: usize, element: ElementId },

    #[error("record {id}: expected a {expected} record, found a {found} record")]
    RecordKindMismatch {
        id: CategoryId,
        expected: CategoryKind,
        found: CategoryKind,
    },

    #[error("record lookup for {requested} returned record {found}")]
    RecordIdMismatch {
        requested: CategoryId,
        found: CategoryId,
    },
}
