//! # Emission Ledger Core
//!
//! Pure primitives for the emission ledger: footprint documents, chain-element
//! lineage, emission factor records and proofing documents.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over shipment documents.
//!
//! ## Key Types
//!
//! - [`ProductFootprint`] - The shipment-level declaration holding the chain
//! - [`ChainElement`] - One hub visit or transport leg, with its full ancestry
//! - [`EmissionFactorRecord`] - Hub or transport reference data
//! - [`ProofingDocument`] - A footprint joined with its resolved records
//!
//! ## Chain Lineage
//!
//! Every chain element carries the ids of all its predecessors, oldest first.
//! See the [`chain`] module.
//!
//! ## Document Boundary
//!
//! Documents arrive as plain JSON values and are checked on every call. See
//! the [`validation`] module.

pub mod canonical;
pub mod chain;
pub mod error;
pub mod footprint;
pub mod proofing;
pub mod record;
pub mod template;
pub mod types;
pub mod validation;

pub use canonical::{canonical_bytes, document_digest};
pub use chain::{append_element, append_element_with_id, lineage_after, verify_lineage};
pub use error::{CoreError, ValidationError};
pub use footprint::{ChainElement, Distance, Extension, ExtensionData, ProductFootprint};
pub use proofing::{
    ProcessInstanceKey, ProofingDocument, ProofingDocumentBuilder, SensorAttestation,
    SensorReading,
};
pub use record::{
    Certification, EmissionFactorRecord, EnergyCarrier, HubRecord, TransportMode,
    TransportRecord,
};
pub use template::{footprint_template, ShipmentInfo};
pub use types::{Category, CategoryId, CategoryKind, DocumentDigest, ElementId};
pub use validation::{
    parse_attestations, parse_chain_element, parse_footprint, validate_attestation,
    validate_chain_element, validate_footprint, validate_hub_record, validate_transport_record,
};
