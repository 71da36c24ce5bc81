//! Document boundary: parsing and structural checks.
//!
//! Every operation that takes a document checks it here first. Checks are
//! structural only; chain-wide lineage auditing lives in
//! [`crate::chain::verify_lineage`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationError;
use crate::footprint::{ChainElement, ProductFootprint};
use crate::proofing::SensorAttestation;
use crate::record::{EmissionFactorRecord, HubRecord, TransportRecord};
use crate::types::{CategoryId, CategoryKind, ElementId};

fn from_value<T: DeserializeOwned>(document: &'static str, value: &Value) -> Result<T, ValidationError> {
    T::deserialize(value).map_err(|e| ValidationError::Malformed {
        document,
        reason: e.to_string(),
    })
}

pub(crate) fn check_distance(element: &ElementId, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidDistance {
            element: element.clone(),
            value,
        });
    }
    Ok(())
}

/// Parse and validate a footprint document.
pub fn parse_footprint(value: &Value) -> Result<ProductFootprint, ValidationError> {
    let footprint: ProductFootprint = from_value("footprint", value)?;
    validate_footprint(&footprint)?;
    Ok(footprint)
}

/// Parse and validate a single chain element.
pub fn parse_chain_element(value: &Value) -> Result<ChainElement, ValidationError> {
    let element: ChainElement = from_value("chain element", value)?;
    validate_chain_element(&element)?;
    Ok(element)
}

/// Parse a list of signed sensor attestations. `null` reads as empty.
pub fn parse_attestations(value: &Value) -> Result<Vec<SensorAttestation>, ValidationError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let attestations: Vec<SensorAttestation> = from_value("sensor attestations", value)?;
    for attestation in &attestations {
        validate_attestation(attestation)?;
    }
    Ok(attestations)
}

/// Check a footprint against the footprint document schema.
///
/// The first extension holds the chain; every element of it is checked with
/// [`validate_chain_element`].
pub fn validate_footprint(footprint: &ProductFootprint) -> Result<(), ValidationError> {
    if footprint.id.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "id" });
    }

    let extension = footprint
        .active_extension()
        .ok_or(ValidationError::MissingExtension)?;

    if extension.data.shipment_id.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "shipmentId" });
    }

    let mass = extension.data.mass;
    if !mass.is_finite() || mass < 0.0 {
        return Err(ValidationError::InvalidMass(mass));
    }

    for element in &extension.data.elements {
        validate_chain_element(element)?;
    }
    Ok(())
}

pub fn validate_chain_element(element: &ChainElement) -> Result<(), ValidationError> {
    if element.element_id.is_empty() {
        return Err(ValidationError::EmptyField { field: "tceId" });
    }
    if element.hub_category_id.is_some() && element.transport_category_id.is_some() {
        return Err(ValidationError::AmbiguousCategory(element.element_id.clone()));
    }
    if !element.mass.is_finite() || element.mass < 0.0 {
        return Err(ValidationError::InvalidMass(element.mass));
    }
    if let Some(distance) = &element.distance {
        for value in distance.values() {
            check_distance(&element.element_id, value)?;
        }
    }
    Ok(())
}

pub fn validate_attestation(attestation: &SensorAttestation) -> Result<(), ValidationError> {
    if attestation.element_id.is_empty() {
        return Err(ValidationError::EmptyField { field: "tceId" });
    }
    if attestation.sensor_key.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "sensorkey" });
    }
    if attestation.signed_sensor_data.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: "signedSensorData",
        });
    }
    for value in attestation.sensor_data.distance.values() {
        check_distance(&attestation.element_id, value)?;
    }
    Ok(())
}

fn check_record_id(requested: &CategoryId, found: &CategoryId) -> Result<(), ValidationError> {
    if found.is_empty() {
        return Err(ValidationError::EmptyField { field: "category id" });
    }
    if found != requested {
        return Err(ValidationError::RecordIdMismatch {
            requested: requested.clone(),
            found: found.clone(),
        });
    }
    Ok(())
}

/// Check that a resolved record is the hub record that was asked for.
pub fn validate_hub_record<'a>(
    requested: &CategoryId,
    record: &'a EmissionFactorRecord,
) -> Result<&'a HubRecord, ValidationError> {
    let hub = record
        .as_hub()
        .ok_or_else(|| ValidationError::RecordKindMismatch {
            id: requested.clone(),
            expected: CategoryKind::Hub,
            found: record.kind(),
        })?;
    check_record_id(requested, &hub.hub_category_id)?;
    Ok(hub)
}

/// Check that a resolved record is the transport record that was asked for.
pub fn validate_transport_record<'a>(
    requested: &CategoryId,
    record: &'a EmissionFactorRecord,
) -> Result<&'a TransportRecord, ValidationError> {
    let transport = record
        .as_transport()
        .ok_or_else(|| ValidationError::RecordKindMismatch {
            id: requested.clone(),
            expected: CategoryKind::Transport,
            found: record.kind(),
        })?;
    check_record_id(requested, &transport.transport_category_id)?;
    Ok(transport)
}
