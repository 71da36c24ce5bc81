//! Chain lineage: appending elements and auditing ancestry.
//!
//! Every element carries the full list of its predecessors, oldest first:
//!
//! ```text
//! e1: []
//! e2: [e1]
//! e3: [e1, e2]
//! ```
//!
//! Appending never mutates its input. The new footprint is a fresh value
//! whose chain is exactly one element longer.

use std::collections::HashSet;

use crate::error::{CoreError, ValidationError};
use crate::footprint::{ChainElement, Distance, ProductFootprint};
use crate::types::{Category, ElementId};
use crate::validation::{check_distance, validate_footprint};

/// Ancestor list for an element appended after `chain`.
pub fn lineage_after(chain: &[ChainElement]) -> Vec<ElementId> {
    match chain.last() {
        Some(last) => {
            let mut ancestors = Vec::with_capacity(last.ancestor_ids.len() + 1);
            ancestors.extend(last.ancestor_ids.iter().cloned());
            ancestors.push(last.element_id.clone());
            ancestors
        }
        None => Vec::new(),
    }
}

/// Append a new element with a freshly generated id.
///
/// `measured_distance` is only recorded for transport legs; for a hub it is
/// ignored.
pub fn append_element(
    footprint: &ProductFootprint,
    category: Category,
    measured_distance: Option<f64>,
) -> Result<ProductFootprint, CoreError> {
    append_element_with_id(footprint, ElementId::generate(), category, measured_distance)
}

/// Append a new element under a caller-chosen id.
///
/// Fails with [`ValidationError::DuplicateElementId`] if the id is already
/// present in the chain.
pub fn append_element_with_id(
    footprint: &ProductFootprint,
    element_id: ElementId,
    category: Category,
    measured_distance: Option<f64>,
) -> Result<ProductFootprint, CoreError> {
    validate_footprint(footprint)?;

    if element_id.is_empty() {
        return Err(ValidationError::EmptyField { field: "tceId" }.into());
    }
    if category.id().is_empty() {
        return Err(ValidationError::EmptyField {
            field: "category id",
        }
        .into());
    }

    let mut next = footprint.clone();
    let extension = next
        .extensions
        .first_mut()
        .ok_or(ValidationError::MissingExtension)?;
    let chain = &mut extension.data.elements;

    if chain.iter().any(|e| e.element_id == element_id) {
        return Err(ValidationError::DuplicateElementId(element_id).into());
    }

    let (hub_category_id, transport_category_id, distance) = match category {
        Category::Hub(id) => (Some(id), None, None),
        Category::Transport(id) => {
            // Transport legs always carry a distance object, measured or not.
            let distance = match measured_distance {
                Some(value) => {
                    check_distance(&element_id, value)?;
                    Distance::measured(value)
                }
                None => Distance::default(),
            };
            (None, Some(id), Some(distance))
        }
    };

    let element = ChainElement {
        ancestor_ids: lineage_after(chain),
        element_id,
        hub_category_id,
        transport_category_id,
        shipment_id: extension.data.shipment_id.clone(),
        mass: extension.data.mass,
        co2e_wtw: None,
        co2e_ttw: None,
        transport_activity: None,
        distance,
    };
    chain.push(element);

    Ok(next)
}

/// Audit a whole chain: unique ids, category exclusivity, and each
/// element's ancestry extending its predecessor's by exactly one id.
pub fn verify_lineage(chain: &[ChainElement]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(chain.len());
    let mut expected: Vec<ElementId> = Vec::new();

    for (position, element) in chain.iter().enumerate() {
        if !seen.insert(&element.element_id) {
            return Err(ValidationError::DuplicateElementId(element.element_id.clone()));
        }
        if element.hub_category_id.is_some() && element.transport_category_id.is_some() {
            return Err(ValidationError::AmbiguousCategory(element.element_id.clone()));
        }
        if element.ancestor_ids != expected {
            return Err(ValidationError::BrokenLineage {
                position,
                element: element.element_id.clone(),
            });
        }
        expected.push(element.element_id.clone());
    }
    Ok(())
}
