//! Footprint templates: the empty footprint a shipment starts from.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::footprint::{
    Extension, ProductFootprint, DEFAULT_SPEC_VERSION, DEFAULT_STATUS,
};

/// Shipment identity and weight handed over by the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentInfo {
    pub shipment_id: String,
    /// Shipment mass in kilograms.
    pub shipment_weight: f64,
}

impl ShipmentInfo {
    pub fn new(shipment_id: impl Into<String>, shipment_weight: f64) -> Self {
        Self {
            shipment_id: shipment_id.into(),
            shipment_weight,
        }
    }

    /// A new shipment with a random id and a weight between 1 and 20 tonnes.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            shipment_id: format!("SHIP_{}", Uuid::new_v4()),
            shipment_weight: rng.gen_range(1000.0..20000.0),
        }
    }
}

/// Create the template footprint for a shipment: fresh identifiers and one
/// shipment extension with an empty chain.
pub fn footprint_template(company_name: &str, shipment: &ShipmentInfo) -> ProductFootprint {
    let mut rng = rand::thread_rng();
    ProductFootprint {
        id: Uuid::new_v4().to_string(),
        spec_version: DEFAULT_SPEC_VERSION.to_string(),
        version: 0,
        created: Utc::now().to_rfc3339(),
        status: DEFAULT_STATUS.to_string(),
        company_name: company_name.to_string(),
        company_ids: vec![format!("urn:epcidsgln:{}", Uuid::new_v4())],
        product_description: format!(
            "Logistics emissions related to shipment with ID {}",
            shipment.shipment_id
        ),
        product_ids: vec![format!(
            "urn:pathfinder:product:customcode:vendor-assigned:{}",
            Uuid::new_v4()
        )],
        product_category_cpc: rng.gen_range(1000..=9999),
        product_name_company: format!("Shipment with ID {}", shipment.shipment_id),
        pcf: None,
        comment: String::new(),
        extensions: vec![Extension::shipment(
            shipment.shipment_weight,
            shipment.shipment_id.clone(),
        )],
    }
}
