//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use emission_ledger::{Ledger, LedgerConfig, Result};
use emission_ledger_core::{Category, ProductFootprint, SensorAttestation, ShipmentInfo};
use emission_ledger_store::MemoryStore;
use serde_json::json;

/// A ledger over an in-memory repository, plus the shipment it tracks.
pub struct TestFixture {
    pub ledger: Ledger<MemoryStore>,
    pub shipment: ShipmentInfo,
}

impl TestFixture {
    /// Unseeded fixture for shipment "S1" weighing 5000 kg.
    pub fn new() -> Self {
        Self::with_shipment(ShipmentInfo::new("S1", 5000.0))
    }

    pub fn with_shipment(shipment: ShipmentInfo) -> Self {
        Self {
            ledger: Ledger::new(MemoryStore::new(), LedgerConfig::default()),
            shipment,
        }
    }

    /// Fixture whose repository holds the reference records.
    pub async fn seeded() -> Result<Self> {
        let fixture = Self::new();
        fixture.ledger.initialize().await?;
        Ok(fixture)
    }

    /// Empty footprint for the fixture's shipment.
    pub fn template(&self) -> ProductFootprint {
        self.ledger.create_template("Acme Logistics", &self.shipment)
    }

    /// Footprint whose chain visits `steps` in order.
    pub fn footprint_with(&self, steps: &[(Category, Option<f64>)]) -> Result<ProductFootprint> {
        let mut footprint = self.template();
        for (category, distance) in steps {
            footprint = self.ledger.append(&footprint, category.clone(), *distance)?;
        }
        Ok(footprint)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A well-formed attestation for element `element_id`.
pub fn attestation(element_id: &str, distance: f64) -> SensorAttestation {
    serde_json::from_value(json!({
        "tceId": element_id,
        "camundaProcessInstanceKey": "2251799813685249",
        "camundaActivityId": "transport_procedure",
        "sensorkey": "-----BEGIN PUBLIC KEY-----",
        "signedSensorData": "3045022100ab",
        "sensorData": {"distance": {"actual": distance, "gcd": null, "sfd": null}}
    }))
    .expect("attestation fixture is well-formed")
}

/// Create fixtures for several distinct shipments.
pub fn shipment_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            TestFixture::with_shipment(ShipmentInfo::new(
                format!("S{}", i + 1),
                1000.0 * (i + 1) as f64,
            ))
        })
        .collect()
}
