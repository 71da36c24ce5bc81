//! Scenario vectors for end-to-end verification.
//!
//! Each vector describes a route through the seeded repository and the
//! records its proofing document must contain, in chain order.

use emission_ledger::{Ledger, LedgerConfig, LedgerError, ProofingDocument, Result};
use emission_ledger_core::{Category, ShipmentInfo};
use emission_ledger_store::MemoryStore;

/// One step of a route: element kind (`hub` or `transport`), category id
/// and measured distance.
pub type Step = (&'static str, &'static str, Option<f64>);

/// A scenario test vector.
#[derive(Debug, Clone)]
pub struct ScenarioVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub shipment_id: &'static str,
    pub mass: f64,
    pub steps: &'static [Step],
    /// Expected `hocData` ids, in order.
    pub expected_hub_ids: &'static [&'static str],
    /// Expected `tocData` ids, in order.
    pub expected_transport_ids: &'static [&'static str],
}

/// Get all scenario vectors.
pub fn all_vectors() -> Vec<ScenarioVector> {
    vec![
        ScenarioVector {
            name: "hub then road leg",
            shipment_id: "S1",
            mass: 5000.0,
            steps: &[("hub", "100", None), ("transport", "200", Some(120.0))],
            expected_hub_ids: &["100"],
            expected_transport_ids: &["200"],
        },
        ScenarioVector {
            name: "unknown transport skipped",
            shipment_id: "S1",
            mass: 5000.0,
            steps: &[("transport", "999", None)],
            expected_hub_ids: &[],
            expected_transport_ids: &[],
        },
        ScenarioVector {
            name: "intermodal route",
            shipment_id: "S2",
            mass: 12_500.0,
            steps: &[
                ("hub", "101", None),
                ("transport", "202", Some(6400.0)),
                ("hub", "103", None),
                ("transport", "203", Some(512.25)),
                ("hub", "102", None),
                ("transport", "204", Some(9800.0)),
            ],
            expected_hub_ids: &["101", "103", "102"],
            expected_transport_ids: &["202", "203", "204"],
        },
        ScenarioVector {
            name: "repeated hub visits",
            shipment_id: "S3",
            mass: 800.0,
            steps: &[
                ("hub", "100", None),
                ("transport", "201", Some(14.0)),
                ("hub", "100", None),
            ],
            expected_hub_ids: &["100", "100"],
            expected_transport_ids: &["201"],
        },
        ScenarioVector {
            name: "empty chain",
            shipment_id: "S4",
            mass: 0.0,
            steps: &[],
            expected_hub_ids: &[],
            expected_transport_ids: &[],
        },
    ]
}

/// Run a vector against a freshly seeded in-memory ledger.
pub async fn run_vector(vector: &ScenarioVector) -> Result<ProofingDocument> {
    let ledger = Ledger::new(MemoryStore::new(), LedgerConfig::default());
    ledger.initialize().await?;

    let shipment = ShipmentInfo::new(vector.shipment_id, vector.mass);
    let mut footprint = ledger.create_template("Vector Freight", &shipment);
    for (kind, id, distance) in vector.steps {
        let category = Category::from_parts(kind, id).map_err(LedgerError::from)?;
        footprint = ledger.append(&footprint, category, *distance)?;
    }
    ledger.assemble(&footprint, Vec::new()).await
}

/// Whether `document` holds exactly the records the vector expects.
pub fn matches_vector(vector: &ScenarioVector, document: &ProofingDocument) -> bool {
    let hubs: Vec<&str> = document
        .hub_records()
        .iter()
        .map(|r| r.hub_category_id.as_str())
        .collect();
    let transports: Vec<&str> = document
        .transport_records()
        .iter()
        .map(|r| r.transport_category_id.as_str())
        .collect();
    hubs == vector.expected_hub_ids
        && transports == vector.expected_transport_ids
        && document.footprint().chain_len() == vector.steps.len()
}

/// Run every vector and report `(name, passed)`.
pub async fn verify_all_vectors() -> Vec<(String, bool)> {
    let mut results = Vec::new();
    for vector in all_vectors() {
        let passed = match run_vector(&vector).await {
            Ok(document) => matches_vector(&vector, &document),
            Err(_) => false,
        };
        results.push((vector.name.to_string(), passed));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use emission_ledger_core::TransportMode;

    #[tokio::test]
    async fn test_all_vectors_pass() {
        for (name, passed) in verify_all_vectors().await {
            assert!(passed, "vector '{}' did not produce the expected records", name);
        }
    }

    #[tokio::test]
    async fn test_reference_scenario_record_contents() {
        let vector = &all_vectors()[0];
        let document = run_vector(vector).await.unwrap();

        assert_eq!(document.hub_records()[0].passthrough_hub_type, "Charging Hub");
        assert_eq!(document.transport_records()[0].mode, TransportMode::Road);
        assert_eq!(
            document.transport_records()[0].description,
            "Standard Diesel Truck - Long Haul"
        );

        let chain = document.footprint().chain();
        assert_eq!(chain[1].ancestor_ids, vec![chain[0].element_id.clone()]);
    }

    #[tokio::test]
    async fn test_invalid_kind_fails_vector() {
        let vector = ScenarioVector {
            name: "bad kind",
            shipment_id: "S9",
            mass: 1.0,
            steps: &[("warehouse", "100", None)],
            expected_hub_ids: &[],
            expected_transport_ids: &[],
        };
        let err = run_vector(&vector).await.unwrap_err();
        assert!(err.is_invalid_category());
    }
}
