//! End-to-end scenarios: template, chain building and proofing assembly
//! against a seeded SQLite repository.

use emission_ledger::core::{TransportMode, ValidationError};
use emission_ledger::store::{FactorStore, StoreConfig, StoreError};
use emission_ledger::{Ledger, LedgerConfig, LedgerError, ProofingDocument, ShipmentInfo};
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("emission_ledger=debug")
        .with_test_writer()
        .try_init();
}

async fn seeded_ledger(dir: &tempfile::TempDir) -> Ledger<emission_ledger::store::SqliteStore> {
    init_tracing();
    let config = LedgerConfig {
        store: StoreConfig::new(dir.path().join("emission_factors.db")),
        ..LedgerConfig::default()
    };
    let ledger = Ledger::open(config).unwrap();
    ledger.initialize().await.unwrap();
    ledger
}

#[tokio::test]
async fn hub_then_transport_leg() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = seeded_ledger(&dir).await;

    let footprint = ledger.create_template("Acme Logistics", &ShipmentInfo::new("S1", 5000.0));
    let footprint = ledger.record_hub(&footprint, "100").unwrap();
    let footprint = ledger.record_transport(&footprint, "200", Some(120.0)).unwrap();

    let chain = footprint.chain();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[1].ancestor_ids, vec![chain[0].element_id.clone()]);
    assert_eq!(chain[1].measured_distance(), Some(120.0));
    assert!(chain.iter().all(|e| e.shipment_id == "S1" && e.mass == 5000.0));

    let document = ledger.assemble(&footprint, Vec::new()).await.unwrap();
    assert_eq!(document.hub_records().len(), 1);
    assert_eq!(document.hub_records()[0].passthrough_hub_type, "Charging Hub");
    assert_eq!(document.transport_records().len(), 1);
    assert_eq!(document.transport_records()[0].mode, TransportMode::Road);
    assert_eq!(
        document.transport_records()[0].description,
        "Standard Diesel Truck - Long Haul"
    );
    assert!(document.attestations().is_empty());
    assert_eq!(document.footprint(), &footprint);
}

#[tokio::test]
async fn unknown_transport_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = seeded_ledger(&dir).await;

    let footprint = ledger.create_template("Acme Logistics", &ShipmentInfo::new("S1", 5000.0));
    let footprint = ledger.record_transport(&footprint, "999", None).unwrap();

    let document = ledger.assemble(&footprint, Vec::new()).await.unwrap();
    assert!(document.transport_records().is_empty());
    assert!(document.hub_records().is_empty());
}

#[tokio::test]
async fn full_route_through_document_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = seeded_ledger(&dir).await;

    let template = ledger.create_template("Acme Logistics", &ShipmentInfo::generate());
    let mut footprint = serde_json::to_value(&template).unwrap();

    footprint = ledger.append_document(&footprint, "hub", "101", None).unwrap();
    footprint = ledger.append_document(&footprint, "transport", "202", Some(6400.0)).unwrap();
    footprint = ledger.append_document(&footprint, "hub", "103", None).unwrap();

    let outcome = ledger
        .record_transport_document(
            &footprint,
            "204",
            &json!({
                "tceId": "3f0c6f0e-6a3b-4a4e-9a56-1c1d7c1f2a10",
                "camundaProcessInstanceKey": "2251799813685249",
                "camundaActivityId": "transport_procedure",
                "sensorkey": "-----BEGIN PUBLIC KEY-----",
                "signedSensorData": "3045022100ab",
                "sensorData": {"distance": {"actual": 9800.0, "gcd": null, "sfd": null}}
            }),
            None,
        )
        .unwrap();
    assert_eq!(outcome["sensor_data"].as_array().unwrap().len(), 1);

    let proofing = ledger
        .assemble_document(&outcome["product_footprint"], Some(&outcome["sensor_data"]))
        .await
        .unwrap();

    let tces = proofing["productFootprint"]["extensions"][0]["data"]["tces"]
        .as_array()
        .unwrap();
    assert_eq!(tces.len(), 4);
    assert_eq!(tces[3]["tceId"], "3f0c6f0e-6a3b-4a4e-9a56-1c1d7c1f2a10");
    assert_eq!(tces[3]["prevTceIds"].as_array().unwrap().len(), 3);
    assert_eq!(tces[3]["distance"]["actual"], 9800.0);

    let toc: Vec<&str> = proofing["tocData"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["tocId"].as_str().unwrap())
        .collect();
    assert_eq!(toc, vec!["202", "204"]);

    let hoc: Vec<&str> = proofing["hocData"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["hocId"].as_str().unwrap())
        .collect();
    assert_eq!(hoc, vec!["101", "103"]);
    assert_eq!(proofing["signedSensorData"].as_array().unwrap().len(), 1);

    let typed: ProofingDocument = serde_json::from_value(proofing).unwrap();
    assert!(ledger.verify_chain(typed.footprint()).is_ok());
}

#[tokio::test]
async fn digest_is_stable_and_content_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = seeded_ledger(&dir).await;

    let footprint = ledger.create_template("Acme Logistics", &ShipmentInfo::new("S1", 5000.0));
    let footprint = ledger.record_transport(&footprint, "203", Some(512.25)).unwrap();
    let document = ledger.assemble(&footprint, Vec::new()).await.unwrap();

    let reparsed: ProofingDocument =
        serde_json::from_str(&serde_json::to_string(&document).unwrap()).unwrap();
    assert_eq!(document.digest().unwrap(), reparsed.digest().unwrap());

    let longer = ledger.record_transport(&footprint, "203", Some(512.5)).unwrap();
    let other = ledger.assemble(&longer, Vec::new()).await.unwrap();
    assert_ne!(document.digest().unwrap(), other.digest().unwrap());
}

#[tokio::test]
async fn schema_errors_surface_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = seeded_ledger(&dir).await;

    let mut footprint = ledger.create_template("Acme Logistics", &ShipmentInfo::new("S1", 5000.0));
    footprint.extensions.clear();

    let err = ledger.assemble(&footprint, Vec::new()).await.unwrap_err();
    assert!(matches!(
        err,
        LedgerError::SchemaValidation(ValidationError::MissingExtension)
    ));

    let err = ledger
        .assemble_document(&json!({"productFootprint": {}}), None)
        .await
        .unwrap_err();
    assert!(err.is_schema_error());
}

#[tokio::test]
async fn second_process_sees_seeded_records() {
    let dir = tempfile::tempdir().unwrap();
    let first = seeded_ledger(&dir).await;
    let second = seeded_ledger(&dir).await;

    assert_eq!(first.store().record_counts().await.unwrap(), (4, 5));
    assert_eq!(second.store().record_counts().await.unwrap(), (4, 5));
    assert_eq!(
        first.lookup(&"201".into()).await.unwrap(),
        second.lookup(&"201".into()).await.unwrap()
    );
}

#[tokio::test]
async fn locked_repository_reports_unavailable() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("emission_factors.db");
    let config = LedgerConfig {
        store: StoreConfig::new(&path).with_access_timeout(std::time::Duration::from_millis(150)),
        ..LedgerConfig::default()
    };
    let ledger = Ledger::open(config).unwrap();

    let holder = rusqlite::Connection::open(&path).unwrap();
    holder.execute_batch("BEGIN EXCLUSIVE;").unwrap();

    let err = ledger.initialize().await.unwrap_err();
    assert!(err.is_unavailable());
    assert!(matches!(err, LedgerError::Store(StoreError::Unavailable(_))));
    holder.execute_batch("ROLLBACK;").unwrap();
}
