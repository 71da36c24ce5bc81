//! The Ledger: unified API for the emission ledger.
//!
//! The Ledger brings together chain building, the emission factor
//! repository and proofing assembly. Every operation is offered twice: typed,
//! and at the document boundary over plain JSON values.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use emission_ledger_core::{
    append_element, append_element_with_id, footprint_template, parse_attestations,
    parse_footprint, verify_lineage, Category, CategoryId, CategoryKind, EmissionFactorRecord,
    ProductFootprint, ProofingDocument, SensorAttestation, ShipmentInfo,
};
use emission_ledger_store::{FactorStore, FactorStoreExt, SqliteStore, StoreConfig};

use crate::assembler;
use crate::error::{LedgerError, Result};

/// Configuration for the Ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Repository location and access timeout.
    pub store: StoreConfig,
    /// Audit the whole chain's lineage after every append.
    pub validate_lineage_on_append: bool,
}

/// Output of a transport leg recorded from a sensor attestation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportOutcome {
    #[serde(rename = "product_footprint")]
    pub footprint: ProductFootprint,
    /// Prior attestations with the new one appended.
    #[serde(rename = "sensor_data")]
    pub attestations: Vec<SensorAttestation>,
}

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Creating footprint templates
/// - Appending hub and transport elements
/// - Looking up emission factor records
/// - Assembling proofing documents
pub struct Ledger<S: FactorStore> {
    store: Arc<S>,
    config: LedgerConfig,
}

impl Ledger<SqliteStore> {
    /// Open the SQLite repository described by `config.store`.
    ///
    /// The repository is not seeded; call [`Ledger::initialize`].
    pub fn open(config: LedgerConfig) -> Result<Self> {
        let store = SqliteStore::open_with_config(&config.store)?;
        Ok(Self::new(store, config))
    }
}

impl<S: FactorStore> Ledger<S> {
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Repository
    // ─────────────────────────────────────────────────────────────────────────

    /// Seed the repository with the reference records.
    ///
    /// Idempotent; call once at startup. Ids present in both keyspaces are
    /// reported as warnings.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<usize> {
        let written = self.store.populate_all().await?;
        for id in self.store.overlapping_ids().await? {
            warn!(%id, "id present as both hub and transport record; hub record wins");
        }
        info!(written, "emission factor repository initialized");
        Ok(written)
    }

    /// Look up a record by id, hub records first.
    #[instrument(skip(self))]
    pub async fn lookup(&self, id: &CategoryId) -> Result<Option<EmissionFactorRecord>> {
        Ok(self.store.get_record(id).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Chain Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create the empty footprint for a shipment.
    pub fn create_template(&self, company_name: &str, shipment: &ShipmentInfo) -> ProductFootprint {
        footprint_template(company_name, shipment)
    }

    /// Append one element to the footprint's chain.
    #[instrument(skip(self, footprint), fields(chain_len = footprint.chain_len()))]
    pub fn append(
        &self,
        footprint: &ProductFootprint,
        category: Category,
        measured_distance: Option<f64>,
    ) -> Result<ProductFootprint> {
        let next = append_element(footprint, category, measured_distance)?;
        self.audit(&next)?;
        Ok(next)
    }

    /// Record a hub visit.
    pub fn record_hub(
        &self,
        footprint: &ProductFootprint,
        hub_id: impl Into<CategoryId>,
    ) -> Result<ProductFootprint> {
        self.append(footprint, Category::Hub(hub_id.into()), None)
    }

    /// Record a transport leg, optionally with its measured distance.
    pub fn record_transport(
        &self,
        footprint: &ProductFootprint,
        transport_id: impl Into<CategoryId>,
        measured_distance: Option<f64>,
    ) -> Result<ProductFootprint> {
        self.append(footprint, Category::Transport(transport_id.into()), measured_distance)
    }

    /// Record a transport leg from a signed sensor attestation.
    ///
    /// The attestation was requested for a fresh element id; that id becomes
    /// the new element's id, and its measured distance is recorded. The
    /// attestation is appended to `prior_attestations`.
    #[instrument(skip_all, fields(element = %attestation.element_id))]
    pub fn record_transport_with_attestation(
        &self,
        footprint: &ProductFootprint,
        transport_id: impl Into<CategoryId>,
        attestation: SensorAttestation,
        mut prior_attestations: Vec<SensorAttestation>,
    ) -> Result<TransportOutcome> {
        emission_ledger_core::validate_attestation(&attestation)?;
        let next = append_element_with_id(
            footprint,
            attestation.element_id.clone(),
            Category::Transport(transport_id.into()),
            attestation.measured_distance(),
        )?;
        self.audit(&next)?;
        prior_attestations.push(attestation);
        Ok(TransportOutcome {
            footprint: next,
            attestations: prior_attestations,
        })
    }

    /// Audit the full lineage of a footprint's chain.
    pub fn verify_chain(&self, footprint: &ProductFootprint) -> Result<()> {
        Ok(verify_lineage(footprint.chain())?)
    }

    fn audit(&self, footprint: &ProductFootprint) -> Result<()> {
        if self.config.validate_lineage_on_append {
            self.verify_chain(footprint)?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Proofing
    // ─────────────────────────────────────────────────────────────────────────

    /// Assemble the proofing document for a footprint.
    #[instrument(skip_all, fields(footprint = %footprint.id, chain_len = footprint.chain_len()))]
    pub async fn assemble(
        &self,
        footprint: &ProductFootprint,
        attestations: Vec<SensorAttestation>,
    ) -> Result<ProofingDocument> {
        let document = assembler::assemble(self.store.as_ref(), footprint, attestations).await?;
        info!(
            hubs = document.hub_records().len(),
            transports = document.transport_records().len(),
            "assembled proofing document"
        );
        Ok(document)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Boundary
    // ─────────────────────────────────────────────────────────────────────────

    /// Append to a footprint given as JSON. `kind` is `hub` or `transport`.
    pub fn append_document(
        &self,
        footprint: &Value,
        kind: &str,
        category_id: &str,
        measured_distance: Option<f64>,
    ) -> Result<Value> {
        let footprint = parse_footprint(footprint)?;
        let kind: CategoryKind = kind.parse()?;
        let next = self.append(&footprint, Category::new(kind, category_id), measured_distance)?;
        to_value(&next)
    }

    /// Record a transport leg from a JSON attestation.
    ///
    /// Returns `{"product_footprint": ..., "sensor_data": [...]}`.
    pub fn record_transport_document(
        &self,
        footprint: &Value,
        transport_id: &str,
        attestation: &Value,
        prior_attestations: Option<&Value>,
    ) -> Result<Value> {
        let footprint = parse_footprint(footprint)?;
        let mut parsed = parse_attestations(&Value::Array(vec![attestation.clone()]))?;
        let attestation = parsed
            .pop()
            .ok_or_else(|| LedgerError::Encoding("attestation list unexpectedly empty".into()))?;
        let prior = parse_attestations(prior_attestations.unwrap_or(&Value::Null))?;
        let outcome =
            self.record_transport_with_attestation(&footprint, transport_id, attestation, prior)?;
        to_value(&outcome)
    }

    /// Assemble a proofing document from JSON inputs.
    pub async fn assemble_document(
        &self,
        footprint: &Value,
        signed_sensor_data: Option<&Value>,
    ) -> Result<Value> {
        let footprint = parse_footprint(footprint)?;
        let attestations = parse_attestations(signed_sensor_data.unwrap_or(&Value::Null))?;
        let document = self.assemble(&footprint, attestations).await?;
        to_value(&document)
    }
}

fn to_value<T: Serialize>(document: &T) -> Result<Value> {
    serde_json::to_value(document).map_err(|e| LedgerError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use emission_ledger_core::ElementId;
    use emission_ledger_store::MemoryStore;
    use serde_json::json;

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::new(MemoryStore::new(), LedgerConfig::default())
    }

    fn attestation(id: &str, distance: f64) -> SensorAttestation {
        serde_json::from_value(json!({
            "tceId": id,
            "camundaProcessInstanceKey": 2251799813685249i64,
            "camundaActivityId": "transport_procedure",
            "sensorkey": "-----BEGIN PUBLIC KEY-----",
            "signedSensorData": "3045022100",
            "sensorData": {"distance": {"actual": distance}}
        }))
        .unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config: LedgerConfig = serde_json::from_value(json!({})).unwrap();
        assert!(!config.validate_lineage_on_append);
        assert_eq!(config.store, StoreConfig::default());
    }

    #[test]
    fn test_attestation_id_becomes_element_id() {
        let ledger = ledger();
        let footprint = ledger.create_template("Acme", &ShipmentInfo::new("S1", 100.0));
        let footprint = ledger.record_hub(&footprint, "100").unwrap();

        let id = ElementId::generate();
        let outcome = ledger
            .record_transport_with_attestation(
                &footprint,
                "200",
                attestation(id.as_str(), 87.5),
                vec![attestation("earlier", 3.0)],
            )
            .unwrap();

        let head = outcome.footprint.head().unwrap();
        assert_eq!(head.element_id, id);
        assert_eq!(head.measured_distance(), Some(87.5));
        assert_eq!(head.ancestor_ids.len(), 1);
        assert_eq!(outcome.attestations.len(), 2);
        assert_eq!(outcome.attestations[1].element_id, id);
    }

    #[test]
    fn test_reused_attestation_id_rejected() {
        let ledger = ledger();
        let footprint = ledger.create_template("Acme", &ShipmentInfo::new("S1", 100.0));
        let first = ledger
            .record_transport_with_attestation(&footprint, "200", attestation("leg", 1.0), vec![])
            .unwrap();
        let err = ledger
            .record_transport_with_attestation(
                &first.footprint,
                "201",
                attestation("leg", 2.0),
                first.attestations,
            )
            .unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_append_document_rejects_unknown_kind() {
        let ledger = ledger();
        let footprint = ledger.create_template("Acme", &ShipmentInfo::new("S1", 100.0));
        let value = serde_json::to_value(&footprint).unwrap();

        let err = ledger.append_document(&value, "warehouse", "100", None).unwrap_err();
        assert!(err.is_invalid_category());

        let next = ledger.append_document(&value, "HUB", "100", None).unwrap();
        assert_eq!(next["extensions"][0]["data"]["tces"][0]["hocId"], "100");
    }

    #[test]
    fn test_append_document_rejects_malformed_footprint() {
        let ledger = ledger();
        let err = ledger
            .append_document(&json!({"id": "x"}), "hub", "100", None)
            .unwrap_err();
        assert!(err.is_schema_error());
    }

    #[test]
    fn test_lineage_audit_on_append() {
        let ledger = Ledger::new(
            MemoryStore::new(),
            LedgerConfig {
                validate_lineage_on_append: true,
                ..LedgerConfig::default()
            },
        );
        let footprint = ledger.create_template("Acme", &ShipmentInfo::new("S1", 100.0));
        let mut footprint = ledger.record_hub(&footprint, "100").unwrap();
        footprint = ledger.record_hub(&footprint, "101").unwrap();

        // Corrupt the existing chain; the next append must notice.
        footprint.extensions[0].data.elements[1].ancestor_ids.clear();
        let err = ledger.record_hub(&footprint, "102").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::SchemaValidation(emission_ledger_core::ValidationError::BrokenLineage { .. })
        ));
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let ledger = ledger();
        assert_eq!(ledger.initialize().await.unwrap(), 9);
        assert_eq!(ledger.initialize().await.unwrap(), 9);
        assert_eq!(ledger.store().record_counts().await.unwrap(), (4, 5));
    }
}
