//! Proofing documents: a footprint joined with the emission factor records
//! its chain refers to, plus any signed sensor attestations.
//!
//! A proofing document is created fresh per assembly and never changed
//! afterwards. Use [`ProofingDocumentBuilder`] to put one together.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::canonical::document_digest;
use crate::error::CoreError;
use crate::footprint::{Distance, ProductFootprint};
use crate::record::{HubRecord, TransportRecord};
use crate::types::{DocumentDigest, ElementId};

/// Workflow process instance key; the workflow engine emits either a
/// number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessInstanceKey {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProcessInstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessInstanceKey::Number(n) => write!(f, "{n}"),
            ProcessInstanceKey::Text(s) => f.write_str(s),
        }
    }
}

/// The measurement a sensor attested to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub distance: Distance,
}

/// A signed sensor attestation for one transport leg.
///
/// Produced and signed by an external collaborator; this crate only checks
/// its shape and carries it through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorAttestation {
    #[serde(rename = "tceId")]
    pub element_id: ElementId,

    #[serde(rename = "camundaProcessInstanceKey")]
    pub process_instance_key: ProcessInstanceKey,

    #[serde(rename = "camundaActivityId")]
    pub activity_id: String,

    #[serde(rename = "sensorkey")]
    pub sensor_key: String,

    #[serde(rename = "signedSensorData")]
    pub signed_sensor_data: String,

    #[serde(rename = "sensorData")]
    pub sensor_data: SensorReading,
}

impl SensorAttestation {
    pub fn measured_distance(&self) -> Option<f64> {
        self.sensor_data.distance.actual
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The auditable output of assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofingDocument {
    #[serde(rename = "productFootprint")]
    footprint: ProductFootprint,

    #[serde(rename = "tocData")]
    transport_records: Vec<TransportRecord>,

    #[serde(rename = "hocData")]
    hub_records: Vec<HubRecord>,

    #[serde(rename = "signedSensorData", default, deserialize_with = "null_as_empty")]
    attestations: Vec<SensorAttestation>,
}

impl ProofingDocument {
    pub fn builder(footprint: ProductFootprint) -> ProofingDocumentBuilder {
        ProofingDocumentBuilder::new(footprint)
    }

    pub fn footprint(&self) -> &ProductFootprint {
        &self.footprint
    }

    /// Resolved transport records, in chain order.
    pub fn transport_records(&self) -> &[TransportRecord] {
        &self.transport_records
    }

    /// Resolved hub records, in chain order.
    pub fn hub_records(&self) -> &[HubRecord] {
        &self.hub_records
    }

    pub fn attestations(&self) -> &[SensorAttestation] {
        &self.attestations
    }

    /// Content digest over the canonical encoding of this document.
    pub fn digest(&self) -> Result<DocumentDigest, CoreError> {
        document_digest(self)
    }
}

/// Builder for [`ProofingDocument`].
pub struct ProofingDocumentBuilder {
    footprint: ProductFootprint,
    transport_records: Vec<TransportRecord>,
    hub_records: Vec<HubRecord>,
    attestations: Vec<SensorAttestation>,
}

impl ProofingDocumentBuilder {
    pub fn new(footprint: ProductFootprint) -> Self {
        Self {
            footprint,
            transport_records: Vec::new(),
            hub_records: Vec::new(),
            attestations: Vec::new(),
        }
    }

    pub fn transport_record(mut self, record: TransportRecord) -> Self {
        self.transport_records.push(record);
        self
    }

    pub fn hub_record(mut self, record: HubRecord) -> Self {
        self.hub_records.push(record);
        self
    }

    pub fn attestations(mut self, attestations: Vec<SensorAttestation>) -> Self {
        self.attestations = attestations;
        self
    }

    pub fn build(self) -> ProofingDocument {
        ProofingDocument {
            footprint: self.footprint,
            transport_records: self.transport_records,
            hub_records: self.hub_records,
            attestations: self.attestations,
        }
    }
}
