//! Proofing assembly: resolving a chain against the repository.

use emission_ledger_core::{
    validate_attestation, validate_footprint, validate_hub_record, validate_transport_record,
    CategoryId, EmissionFactorRecord, ProductFootprint, ProofingDocument, SensorAttestation,
};
use emission_ledger_store::{FactorStore, FactorStoreExt};
use tracing::debug;

use crate::error::Result;

async fn resolve<S: FactorStore + ?Sized>(
    store: &S,
    id: &CategoryId,
) -> Result<Option<EmissionFactorRecord>> {
    let record = store.get_record(id).await?;
    match &record {
        Some(found) => debug!(%id, kind = %found.kind(), "resolved emission factor record"),
        None => debug!(%id, "no emission factor record, skipping"),
    }
    Ok(record)
}

/// Assemble a proofing document for `footprint`.
///
/// Walks the active chain in order. Each hub or transport id is resolved
/// through the store and the record is checked against the expected
/// variant. Ids with no record are skipped; store failures propagate.
pub async fn assemble<S: FactorStore + ?Sized>(
    store: &S,
    footprint: &ProductFootprint,
    attestations: Vec<SensorAttestation>,
) -> Result<ProofingDocument> {
    validate_footprint(footprint)?;
    for attestation in &attestations {
        validate_attestation(attestation)?;
    }

    let mut builder = ProofingDocument::builder(footprint.clone());

    for element in footprint.chain() {
        if let Some(id) = &element.transport_category_id {
            if let Some(record) = resolve(store, id).await? {
                builder = builder.transport_record(validate_transport_record(id, &record)?.clone());
            }
        }
        if let Some(id) = &element.hub_category_id {
            if let Some(record) = resolve(store, id).await? {
                builder = builder.hub_record(validate_hub_record(id, &record)?.clone());
            }
        }
    }

    Ok(builder.attestations(attestations).build())
}
