//! FactorStore trait: the abstract interface to the emission factor
//! repository.
//!
//! Implementations include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use emission_ledger_core::{CategoryId, EmissionFactorRecord, HubRecord, TransportRecord};
use tracing::{debug, info};

use crate::error::Result;
use crate::seed;

/// The FactorStore trait: async interface to hub and transport records.
///
/// Hub and transport records live in separate keyspaces. Nothing stops the
/// same id from appearing in both; see [`FactorStore::overlapping_ids`].
///
/// # Design Notes
///
/// - **Absence is not an error**: lookups of unknown ids return `Ok(None)`.
/// - **Idempotent writes**: upserting the same record twice leaves the store
///   unchanged.
/// - **Concurrent readers**: implementations must allow reads from several
///   tasks at once.
#[async_trait]
pub trait FactorStore: Send + Sync {
    /// Look up a hub record by id.
    async fn get_hub(&self, id: &CategoryId) -> Result<Option<HubRecord>>;

    /// Look up a transport record by id.
    async fn get_transport(&self, id: &CategoryId) -> Result<Option<TransportRecord>>;

    /// Insert or replace a batch of records atomically.
    ///
    /// Returns the number of records written.
    async fn upsert_records(&self, records: &[EmissionFactorRecord]) -> Result<usize>;

    /// Ids present in both the hub and the transport keyspace.
    async fn overlapping_ids(&self) -> Result<Vec<CategoryId>>;

    /// Number of `(hub, transport)` records held.
    async fn record_counts(&self) -> Result<(usize, usize)>;
}

/// Extension trait for common repository patterns.
pub trait FactorStoreExt: FactorStore {
    /// Look up any record by id. The hub keyspace is consulted first, so a
    /// hub record wins over a transport record with the same id.
    fn get_record(
        &self,
        id: &CategoryId,
    ) -> impl std::future::Future<Output = Result<Option<EmissionFactorRecord>>> + Send;

    /// Upsert the seed records named by `seed_ids`. Ids outside the seed set
    /// are skipped.
    ///
    /// Returns the number of records written.
    fn populate(
        &self,
        seed_ids: &[&str],
    ) -> impl std::future::Future<Output = Result<usize>> + Send;

    /// Upsert the whole seed set.
    fn populate_all(&self) -> impl std::future::Future<Output = Result<usize>> + Send;
}

impl<S: FactorStore + ?Sized> FactorStoreExt for S {
    async fn get_record(&self, id: &CategoryId) -> Result<Option<EmissionFactorRecord>> {
        if let Some(hub) = self.get_hub(id).await? {
            return Ok(Some(EmissionFactorRecord::Hub(hub)));
        }
        Ok(self
            .get_transport(id)
            .await?
            .map(EmissionFactorRecord::Transport))
    }

    async fn populate(&self, seed_ids: &[&str]) -> Result<usize> {
        let mut records = Vec::with_capacity(seed_ids.len());
        for id in seed_ids {
            match seed::seed_record(id) {
                Some(record) => records.push(record),
                None => debug!(id = *id, "skipping id outside the seed set"),
            }
        }
        let written = self.upsert_records(&records).await?;
        info!(written, requested = seed_ids.len(), "populated emission factor store");
        Ok(written)
    }

    async fn populate_all(&self) -> Result<usize> {
        self.populate(&seed::SEED_IDS).await
    }
}
