//! In-memory implementation of the FactorStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use emission_ledger_core::{CategoryId, EmissionFactorRecord, HubRecord, TransportRecord};

use crate::error::{Result, StoreError};
use crate::traits::FactorStore;

/// In-memory repository.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    hubs: BTreeMap<CategoryId, HubRecord>,
    transports: BTreeMap<CategoryId, TransportRecord>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Unavailable(format!("store lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Unavailable(format!("store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl FactorStore for MemoryStore {
    async fn get_hub(&self, id: &CategoryId) -> Result<Option<HubRecord>> {
        Ok(self.read()?.hubs.get(id).cloned())
    }

    async fn get_transport(&self, id: &CategoryId) -> Result<Option<TransportRecord>> {
        Ok(self.read()?.transports.get(id).cloned())
    }

    async fn upsert_records(&self, records: &[EmissionFactorRecord]) -> Result<usize> {
        let mut inner = self.write()?;
        for record in records {
            match record {
                EmissionFactorRecord::Hub(hub) => {
                    inner.hubs.insert(hub.hub_category_id.clone(), hub.clone());
                }
                EmissionFactorRecord::Transport(transport) => {
                    inner
                        .transports
                        .insert(transport.transport_category_id.clone(), transport.clone());
                }
            }
        }
        Ok(records.len())
    }

    async fn overlapping_ids(&self) -> Result<Vec<CategoryId>> {
        let inner = self.read()?;
        Ok(inner
            .hubs
            .keys()
            .filter(|id| inner.transports.contains_key(*id))
            .cloned()
            .collect())
    }

    async fn record_counts(&self) -> Result<(usize, usize)> {
        let inner = self.read()?;
        Ok((inner.hubs.len(), inner.transports.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{seed_record, SEED_IDS};
    use crate::traits::FactorStoreExt;

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStore::new();
        assert_eq!(store.populate_all().await.unwrap(), SEED_IDS.len());

        let record = store.get_record(&"202".into()).await.unwrap().unwrap();
        assert_eq!(
            record.as_transport().unwrap().air_shipping_option.as_deref(),
            Some("Dedicated Cargo Aircraft")
        );
        assert!(store.get_record(&"999".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_idempotent() {
        let store = MemoryStore::new();
        store.populate_all().await.unwrap();
        store.populate_all().await.unwrap();
        assert_eq!(store.record_counts().await.unwrap(), (4, 5));
        assert!(store.overlapping_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_overlap() {
        let store = MemoryStore::new();
        let mut hub = seed_record("100").unwrap().as_hub().unwrap().clone();
        hub.hub_category_id = "200".into();
        store.upsert_records(&[hub.into()]).await.unwrap();
        store.populate(&["200"]).await.unwrap();

        assert_eq!(store.overlapping_ids().await.unwrap(), vec![CategoryId::from("200")]);
        let record = store.get_record(&"200".into()).await.unwrap().unwrap();
        assert!(record.as_hub().is_some());
    }
}
