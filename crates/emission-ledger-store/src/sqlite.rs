//! SQLite implementation of the FactorStore trait.
//!
//! This is the primary repository backend. It uses rusqlite with bundled
//! SQLite, wrapped in async via `tokio::task::spawn_blocking`. Every call is
//! bounded by the configured access timeout.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, TransactionBehavior};
use tracing::{debug, warn};

use emission_ledger_core::{
    CategoryId, Certification, EmissionFactorRecord, EnergyCarrier, HubRecord, TransportMode,
    TransportRecord,
};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::FactorStore;

/// SQLite-based repository.
///
/// Thread-safe via internal Mutex. Several processes may open the same file;
/// SQLite's own locking serializes their writes.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    access_timeout: Duration,
}

impl SqliteStore {
    /// Open a SQLite database at the given path with the default timeout.
    ///
    /// Creates the file and runs migrations if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(&StoreConfig::new(path.as_ref()))
    }

    /// Open the database described by `config`.
    pub fn open_with_config(config: &StoreConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&config.path)?;
        debug!(path = %config.path.display(), "opened emission factor database");
        Self::from_connection(conn, config.access_timeout())
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, StoreConfig::default().access_timeout())
    }

    fn from_connection(mut conn: Connection, access_timeout: Duration) -> Result<Self> {
        conn.busy_timeout(access_timeout)?;
        migration::migrate(&mut conn).map_err(busy_as_unavailable)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            access_timeout,
        })
    }

    pub fn access_timeout(&self) -> Duration {
        self.access_timeout
    }

    /// Run a blocking operation on the connection, bounded by the access
    /// timeout.
    async fn run<F, T>(&self, op: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let task = tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("connection mutex poisoned: {}", e)))?;
            f(&mut conn)
        });

        match tokio::time::timeout(self.access_timeout, task).await {
            Ok(Ok(result)) => result.map_err(busy_as_unavailable),
            Ok(Err(e)) => Err(StoreError::Unavailable(format!("{} task failed: {}", op, e))),
            Err(_) => {
                warn!(
                    op,
                    timeout_ms = self.access_timeout.as_millis() as u64,
                    "store call timed out"
                );
                Err(StoreError::Unavailable(format!(
                    "{} exceeded access timeout of {:?}",
                    op, self.access_timeout
                )))
            }
        }
    }
}

/// Lock contention that outlasted `busy_timeout` is reported as
/// unavailability, the same as an elapsed access timeout.
fn busy_as_unavailable(err: StoreError) -> StoreError {
    let busy = matches!(
        &err,
        StoreError::Database(rusqlite::Error::SqliteFailure(e, _))
            if matches!(e.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    );
    if busy {
        StoreError::Unavailable(err.to_string())
    } else {
        err
    }
}

struct HubRow {
    id: String,
    hub_type: String,
    energy_carriers: String,
    wtw: String,
    ttw: String,
    unit: String,
}

impl HubRow {
    fn into_record(self) -> Result<HubRecord> {
        Ok(HubRecord {
            hub_category_id: CategoryId::new(self.id),
            passthrough_hub_type: self.hub_type,
            energy_carriers: serde_json::from_str::<Vec<EnergyCarrier>>(&self.energy_carriers)?,
            co2e_intensity_wtw: self.wtw,
            co2e_intensity_ttw: self.ttw,
            hub_activity_unit: self.unit,
        })
    }
}

struct TransportRow {
    id: String,
    certifications: String,
    description: String,
    mode: String,
    load_factor: String,
    empty_distance_factor: String,
    temperature_control: String,
    truck_loading_sequence: String,
    air_shipping_option: Option<String>,
    flight_length: Option<String>,
    energy_carriers: String,
    wtw: String,
    ttw: String,
    unit: String,
}

impl TransportRow {
    fn into_record(self) -> Result<TransportRecord> {
        let mode: TransportMode = self
            .mode
            .parse()
            .map_err(|e: String| StoreError::InvalidData(format!("toc {}: {}", self.id, e)))?;
        Ok(TransportRecord {
            certifications: serde_json::from_str::<Vec<Certification>>(&self.certifications)?,
            energy_carriers: serde_json::from_str::<Vec<EnergyCarrier>>(&self.energy_carriers)?,
            transport_category_id: CategoryId::new(self.id),
            description: self.description,
            mode,
            load_factor: self.load_factor,
            empty_distance_factor: self.empty_distance_factor,
            temperature_control: self.temperature_control,
            truck_loading_sequence: self.truck_loading_sequence,
            air_shipping_option: self.air_shipping_option,
            flight_length: self.flight_length,
            co2e_intensity_wtw: self.wtw,
            co2e_intensity_ttw: self.ttw,
            transport_activity_unit: self.unit,
        })
    }
}

fn upsert_hub(conn: &Connection, record: &HubRecord) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO hub_records (
            hoc_id, passhub_type, energy_carriers,
            co2e_intensity_wtw, co2e_intensity_ttw, hub_activity_unit
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.hub_category_id.as_str(),
            record.passthrough_hub_type,
            serde_json::to_string(&record.energy_carriers)?,
            record.co2e_intensity_wtw,
            record.co2e_intensity_ttw,
            record.hub_activity_unit,
        ],
    )?;
    Ok(())
}

fn upsert_transport(conn: &Connection, record: &TransportRecord) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO transport_records (
            toc_id, certifications, description, mode, load_factor,
            empty_distance_factor, temperature_control, truck_loading_sequence,
            air_shipping_option, flight_length, energy_carriers,
            co2e_intensity_wtw, co2e_intensity_ttw, transport_activity_unit
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            record.transport_category_id.as_str(),
            serde_json::to_string(&record.certifications)?,
            record.description,
            record.mode.as_str(),
            record.load_factor,
            record.empty_distance_factor,
            record.temperature_control,
            record.truck_loading_sequence,
            record.air_shipping_option,
            record.flight_length,
            serde_json::to_string(&record.energy_carriers)?,
            record.co2e_intensity_wtw,
            record.co2e_intensity_ttw,
            record.transport_activity_unit,
        ],
    )?;
    Ok(())
}

#[async_trait]
impl FactorStore for SqliteStore {
    async fn get_hub(&self, id: &CategoryId) -> Result<Option<HubRecord>> {
        let id = id.as_str().to_string();
        self.run("get_hub", move |conn| {
            let row = conn
                .query_row(
                    "SELECT hoc_id, passhub_type, energy_carriers,
                            co2e_intensity_wtw, co2e_intensity_ttw, hub_activity_unit
                     FROM hub_records WHERE hoc_id = ?1",
                    params![id],
                    |row| {
                        Ok(HubRow {
                            id: row.get(0)?,
                            hub_type: row.get(1)?,
                            energy_carriers: row.get(2)?,
                            wtw: row.get(3)?,
                            ttw: row.get(4)?,
                            unit: row.get(5)?,
                        })
                    },
                )
                .optional()?;
            row.map(HubRow::into_record).transpose()
        })
        .await
    }

    async fn get_transport(&self, id: &CategoryId) -> Result<Option<TransportRecord>> {
        let id = id.as_str().to_string();
        self.run("get_transport", move |conn| {
            let row = conn
                .query_row(
                    "SELECT toc_id, certifications, description, mode, load_factor,
                            empty_distance_factor, temperature_control, truck_loading_sequence,
                            air_shipping_option, flight_length, energy_carriers,
                            co2e_intensity_wtw, co2e_intensity_ttw, transport_activity_unit
                     FROM transport_records WHERE toc_id = ?1",
                    params![id],
                    |row| {
                        Ok(TransportRow {
                            id: row.get(0)?,
                            certifications: row.get(1)?,
                            description: row.get(2)?,
                            mode: row.get(3)?,
                            load_factor: row.get(4)?,
                            empty_distance_factor: row.get(5)?,
                            temperature_control: row.get(6)?,
                            truck_loading_sequence: row.get(7)?,
                            air_shipping_option: row.get(8)?,
                            flight_length: row.get(9)?,
                            energy_carriers: row.get(10)?,
                            wtw: row.get(11)?,
                            ttw: row.get(12)?,
                            unit: row.get(13)?,
                        })
                    },
                )
                .optional()?;
            row.map(TransportRow::into_record).transpose()
        })
        .await
    }

    async fn upsert_records(&self, records: &[EmissionFactorRecord]) -> Result<usize> {
        let records = records.to_vec();
        self.run("upsert_records", move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            for record in &records {
                match record {
                    EmissionFactorRecord::Hub(hub) => upsert_hub(&tx, hub)?,
                    EmissionFactorRecord::Transport(transport) => upsert_transport(&tx, transport)?,
                }
            }
            tx.commit()?;
            Ok(records.len())
        })
        .await
    }

    async fn overlapping_ids(&self) -> Result<Vec<CategoryId>> {
        self.run("overlapping_ids", |conn| {
            let mut stmt = conn.prepare(
                "SELECT h.hoc_id FROM hub_records h
                 JOIN transport_records t ON t.toc_id = h.hoc_id
                 ORDER BY h.hoc_id",
            )?;
            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .map(|r| r.map(CategoryId::new))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(ids)
        })
        .await
    }

    async fn record_counts(&self) -> Result<(usize, usize)> {
        self.run("record_counts", |conn| {
            let hubs: i64 = conn.query_row("SELECT COUNT(*) FROM hub_records", [], |row| row.get(0))?;
            let transports: i64 =
                conn.query_row("SELECT COUNT(*) FROM transport_records", [], |row| row.get(0))?;
            Ok((hubs as usize, transports as usize))
        })
        .await
    }
}
