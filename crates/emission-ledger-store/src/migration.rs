//! Database schema migrations for SQLite.
//!
//! Each migration is a SQL batch that moves the schema from version N to
//! N+1. Migrations run inside an immediate transaction, so two processes
//! opening a fresh file at the same time apply them exactly once.

use rusqlite::{Connection, TransactionBehavior};
use tracing::info;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// Idempotent: it can be called any number of times.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    // Read under the write lock so a concurrent migrator cannot interleave.
    let current: u32 = tx.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;

    for version in (current + 1)..=CURRENT_VERSION {
        apply_migration(&tx, version)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
            rusqlite::params![version, now_millis()],
        )?;
        info!(version, "applied schema migration");
    }

    tx.commit()?;
    Ok(())
}

fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: hub and transport record tables.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE hub_records (
            hoc_id TEXT PRIMARY KEY,
            passhub_type TEXT NOT NULL,
            energy_carriers TEXT NOT NULL,        -- JSON array
            co2e_intensity_wtw TEXT NOT NULL,
            co2e_intensity_ttw TEXT NOT NULL,
            hub_activity_unit TEXT NOT NULL
        );

        CREATE TABLE transport_records (
            toc_id TEXT PRIMARY KEY,
            certifications TEXT NOT NULL,         -- JSON array
            description TEXT NOT NULL,
            mode TEXT NOT NULL,
            load_factor TEXT NOT NULL,
            empty_distance_factor TEXT NOT NULL,
            temperature_control TEXT NOT NULL,
            truck_loading_sequence TEXT NOT NULL,
            air_shipping_option TEXT,
            flight_length TEXT,
            energy_carriers TEXT NOT NULL,        -- JSON array
            co2e_intensity_wtw TEXT NOT NULL,
            co2e_intensity_ttw TEXT NOT NULL,
            transport_activity_unit TEXT NOT NULL
        );
        "#,
    )?;

    Ok(())
}

fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creates_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"hub_records".to_string()));
        assert!(tables.contains(&"transport_records".to_string()));
        assert!(tables.contains(&"schema_migrations".to_string()));
    }

    #[test]
    fn test_migration_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();

        let version: u32 = conn
            .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(version, CURRENT_VERSION);

        let rows: u32 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
