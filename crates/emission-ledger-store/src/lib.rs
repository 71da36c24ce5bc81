//! # Emission Ledger Store
//!
//! The emission factor repository. Provides a trait-based interface for
//! hub and transport record lookup with SQLite and in-memory
//! implementations, plus the reference seed data.
//!
//! ## Key Types
//!
//! - [`FactorStore`] - The async trait for all repository operations
//! - [`FactorStoreExt`] - Hub-first lookup and seeding on top of it
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`StoreConfig`] - Database path and access timeout
//!
//! ## Usage
//!
//! ```rust,no_run
//! use emission_ledger_store::{FactorStoreExt, SqliteStore};
//!
//! async fn example() {
//!     let store = SqliteStore::open("emission_factors.db").unwrap();
//!     store.populate_all().await.unwrap();
//!
//!     let record = store.get_record(&"200".into()).await.unwrap();
//!     assert!(record.is_some());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Absent is not an error**: unknown ids resolve to `None`
//! - **Idempotent seeding**: populating twice leaves the store unchanged
//! - **Bounded access**: a call that cannot finish within the access timeout
//!   fails with [`StoreError::Unavailable`]

pub mod config;
pub mod error;
pub mod memory;
pub mod migration;
pub mod seed;
pub mod sqlite;
pub mod traits;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use seed::{seed_record, seed_records, SEED_IDS};
pub use sqlite::SqliteStore;
pub use traits::{FactorStore, FactorStoreExt};
