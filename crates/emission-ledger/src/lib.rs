//! # Emission Ledger
//!
//! The unified API for tracking chain-of-custody emissions of a shipment
//! and assembling auditable proofing documents.
//!
//! ## Overview
//!
//! - **Footprints**: a shipment-level document holding the chain of hub
//!   visits and transport legs
//! - **Chain elements**: appended once per hub or leg, each carrying its
//!   full ancestry
//! - **Emission factor repository**: certified hub and transport records,
//!   seeded once at startup
//! - **Proofing documents**: a footprint joined with the records its chain
//!   refers to
//!
//! ## Usage
//!
//! ```rust,no_run
//! use emission_ledger::{Ledger, LedgerConfig, ShipmentInfo};
//!
//! async fn example() {
//!     let ledger = Ledger::open(LedgerConfig::default()).unwrap();
//!     ledger.initialize().await.unwrap();
//!
//!     let footprint = ledger.create_template("Acme Logistics", &ShipmentInfo::new("S1", 5000.0));
//!     let footprint = ledger.record_hub(&footprint, "100").unwrap();
//!     let footprint = ledger.record_transport(&footprint, "200", Some(120.0)).unwrap();
//!
//!     let document = ledger.assemble(&footprint, Vec::new()).await.unwrap();
//!     println!("{}", document.digest().unwrap());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `emission_ledger::core` - Documents, chain lineage, validation
//! - `emission_ledger::store` - Repository trait, SQLite backend, seed data

pub mod assembler;
pub mod error;
pub mod ledger;

pub use emission_ledger_core as core;
pub use emission_ledger_store as store;

pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig, TransportOutcome};

pub use emission_ledger_core::{
    Category, CategoryId, CategoryKind, ChainElement, DocumentDigest, ElementId,
    EmissionFactorRecord, HubRecord, ProductFootprint, ProofingDocument, SensorAttestation,
    ShipmentInfo, TransportRecord,
};
