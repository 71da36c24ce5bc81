//! # Emission Ledger Testkit
//!
//! Testing utilities for the emission ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Scenario vectors**: routes through the seeded repository with the
//!   records their proofing documents must contain
//! - **Generators**: Proptest strategies for chains, elements and shipments
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Scenario Vectors
//!
//! ```rust,no_run
//! use emission_ledger_testkit::vectors::{all_vectors, matches_vector, run_vector};
//!
//! async fn check() {
//!     for vector in all_vectors() {
//!         let document = run_vector(&vector).await.unwrap();
//!         assert!(matches_vector(&vector, &document), "{}", vector.name);
//!     }
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use emission_ledger_testkit::generators::{footprint_from_params, ChainParams};
//!
//! proptest! {
//!     #[test]
//!     fn lineage_holds(params: ChainParams) {
//!         let footprint = footprint_from_params(&params).unwrap();
//!         prop_assert!(emission_ledger_core::verify_lineage(footprint.chain()).is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use emission_ledger_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let footprint = fixture.template();
//! assert_eq!(footprint.chain_len(), 0);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{attestation, shipment_fixtures, TestFixture};
pub use generators::{footprint_from_params, ChainParams};
pub use vectors::{all_vectors, matches_vector, run_vector, verify_all_vectors, ScenarioVector};
