//! # beacon-ssz testkit
//!
//! Testing utilities for the beacon-ssz codecs.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: known values with their expected encoding and root
//! - **Generators**: proptest strategies over shapes, values and records
//! - **Fixtures**: a harness for the `consensus-spec-tests` `ssz_static` layout
//!
//! ## Golden Vectors
//!
//! ```rust
//! use beacon_ssz_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, root) in verify_all_vectors() {
//!     assert!(matches, "{name}: {root}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use beacon_ssz_core::canonical;
//! use beacon_ssz_testkit::generators::shape_and_value;
//!
//! proptest! {
//!     #[test]
//!     fn round_trip((shape, value) in shape_and_value()) {
//!         let bytes = canonical::encode(&value, &shape).unwrap();
//!         prop_assert_eq!(canonical::decode(&bytes, &shape).unwrap(), value);
//!     }
//! }
//! ```
//!
//! ## Spec Fixtures
//!
//! Point `ETH2_SPEC_TESTS_DIR` at a `consensus-spec-tests` checkout:
//!
//! ```rust,no_run
//! use beacon_ssz_core::altair::SyncAggregate;
//! use beacon_ssz_testkit::fixtures::{run_conformance, ConformanceConfig};
//!
//! if let Some(config) = ConformanceConfig::from_env() {
//!     let report = run_conformance::<SyncAggregate>(&config, "altair", "SyncAggregate").unwrap();
//!     assert!(report.is_success());
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    run_conformance, run_fixture_case, run_fixture_dir, write_fixture_case, ConformanceConfig,
    FixtureError, FixtureReport,
};
pub use generators::{shape, shape_and_value, value_for};
pub use vectors::{all_vectors, check_vector, verify_all_vectors, GoldenVector};
