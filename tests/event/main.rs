//! Event graph integration tests
//!
//! Exercises the public mutation API against the structural invariants:
//! dense ids, bidirectional edges, cascade removal, bulk tree insertion,
//! unit conversion and run-scoped metadata.

#[path = "../common/mod.rs"]
mod common;

mod building;
mod properties;
mod run;
mod units;
