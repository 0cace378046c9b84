//! Flat codec integration tests
//!
//! write_data / read_data round trips, the documented link encoding and
//! rejection of malformed flat records.

#[path = "../common/mod.rs"]
mod common;

mod malformed;
mod roundtrip;
mod scenarios;
