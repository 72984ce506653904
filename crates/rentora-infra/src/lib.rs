//! Infrastructure layer for Rentora.
//!
//! Contains implementations of the repository traits defined in `rentora-core`:
//! an in-memory store, a JSON-file store for local persisted state, a
//! latency-simulating wrapper, and the demo listing fixtures.

pub mod config;
pub mod fixtures;
pub mod jsonstore;
pub mod latency;
pub mod memory;
