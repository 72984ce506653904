//! Business logic and repository trait definitions for Rentora.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, plus the listing wizard, marketplace search and the
//! rental calculators. It depends only on `rentora-types` -- never on
//! `rentora-infra` or any storage/IO crate.

pub mod calc;
pub mod marketplace;
pub mod repository;
pub mod role_sync;
pub mod wizard;
