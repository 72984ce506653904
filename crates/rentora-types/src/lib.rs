//! Shared domain types for Rentora.
//!
//! This crate contains the core domain types used across the Rentora
//! platform: roles, wizard steps, property listings, draft accumulation,
//! configuration, and the shared error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod draft;
pub mod error;
pub mod property;
pub mod role;
pub mod step;
