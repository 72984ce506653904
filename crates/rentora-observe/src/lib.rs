//! Observability layer for Rentora.
//!
//! Tracing subscriber setup with structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
