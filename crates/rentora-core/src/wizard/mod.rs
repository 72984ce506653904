//! Role-aware multi-step listing wizard.
//!
//! A [`session::WizardSession`] owns the planned step sequence, the
//! accumulated draft, and the submission state for one listing flow, and
//! every transition on it is a pure function of session state plus the
//! operation's arguments. [`service::WizardService`] hosts sessions against
//! the repository port and performs the actual submission.
//!
//! Validation lives in [`rules`] as data (per-step check lists with
//! per-role overlays), and [`assembler`] turns a fully validated draft
//! into a publishable `Property`.

pub mod assembler;
pub mod error;
pub mod rules;
pub mod service;
pub mod session;
