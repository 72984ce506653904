//! Marketplace browsing: filtered search over published listings and the
//! filter <-> query-string codec used for shareable searches.

pub mod query;
pub mod service;
