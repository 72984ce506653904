//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (rentora-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod property;

use std::fmt;
use std::str::FromStr;

/// Sort order for list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("invalid sort order: '{other}'")),
        }
    }
}
