//! Rental calculators.
//!
//! Pure arithmetic over money in minor currency units. No I/O, no
//! storage access; the CLI layer owns formatting and prompting.

pub mod affordability;
pub mod earnings;
