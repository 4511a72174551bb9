//! Persisted state of the module.

pub mod bsn_contracts;
pub mod gauge;
pub mod params;
