//! Route index derived from a generated route collection.
//!
//! Lists destination countries with the airlines serving them, flags cargo
//! operators, and supports the country search the map legend offers.

pub mod cargo;
pub mod index;
pub mod types;

pub use cargo::is_cargo;
pub use types::{AirlineSummary, CountrySummary, RouteIndex};
