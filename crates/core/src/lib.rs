//! EcoScore calculation engine.
//!
//! Pure, synchronous domain logic: profiles, the reference catalog seam,
//! the footprint calculator, EcoScore, model comparison, scenario deltas
//! and usage summaries. No storage or transport dependencies; the `db` and
//! `api` crates resolve profiles and call into this crate.

pub mod calculation;
pub mod calculator;
pub mod catalog;
pub mod comparison;
pub mod config;
pub mod ecoscore;
pub mod error;
pub mod footprint;
pub mod format;
pub mod normalize;
pub mod profile;
pub mod reference;
pub mod scenario;
pub mod summary;
pub mod types;
