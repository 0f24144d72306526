//! Crate-level tests.
//!
//! - `determinism.rs`: same seed, same brawl
//! - `integration.rs`: end-to-end brawls through the controller
//! - `helpers.rs`: sheet and encounter factories shared with unit tests

pub(crate) mod helpers;
