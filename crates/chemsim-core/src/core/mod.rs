//! # Core Module
//!
//! Data models and force laws shared by every tick stage.
//!
//! - **Models** ([`models`]) - Atoms, bonds, photons, elements, molecule templates and the
//!   registry that owns them
//! - **Force Field** ([`forcefield`]) - Tunable physical constants and pure potential functions

pub mod forcefield;
pub mod models;
