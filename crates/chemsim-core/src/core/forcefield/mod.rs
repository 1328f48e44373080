//! # Force Field Module
//!
//! Scalar force laws and the constants that tune them.
//!
//! - [`params`] - [`params::PhysicsParams`], loadable from TOML with per-field defaults
//! - [`potentials`] - Lennard-Jones, Coulomb, intermolecular, spring, dissociation and Lorentz
//!   terms as pure functions

pub mod params;
pub mod potentials;
