//! The stages of a single simulation tick.
//!
//! Each submodule is one pipeline stage. They run in a fixed order inside
//! [`crate::workflows::step::step`]: non-bonded forces, bond lifecycle, bond formation, photon
//! collisions, and finally integration. Stages that need per-atom forces share a dense
//! [`crate::engine::index::AtomIndex`] built once at the start of the tick.

pub mod bond_formation;
pub mod bond_lifecycle;
pub mod integration;
pub mod nonbonded;
pub mod photon_collision;
