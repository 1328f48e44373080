//! # chemsim Core Library
//!
//! A small particle-chemistry simulator: charged atoms exert electrostatic, magnetic,
//! short-range repulsive and bonded spring forces on one another while bonds form and break
//! according to proximity, valence and thermal energy.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Plain data models (`SimulationState`, `Atom`, `Bond`,
//!   `Photon`), the element and molecule catalogs, and the scalar force laws with their tunable
//!   constants (`PhysicsParams`).
//!
//! - **[`engine`]: The Logic Core.** The tick stages (non-bonded forces, bond lifecycle, bond
//!   formation, photon collisions, integration), the command interface, analytics and
//!   configuration.
//!
//! - **[`workflows`]: The Public API.** The pure [`workflows::step::step`] function, the
//!   [`workflows::driver::Simulation`] driver that owns state and randomness, and a headless
//!   fixed-length [`workflows::run::run`].

pub mod core;
pub mod engine;
pub mod workflows;
