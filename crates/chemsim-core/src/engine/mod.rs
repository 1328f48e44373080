//! # Engine Module
//!
//! The per-tick physics and chemistry machinery of chemsim.
//!
//! ## Overview
//!
//! A tick is a fixed sequence of stages ([`tasks`]) operating on a working copy of
//! [`crate::core::models::system::SimulationState`]. Forces for the tick are gathered into a dense
//! [`accumulator::ForceAccumulator`] addressed through an [`index::AtomIndex`], so pair loops
//! never hash an id.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Seed, initial conditions and validated physics constants
//! - **Commands** ([`command`]) - Discrete external events applied between ticks
//! - **Analysis** ([`analysis`]) - Electric field sampling and population statistics
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod accumulator;
pub mod analysis;
pub mod command;
pub mod config;
pub mod error;
pub mod index;
pub mod progress;
pub mod tasks;
pub(crate) mod utils;
