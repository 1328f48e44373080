//! # Workflows Module
//!
//! User-facing entry points that tie the engine stages together.
//!
//! - **Tick** ([`step`]) - One pure simulation tick from a state to its successor
//! - **Driver** ([`driver`]) - [`driver::Simulation`], which owns the committed state, the
//!   constants and a seeded random source, and gates ticks on the run flag
//! - **Headless Run** ([`run`]) - A fixed number of ticks with scheduled commands and progress
//!   reporting

pub mod driver;
pub mod run;
pub mod step;
