//! Layered configuration for the `run` subcommand.
//!
//! Values are resolved with the precedence CLI flag > `-S` override > config file > built-in
//! default. Scenario files are parsed separately by [`scenario`].

pub mod builder;
pub mod defaults;
pub mod file;
pub mod scenario;

use chemsim::engine::config::SimulationConfig;
use std::path::PathBuf;

/// Fully resolved settings for one headless run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub ticks: u64,
    pub dt: f64,
    pub scenario: Option<PathBuf>,
}
