use crate::error::{CliError, Result};
use chemsim::core::forcefield::params::PhysicsParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSimulationConfig {
    pub seed: Option<u64>,
    pub ticks: Option<u64>,
    pub dt: Option<f64>,
    pub temperature: Option<f64>,
    pub time_scale: Option<f64>,
    pub magnetic_field: Option<[f64; 3]>,
    pub start_running: Option<bool>,
}

/// The on-disk shape of a simulation config file. Keys are kebab-case in every section, and a
/// relative `scenario` path is resolved against the file's own directory.
///
/// ```toml
/// scenario = "salt.toml"
///
/// [simulation]
/// seed = 7
/// temperature = 450.0
///
/// [physics.bonds]
/// break-ratio = 2.5
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub scenario: Option<PathBuf>,
    pub simulation: Option<FileSimulationConfig>,
    pub physics: Option<PhysicsParams>,
}

/// Reads a config file into a raw table so `-S` overrides can be applied before typing it.
pub fn read_table(path: &Path) -> Result<toml::Table> {
    debug!("Reading config file {:?}", path);
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

impl FileConfig {
    pub fn from_table(table: toml::Table) -> Result<Self> {
        toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| CliError::Config(e.to_string()))
    }
}
