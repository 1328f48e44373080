use thiserror::Error;

use super::config::ConfigError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::models::ids::AtomId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Physics parameters could not be loaded: {source}")]
    Params {
        #[from]
        source: ParamLoadError,
    },

    #[error("Invalid simulation configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Command '{command}' rejected: {reason}")]
    InvalidCommand {
        command: &'static str,
        reason: String,
    },

    #[error("Atom not found in simulation: {0:?}")]
    AtomNotFound(AtomId),
}
