use chemsim::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A scenario setup command that the engine refused; `index` is zero-based.
    #[error("Scenario command #{index} ({command}) failed: {source}", index = index + 1)]
    Setup {
        index: usize,
        command: &'static str,
        #[source]
        source: EngineError,
    },

    #[error("Invalid run configuration: {0}")]
    Config(String),

    #[error("Could not read '{}': {source}", path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
