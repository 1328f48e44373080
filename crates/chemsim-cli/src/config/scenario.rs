use crate::error::{CliError, Result};
use chemsim::core::models::element::Element;
use chemsim::engine::command::Command;
use chemsim::workflows::run::ScheduledCommand;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// One command as written in a scenario file, selected by its `type` key.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum FileCommand {
    SpawnAtom {
        element: Element,
        position: [f64; 3],
        #[serde(default)]
        velocity: Option<[f64; 3]>,
        #[serde(default)]
        charge: Option<i32>,
    },
    SpawnMolecule {
        template: String,
        origin: [f64; 3],
    },
    FirePhoton {
        origin: [f64; 3],
        direction: [f64; 3],
        energy: f64,
    },
    SetTemperature {
        value: f64,
    },
    SetMagneticField {
        field: [f64; 3],
    },
    SetTimeScale {
        value: f64,
    },
    SetRunning {
        running: bool,
    },
    /// Scenario files cannot know atom ids, so ionization targets the atom nearest a point.
    Ionize {
        near: [f64; 3],
        delta: i32,
    },
}

impl From<FileCommand> for Command {
    fn from(command: FileCommand) -> Self {
        match command {
            FileCommand::SpawnAtom {
                element,
                position,
                velocity,
                charge,
            } => Command::SpawnAtom {
                element,
                position: Point3::from(position),
                velocity: velocity.map(Vector3::from).unwrap_or_else(Vector3::zeros),
                charge: charge.unwrap_or(0),
            },
            FileCommand::SpawnMolecule { template, origin } => Command::SpawnMolecule {
                template,
                origin: Point3::from(origin),
            },
            FileCommand::FirePhoton {
                origin,
                direction,
                energy,
            } => Command::FirePhoton {
                origin: Point3::from(origin),
                direction: Vector3::from(direction),
                energy,
            },
            FileCommand::SetTemperature { value } => Command::SetTemperature(value),
            FileCommand::SetMagneticField { field } => {
                Command::SetMagneticField(Vector3::from(field))
            }
            FileCommand::SetTimeScale { value } => Command::SetTimeScale(value),
            FileCommand::SetRunning { running } => Command::SetRunning(running),
            FileCommand::Ionize { near, delta } => Command::IonizeNearest {
                point: Point3::from(near),
                delta,
            },
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FileScheduledCommand {
    pub tick: u64,
    #[serde(flatten)]
    pub command: FileCommand,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct FileScenario {
    #[serde(default)]
    commands: Vec<FileCommand>,
    #[serde(default)]
    schedule: Vec<FileScheduledCommand>,
}

/// Initial conditions plus timed events for a headless run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    /// Applied once, before the first tick.
    pub setup: Vec<Command>,
    pub schedule: Vec<ScheduledCommand>,
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let file: FileScenario = toml::from_str(content)?;
        Ok(Self {
            setup: file.commands.into_iter().map(Command::from).collect(),
            schedule: file
                .schedule
                .into_iter()
                .map(|entry| ScheduledCommand {
                    tick: entry.tick,
                    command: entry.command.into(),
                })
                .collect(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading scenario from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
