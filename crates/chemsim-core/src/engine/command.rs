use super::error::EngineError;
use crate::core::forcefield::params::PhysicsParams;
use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::ids::{AtomId, PhotonId};
use crate::core::models::molecule::find_template;
use crate::core::models::photon::Photon;
use crate::core::models::system::SimulationState;
use nalgebra::{Point3, Vector3};
use tracing::{debug, warn};

/// A discrete external event, applied strictly between ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SpawnAtom {
        element: Element,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        charge: i32,
    },
    /// Spawns a catalog molecule; an unknown key spawns nothing.
    SpawnMolecule {
        template: String,
        origin: Point3<f64>,
    },
    FirePhoton {
        origin: Point3<f64>,
        direction: Vector3<f64>,
        energy: f64,
    },
    SetTemperature(f64),
    SetMagneticField(Vector3<f64>),
    SetTimeScale(f64),
    SetRunning(bool),
    /// Adds `delta` to an atom's charge.
    Ionize {
        atom: AtomId,
        delta: i32,
    },
    /// Ionizes whichever atom is closest to `point`.
    IonizeNearest {
        point: Point3<f64>,
        delta: i32,
    },
    RemoveAtom(AtomId),
    Clear,
}

/// What a successfully applied command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Atoms(Vec<AtomId>),
    Photon(PhotonId),
    Ionized(AtomId),
}

impl Command {
    /// Convenience constructor for a neutral atom at rest.
    pub fn spawn_atom(element: Element, position: Point3<f64>) -> Self {
        Self::SpawnAtom {
            element,
            position,
            velocity: Vector3::zeros(),
            charge: 0,
        }
    }

    /// Kebab-case name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SpawnAtom { .. } => "spawn-atom",
            Self::SpawnMolecule { .. } => "spawn-molecule",
            Self::FirePhoton { .. } => "fire-photon",
            Self::SetTemperature(_) => "set-temperature",
            Self::SetMagneticField(_) => "set-magnetic-field",
            Self::SetTimeScale(_) => "set-time-scale",
            Self::SetRunning(_) => "set-running",
            Self::Ionize { .. } | Self::IonizeNearest { .. } => "ionize",
            Self::RemoveAtom(_) => "remove-atom",
            Self::Clear => "clear",
        }
    }

    /// Applies the command to `state`, leaving it untouched when the command is rejected.
    pub fn apply(
        self,
        state: &mut SimulationState,
        params: &PhysicsParams,
    ) -> Result<CommandOutcome, EngineError> {
        let name = self.name();
        let outcome = match self {
            Self::SpawnAtom {
                element,
                position,
                velocity,
                charge,
            } => {
                ensure_finite(name, "position", position.coords.iter())?;
                ensure_finite(name, "velocity", velocity.iter())?;
                let atom = Atom::new(element, position)
                    .with_velocity(velocity)
                    .with_charge(charge);
                let id = state.add_atom(atom).ok_or_else(|| EngineError::InvalidCommand {
                    command: name,
                    reason: format!("{} has invalid mass or radius", element),
                })?;
                CommandOutcome::Atoms(vec![id])
            }
            Self::SpawnMolecule { template, origin } => {
                ensure_finite(name, "origin", origin.coords.iter())?;
                match find_template(&template) {
                    Some(molecule) => CommandOutcome::Atoms(molecule.spawn(state, origin, params)),
                    None => {
                        warn!(template = %template, "Unknown molecule template; nothing spawned.");
                        CommandOutcome::Atoms(Vec::new())
                    }
                }
            }
            Self::FirePhoton {
                origin,
                direction,
                energy,
            } => {
                ensure_finite(name, "origin", origin.coords.iter())?;
                ensure_non_negative(name, "energy", energy)?;
                let photon = Photon::new(origin, direction, energy).ok_or_else(|| {
                    EngineError::InvalidCommand {
                        command: name,
                        reason: "direction must be a finite, non-zero vector".to_string(),
                    }
                })?;
                CommandOutcome::Photon(state.add_photon(photon))
            }
            Self::SetTemperature(value) => {
                ensure_non_negative(name, "temperature", value)?;
                state.temperature = value;
                CommandOutcome::Applied
            }
            Self::SetMagneticField(field) => {
                ensure_finite(name, "field", field.iter())?;
                state.magnetic_field = field;
                CommandOutcome::Applied
            }
            Self::SetTimeScale(value) => {
                ensure_non_negative(name, "time scale", value)?;
                state.time_scale = value;
                CommandOutcome::Applied
            }
            Self::SetRunning(running) => {
                state.running = running;
                CommandOutcome::Applied
            }
            Self::Ionize { atom, delta } => {
                ionize(state, atom, delta)?;
                CommandOutcome::Ionized(atom)
            }
            Self::IonizeNearest { point, delta } => {
                ensure_finite(name, "point", point.coords.iter())?;
                let atom = nearest_atom(state, &point).ok_or_else(|| EngineError::InvalidCommand {
                    command: name,
                    reason: "there are no atoms to ionize".to_string(),
                })?;
                ionize(state, atom, delta)?;
                CommandOutcome::Ionized(atom)
            }
            Self::RemoveAtom(atom) => {
                state
                    .remove_atom(atom)
                    .ok_or(EngineError::AtomNotFound(atom))?;
                CommandOutcome::Applied
            }
            Self::Clear => {
                state.clear();
                CommandOutcome::Applied
            }
        };
        debug!(command = name, "Command applied.");
        Ok(outcome)
    }
}

fn ionize(state: &mut SimulationState, atom: AtomId, delta: i32) -> Result<(), EngineError> {
    let target = state
        .atom_mut(atom)
        .ok_or(EngineError::AtomNotFound(atom))?;
    target.charge = target.charge.saturating_add(delta);
    Ok(())
}

fn nearest_atom(state: &SimulationState, point: &Point3<f64>) -> Option<AtomId> {
    state
        .atoms_iter()
        .map(|(id, atom)| (id, nalgebra::distance_squared(&atom.position, point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

fn ensure_finite<'a>(
    command: &'static str,
    what: &str,
    mut values: impl Iterator<Item = &'a f64>,
) -> Result<(), EngineError> {
    if values.all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(EngineError::InvalidCommand {
            command,
            reason: format!("{what} must be finite"),
        })
    }
}

fn ensure_non_negative(command: &'static str, what: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidCommand {
            command,
            reason: format!("{what} must be finite and non-negative, got {value}"),
        })
    }
}
