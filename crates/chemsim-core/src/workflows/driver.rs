use super::step::step;
use crate::core::forcefield::params::PhysicsParams;
use crate::core::models::element::Element;
use crate::core::models::ids::{AtomId, PhotonId};
use crate::core::models::phase::Phase;
use crate::core::models::system::SimulationState;
use crate::engine::analysis::{SimulationStats, electric_field_at, field_direction};
use crate::engine::command::{Command, CommandOutcome};
use crate::engine::config::SimulationConfig;
use crate::engine::error::EngineError;
use nalgebra::{Point3, Vector3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Owns the committed simulation state together with its constants and random source.
///
/// Commands take `&mut self`, so they can never interleave with a tick. Commands queued with
/// [`Simulation::enqueue`] are applied at the start of the next [`Simulation::advance`], before
/// the tick runs.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: SimulationState,
    params: PhysicsParams,
    rng: StdRng,
    pending: VecDeque<Command>,
    ticks: u64,
    elapsed: f64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let mut state = SimulationState::new();
        state.temperature = config.temperature;
        state.magnetic_field = config.magnetic_field;
        state.time_scale = config.time_scale;
        state.running = config.start_running;

        Self {
            state,
            params: config.params,
            rng: StdRng::seed_from_u64(config.seed),
            pending: VecDeque::new(),
            ticks: 0,
            elapsed: 0.0,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    /// Number of ticks actually executed.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds elapsed, after clamping and time scaling.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, EngineError> {
        command.apply(&mut self.state, &self.params)
    }

    pub fn enqueue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    /// Applies every queued command in order, returning how many were rejected.
    fn drain_pending(&mut self) -> usize {
        let mut rejected = 0;
        while let Some(command) = self.pending.pop_front() {
            let name = command.name();
            if let Err(e) = command.apply(&mut self.state, &self.params) {
                warn!(command = name, error = %e, "Queued command rejected.");
                rejected += 1;
            }
        }
        rejected
    }

    /// The dt a tick would use for an external frame time of `frame_dt`.
    pub fn effective_dt(&self, frame_dt: f64) -> f64 {
        let clamped = if frame_dt.is_nan() {
            0.0
        } else {
            frame_dt.clamp(0.0, self.params.integration.max_dt)
        };
        clamped * self.state.time_scale
    }

    /// Drains the command queue, then runs one tick if the simulation is running.
    ///
    /// Returns whether a tick was executed. A paused simulation, or one whose effective dt is
    /// zero, only drains the queue.
    pub fn advance(&mut self, frame_dt: f64) -> bool {
        let rejected = self.drain_pending();
        if rejected > 0 {
            debug!(rejected, "Some queued commands were rejected.");
        }

        if !self.state.running {
            return false;
        }
        let dt = self.effective_dt(frame_dt);
        if dt <= 0.0 {
            return false;
        }

        self.state = step(&self.state, &self.params, dt, &mut self.rng);
        self.ticks += 1;
        self.elapsed += dt;
        true
    }

    pub fn spawn_atom(
        &mut self,
        element: Element,
        position: Point3<f64>,
    ) -> Result<AtomId, EngineError> {
        match self.apply(Command::spawn_atom(element, position))? {
            CommandOutcome::Atoms(ids) if ids.len() == 1 => Ok(ids[0]),
            other => Err(unexpected("spawn-atom", &other)),
        }
    }

    /// Spawns a catalog molecule; an unknown key yields an empty list.
    pub fn spawn_molecule(
        &mut self,
        template: &str,
        origin: Point3<f64>,
    ) -> Result<Vec<AtomId>, EngineError> {
        match self.apply(Command::SpawnMolecule {
            template: template.to_string(),
            origin,
        })? {
            CommandOutcome::Atoms(ids) => Ok(ids),
            other => Err(unexpected("spawn-molecule", &other)),
        }
    }

    pub fn fire_photon(
        &mut self,
        origin: Point3<f64>,
        direction: Vector3<f64>,
        energy: f64,
    ) -> Result<PhotonId, EngineError> {
        match self.apply(Command::FirePhoton {
            origin,
            direction,
            energy,
        })? {
            CommandOutcome::Photon(id) => Ok(id),
            other => Err(unexpected("fire-photon", &other)),
        }
    }

    pub fn set_temperature(&mut self, value: f64) -> Result<(), EngineError> {
        self.apply(Command::SetTemperature(value)).map(|_| ())
    }

    pub fn set_magnetic_field(&mut self, field: Vector3<f64>) -> Result<(), EngineError> {
        self.apply(Command::SetMagneticField(field)).map(|_| ())
    }

    pub fn set_time_scale(&mut self, value: f64) -> Result<(), EngineError> {
        self.apply(Command::SetTimeScale(value)).map(|_| ())
    }

    pub fn set_run_flag(&mut self, running: bool) {
        self.state.running = running;
    }

    pub fn ionize(&mut self, atom: AtomId, delta: i32) -> Result<(), EngineError> {
        self.apply(Command::Ionize { atom, delta }).map(|_| ())
    }

    pub fn remove_atom(&mut self, atom: AtomId) -> Result<(), EngineError> {
        self.apply(Command::RemoveAtom(atom)).map(|_| ())
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn phase_of(&self, atom: AtomId) -> Option<Phase> {
        self.state
            .phase_of(atom, self.params.integration.plasma_temperature)
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats::collect(&self.state, self.params.integration.plasma_temperature)
    }

    pub fn electric_field_at(&self, point: &Point3<f64>) -> Vector3<f64> {
        electric_field_at(&self.state, point, &self.params.nonbonded)
    }

    pub fn field_direction(&self, point: &Point3<f64>) -> Vector3<f64> {
        field_direction(&self.state, point, &self.params.nonbonded)
    }
}

fn unexpected(command: &'static str, outcome: &CommandOutcome) -> EngineError {
    EngineError::InvalidCommand {
        command,
        reason: format!("unexpected outcome {outcome:?}"),
    }
}
