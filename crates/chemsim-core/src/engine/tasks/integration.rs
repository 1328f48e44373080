use crate::core::forcefield::params::{IntegrationParams, RegimeParams};
use crate::core::models::phase::Phase;
use crate::core::models::system::SimulationState;
use crate::engine::accumulator::ForceAccumulator;
use crate::engine::index::AtomIndex;
use crate::engine::utils::sampling::random_unit_vector;
use rand::Rng;
use tracing::{instrument, trace};

/// Damping and noise regime for a phase. Plasma moves like a gas.
pub fn regime_for(phase: Phase, params: &IntegrationParams) -> RegimeParams {
    match phase {
        Phase::Solid => params.solid,
        Phase::Liquid => params.liquid,
        Phase::Gas | Phase::Plasma => params.gas,
    }
}

/// Semi-implicit Euler step with phase-dependent thermal noise and damping, followed by
/// reflection off the walls of the cubic container.
///
/// Returns the number of wall collisions.
#[instrument(skip_all, name = "integration_task")]
pub fn run(
    state: &mut SimulationState,
    index: &AtomIndex,
    forces: &ForceAccumulator,
    params: &IntegrationParams,
    dt: f64,
    rng: &mut impl Rng,
) -> usize {
    let temperature = state.temperature;
    let half_extent = params.container_half_extent;
    let mut wall_hits = 0;

    for (slot, &atom_id) in index.ids().iter().enumerate() {
        let Some(atom) = state.atom_mut(atom_id) else {
            continue;
        };
        let regime = regime_for(
            atom.phase(temperature, params.plasma_temperature),
            params,
        );

        let mut force = forces.get(slot);
        let noise = temperature * params.thermal_noise_scale * regime.noise;
        if noise > 0.0 {
            force += random_unit_vector(rng) * noise;
        }

        atom.velocity += force / atom.mass() * dt;
        atom.velocity *= regime.damping;
        atom.position += atom.velocity * dt;

        for axis in 0..3 {
            if atom.position[axis].abs() > half_extent {
                atom.position[axis] = half_extent.copysign(atom.position[axis]);
                atom.velocity[axis] *= -params.wall_restitution;
                wall_hits += 1;
            }
        }
    }

    if wall_hits > 0 {
        trace!(count = wall_hits, "Atoms reflected off the container walls.");
    }
    wall_hits
}
