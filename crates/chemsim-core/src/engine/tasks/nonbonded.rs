use crate::core::forcefield::params::NonBondedParams;
use crate::core::forcefield::potentials::{
    coulomb, intermolecular_attraction, lennard_jones_12_6, lorentz,
};
use crate::core::models::atom::Atom;
use crate::core::models::system::SimulationState;
use crate::engine::accumulator::ForceAccumulator;
use crate::engine::index::AtomIndex;
use itertools::Itertools;
use tracing::{instrument, trace};

/// Accumulates every force that does not come from a bond spring.
///
/// The magnetic term acts per atom; the electrostatic, Lennard-Jones and intermolecular terms act
/// per unordered pair and are applied equal and opposite through
/// [`ForceAccumulator::add_pair`]. Lennard-Jones and intermolecular attraction only act between
/// atoms that are not bonded to each other.
#[instrument(skip_all, name = "nonbonded_forces_task")]
pub fn run(
    state: &SimulationState,
    index: &AtomIndex,
    params: &NonBondedParams,
    forces: &mut ForceAccumulator,
) {
    let atoms: Vec<&Atom> = index
        .ids()
        .iter()
        .filter_map(|&id| state.atom(id))
        .collect();
    debug_assert_eq!(atoms.len(), index.len());

    let field = state.magnetic_field;
    if field.norm_squared() > f64::EPSILON {
        for (slot, atom) in atoms.iter().enumerate() {
            if atom.charge != 0 {
                forces.add(
                    slot,
                    lorentz(
                        atom.charge as f64,
                        &atom.velocity,
                        &field,
                        params.lorentz_scale,
                    ),
                );
            }
        }
    }

    let temperature = state.temperature;
    let mut skipped = 0usize;

    for (i, j) in (0..atoms.len()).tuple_combinations() {
        let (a, b) = (atoms[i], atoms[j]);
        let delta = b.position - a.position;
        let dist = delta.norm();
        if dist < params.min_pair_distance {
            skipped += 1;
            continue;
        }
        let direction = delta / dist;

        // Positive magnitudes push the pair apart.
        let mut magnitude = 0.0;

        if a.charge != 0 && b.charge != 0 {
            magnitude += coulomb(
                dist,
                a.charge as f64,
                b.charge as f64,
                params.coulomb_constant,
            );
        }

        if !state.are_bonded(index.id(i), index.id(j)) {
            let sigma = (a.radius() + b.radius()) * params.lj_sigma_scale;
            magnitude += lennard_jones_12_6(dist, sigma, params.lj_epsilon);

            let mean_boiling = 0.5 * (a.boiling_point + b.boiling_point);
            if temperature < mean_boiling && dist < params.intermolecular_cutoff {
                magnitude += intermolecular_attraction(dist, params.intermolecular_strength);
            }
        }

        if magnitude != 0.0 {
            forces.add_pair(i, j, -direction * magnitude);
        }
    }

    if skipped > 0 {
        trace!(pairs = skipped, "Skipped overlapping pairs.");
    }
}
