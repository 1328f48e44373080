use crate::core::forcefield::params::BondParams;
use crate::core::forcefield::potentials::{
    dissociation_probability, spring, thermally_expanded_length,
};
use crate::core::models::ids::BondId;
use crate::core::models::system::SimulationState;
use crate::engine::accumulator::ForceAccumulator;
use crate::engine::index::AtomIndex;
use crate::engine::utils::sampling::roll;
use rand::Rng;
use tracing::{debug, instrument};

/// What happened to the bond population during one lifecycle pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleOutcome {
    /// Bonds whose endpoint atom no longer exists.
    pub dropped: usize,
    /// Bonds stretched beyond the break ratio.
    pub snapped: usize,
    /// Bonds broken by thermal agitation.
    pub dissociated: usize,
}

impl LifecycleOutcome {
    pub fn removed(&self) -> usize {
        self.dropped + self.snapped + self.dissociated
    }
}

enum Fate {
    Survives,
    Snapped,
    Dissociated,
}

/// Decides survival for every bond and adds spring forces for the survivors.
///
/// Bonds are visited in registry order. Mechanical snapping is decided before the thermal roll,
/// so a snapped bond never draws from `rng`.
#[instrument(skip_all, name = "bond_lifecycle_task")]
pub fn run(
    state: &mut SimulationState,
    index: &AtomIndex,
    params: &BondParams,
    forces: &mut ForceAccumulator,
    rng: &mut impl Rng,
) -> LifecycleOutcome {
    let temperature = state.temperature;
    let thermal_energy = temperature * params.thermal_energy_scale;
    let mut outcome = LifecycleOutcome::default();
    let mut doomed: Vec<BondId> = Vec::new();

    for (bond_id, bond) in state.bonds_iter() {
        let endpoints = (
            state.atom(bond.atom_a).zip(index.slot(bond.atom_a)),
            state.atom(bond.atom_b).zip(index.slot(bond.atom_b)),
        );
        let ((a, slot_a), (b, slot_b)) = match endpoints {
            (Some(first), Some(second)) => (first, second),
            _ => {
                doomed.push(bond_id);
                outcome.dropped += 1;
                continue;
            }
        };

        let delta = b.position - a.position;
        let separation = delta.norm();
        let effective_rest =
            thermally_expanded_length(bond.rest_length, temperature, params.thermal_expansion);

        let fate = if separation > effective_rest * params.break_ratio {
            Fate::Snapped
        } else {
            let probability = dissociation_probability(
                bond.energy(),
                thermal_energy,
                params.dissociation_threshold,
                params.dissociation_coefficient,
            );
            if roll(rng, probability) {
                Fate::Dissociated
            } else {
                Fate::Survives
            }
        };

        match fate {
            Fate::Survives => {
                if separation > f64::EPSILON {
                    let magnitude = spring(separation, effective_rest, bond.stiffness());
                    forces.add_pair(slot_a, slot_b, delta / separation * magnitude);
                }
            }
            Fate::Snapped => {
                debug!(
                    separation,
                    limit = effective_rest * params.break_ratio,
                    "Bond snapped."
                );
                doomed.push(bond_id);
                outcome.snapped += 1;
            }
            Fate::Dissociated => {
                debug!(temperature, energy = bond.energy(), "Bond dissociated.");
                doomed.push(bond_id);
                outcome.dissociated += 1;
            }
        }
    }

    for bond_id in doomed {
        state.remove_bond(bond_id);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::ids::AtomId;
    use crate::core::models::topology::{Bond, BondKind, BondOrder};
    use nalgebra::{Point3, Vector3};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TOLERANCE: f64 = 1e-9;

    fn bonded_pair(separation: f64, rest_length: f64) -> (SimulationState, AtomId, AtomId) {
        let mut state = SimulationState::new();
        let a = state
            .add_atom(Atom::new(Element::Hydrogen, Point3::origin()))
            .unwrap();
        let b = state
            .add_atom(Atom::new(
                Element::Hydrogen,
                Point3::new(separation, 0.0, 0.0),
            ))
            .unwrap();
        state
            .add_bond(Bond::new(
                a,
                b,
                BondOrder::Single,
                BondKind::Covalent,
                40.0,
                rest_length,
            ))
            .unwrap();
        (state, a, b)
    }

    fn run_once(
        state: &mut SimulationState,
        params: &BondParams,
        rng: &mut StdRng,
    ) -> (AtomIndex, ForceAccumulator, LifecycleOutcome) {
        let index = AtomIndex::build(state);
        let mut forces = ForceAccumulator::zeros(index.len());
        let outcome = run(state, &index, params, &mut forces, rng);
        (index, forces, outcome)
    }

    #[test]
    fn overstretched_bond_snaps_without_consuming_randomness() {
        let (mut state, _, _) = bonded_pair(3.5, 1.0);
        state.temperature = 5000.0;
        let mut rng = StdRng::seed_from_u64(1);
        let mut reference = rng.clone();

        let (_, forces, outcome) = run_once(&mut state, &BondParams::default(), &mut rng);

        assert_eq!(outcome.snapped, 1);
        assert_eq!(state.bond_count(), 0);
        assert_eq!(forces.get(0), Vector3::zeros());
        assert_eq!(
            rng.gen_range(0..u64::MAX),
            reference.gen_range(0..u64::MAX)
        );
    }

    #[test]
    fn snap_happens_for_every_seed() {
        for seed in 0..20 {
            let (mut state, _, _) = bonded_pair(2.5, 1.0);
            let mut rng = StdRng::seed_from_u64(seed);
            let (_, _, outcome) = run_once(&mut state, &BondParams::default(), &mut rng);
            assert_eq!(outcome.snapped, 1);
            assert_eq!(state.bond_count(), 0);
        }
    }

    #[test]
    fn stretched_bond_pulls_endpoints_together() {
        let (mut state, a, b) = bonded_pair(1.2, 1.0);
        state.temperature = 0.0;
        let mut rng = StdRng::seed_from_u64(2);

        let (index, forces, outcome) = run_once(&mut state, &BondParams::default(), &mut rng);

        assert_eq!(outcome.removed(), 0);
        assert_eq!(state.bond_count(), 1);
        let on_a = forces.get(index.slot(a).unwrap());
        let on_b = forces.get(index.slot(b).unwrap());
        assert!((on_a.x - 8.0).abs() < TOLERANCE);
        assert!((on_b.x + 8.0).abs() < TOLERANCE);
    }

    #[test]
    fn compressed_bond_pushes_endpoints_apart() {
        let (mut state, a, _) = bonded_pair(0.8, 1.0);
        state.temperature = 0.0;
        let mut rng = StdRng::seed_from_u64(2);

        let (index, forces, _) = run_once(&mut state, &BondParams::default(), &mut rng);
        assert!(forces.get(index.slot(a).unwrap()).x < 0.0);
    }

    #[test]
    fn hot_bond_dissociates_when_probability_saturates() {
        let (mut state, _, _) = bonded_pair(1.5, 1.0);
        state.temperature = 5000.0;
        let params = BondParams {
            dissociation_coefficient: 1.0,
            ..BondParams::default()
        };
        let mut rng = StdRng::seed_from_u64(3);

        let (_, forces, outcome) = run_once(&mut state, &params, &mut rng);

        assert_eq!(outcome.dissociated, 1);
        assert_eq!(outcome.snapped, 0);
        assert_eq!(state.bond_count(), 0);
        assert_eq!(forces.net(), Vector3::zeros());
    }

    #[test]
    fn cool_bond_never_dissociates() {
        let (mut state, _, _) = bonded_pair(1.0, 1.0);
        state.temperature = 300.0;
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let (_, _, outcome) = run_once(&mut state, &BondParams::default(), &mut rng);
            assert_eq!(outcome.removed(), 0);
        }
        assert_eq!(state.bond_count(), 1);
    }

    #[test]
    fn bond_with_missing_endpoint_is_dropped() {
        let (mut state, a, b) = bonded_pair(1.0, 1.0);
        state.remove_atom_leaving_bonds(b);
        let mut rng = StdRng::seed_from_u64(5);

        let (_, _, outcome) = run_once(&mut state, &BondParams::default(), &mut rng);

        assert_eq!(outcome.dropped, 1);
        assert_eq!(state.bond_count(), 0);
        assert_eq!(state.bond_degree(a), 0);
    }
}
