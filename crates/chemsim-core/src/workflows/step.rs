use crate::core::forcefield::params::PhysicsParams;
use crate::core::models::system::SimulationState;
use crate::engine::accumulator::ForceAccumulator;
use crate::engine::index::AtomIndex;
use crate::engine::tasks::{
    bond_formation, bond_lifecycle, integration, nonbonded, photon_collision,
};
use rand::Rng;
use tracing::{instrument, trace};

/// Advances `state` by one tick of length `dt` and returns the new state.
///
/// `dt` is used as given; clamping and time scaling are the caller's job (see
/// [`crate::workflows::driver::Simulation::advance`]). The input is never modified: the tick
/// runs on a clone which is returned whole, so observers of the previous state never see a
/// partially updated one. A state with no atoms and no photons is returned unchanged.
#[instrument(skip_all, name = "step", fields(atoms = state.atom_count(), dt = dt))]
pub fn step(
    state: &SimulationState,
    params: &PhysicsParams,
    dt: f64,
    rng: &mut impl Rng,
) -> SimulationState {
    let mut next = state.clone();
    if next.is_empty() {
        return next;
    }

    let index = AtomIndex::build(&next);
    let mut forces = ForceAccumulator::zeros(index.len());

    nonbonded::run(&next, &index, &params.nonbonded, &mut forces);
    let lifecycle = bond_lifecycle::run(&mut next, &index, &params.bonds, &mut forces, rng);
    let formation = bond_formation::run(&mut next, &params.formation, dt);
    let photons = photon_collision::run(&mut next, &params.photons, dt);
    let wall_hits = integration::run(&mut next, &index, &forces, &params.integration, dt, rng);

    trace!(
        bonds_removed = lifecycle.removed(),
        bonds_formed = formation.formed(),
        photons_absorbed = photons.absorbed,
        wall_hits,
        "Tick complete."
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::element::Element;
    use crate::core::models::ids::AtomId;
    use crate::core::models::molecule::find_template;
    use crate::core::models::photon::Photon;
    use crate::core::models::topology::{Bond, BondKind, BondOrder};
    use nalgebra::{Point3, Vector3};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    const TOLERANCE: f64 = 1e-9;

    fn assert_topology_invariants(state: &SimulationState) {
        let mut pairs = HashSet::new();
        for (_, bond) in state.bonds_iter() {
            assert_ne!(bond.atom_a, bond.atom_b);
            assert!(state.contains_atom(bond.atom_a));
            assert!(state.contains_atom(bond.atom_b));
            let key = if bond.atom_a < bond.atom_b {
                (bond.atom_a, bond.atom_b)
            } else {
                (bond.atom_b, bond.atom_a)
            };
            assert!(pairs.insert(key), "duplicate bond between {key:?}");
        }
        for (id, atom) in state.atoms_iter() {
            assert!(state.bond_degree(id) <= atom.valence() as usize);
        }
    }

    fn crowded_state() -> SimulationState {
        let mut state = SimulationState::new();
        let elements = [
            Element::Hydrogen,
            Element::Oxygen,
            Element::Carbon,
            Element::Nitrogen,
            Element::Sodium,
            Element::Chlorine,
            Element::Hydrogen,
            Element::Fluorine,
        ];
        for (i, element) in elements.iter().cycle().take(24).enumerate() {
            let i = i as f64;
            let position = Point3::new((i * 0.7) % 3.0, (i * 0.45) % 2.5, (i * 0.3) % 2.0);
            state.add_atom(Atom::new(*element, position)).unwrap();
        }
        state
    }

    #[test]
    fn stepping_an_empty_state_changes_nothing() {
        let mut state = SimulationState::new();
        state.temperature = 750.0;
        let mut rng = StdRng::seed_from_u64(0);

        let next = step(&state, &PhysicsParams::default(), 0.05, &mut rng);

        assert!(next.is_empty());
        assert_eq!(next.bond_count(), 0);
        assert_eq!(next.temperature, 750.0);
        assert_eq!(next.formation_cooldown(), state.formation_cooldown());
    }

    #[test]
    fn step_leaves_its_input_untouched() {
        let mut state = SimulationState::new();
        let id = state
            .add_atom(
                Atom::new(Element::Neon, Point3::origin())
                    .with_velocity(Vector3::new(1.0, 0.0, 0.0)),
            )
            .unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let next = step(&state, &PhysicsParams::default(), 0.05, &mut rng);

        assert_eq!(state.atom(id).unwrap().position, Point3::origin());
        assert!(next.atom(id).unwrap().position.x > 0.0);
    }

    #[test]
    fn momentum_is_conserved_without_noise_or_walls() {
        let mut state = SimulationState::new();
        state.temperature = 0.0;
        let layout = [
            (Element::Sodium, [0.0, 0.0, 0.0], 1),
            (Element::Chlorine, [2.4, 0.5, 0.0], -1),
            (Element::Potassium, [-1.0, 2.2, 0.7], 1),
            (Element::Fluorine, [1.1, -1.9, -0.8], -1),
        ];
        for (element, [x, y, z], charge) in layout {
            state
                .add_atom(Atom::new(element, Point3::new(x, y, z)).with_charge(charge))
                .unwrap();
        }
        let mut rng = StdRng::seed_from_u64(1);

        let mut current = state;
        for _ in 0..10 {
            current = step(&current, &PhysicsParams::default(), 0.01, &mut rng);
        }

        let momentum: Vector3<f64> = current
            .atoms_iter()
            .map(|(_, atom)| atom.velocity * atom.mass())
            .sum();
        assert!(momentum.norm() < 1e-6, "net momentum {momentum:?}");
    }

    #[test]
    fn topology_invariants_hold_over_many_ticks() {
        let params = PhysicsParams::default();
        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = crowded_state();
            state.temperature = 350.0 + 100.0 * seed as f64;
            for _ in 0..60 {
                state = step(&state, &params, 0.02, &mut rng);
                assert_topology_invariants(&state);
            }
        }
    }

    #[test]
    fn crowded_state_forms_bonds_on_first_tick() {
        let mut rng = StdRng::seed_from_u64(2);
        let next = step(&crowded_state(), &PhysicsParams::default(), 0.02, &mut rng);
        assert!(next.bond_count() > 0);
        assert_topology_invariants(&next);
    }

    #[test]
    fn overstretched_bond_snaps_for_any_seed() {
        let mut state = SimulationState::new();
        let a = state
            .add_atom(Atom::new(Element::Carbon, Point3::origin()))
            .unwrap();
        let b = state
            .add_atom(Atom::new(Element::Carbon, Point3::new(4.0, 0.0, 0.0)))
            .unwrap();
        state
            .add_bond(Bond::new(
                a,
                b,
                BondOrder::Single,
                BondKind::Covalent,
                40.0,
                1.5,
            ))
            .unwrap();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let next = step(&state, &PhysicsParams::default(), 0.02, &mut rng);
            assert!(!next.are_bonded(a, b));
        }
    }

    #[test]
    fn photon_hit_removes_bond_and_photon_in_same_tick() {
        let mut state = SimulationState::new();
        let params = PhysicsParams::default();
        find_template("H2")
            .unwrap()
            .spawn(&mut state, Point3::origin(), &params);
        state.add_photon(Photon::new(Point3::new(0.0, 0.0, -0.9), Vector3::z(), 5.0).unwrap());
        let mut rng = StdRng::seed_from_u64(3);

        let next = step(&state, &params, 0.05, &mut rng);

        assert_eq!(next.photon_count(), 0);
        assert_eq!(next.bond_count(), 0);
    }

    #[test]
    fn wall_reflection_through_full_step() {
        let mut state = SimulationState::new();
        state.temperature = 0.0;
        let id = state
            .add_atom(
                Atom::new(Element::Helium, Point3::new(0.0, 19.8, 0.0))
                    .with_velocity(Vector3::new(0.0, 10.0, 0.0)),
            )
            .unwrap();
        let params = PhysicsParams::default();
        let mut rng = StdRng::seed_from_u64(4);

        let next = step(&state, &params, 0.05, &mut rng);

        let atom = next.atom(id).unwrap();
        let pre_clamp = 10.0 * params.integration.solid.damping;
        assert_eq!(atom.position.y, params.integration.container_half_extent);
        assert!((atom.velocity.y + 0.5 * pre_clamp).abs() < TOLERANCE);
    }

    #[test]
    fn ionic_formation_through_step_charges_donor_positive() {
        let mut state = SimulationState::new();
        state.temperature = 100.0;
        let li = state
            .add_atom(Atom::new(Element::Lithium, Point3::new(1.8, 0.0, 0.0)))
            .unwrap();
        let f = state
            .add_atom(Atom::new(Element::Fluorine, Point3::origin()))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let next = step(&state, &PhysicsParams::default(), 0.01, &mut rng);

        assert!(next.are_bonded(li, f));
        assert_eq!(next.atom(li).unwrap().charge, 1);
        assert_eq!(next.atom(f).unwrap().charge, -1);
    }

    #[test]
    fn same_seed_gives_same_trajectory() {
        let params = PhysicsParams::default();
        let run = |seed: u64| -> Vec<(AtomId, Point3<f64>)> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = crowded_state();
            for _ in 0..20 {
                state = step(&state, &params, 0.02, &mut rng);
            }
            state
                .atoms_iter()
                .map(|(id, atom)| (id, atom.position))
                .collect()
        };
        assert_eq!(run(9), run(9));
    }
}
