use super::atom::Atom;
use super::ids::{AtomId, BondId, PhotonId};
use super::phase::Phase;
use super::photon::Photon;
use super::topology::Bond;
use nalgebra::Vector3;
use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

pub const DEFAULT_TEMPERATURE: f64 = 300.0;

/// Reasons a bond cannot be inserted into the registry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Bond references an atom that does not exist: {0:?}")]
    MissingAtom(AtomId),
    #[error("Bond endpoints must be distinct atoms")]
    SelfBond,
    #[error("Atoms {0:?} and {1:?} are already bonded")]
    DuplicateBond(AtomId, AtomId),
    #[error("Atom {0:?} has no free valence")]
    ValenceExceeded(AtomId),
}

/// The complete simulation state: particles, bonds, photons and global controls.
///
/// This is the unit handed to and returned from every tick. All collections are keyed through
/// slot maps so ids stay stable while entries come and go, and a bond adjacency map is kept in
/// sync with the bond store so that "are these bonded" and "how many bonds" are O(valence).
///
/// Atoms are only mutable from inside the crate:
///
/// ```compile_fail
/// use chemsim::core::models::{atom::Atom, element::Element, system::SimulationState};
/// use nalgebra::Point3;
///
/// let mut state = SimulationState::new();
/// let id = state.add_atom(Atom::new(Element::Hydrogen, Point3::origin())).unwrap();
/// state.atom_mut(id).unwrap().charge = 3;
/// ```
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Primary storage for atoms.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for bonds.
    bonds: SlotMap<BondId, Bond>,
    /// Primary storage for in-flight photons.
    photons: SlotMap<PhotonId, Photon>,
    /// Per-atom list of `(neighbor, bond)` pairs, mirroring `bonds`.
    bond_adjacency: SecondaryMap<AtomId, Vec<(AtomId, BondId)>>,
    /// Global temperature on the simulation scale.
    pub temperature: f64,
    /// Uniform external magnetic field.
    pub magnetic_field: Vector3<f64>,
    /// Ticks only advance the state while this is set.
    pub running: bool,
    /// Multiplier applied to the clamped frame time.
    pub time_scale: f64,
    /// Simulated seconds remaining until the next bond-formation pass.
    formation_cooldown: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            atoms: SlotMap::with_key(),
            bonds: SlotMap::with_key(),
            photons: SlotMap::with_key(),
            bond_adjacency: SecondaryMap::new(),
            temperature: DEFAULT_TEMPERATURE,
            magnetic_field: Vector3::zeros(),
            running: true,
            time_scale: 1.0,
            formation_cooldown: 0.0,
        }
    }
}

impl SimulationState {
    /// Creates an empty, running state at the default temperature.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub(crate) fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn contains_atom(&self, id: AtomId) -> bool {
        self.atoms.contains_key(id)
    }

    /// Returns an iterator over all atoms in insertion-slot order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_ids(&self) -> Vec<AtomId> {
        self.atoms.keys().collect()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Inserts an atom and returns its id.
    ///
    /// Returns `None` if the atom violates the mass/radius invariants.
    pub fn add_atom(&mut self, atom: Atom) -> Option<AtomId> {
        if !atom.is_valid() {
            return None;
        }
        let atom_id = self.atoms.insert(atom);
        self.bond_adjacency.insert(atom_id, Vec::new());
        Some(atom_id)
    }

    /// Removes an atom together with every bond that references it.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(atom_id)?;

        let incident = self.bond_adjacency.remove(atom_id).unwrap_or_default();
        for (neighbor_id, bond_id) in incident {
            self.bonds.remove(bond_id);
            if let Some(adjacency) = self.bond_adjacency.get_mut(neighbor_id) {
                adjacency.retain(|&(_, id)| id != bond_id);
            }
        }

        Some(atom)
    }

    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.get(id)
    }

    pub fn bonds_iter(&self) -> impl Iterator<Item = (BondId, &Bond)> {
        self.bonds.iter()
    }

    pub fn bond_ids(&self) -> Vec<BondId> {
        self.bonds.keys().collect()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Finds the bond joining two atoms, in either order.
    pub fn bond_between(&self, a: AtomId, b: AtomId) -> Option<BondId> {
        self.bond_adjacency
            .get(a)?
            .iter()
            .find(|&&(neighbor, _)| neighbor == b)
            .map(|&(_, bond_id)| bond_id)
    }

    pub fn are_bonded(&self, a: AtomId, b: AtomId) -> bool {
        self.bond_between(a, b).is_some()
    }

    /// Number of bonds incident on an atom; zero for unknown atoms.
    pub fn bond_degree(&self, atom_id: AtomId) -> usize {
        self.bond_adjacency.get(atom_id).map_or(0, Vec::len)
    }

    /// True when the atom can accept at least one more bond.
    pub fn has_free_valence(&self, atom_id: AtomId) -> bool {
        self.atoms
            .get(atom_id)
            .is_some_and(|atom| self.bond_degree(atom_id) < atom.valence() as usize)
    }

    /// Inserts a bond after checking every topology invariant.
    ///
    /// Both endpoints must exist and differ, the pair must not already be bonded, and both atoms
    /// must have free valence.
    pub fn add_bond(&mut self, bond: Bond) -> Result<BondId, TopologyError> {
        let (a, b) = (bond.atom_a, bond.atom_b);
        if a == b {
            return Err(TopologyError::SelfBond);
        }
        for id in [a, b] {
            if !self.atoms.contains_key(id) {
                return Err(TopologyError::MissingAtom(id));
            }
        }
        if self.are_bonded(a, b) {
            return Err(TopologyError::DuplicateBond(a, b));
        }
        for id in [a, b] {
            if !self.has_free_valence(id) {
                return Err(TopologyError::ValenceExceeded(id));
            }
        }

        let bond_id = self.bonds.insert(bond);
        self.bond_adjacency[a].push((b, bond_id));
        self.bond_adjacency[b].push((a, bond_id));
        Ok(bond_id)
    }

    pub fn remove_bond(&mut self, bond_id: BondId) -> Option<Bond> {
        let bond = self.bonds.remove(bond_id)?;
        for id in [bond.atom_a, bond.atom_b] {
            if let Some(adjacency) = self.bond_adjacency.get_mut(id) {
                adjacency.retain(|&(_, b)| b != bond_id);
            }
        }
        Some(bond)
    }

    pub fn photon(&self, id: PhotonId) -> Option<&Photon> {
        self.photons.get(id)
    }

    pub fn photon_mut(&mut self, id: PhotonId) -> Option<&mut Photon> {
        self.photons.get_mut(id)
    }

    pub fn photons_iter(&self) -> impl Iterator<Item = (PhotonId, &Photon)> {
        self.photons.iter()
    }

    pub fn photon_ids(&self) -> Vec<PhotonId> {
        self.photons.keys().collect()
    }

    pub fn photon_count(&self) -> usize {
        self.photons.len()
    }

    pub fn add_photon(&mut self, photon: Photon) -> PhotonId {
        self.photons.insert(photon)
    }

    pub fn remove_photon(&mut self, id: PhotonId) -> Option<Photon> {
        self.photons.remove(id)
    }

    /// Derived phase of a single atom at the current temperature.
    pub fn phase_of(&self, atom_id: AtomId, plasma_temperature: f64) -> Option<Phase> {
        self.atoms
            .get(atom_id)
            .map(|atom| atom.phase(self.temperature, plasma_temperature))
    }

    pub fn formation_cooldown(&self) -> f64 {
        self.formation_cooldown
    }

    pub(crate) fn set_formation_cooldown(&mut self, value: f64) {
        self.formation_cooldown = value;
    }

    /// True when there is nothing for a tick to move.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty() && self.photons.is_empty()
    }

    /// Removes every atom, bond and photon while keeping the global controls.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.bonds.clear();
        self.photons.clear();
        self.bond_adjacency.clear();
    }

    #[cfg(test)]
    pub(crate) fn remove_atom_leaving_bonds(&mut self, atom_id: AtomId) -> Option<Atom> {
        self.atoms.remove(atom_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use crate::core::models::topology::{BondKind, BondOrder};
    use nalgebra::Point3;

    fn covalent(a: AtomId, b: AtomId) -> Bond {
        Bond::new(a, b, BondOrder::Single, BondKind::Covalent, 40.0, 1.0)
    }

    fn state_with(elements: &[Element]) -> (SimulationState, Vec<AtomId>) {
        let mut state = SimulationState::new();
        let ids = elements
            .iter()
            .enumerate()
            .map(|(i, &e)| {
                state
                    .add_atom(Atom::new(e, Point3::new(i as f64, 0.0, 0.0)))
                    .unwrap()
            })
            .collect();
        (state, ids)
    }

    #[test]
    fn new_state_is_empty_and_running() {
        let state = SimulationState::new();
        assert!(state.is_empty());
        assert!(state.running);
        assert_eq!(state.time_scale, 1.0);
        assert_eq!(state.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(state.magnetic_field, Vector3::zeros());
        assert_eq!(state.formation_cooldown(), 0.0);
    }

    #[test]
    fn add_atom_rejects_invalid_mass() {
        let mut state = SimulationState::new();
        let atom = Atom::new(Element::Carbon, Point3::origin()).with_mass(0.0);
        assert!(state.add_atom(atom).is_none());
        assert_eq!(state.atom_count(), 0);
    }

    #[test]
    fn add_bond_updates_adjacency_in_both_directions() {
        let (mut state, ids) = state_with(&[Element::Oxygen, Element::Hydrogen]);
        let bond_id = state.add_bond(covalent(ids[0], ids[1])).unwrap();

        assert_eq!(state.bond_between(ids[0], ids[1]), Some(bond_id));
        assert_eq!(state.bond_between(ids[1], ids[0]), Some(bond_id));
        assert_eq!(state.bond_degree(ids[0]), 1);
        assert_eq!(state.bond_degree(ids[1]), 1);
    }

    #[test]
    fn saturated_atom_refuses_further_bonds() {
        let (mut state, ids) = state_with(&[
            Element::Oxygen,
            Element::Hydrogen,
            Element::Hydrogen,
            Element::Hydrogen,
        ]);
        let oxygen = ids[0];
        state.add_bond(covalent(oxygen, ids[1])).unwrap();
        state.add_bond(covalent(oxygen, ids[2])).unwrap();

        assert!(!state.has_free_valence(oxygen));
        assert_eq!(
            state.add_bond(covalent(oxygen, ids[3])),
            Err(TopologyError::ValenceExceeded(oxygen))
        );
        assert_eq!(state.bond_degree(oxygen), 2);
        assert_eq!(state.atom(oxygen).unwrap().valence(), 2);
    }

    #[test]
    fn add_bond_rejects_duplicate_pair_in_either_order() {
        let (mut state, ids) = state_with(&[Element::Carbon, Element::Carbon]);
        state.add_bond(covalent(ids[0], ids[1])).unwrap();
        assert_eq!(
            state.add_bond(covalent(ids[1], ids[0])),
            Err(TopologyError::DuplicateBond(ids[1], ids[0]))
        );
        assert_eq!(state.bond_count(), 1);
    }

    #[test]
    fn add_bond_rejects_self_bond_and_missing_atoms() {
        let (mut state, ids) = state_with(&[Element::Carbon]);
        assert_eq!(
            state.add_bond(covalent(ids[0], ids[0])),
            Err(TopologyError::SelfBond)
        );

        let ghost = state
            .add_atom(Atom::new(Element::Carbon, Point3::origin()))
            .unwrap();
        state.remove_atom(ghost);
        assert_eq!(
            state.add_bond(covalent(ids[0], ghost)),
            Err(TopologyError::MissingAtom(ghost))
        );
    }

    #[test]
    fn add_bond_enforces_valence_capacity() {
        let (mut state, ids) = state_with(&[Element::Hydrogen, Element::Hydrogen, Element::Hydrogen]);
        state.add_bond(covalent(ids[0], ids[1])).unwrap();
        assert_eq!(
            state.add_bond(covalent(ids[0], ids[2])),
            Err(TopologyError::ValenceExceeded(ids[0]))
        );
        assert!(!state.has_free_valence(ids[0]));
        assert!(state.has_free_valence(ids[2]));
    }

    #[test]
    fn add_bond_rejects_inert_atoms() {
        let (mut state, ids) = state_with(&[Element::Neon, Element::Hydrogen]);
        assert_eq!(
            state.add_bond(covalent(ids[0], ids[1])),
            Err(TopologyError::ValenceExceeded(ids[0]))
        );
    }

    #[test]
    fn remove_bond_clears_adjacency() {
        let (mut state, ids) = state_with(&[Element::Oxygen, Element::Hydrogen]);
        let bond_id = state.add_bond(covalent(ids[0], ids[1])).unwrap();
        assert!(state.remove_bond(bond_id).is_some());
        assert!(!state.are_bonded(ids[0], ids[1]));
        assert_eq!(state.bond_degree(ids[0]), 0);
        assert!(state.remove_bond(bond_id).is_none());
    }

    #[test]
    fn remove_atom_cascades_to_incident_bonds() {
        let (mut state, ids) = state_with(&[Element::Hydrogen, Element::Oxygen, Element::Hydrogen]);
        state.add_bond(covalent(ids[0], ids[1])).unwrap();
        state.add_bond(covalent(ids[1], ids[2])).unwrap();

        let removed = state.remove_atom(ids[1]).unwrap();
        assert_eq!(removed.element, Element::Oxygen);
        assert_eq!(state.bond_count(), 0);
        assert_eq!(state.bond_degree(ids[0]), 0);
        assert_eq!(state.bond_degree(ids[2]), 0);
        assert!(state.remove_atom(ids[1]).is_none());
    }

    #[test]
    fn photons_can_be_added_and_removed() {
        let mut state = SimulationState::new();
        let photon = Photon::new(Point3::origin(), Vector3::x(), 3.0).unwrap();
        let id = state.add_photon(photon);
        assert_eq!(state.photon_count(), 1);
        assert!(!state.is_empty());
        assert_eq!(state.photon(id).map(|p| p.energy), Some(3.0));
        assert!(state.remove_photon(id).is_some());
        assert!(state.is_empty());
    }

    #[test]
    fn phase_of_uses_state_temperature() {
        let (mut state, ids) = state_with(&[Element::Oxygen]);
        state.temperature = 100.0;
        assert_eq!(state.phase_of(ids[0], 6000.0), Some(Phase::Solid));
        state.temperature = 1000.0;
        assert_eq!(state.phase_of(ids[0], 6000.0), Some(Phase::Gas));
    }

    #[test]
    fn clear_keeps_global_controls() {
        let (mut state, ids) = state_with(&[Element::Carbon, Element::Carbon]);
        state.add_bond(covalent(ids[0], ids[1])).unwrap();
        state.temperature = 42.0;
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.bond_count(), 0);
        assert_eq!(state.temperature, 42.0);
    }
}
