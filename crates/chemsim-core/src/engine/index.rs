use crate::core::models::ids::AtomId;
use crate::core::models::system::SimulationState;
use slotmap::SecondaryMap;

/// Dense slot numbering of the atoms present at the start of a tick.
///
/// Pair loops and the force accumulator work on `0..len()`; the slot map lookups happen once
/// per tick here instead of once per pair.
#[derive(Debug, Clone, Default)]
pub struct AtomIndex {
    ids: Vec<AtomId>,
    slots: SecondaryMap<AtomId, usize>,
}

impl AtomIndex {
    pub fn build(state: &SimulationState) -> Self {
        let ids = state.atom_ids();
        let mut slots = SecondaryMap::with_capacity(ids.len());
        for (slot, &id) in ids.iter().enumerate() {
            slots.insert(id, slot);
        }
        Self { ids, slots }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[AtomId] {
        &self.ids
    }

    pub fn id(&self, slot: usize) -> AtomId {
        self.ids[slot]
    }

    pub fn slot(&self, id: AtomId) -> Option<usize> {
        self.slots.get(id).copied()
    }
}
