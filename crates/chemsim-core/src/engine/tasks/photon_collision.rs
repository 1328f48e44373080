use crate::core::forcefield::params::PhotonParams;
use crate::core::models::ids::{BondId, PhotonId};
use crate::core::models::system::SimulationState;
use nalgebra::Point3;
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhotonOutcome {
    /// Photons consumed by breaking a bond.
    pub absorbed: usize,
    /// Photons discarded for leaving the bounds sphere.
    pub escaped: usize,
}

/// Advances every photon, resolves bond hits and discards escaped photons.
///
/// A photon breaks at most one bond per tick: the first bond in registry order whose midpoint
/// lies within `hit_radius`. The two former endpoints receive equal and opposite impulses of
/// magnitude `energy · impulse_scale` along the bond axis, pushing them apart.
#[instrument(skip_all, name = "photon_collision_task")]
pub fn run(state: &mut SimulationState, params: &PhotonParams, dt: f64) -> PhotonOutcome {
    let mut outcome = PhotonOutcome::default();

    for photon_id in state.photon_ids() {
        let Some(photon) = state.photon_mut(photon_id) else {
            continue;
        };
        photon.position += photon.velocity * (dt * params.speed);
        let (position, energy) = (photon.position, photon.energy);

        if let Some(bond_id) = struck_bond(state, &position, params.hit_radius) {
            absorb(state, photon_id, bond_id, energy * params.impulse_scale);
            outcome.absorbed += 1;
        } else if position.coords.norm() > params.bounds_radius {
            state.remove_photon(photon_id);
            outcome.escaped += 1;
        }
    }

    if outcome.escaped > 0 {
        trace!(count = outcome.escaped, "Photons left the bounds sphere.");
    }
    outcome
}

fn struck_bond(state: &SimulationState, position: &Point3<f64>, hit_radius: f64) -> Option<BondId> {
    state.bonds_iter().find_map(|(bond_id, bond)| {
        let a = state.atom(bond.atom_a)?;
        let b = state.atom(bond.atom_b)?;
        let midpoint = nalgebra::center(&a.position, &b.position);
        (nalgebra::distance(&midpoint, position) <= hit_radius).then_some(bond_id)
    })
}

fn absorb(state: &mut SimulationState, photon_id: PhotonId, bond_id: BondId, impulse: f64) {
    state.remove_photon(photon_id);
    let Some(bond) = state.remove_bond(bond_id) else {
        return;
    };
    let (Some(a), Some(b)) = (state.atom(bond.atom_a), state.atom(bond.atom_b)) else {
        return;
    };
    let Some(axis) = (b.position - a.position).try_normalize(f64::EPSILON) else {
        debug!("Struck bond has coincident endpoints; no impulse applied.");
        return;
    };

    for (atom_id, sign) in [(bond.atom_a, -1.0), (bond.atom_b, 1.0)] {
        if let Some(atom) = state.atom_mut(atom_id) {
            atom.velocity += axis * (sign * impulse / atom.mass());
        }
    }
    debug!(impulse, "Photon broke a bond.");
}
