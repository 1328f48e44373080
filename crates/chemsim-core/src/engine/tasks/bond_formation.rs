use crate::core::forcefield::params::FormationParams;
use crate::core::models::ids::AtomId;
use crate::core::models::system::SimulationState;
use crate::core::models::topology::{Bond, BondKind, BondOrder};
use itertools::Itertools;
use tracing::{debug, instrument, warn};

/// Counts how the timer-gated formation scan behaved on one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormationOutcome {
    /// Whether the cooldown expired and a scan ran.
    pub scanned: bool,
    pub covalent: usize,
    pub ionic: usize,
}

impl FormationOutcome {
    pub fn formed(&self) -> usize {
        self.covalent + self.ionic
    }
}

/// Ticks the formation cooldown by `dt` and, when it expires, scans every unbonded pair.
///
/// The timer is reset to `params.interval` each time it fires. Within one scan, a bond formed for
/// an earlier pair already occupies valence when later pairs are considered.
#[instrument(skip_all, name = "bond_formation_task")]
pub fn run(state: &mut SimulationState, params: &FormationParams, dt: f64) -> FormationOutcome {
    let remaining = state.formation_cooldown() - dt;
    if remaining > 0.0 {
        state.set_formation_cooldown(remaining);
        return FormationOutcome::default();
    }
    state.set_formation_cooldown(params.interval);

    let mut outcome = FormationOutcome {
        scanned: true,
        ..FormationOutcome::default()
    };
    let ids = state.atom_ids();

    for (a, b) in ids.iter().copied().tuple_combinations() {
        let Some(kind) = candidate_kind(state, params, a, b) else {
            continue;
        };
        if try_form(state, params, a, b, kind) {
            match kind {
                BondKind::Ionic => outcome.ionic += 1,
                _ => outcome.covalent += 1,
            }
        }
    }

    if outcome.formed() > 0 {
        debug!(
            covalent = outcome.covalent,
            ionic = outcome.ionic,
            "Formed new bonds."
        );
    }
    outcome
}

/// Returns the kind of bond the pair would form right now, if any.
fn candidate_kind(
    state: &SimulationState,
    params: &FormationParams,
    a: AtomId,
    b: AtomId,
) -> Option<BondKind> {
    let (atom_a, atom_b) = (state.atom(a)?, state.atom(b)?);
    if atom_a.is_inert() || atom_b.is_inert() {
        return None;
    }
    if !state.has_free_valence(a) || !state.has_free_valence(b) || state.are_bonded(a, b) {
        return None;
    }
    let separation = (atom_b.position - atom_a.position).norm();
    if separation >= (atom_a.radius() + atom_b.radius()) * params.radius_factor {
        return None;
    }

    let temperature = state.temperature;
    let mean_melting = 0.5 * (atom_a.melting_point + atom_b.melting_point);
    let delta_en = (atom_a.electronegativity - atom_b.electronegativity).abs();

    if delta_en > params.ionic_threshold {
        (temperature < mean_melting).then_some(BondKind::Ionic)
    } else {
        (temperature < params.covalent_melting_factor * mean_melting).then_some(BondKind::Covalent)
    }
}

fn try_form(
    state: &mut SimulationState,
    params: &FormationParams,
    a: AtomId,
    b: AtomId,
    kind: BondKind,
) -> bool {
    let (Some(atom_a), Some(atom_b)) = (state.atom(a), state.atom(b)) else {
        return false;
    };
    let radius_sum = atom_a.radius() + atom_b.radius();
    let rest_factor = match kind {
        BondKind::Ionic => params.ionic_rest_factor,
        _ => params.covalent_rest_factor,
    };
    let (donor, acceptor) = if atom_a.electronegativity <= atom_b.electronegativity {
        (a, b)
    } else {
        (b, a)
    };

    let bond = Bond::new(
        a,
        b,
        BondOrder::Single,
        kind,
        params.strength_for(kind),
        radius_sum * rest_factor,
    );
    if let Err(e) = state.add_bond(bond) {
        warn!(error = %e, "Bond formation rejected by the registry.");
        return false;
    }

    if kind == BondKind::Ionic {
        for (id, charge) in [(donor, 1), (acceptor, -1)] {
            if let Some(atom) = state.atom_mut(id) {
                atom.charge = charge;
            }
        }
    }
    true
}
