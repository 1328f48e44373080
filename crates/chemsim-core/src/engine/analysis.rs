use crate::core::forcefield::params::NonBondedParams;
use crate::core::models::phase::Phase;
use crate::core::models::system::SimulationState;
use crate::core::models::topology::BondKind;
use nalgebra::{Point3, Vector3};
use std::collections::BTreeMap;
use std::fmt;

/// Electrostatic field at `point` produced by every charged atom.
///
/// Atoms closer than `min_pair_distance` to the sample point are ignored.
pub fn electric_field_at(
    state: &SimulationState,
    point: &Point3<f64>,
    params: &NonBondedParams,
) -> Vector3<f64> {
    state
        .atoms_iter()
        .filter(|(_, atom)| atom.charge != 0)
        .filter_map(|(_, atom)| {
            let offset = point - atom.position;
            let dist = offset.norm();
            (dist >= params.min_pair_distance).then(|| {
                offset / dist * (params.coulomb_constant * atom.charge as f64 / (dist * dist))
            })
        })
        .sum()
}

/// Unit vector along the field at `point`, or zero where the field vanishes.
pub fn field_direction(
    state: &SimulationState,
    point: &Point3<f64>,
    params: &NonBondedParams,
) -> Vector3<f64> {
    electric_field_at(state, point, params)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// A read-only summary of a simulation state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationStats {
    pub atoms: usize,
    pub bonds: usize,
    pub photons: usize,
    pub bonds_by_kind: BTreeMap<BondKind, usize>,
    pub phases: BTreeMap<Phase, usize>,
    pub kinetic_energy: f64,
    pub net_charge: i64,
    pub mean_speed: f64,
    pub temperature: f64,
}

impl SimulationStats {
    pub fn collect(state: &SimulationState, plasma_temperature: f64) -> Self {
        let mut stats = Self {
            atoms: state.atom_count(),
            bonds: state.bond_count(),
            photons: state.photon_count(),
            temperature: state.temperature,
            ..Self::default()
        };

        let mut total_speed = 0.0;
        for (_, atom) in state.atoms_iter() {
            *stats
                .phases
                .entry(atom.phase(state.temperature, plasma_temperature))
                .or_default() += 1;
            stats.kinetic_energy += atom.kinetic_energy();
            stats.net_charge += i64::from(atom.charge);
            total_speed += atom.velocity.norm();
        }
        if stats.atoms > 0 {
            stats.mean_speed = total_speed / stats.atoms as f64;
        }

        for (_, bond) in state.bonds_iter() {
            *stats.bonds_by_kind.entry(bond.kind).or_default() += 1;
        }
        stats
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Temperature:     {:.1}", self.temperature)?;
        writeln!(
            f,
            "Atoms:           {} (net charge {:+})",
            self.atoms, self.net_charge
        )?;
        write!(f, "Bonds:           {}", self.bonds)?;
        if !self.bonds_by_kind.is_empty() {
            let kinds: Vec<String> = self
                .bonds_by_kind
                .iter()
                .map(|(kind, count)| format!("{kind}: {count}"))
                .collect();
            write!(f, " ({})", kinds.join(", "))?;
        }
        writeln!(f)?;
        writeln!(f, "Photons:         {}", self.photons)?;
        if !self.phases.is_empty() {
            let phases: Vec<String> = self
                .phases
                .iter()
                .map(|(phase, count)| format!("{phase}: {count}"))
                .collect();
            writeln!(f, "Phases:          {}", phases.join(", "))?;
        }
        writeln!(f, "Kinetic energy:  {:.4}", self.kinetic_energy)?;
        write!(f, "Mean speed:      {:.4}", self.mean_speed)
    }
}
