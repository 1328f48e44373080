use crate::core::models::topology::BondKind;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct NonBondedParams {
    pub coulomb_constant: f64,
    pub lorentz_scale: f64,
    pub lj_epsilon: f64,
    /// σ = (r_i + r_j) · lj_sigma_scale.
    pub lj_sigma_scale: f64,
    pub intermolecular_strength: f64,
    pub intermolecular_cutoff: f64,
    /// Pairs closer than this are skipped entirely.
    pub min_pair_distance: f64,
}

impl Default for NonBondedParams {
    fn default() -> Self {
        Self {
            coulomb_constant: 8.0,
            lorentz_scale: 0.1,
            lj_epsilon: 0.5,
            lj_sigma_scale: 0.8,
            intermolecular_strength: 2.0,
            intermolecular_cutoff: 3.0,
            min_pair_distance: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct BondParams {
    pub thermal_expansion: f64,
    /// A bond stretched past `effective_rest · break_ratio` snaps.
    pub break_ratio: f64,
    pub thermal_energy_scale: f64,
    /// Fraction of the bond energy thermal energy must exceed before dissociation is possible.
    pub dissociation_threshold: f64,
    pub dissociation_coefficient: f64,
}

impl Default for BondParams {
    fn default() -> Self {
        Self {
            thermal_expansion: 1.0e-4,
            break_ratio: 2.0,
            thermal_energy_scale: 0.01,
            dissociation_threshold: 0.8,
            dissociation_coefficient: 0.05,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FormationParams {
    /// Simulated seconds between bond-formation passes.
    pub interval: f64,
    /// Pairs closer than `(r_a + r_b) · radius_factor` are bond candidates.
    pub radius_factor: f64,
    pub ionic_threshold: f64,
    pub covalent_melting_factor: f64,
    pub covalent_strength: f64,
    pub ionic_strength: f64,
    pub metallic_strength: f64,
    pub covalent_rest_factor: f64,
    pub ionic_rest_factor: f64,
}

impl Default for FormationParams {
    fn default() -> Self {
        Self {
            interval: 0.2,
            radius_factor: 1.2,
            ionic_threshold: 1.7,
            covalent_melting_factor: 1.5,
            covalent_strength: 40.0,
            ionic_strength: 30.0,
            metallic_strength: 20.0,
            covalent_rest_factor: 0.85,
            ionic_rest_factor: 1.0,
        }
    }
}

impl FormationParams {
    pub fn strength_for(&self, kind: BondKind) -> f64 {
        match kind {
            BondKind::Covalent => self.covalent_strength,
            BondKind::Ionic => self.ionic_strength,
            BondKind::Metallic => self.metallic_strength,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PhotonParams {
    pub speed: f64,
    pub hit_radius: f64,
    /// Photons farther than this from the origin are discarded.
    pub bounds_radius: f64,
    pub impulse_scale: f64,
}

impl Default for PhotonParams {
    fn default() -> Self {
        Self {
            speed: 10.0,
            hit_radius: 0.8,
            bounds_radius: 50.0,
            impulse_scale: 2.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegimeParams {
    /// Per-tick velocity multiplier.
    pub damping: f64,
    /// Scale on the thermal noise force.
    pub noise: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct IntegrationParams {
    pub thermal_noise_scale: f64,
    pub solid: RegimeParams,
    pub liquid: RegimeParams,
    pub gas: RegimeParams,
    pub container_half_extent: f64,
    pub wall_restitution: f64,
    /// Upper bound on a single frame's dt before time scaling.
    pub max_dt: f64,
    pub plasma_temperature: f64,
}

impl Default for IntegrationParams {
    fn default() -> Self {
        Self {
            thermal_noise_scale: 0.02,
            solid: RegimeParams {
                damping: 0.90,
                noise: 0.1,
            },
            liquid: RegimeParams {
                damping: 0.96,
                noise: 0.5,
            },
            gas: RegimeParams {
                damping: 0.995,
                noise: 1.0,
            },
            container_half_extent: 20.0,
            wall_restitution: 0.5,
            max_dt: 0.05,
            plasma_temperature: 6000.0,
        }
    }
}

/// Every tuning constant the tick pipeline reads.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PhysicsParams {
    pub nonbonded: NonBondedParams,
    pub bonds: BondParams,
    pub formation: FormationParams,
    pub photons: PhotonParams,
    pub integration: IntegrationParams,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for '{name}': {value}")]
    Invalid { name: &'static str, value: f64 },
}

impl PhysicsParams {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ParamLoadError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ParamLoadError> {
        let params: Self = toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Rejects constants that would make the pipeline meaningless or unstable.
    pub fn validate(&self) -> Result<(), ParamLoadError> {
        let positive = [
            ("nonbonded.min-pair-distance", self.nonbonded.min_pair_distance),
            ("nonbonded.lj-sigma-scale", self.nonbonded.lj_sigma_scale),
            ("bonds.break-ratio", self.bonds.break_ratio),
            ("formation.interval", self.formation.interval),
            ("formation.radius-factor", self.formation.radius_factor),
            ("formation.covalent-rest-factor", self.formation.covalent_rest_factor),
            ("formation.ionic-rest-factor", self.formation.ionic_rest_factor),
            ("photons.hit-radius", self.photons.hit_radius),
            ("photons.bounds-radius", self.photons.bounds_radius),
            ("integration.container-half-extent", self.integration.container_half_extent),
            ("integration.max-dt", self.integration.max_dt),
            ("integration.plasma-temperature", self.integration.plasma_temperature),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamLoadError::Invalid { name, value });
            }
        }

        let non_negative = [
            ("nonbonded.coulomb-constant", self.nonbonded.coulomb_constant),
            ("nonbonded.lorentz-scale", self.nonbonded.lorentz_scale),
            ("nonbonded.lj-epsilon", self.nonbonded.lj_epsilon),
            ("nonbonded.intermolecular-strength", self.nonbonded.intermolecular_strength),
            ("nonbonded.intermolecular-cutoff", self.nonbonded.intermolecular_cutoff),
            ("bonds.thermal-expansion", self.bonds.thermal_expansion),
            ("bonds.thermal-energy-scale", self.bonds.thermal_energy_scale),
            ("bonds.dissociation-threshold", self.bonds.dissociation_threshold),
            ("bonds.dissociation-coefficient", self.bonds.dissociation_coefficient),
            ("formation.ionic-threshold", self.formation.ionic_threshold),
            ("formation.covalent-melting-factor", self.formation.covalent_melting_factor),
            ("formation.covalent-strength", self.formation.covalent_strength),
            ("formation.ionic-strength", self.formation.ionic_strength),
            ("formation.metallic-strength", self.formation.metallic_strength),
            ("photons.speed", self.photons.speed),
            ("photons.impulse-scale", self.photons.impulse_scale),
            ("integration.thermal-noise-scale", self.integration.thermal_noise_scale),
            ("integration.solid.noise", self.integration.solid.noise),
            ("integration.liquid.noise", self.integration.liquid.noise),
            ("integration.gas.noise", self.integration.gas.noise),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ParamLoadError::Invalid { name, value });
            }
        }

        let unit_interval = [
            ("integration.solid.damping", self.integration.solid.damping),
            ("integration.liquid.damping", self.integration.liquid.damping),
            ("integration.gas.damping", self.integration.gas.damping),
            ("integration.wall-restitution", self.integration.wall_restitution),
        ];
        for (name, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamLoadError::Invalid { name, value });
            }
        }

        Ok(())
    }
}
