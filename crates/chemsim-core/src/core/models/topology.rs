use super::ids::AtomId;
use std::fmt;

/// Number of shared electron pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single = 1,
    Double = 2,
    Triple = 3,
}

impl BondOrder {
    pub fn multiplicity(&self) -> f64 {
        *self as u8 as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BondKind {
    #[default]
    Covalent,
    Ionic,
    Metallic,
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Covalent => "covalent",
            Self::Ionic => "ionic",
            Self::Metallic => "metallic",
        };
        f.write_str(label)
    }
}

/// A spring between two distinct atoms. Endpoint order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub atom_a: AtomId,
    pub atom_b: AtomId,
    pub order: BondOrder,
    pub kind: BondKind,
    /// Spring coefficient before order scaling.
    pub strength: f64,
    /// Equilibrium separation at zero temperature.
    pub rest_length: f64,
}

impl Bond {
    pub fn new(
        atom_a: AtomId,
        atom_b: AtomId,
        order: BondOrder,
        kind: BondKind,
        strength: f64,
        rest_length: f64,
    ) -> Self {
        Self {
            atom_a,
            atom_b,
            order,
            kind,
            strength,
            rest_length,
        }
    }

    /// Dissociation energy used by the thermal breakage rule.
    pub fn energy(&self) -> f64 {
        self.strength * self.order.multiplicity()
    }

    /// Spring stiffness; grows faster than linearly with bond order.
    pub fn stiffness(&self) -> f64 {
        self.strength * self.order.multiplicity().powf(1.2)
    }
}
