use super::atom::Atom;
use super::element::Element;
use super::ids::AtomId;
use super::system::SimulationState;
use super::topology::{Bond, BondKind, BondOrder};
use crate::core::forcefield::params::PhysicsParams;
use nalgebra::{Point3, Vector3};
use phf::{Map, phf_map};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateAtom {
    pub element: Element,
    /// Offset from the spawn origin.
    pub offset: [f64; 3],
    pub charge: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateBond {
    /// Index into the template's atom list.
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
    pub kind: BondKind,
}

/// A small pre-bonded molecule used as an initial condition.
#[derive(Debug, Clone, PartialEq)]
pub struct MoleculeTemplate {
    pub formula: &'static str,
    pub name: &'static str,
    pub atoms: &'static [TemplateAtom],
    pub bonds: &'static [TemplateBond],
}

const fn atom(element: Element, x: f64, y: f64, z: f64) -> TemplateAtom {
    TemplateAtom {
        element,
        offset: [x, y, z],
        charge: 0,
    }
}

const fn ion(element: Element, x: f64, y: f64, z: f64, charge: i32) -> TemplateAtom {
    TemplateAtom {
        element,
        offset: [x, y, z],
        charge,
    }
}

const fn covalent(a: usize, b: usize, order: BondOrder) -> TemplateBond {
    TemplateBond {
        a,
        b,
        order,
        kind: BondKind::Covalent,
    }
}

static HYDROGEN_GAS: MoleculeTemplate = MoleculeTemplate {
    formula: "H2",
    name: "Hydrogen",
    atoms: &[
        atom(Element::Hydrogen, -0.425, 0.0, 0.0),
        atom(Element::Hydrogen, 0.425, 0.0, 0.0),
    ],
    bonds: &[covalent(0, 1, BondOrder::Single)],
};

static OXYGEN_GAS: MoleculeTemplate = MoleculeTemplate {
    formula: "O2",
    name: "Oxygen",
    atoms: &[
        atom(Element::Oxygen, -0.6, 0.0, 0.0),
        atom(Element::Oxygen, 0.6, 0.0, 0.0),
    ],
    bonds: &[covalent(0, 1, BondOrder::Double)],
};

static NITROGEN_GAS: MoleculeTemplate = MoleculeTemplate {
    formula: "N2",
    name: "Nitrogen",
    atoms: &[
        atom(Element::Nitrogen, -0.55, 0.0, 0.0),
        atom(Element::Nitrogen, 0.55, 0.0, 0.0),
    ],
    bonds: &[covalent(0, 1, BondOrder::Triple)],
};

static WATER: MoleculeTemplate = MoleculeTemplate {
    formula: "H2O",
    name: "Water",
    atoms: &[
        atom(Element::Oxygen, 0.0, 0.0, 0.0),
        atom(Element::Hydrogen, 0.8, 0.62, 0.0),
        atom(Element::Hydrogen, -0.8, 0.62, 0.0),
    ],
    bonds: &[
        covalent(0, 1, BondOrder::Single),
        covalent(0, 2, BondOrder::Single),
    ],
};

static CARBON_DIOXIDE: MoleculeTemplate = MoleculeTemplate {
    formula: "CO2",
    name: "Carbon dioxide",
    atoms: &[
        atom(Element::Carbon, 0.0, 0.0, 0.0),
        atom(Element::Oxygen, 1.3, 0.0, 0.0),
        atom(Element::Oxygen, -1.3, 0.0, 0.0),
    ],
    bonds: &[
        covalent(0, 1, BondOrder::Double),
        covalent(0, 2, BondOrder::Double),
    ],
};

static METHANE: MoleculeTemplate = MoleculeTemplate {
    formula: "CH4",
    name: "Methane",
    atoms: &[
        atom(Element::Carbon, 0.0, 0.0, 0.0),
        atom(Element::Hydrogen, 0.64, 0.64, 0.64),
        atom(Element::Hydrogen, -0.64, -0.64, 0.64),
        atom(Element::Hydrogen, -0.64, 0.64, -0.64),
        atom(Element::Hydrogen, 0.64, -0.64, -0.64),
    ],
    bonds: &[
        covalent(0, 1, BondOrder::Single),
        covalent(0, 2, BondOrder::Single),
        covalent(0, 3, BondOrder::Single),
        covalent(0, 4, BondOrder::Single),
    ],
};

static AMMONIA: MoleculeTemplate = MoleculeTemplate {
    formula: "NH3",
    name: "Ammonia",
    atoms: &[
        atom(Element::Nitrogen, 0.0, 0.0, 0.0),
        atom(Element::Hydrogen, 0.95, 0.0, -0.35),
        atom(Element::Hydrogen, -0.475, 0.823, -0.35),
        atom(Element::Hydrogen, -0.475, -0.823, -0.35),
    ],
    bonds: &[
        covalent(0, 1, BondOrder::Single),
        covalent(0, 2, BondOrder::Single),
        covalent(0, 3, BondOrder::Single),
    ],
};

static HYDROGEN_CHLORIDE: MoleculeTemplate = MoleculeTemplate {
    formula: "HCl",
    name: "Hydrogen chloride",
    atoms: &[
        atom(Element::Hydrogen, -0.65, 0.0, 0.0),
        atom(Element::Chlorine, 0.65, 0.0, 0.0),
    ],
    bonds: &[covalent(0, 1, BondOrder::Single)],
};

static SODIUM_CHLORIDE: MoleculeTemplate = MoleculeTemplate {
    formula: "NaCl",
    name: "Sodium chloride",
    atoms: &[
        ion(Element::Sodium, -1.05, 0.0, 0.0, 1),
        ion(Element::Chlorine, 1.05, 0.0, 0.0, -1),
    ],
    bonds: &[TemplateBond {
        a: 0,
        b: 1,
        order: BondOrder::Single,
        kind: BondKind::Ionic,
    }],
};

static DILITHIUM: MoleculeTemplate = MoleculeTemplate {
    formula: "Li2",
    name: "Dilithium",
    atoms: &[
        atom(Element::Lithium, -1.1, 0.0, 0.0),
        atom(Element::Lithium, 1.1, 0.0, 0.0),
    ],
    bonds: &[TemplateBond {
        a: 0,
        b: 1,
        order: BondOrder::Single,
        kind: BondKind::Metallic,
    }],
};

static MOLECULE_TEMPLATES: Map<&'static str, &'static MoleculeTemplate> = phf_map! {
    "H2" => &HYDROGEN_GAS, "hydrogen" => &HYDROGEN_GAS,
    "O2" => &OXYGEN_GAS, "oxygen" => &OXYGEN_GAS,
    "N2" => &NITROGEN_GAS, "nitrogen" => &NITROGEN_GAS,
    "H2O" => &WATER, "water" => &WATER,
    "CO2" => &CARBON_DIOXIDE, "carbon-dioxide" => &CARBON_DIOXIDE,
    "CH4" => &METHANE, "methane" => &METHANE,
    "NH3" => &AMMONIA, "ammonia" => &AMMONIA,
    "HCl" => &HYDROGEN_CHLORIDE, "hydrogen-chloride" => &HYDROGEN_CHLORIDE,
    "NaCl" => &SODIUM_CHLORIDE, "salt" => &SODIUM_CHLORIDE,
    "Li2" => &DILITHIUM, "dilithium" => &DILITHIUM,
};

/// Looks up a template by formula ("H2O") or lowercase name ("water").
pub fn find_template(key: &str) -> Option<&'static MoleculeTemplate> {
    let trimmed = key.trim();
    MOLECULE_TEMPLATES
        .get(trimmed)
        .or_else(|| MOLECULE_TEMPLATES.get(trimmed.to_ascii_lowercase().as_str()))
        .copied()
}

/// All distinct templates, ordered by formula.
pub fn templates() -> Vec<&'static MoleculeTemplate> {
    let mut all: Vec<&'static MoleculeTemplate> = Vec::new();
    for template in MOLECULE_TEMPLATES.values() {
        if !all.iter().any(|t| std::ptr::eq(*t, *template)) {
            all.push(template);
        }
    }
    all.sort_by_key(|t| t.formula);
    all
}

impl MoleculeTemplate {
    /// Places the template at `origin`, returning the ids of the new atoms.
    ///
    /// Bond rest lengths are taken from the template geometry so the molecule starts relaxed.
    pub fn spawn(
        &self,
        state: &mut SimulationState,
        origin: Point3<f64>,
        params: &PhysicsParams,
    ) -> Vec<AtomId> {
        let atom_ids: Vec<AtomId> = self
            .atoms
            .iter()
            .filter_map(|template_atom| {
                let position = origin + Vector3::from(template_atom.offset);
                state.add_atom(
                    Atom::new(template_atom.element, position).with_charge(template_atom.charge),
                )
            })
            .collect();

        if atom_ids.len() != self.atoms.len() {
            warn!(
                formula = self.formula,
                "Template atoms were rejected; skipping bonds."
            );
            return atom_ids;
        }

        for template_bond in self.bonds {
            let a = &self.atoms[template_bond.a];
            let b = &self.atoms[template_bond.b];
            let rest_length = (Vector3::from(a.offset) - Vector3::from(b.offset)).norm();
            let bond = Bond::new(
                atom_ids[template_bond.a],
                atom_ids[template_bond.b],
                template_bond.order,
                template_bond.kind,
                params.formation.strength_for(template_bond.kind),
                rest_length,
            );
            if let Err(e) = state.add_bond(bond) {
                warn!(formula = self.formula, error = %e, "Template bond rejected.");
            }
        }

        atom_ids
    }
}
