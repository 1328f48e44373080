use phf::{Map, phf_map};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Occupancy of a single electron shell, carried through to renderers untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orbital {
    /// Principal quantum number of the shell (1-based).
    pub shell: u8,
    /// Number of electrons occupying the shell.
    pub electrons: u8,
}

const fn orb(shell: u8, electrons: u8) -> Orbital {
    Orbital { shell, electrons }
}

/// Static physicochemical data for one element of the built-in catalog.
///
/// Temperatures are expressed on the simulation scale rather than in Kelvin; they are tuned so
/// that common molecules assemble at the default temperature and come apart when heated.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementProperties {
    pub symbol: &'static str,
    pub name: &'static str,
    pub mass: f64,
    pub radius: f64,
    /// Pauling electronegativity; zero for the noble gases.
    pub electronegativity: f64,
    /// Maximum number of simultaneous bonds. Zero marks an inert element.
    pub valence: u8,
    pub melting_point: f64,
    pub boiling_point: f64,
    pub orbitals: &'static [Orbital],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Element {
    Hydrogen,
    Helium,
    Lithium,
    Carbon,
    Nitrogen,
    Oxygen,
    Fluorine,
    Neon,
    Sodium,
    Magnesium,
    Sulfur,
    Chlorine,
    Potassium,
}

static HYDROGEN: ElementProperties = ElementProperties {
    symbol: "H",
    name: "Hydrogen",
    mass: 1.008,
    radius: 0.5,
    electronegativity: 2.20,
    valence: 1,
    melting_point: 400.0,
    boiling_point: 800.0,
    orbitals: &[orb(1, 1)],
};

static HELIUM: ElementProperties = ElementProperties {
    symbol: "He",
    name: "Helium",
    mass: 4.003,
    radius: 0.45,
    electronegativity: 0.0,
    valence: 0,
    melting_point: 5.0,
    boiling_point: 10.0,
    orbitals: &[orb(1, 2)],
};

static LITHIUM: ElementProperties = ElementProperties {
    symbol: "Li",
    name: "Lithium",
    mass: 6.94,
    radius: 1.1,
    electronegativity: 0.98,
    valence: 1,
    melting_point: 900.0,
    boiling_point: 2000.0,
    orbitals: &[orb(1, 2), orb(2, 1)],
};

static CARBON: ElementProperties = ElementProperties {
    symbol: "C",
    name: "Carbon",
    mass: 12.011,
    radius: 0.8,
    electronegativity: 2.55,
    valence: 4,
    melting_point: 4000.0,
    boiling_point: 5000.0,
    orbitals: &[orb(1, 2), orb(2, 4)],
};

static NITROGEN: ElementProperties = ElementProperties {
    symbol: "N",
    name: "Nitrogen",
    mass: 14.007,
    radius: 0.75,
    electronegativity: 3.04,
    valence: 3,
    melting_point: 350.0,
    boiling_point: 700.0,
    orbitals: &[orb(1, 2), orb(2, 5)],
};

static OXYGEN: ElementProperties = ElementProperties {
    symbol: "O",
    name: "Oxygen",
    mass: 15.999,
    radius: 0.7,
    electronegativity: 3.44,
    valence: 2,
    melting_point: 400.0,
    boiling_point: 900.0,
    orbitals: &[orb(1, 2), orb(2, 6)],
};

static FLUORINE: ElementProperties = ElementProperties {
    symbol: "F",
    name: "Fluorine",
    mass: 18.998,
    radius: 0.65,
    electronegativity: 3.98,
    valence: 1,
    melting_point: 350.0,
    boiling_point: 700.0,
    orbitals: &[orb(1, 2), orb(2, 7)],
};

static NEON: ElementProperties = ElementProperties {
    symbol: "Ne",
    name: "Neon",
    mass: 20.180,
    radius: 0.55,
    electronegativity: 0.0,
    valence: 0,
    melting_point: 30.0,
    boiling_point: 60.0,
    orbitals: &[orb(1, 2), orb(2, 8)],
};

static SODIUM: ElementProperties = ElementProperties {
    symbol: "Na",
    name: "Sodium",
    mass: 22.990,
    radius: 1.1,
    electronegativity: 0.93,
    valence: 1,
    melting_point: 900.0,
    boiling_point: 1800.0,
    orbitals: &[orb(1, 2), orb(2, 8), orb(3, 1)],
};

static MAGNESIUM: ElementProperties = ElementProperties {
    symbol: "Mg",
    name: "Magnesium",
    mass: 24.305,
    radius: 1.0,
    electronegativity: 1.31,
    valence: 2,
    melting_point: 1100.0,
    boiling_point: 2000.0,
    orbitals: &[orb(1, 2), orb(2, 8), orb(3, 2)],
};

static SULFUR: ElementProperties = ElementProperties {
    symbol: "S",
    name: "Sulfur",
    mass: 32.06,
    radius: 1.0,
    electronegativity: 2.58,
    valence: 2,
    melting_point: 700.0,
    boiling_point: 1200.0,
    orbitals: &[orb(1, 2), orb(2, 8), orb(3, 6)],
};

static CHLORINE: ElementProperties = ElementProperties {
    symbol: "Cl",
    name: "Chlorine",
    mass: 35.45,
    radius: 1.0,
    electronegativity: 3.16,
    valence: 1,
    melting_point: 500.0,
    boiling_point: 900.0,
    orbitals: &[orb(1, 2), orb(2, 8), orb(3, 7)],
};

static POTASSIUM: ElementProperties = ElementProperties {
    symbol: "K",
    name: "Potassium",
    mass: 39.098,
    radius: 1.3,
    electronegativity: 0.82,
    valence: 1,
    melting_point: 800.0,
    boiling_point: 1600.0,
    orbitals: &[orb(1, 2), orb(2, 8), orb(3, 8), orb(4, 1)],
};

static ELEMENT_LOOKUP: Map<&'static str, Element> = phf_map! {
    "H" => Element::Hydrogen, "hydrogen" => Element::Hydrogen,
    "He" => Element::Helium, "helium" => Element::Helium,
    "Li" => Element::Lithium, "lithium" => Element::Lithium,
    "C" => Element::Carbon, "carbon" => Element::Carbon,
    "N" => Element::Nitrogen, "nitrogen" => Element::Nitrogen,
    "O" => Element::Oxygen, "oxygen" => Element::Oxygen,
    "F" => Element::Fluorine, "fluorine" => Element::Fluorine,
    "Ne" => Element::Neon, "neon" => Element::Neon,
    "Na" => Element::Sodium, "sodium" => Element::Sodium,
    "Mg" => Element::Magnesium, "magnesium" => Element::Magnesium,
    "S" => Element::Sulfur, "sulfur" => Element::Sulfur,
    "Cl" => Element::Chlorine, "chlorine" => Element::Chlorine,
    "K" => Element::Potassium, "potassium" => Element::Potassium,
};

impl Element {
    pub const ALL: [Element; 13] = [
        Element::Hydrogen,
        Element::Helium,
        Element::Lithium,
        Element::Carbon,
        Element::Nitrogen,
        Element::Oxygen,
        Element::Fluorine,
        Element::Neon,
        Element::Sodium,
        Element::Magnesium,
        Element::Sulfur,
        Element::Chlorine,
        Element::Potassium,
    ];

    pub fn properties(&self) -> &'static ElementProperties {
        match self {
            Element::Hydrogen => &HYDROGEN,
            Element::Helium => &HELIUM,
            Element::Lithium => &LITHIUM,
            Element::Carbon => &CARBON,
            Element::Nitrogen => &NITROGEN,
            Element::Oxygen => &OXYGEN,
            Element::Fluorine => &FLUORINE,
            Element::Neon => &NEON,
            Element::Sodium => &SODIUM,
            Element::Magnesium => &MAGNESIUM,
            Element::Sulfur => &SULFUR,
            Element::Chlorine => &CHLORINE,
            Element::Potassium => &POTASSIUM,
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.properties().symbol
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element: '{0}'")]
pub struct ParseElementError(pub String);

impl FromStr for Element {
    type Err = ParseElementError;

    /// Accepts the canonical symbol ("Na") or the lowercase English name ("sodium").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ELEMENT_LOOKUP
            .get(trimmed)
            .or_else(|| ELEMENT_LOOKUP.get(trimmed.to_ascii_lowercase().as_str()))
            .copied()
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

impl TryFrom<String> for Element {
    type Error = ParseElementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_accepts_symbols_and_names() {
        assert_eq!("Na".parse::<Element>(), Ok(Element::Sodium));
        assert_eq!("sodium".parse::<Element>(), Ok(Element::Sodium));
        assert_eq!(" Cl ".parse::<Element>(), Ok(Element::Chlorine));
        assert_eq!("OXYGEN".parse::<Element>(), Ok(Element::Oxygen));
    }

    #[test]
    fn from_str_rejects_unknown_symbols() {
        assert!("Xx".parse::<Element>().is_err());
        assert!("".parse::<Element>().is_err());
    }

    #[test]
    fn display_round_trips_through_symbol() {
        for element in Element::ALL {
            assert_eq!(element.to_string().parse::<Element>(), Ok(element));
        }
    }

    #[test]
    fn catalog_entries_satisfy_atom_invariants() {
        for element in Element::ALL {
            let props = element.properties();
            assert!(props.mass > 0.0, "{} has non-positive mass", props.symbol);
            assert!(props.radius > 0.0, "{} has non-positive radius", props.symbol);
            assert!(props.melting_point < props.boiling_point);
            assert!(!props.orbitals.is_empty());
        }
    }

    #[test]
    fn noble_gases_are_inert() {
        assert_eq!(Element::Helium.properties().valence, 0);
        assert_eq!(Element::Neon.properties().valence, 0);
    }

    #[test]
    fn sodium_chlorine_difference_exceeds_ionic_threshold() {
        let delta = (Element::Sodium.properties().electronegativity
            - Element::Chlorine.properties().electronegativity)
            .abs();
        assert!(delta > 1.7);
    }
}
