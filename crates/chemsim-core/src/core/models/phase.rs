use std::fmt;

/// Aggregate state of an atom, derived from the global temperature and the atom's own
/// melting/boiling thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Solid,
    Liquid,
    Gas,
    Plasma,
}

impl Phase {
    /// Classifies a temperature against a pair of thresholds.
    ///
    /// Temperatures strictly below `melting_point` are solid, strictly above `boiling_point` are
    /// gas, and anything in between (inclusive) is liquid. At or above `plasma_temperature` every
    /// atom is plasma regardless of its own thresholds.
    pub fn classify(
        temperature: f64,
        melting_point: f64,
        boiling_point: f64,
        plasma_temperature: f64,
    ) -> Self {
        if temperature >= plasma_temperature {
            Phase::Plasma
        } else if temperature < melting_point {
            Phase::Solid
        } else if temperature > boiling_point {
            Phase::Gas
        } else {
            Phase::Liquid
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Phase::Solid => "Solid",
                Phase::Liquid => "Liquid",
                Phase::Gas => "Gas",
                Phase::Plasma => "Plasma",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLASMA: f64 = 6000.0;

    #[test]
    fn classify_below_melting_is_solid() {
        assert_eq!(Phase::classify(100.0, 200.0, 400.0, PLASMA), Phase::Solid);
    }

    #[test]
    fn classify_between_thresholds_is_liquid() {
        assert_eq!(Phase::classify(300.0, 200.0, 400.0, PLASMA), Phase::Liquid);
        assert_eq!(Phase::classify(200.0, 200.0, 400.0, PLASMA), Phase::Liquid);
        assert_eq!(Phase::classify(400.0, 200.0, 400.0, PLASMA), Phase::Liquid);
    }

    #[test]
    fn classify_above_boiling_is_gas() {
        assert_eq!(Phase::classify(500.0, 200.0, 400.0, PLASMA), Phase::Gas);
    }

    #[test]
    fn classify_above_plasma_temperature_overrides_thresholds() {
        assert_eq!(Phase::classify(PLASMA, 8000.0, 9000.0, PLASMA), Phase::Plasma);
    }

    #[test]
    fn display_outputs_expected_strings() {
        assert_eq!(Phase::Solid.to_string(), "Solid");
        assert_eq!(Phase::Plasma.to_string(), "Plasma");
    }
}
