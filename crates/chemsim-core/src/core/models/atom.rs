use super::element::{Element, Orbital};
use super::phase::Phase;
use nalgebra::{Point3, Vector3};

/// A charged simulation particle.
///
/// Chemistry-relevant properties are copied from the element catalog at spawn time. Mass, radius
/// and valence are read-only. Only `position`, `velocity` and `charge` change during a tick.
///
/// ```compile_fail
/// use chemsim::core::models::{atom::Atom, element::Element};
/// use nalgebra::Point3;
///
/// let mut atom = Atom::new(Element::Oxygen, Point3::origin());
/// atom.valence = 0;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element this atom was spawned as.
    pub element: Element,
    /// Position in simulation units.
    pub position: Point3<f64>,
    /// Velocity in simulation units per second.
    pub velocity: Vector3<f64>,
    mass: f64,
    /// Net formal charge in elementary charge units.
    pub charge: i32,
    radius: f64,
    pub electronegativity: f64,
    valence: u8,
    pub melting_point: f64,
    pub boiling_point: f64,
    /// Shell occupancy, consumed only by renderers.
    pub orbitals: &'static [Orbital],
}

impl Atom {
    /// Creates a neutral, stationary atom of the given element.
    pub fn new(element: Element, position: Point3<f64>) -> Self {
        let props = element.properties();
        Self {
            element,
            position,
            velocity: Vector3::zeros(),
            mass: props.mass,
            charge: 0,
            radius: props.radius,
            electronegativity: props.electronegativity,
            valence: props.valence,
            melting_point: props.melting_point,
            boiling_point: props.boiling_point,
            orbitals: props.orbitals,
        }
    }

    /// Strictly positive.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Strictly positive.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Maximum number of simultaneous bonds.
    pub fn valence(&self) -> u8 {
        self.valence
    }

    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_charge(mut self, charge: i32) -> Self {
        self.charge = charge;
        self
    }

    /// Inert atoms never take part in bond formation.
    pub fn is_inert(&self) -> bool {
        self.valence == 0
    }

    pub fn phase(&self, temperature: f64, plasma_temperature: f64) -> Phase {
        Phase::classify(
            temperature,
            self.melting_point,
            self.boiling_point,
            plasma_temperature,
        )
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    #[cfg(test)]
    pub(crate) fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Checks the structural invariants of a free-standing atom.
    pub(crate) fn is_valid(&self) -> bool {
        self.mass > 0.0 && self.radius > 0.0 && self.mass.is_finite() && self.radius.is_finite()
    }
}
