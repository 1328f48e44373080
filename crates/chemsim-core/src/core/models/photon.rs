use nalgebra::{Point3, Vector3};

/// A transient energy packet travelling in a straight line until it strikes a bond or leaves the
/// bounds sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photon {
    pub position: Point3<f64>,
    /// Unit direction of travel; speed is applied by the photon stage.
    pub velocity: Vector3<f64>,
    pub energy: f64,
}

impl Photon {
    /// Creates a photon travelling along `direction`, which is normalised here.
    ///
    /// Returns `None` for a zero-length or non-finite direction.
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>, energy: f64) -> Option<Self> {
        let velocity = direction.try_normalize(f64::EPSILON)?;
        if !velocity.iter().all(|c| c.is_finite()) {
            return None;
        }
        Some(Self {
            position: origin,
            velocity,
            energy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalises_direction() {
        let photon = Photon::new(Point3::origin(), Vector3::new(3.0, 0.0, 4.0), 5.0).unwrap();
        assert!((photon.velocity.norm() - 1.0).abs() < 1e-12);
        assert!((photon.velocity.x - 0.6).abs() < 1e-12);
        assert_eq!(photon.energy, 5.0);
    }

    #[test]
    fn new_rejects_zero_direction() {
        assert!(Photon::new(Point3::origin(), Vector3::zeros(), 1.0).is_none());
    }

    #[test]
    fn new_rejects_non_finite_direction() {
        assert!(Photon::new(Point3::origin(), Vector3::new(f64::NAN, 0.0, 0.0), 1.0).is_none());
    }
}
