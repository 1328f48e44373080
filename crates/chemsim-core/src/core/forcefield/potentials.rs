use nalgebra::Vector3;

// Scalar force laws. Positive return values push a pair apart, negative values pull it together,
// unless a function documents otherwise.

#[inline]
pub fn lennard_jones_12_6(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    let sr6 = (sigma / dist).powi(6);
    let sr12 = sr6 * sr6;
    24.0 * epsilon * (2.0 * sr12 - sr6) / dist
}

#[inline]
pub fn coulomb(dist: f64, q1: f64, q2: f64, coulomb_constant: f64) -> f64 {
    coulomb_constant * q1 * q2 / (dist * dist)
}

/// Short-range cohesion between non-bonded neighbours. Always attractive, so the result is
/// non-positive.
#[inline]
pub fn intermolecular_attraction(dist: f64, strength: f64) -> f64 {
    -strength / (dist * dist)
}

/// Hookean restoring force along a bond. Positive when stretched (pulls the endpoints together).
#[inline]
pub fn spring(separation: f64, rest_length: f64, stiffness: f64) -> f64 {
    stiffness * (separation - rest_length)
}

#[inline]
pub fn thermally_expanded_length(rest_length: f64, temperature: f64, expansion: f64) -> f64 {
    rest_length * (1.0 + temperature * expansion)
}

/// Per-tick chance that a bond dissociates thermally; zero below the threshold.
#[inline]
pub fn dissociation_probability(
    bond_energy: f64,
    thermal_energy: f64,
    threshold: f64,
    coefficient: f64,
) -> f64 {
    let excess = thermal_energy - threshold * bond_energy;
    if excess > 0.0 {
        (excess * coefficient).min(1.0)
    } else {
        0.0
    }
}

/// Magnetic part of the Lorentz force, q (v × B), scaled into simulation units.
#[inline]
pub fn lorentz(charge: f64, velocity: &Vector3<f64>, field: &Vector3<f64>, scale: f64) -> Vector3<f64> {
    velocity.cross(field) * (charge * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn lennard_jones_vanishes_at_potential_minimum() {
        let sigma = 1.0;
        let r_min = 2f64.powf(1.0 / 6.0) * sigma;
        assert!(f64_approx_equal(lennard_jones_12_6(r_min, sigma, 1.0), 0.0));
    }

    #[test]
    fn lennard_jones_is_repulsive_inside_sigma() {
        assert!(lennard_jones_12_6(0.8, 1.0, 1.0) > 0.0);
        assert!(f64_approx_equal(lennard_jones_12_6(1.0, 1.0, 1.0), 24.0));
    }

    #[test]
    fn lennard_jones_is_weakly_attractive_beyond_minimum() {
        let force = lennard_jones_12_6(2.0, 1.0, 1.0);
        assert!(force < 0.0);
        assert!(force.abs() < 1.0);
    }

    #[test]
    fn coulomb_sign_follows_charge_product() {
        assert!(coulomb(2.0, 1.0, 1.0, 8.0) > 0.0);
        assert!(coulomb(2.0, 1.0, -1.0, 8.0) < 0.0);
        assert!(f64_approx_equal(coulomb(2.0, 1.0, -1.0, 8.0), -2.0));
    }

    #[test]
    fn intermolecular_attraction_is_inverse_square_and_attractive() {
        assert!(f64_approx_equal(intermolecular_attraction(2.0, 4.0), -1.0));
    }

    #[test]
    fn spring_restores_towards_rest_length() {
        assert!(f64_approx_equal(spring(1.5, 1.0, 10.0), 5.0));
        assert!(f64_approx_equal(spring(0.5, 1.0, 10.0), -5.0));
        assert!(f64_approx_equal(spring(1.0, 1.0, 10.0), 0.0));
    }

    #[test]
    fn thermal_expansion_scales_rest_length() {
        assert!(f64_approx_equal(thermally_expanded_length(2.0, 1000.0, 1e-4), 2.2));
        assert!(f64_approx_equal(thermally_expanded_length(2.0, 0.0, 1e-4), 2.0));
    }

    #[test]
    fn dissociation_probability_is_zero_below_threshold() {
        assert_eq!(dissociation_probability(40.0, 30.0, 0.8, 0.05), 0.0);
        assert_eq!(dissociation_probability(40.0, 32.0, 0.8, 0.05), 0.0);
    }

    #[test]
    fn dissociation_probability_grows_with_excess_and_saturates() {
        assert!(f64_approx_equal(dissociation_probability(40.0, 42.0, 0.8, 0.05), 0.5));
        assert_eq!(dissociation_probability(40.0, 1000.0, 0.8, 0.05), 1.0);
    }

    #[test]
    fn lorentz_is_perpendicular_to_velocity_and_field() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(0.0, 0.0, 2.0);
        let f = lorentz(1.0, &v, &b, 0.5);
        assert!(f64_approx_equal(f.dot(&v), 0.0));
        assert!(f64_approx_equal(f.dot(&b), 0.0));
        assert!(f64_approx_equal(f.y, -1.0));
    }
}
