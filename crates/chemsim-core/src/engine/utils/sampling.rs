use nalgebra::Vector3;
use rand::Rng;
use tracing::instrument;

/// Draws a direction uniformly from the unit sphere.
///
/// Uses rejection sampling inside the unit ball, so the number of random draws per call varies.
#[instrument(level = "trace", skip_all)]
pub fn random_unit_vector(rng: &mut impl Rng) -> Vector3<f64> {
    loop {
        let candidate = Vector3::<f64>::new(
            rng.gen_range(-1.0f64..1.0),
            rng.gen_range(-1.0f64..1.0),
            rng.gen_range(-1.0f64..1.0),
        );
        let norm_squared = candidate.norm_squared();
        if norm_squared > 1e-12 && norm_squared <= 1.0 {
            return candidate / norm_squared.sqrt();
        }
    }
}

/// Bernoulli trial with success probability `probability`, clamped to `[0, 1]`.
///
/// A non-positive probability returns `false` without touching the generator.
pub fn roll(rng: &mut impl Rng, probability: f64) -> bool {
    if probability.is_nan() || probability <= 0.0 {
        return false;
    }
    rng.gen_bool(probability.min(1.0))
}
