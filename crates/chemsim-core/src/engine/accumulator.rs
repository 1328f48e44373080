use nalgebra::Vector3;

/// Net force per atom slot, rebuilt from zero every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceAccumulator {
    forces: Vec<Vector3<f64>>,
}

impl ForceAccumulator {
    pub fn zeros(len: usize) -> Self {
        Self {
            forces: vec![Vector3::zeros(); len],
        }
    }

    #[inline]
    pub fn add(&mut self, slot: usize, force: Vector3<f64>) {
        self.forces[slot] += force;
    }

    /// Applies `force_on_i` to slot `i` and its exact negation to slot `j`.
    #[inline]
    pub fn add_pair(&mut self, i: usize, j: usize, force_on_i: Vector3<f64>) {
        self.forces[i] += force_on_i;
        self.forces[j] -= force_on_i;
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Vector3<f64> {
        self.forces[slot]
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    /// Vector sum over all slots; zero whenever only pairwise terms were added.
    pub fn net(&self) -> Vector3<f64> {
        self.forces.iter().sum()
    }
}
