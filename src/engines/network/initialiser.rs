use rand::Rng;
use serde::{Deserialize, Serialize};

/// How fresh weights or thresholds are filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ValueInitialiser {
    Uniform { lower: f64, upper: f64 },
    Constant(f64),
}

impl Default for ValueInitialiser {
    fn default() -> Self {
        Self::Uniform {
            lower: -5.0,
            upper: 5.0,
        }
    }
}

impl ValueInitialiser {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Uniform { lower, upper } if lower < upper => rng.gen_range(lower..upper),
            Self::Uniform { lower, .. } => lower,
            Self::Constant(value) => value,
        }
    }

    pub fn fill<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let values = ValueInitialiser::default().fill(500, &mut rng);

        assert!(values.iter().all(|v| (-5.0..5.0).contains(v)));
    }

    #[test]
    fn test_constant() {
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(ValueInitialiser::Constant(1.0).fill(3, &mut rng), vec![1.0; 3]);
    }
}
