use crate::error::{ProvidenceError, Result};
use crate::types::Objectives;
use crate::utils::k_nearest;
use rayon::prelude::*;

/// Density estimate from the harmonic mean of the distances to the `k` nearest neighbours.
///
/// A single very distant neighbour barely raises the score, so only solutions whose whole
/// neighbourhood is sparse score highly. Higher scores are preferred when truncating a front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarmonicCrowdingDistance {
    k: usize,
}

impl HarmonicCrowdingDistance {
    pub fn new(k: usize) -> Result<Self> {
        if k < 1 {
            return Err(ProvidenceError::InvalidArgument(
                "k must be greater than 0".to_string(),
            ));
        }
        Ok(Self { k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Scores each of `members`, given as indices into `search_population`, against its
    /// nearest neighbours in `search_population`.
    pub fn scores<T: Objectives + Sync>(&self, members: &[usize], search_population: &[T]) -> Result<Vec<f64>> {
        members
            .par_iter()
            .map(|&member| self.score(member, search_population))
            .collect()
    }

    fn score<T: Objectives>(&self, member: usize, search_population: &[T]) -> Result<f64> {
        let nearest = k_nearest::find(member, search_population, self.k)?;

        let denominator: f64 = nearest.iter().map(|n| 1.0 / n.distance).sum();
        if denominator == 0.0 {
            return Ok(f64::INFINITY);
        }

        Ok(self.k as f64 / denominator)
    }
}
