use super::pareto::{dominates, fast_non_dominated_sort};
use crate::error::{ProvidenceError, Result};
use crate::types::{Objectives, Point};
use crate::utils::euclidean;

/// Preference-guided Pareto ranking.
///
/// Two mutually non-dominated solutions are separated by their distance to an aspiration point:
/// `x` r-dominates `y` when `(d(x) - d(y)) / (d_max - d_min)` falls below `-threshold`. Without
/// an aspiration point the ranking is plain non-dominated sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct RDominanceRanking {
    aspiration_point: Option<Point>,
    threshold: f64,
}

impl RDominanceRanking {
    pub fn new(threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ProvidenceError::InvalidArgument(format!(
                "The non r-dominance threshold must be between 0 and 1: {}",
                threshold
            )));
        }

        Ok(Self {
            aspiration_point: None,
            threshold,
        })
    }

    pub fn with_aspiration_point(mut self, aspiration_point: Point) -> Self {
        self.aspiration_point = Some(aspiration_point);
        self
    }

    pub fn aspiration_point(&self) -> Option<&[f64]> {
        self.aspiration_point.as_deref()
    }

    pub fn set_aspiration_point(&mut self, aspiration_point: Option<Point>) {
        self.aspiration_point = aspiration_point;
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Partitions `population` into fronts of indices, best first.
    pub fn rank<T: Objectives>(&self, population: &[T]) -> Result<Vec<Vec<usize>>> {
        let Some(aspiration_point) = &self.aspiration_point else {
            return Ok(fast_non_dominated_sort(population));
        };

        let distances = population
            .iter()
            .map(|s| euclidean(s.objectives(), aspiration_point))
            .collect::<Result<Vec<_>>>()?;

        let min = distances.iter().copied().fold(f64::INFINITY, f64::min);
        let max = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        let n = population.len();
        let mut counters = vec![0i64; n];

        for (i, counter) in counters.iter_mut().enumerate() {
            for j in 0..n {
                if i != j && self.r_dominates(population, &distances, range, j, i) {
                    *counter += 1;
                }
            }
        }

        Ok(build_fronts(counters))
    }

    fn r_dominates<T: Objectives>(
        &self,
        population: &[T],
        distances: &[f64],
        range: f64,
        x: usize,
        y: usize,
    ) -> bool {
        let (x_obj, y_obj) = (population[x].objectives(), population[y].objectives());

        if dominates(x_obj, y_obj) {
            return true;
        }
        if dominates(y_obj, x_obj) || range <= 0.0 {
            return false;
        }

        (distances[x] - distances[y]) / range < -self.threshold
    }
}

/// Peels fronts off the dominance counters.
///
/// Each pass collects the members whose counter is exactly zero, then lowers every counter from
/// the first unresolved member onwards by the smallest positive counter seen at the start of the
/// pass. Members already placed go negative and are never collected again.
fn build_fronts(mut counters: Vec<i64>) -> Vec<Vec<usize>> {
    let n = counters.len();
    let mut fronts = Vec::new();
    let mut start = 0;

    while start < n {
        let next_level = counters[start..]
            .iter()
            .copied()
            .filter(|&c| c > 0)
            .min()
            .unwrap_or(i64::MAX);

        let mut front = Vec::new();
        let mut resolved_so_far = true;

        for (j, counter) in counters.iter_mut().enumerate().skip(start) {
            if *counter == 0 {
                front.push(j);
            } else if *counter > 0 {
                resolved_so_far = false;
            }

            if resolved_so_far {
                start += 1;
            }

            *counter = counter.saturating_sub(next_level);
        }

        if !front.is_empty() {
            fronts.push(front);
        }
    }

    fronts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 1.0, 2.0],
            vec![1.0, 2.0, 1.0],
            vec![2.0, 2.0, 2.0],
            vec![3.0, 3.0, 3.0],
        ]
    }

    #[test]
    fn test_rank_with_aspiration_point() {
        let ranking = RDominanceRanking::new(0.2)
            .unwrap()
            .with_aspiration_point(vec![1.0, 1.0, 1.0]);

        let fronts = ranking.rank(&population()).unwrap();

        assert_eq!(fronts, vec![vec![0, 1], vec![2], vec![3]]);
    }

    #[test]
    fn test_without_aspiration_point_is_pareto_sort() {
        let ranking = RDominanceRanking::new(0.2).unwrap();
        let population = population();

        let fronts = ranking.rank(&population).unwrap();

        assert_eq!(fronts, vec![vec![0, 1], vec![2], vec![3]]);
        assert_eq!(fronts, fast_non_dominated_sort(&population));
    }

    #[test]
    fn test_closer_solution_r_dominates_non_dominated_peer() {
        // Neither dominates the other, but the first sits on the aspiration point.
        let population = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.9, 0.0]];
        let ranking = RDominanceRanking::new(0.1)
            .unwrap()
            .with_aspiration_point(vec![0.0, 1.0]);

        let fronts = ranking.rank(&population).unwrap();

        assert_eq!(fronts[0], vec![0]);
        assert_eq!(fronts.iter().map(Vec::len).sum::<usize>(), 3);
    }

    #[test]
    fn test_threshold_outside_unit_interval_is_rejected() {
        assert!(RDominanceRanking::new(-0.1).is_err());
        assert!(RDominanceRanking::new(1.5).is_err());
    }

    #[test]
    fn test_aspiration_dimension_mismatch_is_an_error() {
        let ranking = RDominanceRanking::new(0.2)
            .unwrap()
            .with_aspiration_point(vec![1.0, 1.0]);
        assert!(ranking.rank(&population()).is_err());
    }

    #[test]
    fn test_build_fronts_batched_decrement() {
        // Counters [0, 2, 3, 5]: first pass lowers everything by 2.
        let fronts = build_fronts(vec![0, 2, 3, 5]);
        assert_eq!(fronts, vec![vec![0], vec![1], vec![2], vec![3]]);

        let fronts = build_fronts(vec![0, 0, 0]);
        assert_eq!(fronts, vec![vec![0, 1, 2]]);
    }
}
