use super::pareto::non_dominated;
use super::solution::Solution;
use crate::types::{Objectives, Point};
use chrono::{DateTime, Utc};
use std::sync::OnceLock;

/// Read-only view of a population after a generation completed.
#[derive(Debug)]
pub struct PopulationSnapshot {
    generation: usize,
    solutions: Vec<Solution>,
    non_dominated: OnceLock<Vec<usize>>,
    taken_at: DateTime<Utc>,
}

impl PopulationSnapshot {
    pub fn new(generation: usize, solutions: Vec<Solution>) -> Self {
        Self {
            generation,
            solutions,
            non_dominated: OnceLock::new(),
            taken_at: Utc::now(),
        }
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// First Pareto front of the snapshot. Computed on first use.
    pub fn non_dominated(&self) -> Vec<&Solution> {
        self.non_dominated
            .get_or_init(|| non_dominated(&self.solutions))
            .iter()
            .map(|&i| &self.solutions[i])
            .collect()
    }

    /// Objective vectors of every solution, in population order.
    pub fn points(&self) -> Vec<Point> {
        self.solutions.iter().map(|s| s.objectives().to_vec()).collect()
    }

    pub fn non_dominated_points(&self) -> Vec<Point> {
        self.non_dominated()
            .into_iter()
            .map(|s| s.objectives().to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::network::{FeedForwardPerceptron, LayerGeometry};

    fn solution(objectives: &[f64]) -> Solution {
        let geometry = LayerGeometry::new(1, 1, 1, 1).unwrap();
        let network = FeedForwardPerceptron::from_parts(geometry, vec![0.0; 2], vec![0.0; 2]).unwrap();
        let mut s = Solution::new(network, objectives.len());
        for (i, &v) in objectives.iter().enumerate() {
            s.set_objective(i, v).unwrap();
        }
        s
    }

    #[test]
    fn test_non_dominated_subset() {
        let snapshot = PopulationSnapshot::new(
            4,
            vec![solution(&[1.0, 3.0]), solution(&[2.0, 2.0]), solution(&[3.0, 3.0])],
        );

        assert_eq!(snapshot.generation(), 4);
        assert_eq!(
            snapshot.non_dominated_points(),
            vec![vec![1.0, 3.0], vec![2.0, 2.0]]
        );
        // cached on second call
        assert_eq!(snapshot.non_dominated().len(), 2);
        assert_eq!(snapshot.points().len(), 3);
    }
}
