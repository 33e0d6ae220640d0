use crate::engines::network::FeedForwardPerceptron;
use crate::error::{ProvidenceError, Result};
use crate::types::Objectives;

/// A candidate network and the objective values it scored.
///
/// The decision variables are every weight followed by every threshold: variable `i` is weight
/// `i` while `i` is below the weight count, and threshold `i - weight_count` after that.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    network: FeedForwardPerceptron,
    objectives: Vec<f64>,
}

impl Solution {
    pub fn new(network: FeedForwardPerceptron, number_of_objectives: usize) -> Self {
        Self {
            network,
            objectives: vec![0.0; number_of_objectives],
        }
    }

    pub fn network(&self) -> &FeedForwardPerceptron {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut FeedForwardPerceptron {
        &mut self.network
    }

    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    pub fn objective(&self, index: usize) -> Result<f64> {
        self.objectives.get(index).copied().ok_or_else(|| {
            ProvidenceError::IndexOutOfRange(format!(
                "Objective {} is outside [0, {})",
                index,
                self.objectives.len()
            ))
        })
    }

    pub fn set_objective(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.objectives.len();
        let slot = self.objectives.get_mut(index).ok_or_else(|| {
            ProvidenceError::IndexOutOfRange(format!("Objective {} is outside [0, {})", index, len))
        })?;
        *slot = value;
        Ok(())
    }

    pub fn number_of_variables(&self) -> usize {
        self.network.weights().len() + self.network.thresholds().len()
    }

    pub fn variable(&self, index: usize) -> Result<f64> {
        let weights = self.network.weights().len();
        if index < weights {
            self.network.weight(index)
        } else {
            self.network.threshold(index - weights)
        }
    }

    pub fn set_variable(&mut self, index: usize, value: f64) -> Result<()> {
        let weights = self.network.weights().len();
        if index < weights {
            self.network.set_weight(index, value)
        } else {
            self.network.set_threshold(index - weights, value)
        }
    }
}

impl Objectives for Solution {
    fn objectives(&self) -> &[f64] {
        &self.objectives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::network::LayerGeometry;

    fn solution() -> Solution {
        let geometry = LayerGeometry::new(2, 2, 1, 1).unwrap();
        let network = FeedForwardPerceptron::from_parts(
            geometry,
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![10.0, 11.0, 12.0],
        )
        .unwrap();
        Solution::new(network, 3)
    }

    #[test]
    fn test_variables_span_weights_then_thresholds() {
        let s = solution();

        assert_eq!(s.number_of_variables(), 9);
        assert_eq!(s.variable(5).unwrap(), 5.0);
        assert_eq!(s.variable(6).unwrap(), 10.0);
        assert_eq!(s.variable(8).unwrap(), 12.0);
        assert!(s.variable(9).is_err());
    }

    #[test]
    fn test_set_variable_routes_to_threshold() {
        let mut s = solution();
        s.set_variable(7, -1.0).unwrap();

        assert_eq!(s.network().thresholds(), &[10.0, -1.0, 12.0]);
    }

    #[test]
    fn test_objectives_start_at_zero() {
        let mut s = solution();
        assert_eq!(s.objectives(), &[0.0, 0.0, 0.0]);

        s.set_objective(2, 0.4).unwrap();
        assert_eq!(s.objective(2).unwrap(), 0.4);
        assert!(s.set_objective(3, 1.0).is_err());
    }
}
