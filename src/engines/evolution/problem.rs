use super::solution::Solution;
use crate::config::NetworkConfig;
use crate::data::TrainingRow;
use crate::engines::metrics::ErrorMetric;
use crate::engines::network::{FeedForwardPerceptron, LayerGeometry, ValueInitialiser};
use crate::error::{ProvidenceError, Result};
use rand::Rng;
use std::sync::Arc;

/// Effort estimation as a multi-objective problem: one objective per error metric, all minimised.
///
/// Only the first output of each row is scored. Maximising metrics are stored as `1 - error`.
#[derive(Debug, Clone)]
pub struct SeeProblem {
    training: Arc<Vec<TrainingRow>>,
    metrics: Vec<Arc<dyn ErrorMetric>>,
    geometry: LayerGeometry,
    network: NetworkConfig,
}

impl SeeProblem {
    pub fn new(training: Vec<TrainingRow>, metrics: Vec<Arc<dyn ErrorMetric>>) -> Result<Self> {
        Self::with_network(training, metrics, &NetworkConfig::default())
    }

    pub fn with_network(
        training: Vec<TrainingRow>,
        metrics: Vec<Arc<dyn ErrorMetric>>,
        network: &NetworkConfig,
    ) -> Result<Self> {
        let first = training.first().ok_or_else(|| {
            ProvidenceError::InvalidArgument("The training set must contain at least one row".to_string())
        })?;
        if metrics.is_empty() {
            return Err(ProvidenceError::InvalidArgument(
                "At least one error metric is required".to_string(),
            ));
        }

        let inputs = first.inputs().len();
        if let Some(row) = training.iter().find(|r| r.inputs().len() != inputs) {
            return Err(ProvidenceError::InvalidArgument(format!(
                "Every training row must have {} inputs, found one with {}",
                inputs,
                row.inputs().len()
            )));
        }

        let geometry = LayerGeometry::new(
            inputs,
            network.hidden_nodes,
            network.outputs,
            network.hidden_layers,
        )?;

        Ok(Self {
            training: Arc::new(training),
            metrics,
            geometry,
            network: network.clone(),
        })
    }

    pub fn training(&self) -> &[TrainingRow] {
        &self.training
    }

    pub fn metrics(&self) -> &[Arc<dyn ErrorMetric>] {
        &self.metrics
    }

    pub fn number_of_objectives(&self) -> usize {
        self.metrics.len()
    }

    pub fn geometry(&self) -> &LayerGeometry {
        &self.geometry
    }

    /// A fresh, unevaluated solution with randomly initialised weights.
    pub fn create_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Solution {
        let network = FeedForwardPerceptron::new(
            self.geometry.clone(),
            ValueInitialiser::Uniform {
                lower: self.network.weight_lower_bound,
                upper: self.network.weight_upper_bound,
            },
            ValueInitialiser::Constant(self.network.default_threshold),
            rng,
        )
        .with_step_functions(self.network.hidden_step, self.network.output_step);

        Solution::new(network, self.number_of_objectives())
    }

    /// First-output estimates of `network` for `rows`.
    pub fn estimates(network: &FeedForwardPerceptron, rows: &[TrainingRow]) -> Result<Vec<f64>> {
        rows.iter()
            .map(|row| first_output(&network.execute(row.inputs())?))
            .collect()
    }

    pub fn evaluate(&self, solution: &mut Solution) -> Result<()> {
        let actuals = self
            .training
            .iter()
            .map(|row| first_output(row.outputs()))
            .collect::<Result<Vec<_>>>()?;
        let estimates = Self::estimates(solution.network(), &self.training)?;

        for (i, metric) in self.metrics.iter().enumerate() {
            let error = metric.error(&actuals, &estimates)?;
            let objective = if metric.is_minimising() { error } else { 1.0 - error };
            solution.set_objective(i, objective)?;
        }

        Ok(())
    }
}

pub(crate) fn first_output(values: &[f64]) -> Result<f64> {
    values.first().copied().ok_or_else(|| {
        ProvidenceError::InvalidArgument("Expected at least one output value".to_string())
    })
}
