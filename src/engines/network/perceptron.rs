use super::geometry::LayerGeometry;
use super::initialiser::ValueInitialiser;
use super::step::StepFunction;
use crate::error::{ProvidenceError, Result};
use rand::Rng;

/// Fixed-topology feed-forward network with flat weight and threshold arrays.
///
/// Every hidden layer has the same width. A node's value is the weighted sum of the previous
/// layer minus its threshold, passed through the step function of its layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardPerceptron {
    geometry: LayerGeometry,
    weights: Vec<f64>,
    thresholds: Vec<f64>,
    hidden_step: StepFunction,
    output_step: StepFunction,
}

impl FeedForwardPerceptron {
    pub fn new<R: Rng + ?Sized>(
        geometry: LayerGeometry,
        weights: ValueInitialiser,
        thresholds: ValueInitialiser,
        rng: &mut R,
    ) -> Self {
        let weights = weights.fill(geometry.weight_count(), rng);
        let thresholds = thresholds.fill(geometry.threshold_count(), rng);

        Self {
            geometry,
            weights,
            thresholds,
            hidden_step: StepFunction::Logistic,
            output_step: StepFunction::Linear,
        }
    }

    /// Builds a network from explicit arrays, checking they match the geometry.
    pub fn from_parts(geometry: LayerGeometry, weights: Vec<f64>, thresholds: Vec<f64>) -> Result<Self> {
        if weights.len() != geometry.weight_count() {
            return Err(ProvidenceError::InvalidArgument(format!(
                "Expected {} weights, got {}",
                geometry.weight_count(),
                weights.len()
            )));
        }
        if thresholds.len() != geometry.threshold_count() {
            return Err(ProvidenceError::InvalidArgument(format!(
                "Expected {} thresholds, got {}",
                geometry.threshold_count(),
                thresholds.len()
            )));
        }

        Ok(Self {
            geometry,
            weights,
            thresholds,
            hidden_step: StepFunction::Logistic,
            output_step: StepFunction::Linear,
        })
    }

    pub fn with_step_functions(mut self, hidden: StepFunction, output: StepFunction) -> Self {
        self.hidden_step = hidden;
        self.output_step = output;
        self
    }

    pub fn geometry(&self) -> &LayerGeometry {
        &self.geometry
    }

    /// Forward pass.
    pub fn execute(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        if inputs.len() != self.geometry.inputs() {
            return Err(ProvidenceError::InvalidArgument(format!(
                "The network expects {} inputs but was given {}",
                self.geometry.inputs(),
                inputs.len()
            )));
        }

        let output_layer = self.geometry.output_layer_index();
        let mut values = inputs.to_vec();

        for layer in 1..=output_layer {
            let step = if layer == output_layer {
                self.output_step
            } else {
                self.hidden_step
            };

            let mut next = Vec::with_capacity(self.geometry.nodes_in_layer(layer)?);
            for node in 0..self.geometry.nodes_in_layer(layer)? {
                let weighted: f64 = values
                    .iter()
                    .zip(self.weights_to_node(layer, node)?)
                    .map(|(value, weight)| value * weight)
                    .sum();
                let threshold = self.thresholds[self.geometry.threshold_index(layer, node)?];
                next.push(step.response(weighted - threshold));
            }

            values = next;
        }

        Ok(values)
    }

    /// Weights on the edges entering node `index` of `layer`, one per node of the previous layer.
    pub fn weights_to_node(&self, layer: usize, index: usize) -> Result<&[f64]> {
        let range = self.geometry.weights_to_node(layer, index)?;
        Ok(&self.weights[range])
    }

    pub fn count_nodes_in_layer(&self, layer: usize) -> Result<usize> {
        self.geometry.nodes_in_layer(layer)
    }

    pub fn count_weights_in_layer(&self, layer: usize) -> Result<usize> {
        self.geometry.weights_in_layer(layer)
    }

    pub fn output_layer_index(&self) -> usize {
        self.geometry.output_layer_index()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn weight(&self, index: usize) -> Result<f64> {
        self.weights
            .get(index)
            .copied()
            .ok_or_else(|| out_of_range("Weight", index, self.weights.len()))
    }

    pub fn set_weight(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.weights.len();
        let slot = self
            .weights
            .get_mut(index)
            .ok_or_else(|| out_of_range("Weight", index, len))?;
        *slot = value;
        Ok(())
    }

    pub fn threshold(&self, index: usize) -> Result<f64> {
        self.thresholds
            .get(index)
            .copied()
            .ok_or_else(|| out_of_range("Threshold", index, self.thresholds.len()))
    }

    pub fn set_threshold(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.thresholds.len();
        let slot = self
            .thresholds
            .get_mut(index)
            .ok_or_else(|| out_of_range("Threshold", index, len))?;
        *slot = value;
        Ok(())
    }
}

fn out_of_range(kind: &str, index: usize, len: usize) -> ProvidenceError {
    ProvidenceError::IndexOutOfRange(format!("{} {} is outside [0, {})", kind, index, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn identity_network() -> FeedForwardPerceptron {
        let geometry = LayerGeometry::new(1, 3, 2, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        FeedForwardPerceptron::new(
            geometry,
            ValueInitialiser::Constant(1.0),
            ValueInitialiser::Constant(0.5),
            &mut rng,
        )
        .with_step_functions(StepFunction::Linear, StepFunction::Linear)
    }

    #[test]
    fn test_execute_known_output() {
        let network = identity_network();
        assert_eq!(network.execute(&[1.0]).unwrap(), vec![2.5, 2.5]);
    }

    #[test]
    fn test_execute_rejects_wrong_input_width() {
        let network = identity_network();
        assert!(matches!(
            network.execute(&[1.0, 2.0]),
            Err(ProvidenceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_weights_to_node_slices_destination_major() {
        let geometry = LayerGeometry::new(2, 2, 1, 1).unwrap();
        let weights = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let network = FeedForwardPerceptron::from_parts(geometry, weights, vec![0.0; 3]).unwrap();

        assert_eq!(network.weights_to_node(1, 1).unwrap(), &[3.0, 4.0]);
        assert_eq!(network.weights_to_node(2, 0).unwrap(), &[5.0, 6.0]);
        assert!(network.weights_to_node(3, 0).is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = identity_network();
        let mut copy = original.clone();

        copy.set_weight(0, 42.0).unwrap();
        copy.set_threshold(0, -1.0).unwrap();

        assert_eq!(original.weight(0).unwrap(), 1.0);
        assert_eq!(original.threshold(0).unwrap(), 0.5);
        assert_eq!(copy.thresholds().len(), original.thresholds().len());
    }

    #[test]
    fn test_setters_reject_unknown_index() {
        let mut network = identity_network();
        assert!(network.set_weight(18, 0.0).is_err());
        assert!(network.threshold(8).is_err());
    }

    #[test]
    fn test_logistic_hidden_layer_bounds_output() {
        // With a logistic hidden layer feeding a linear output of unit weights and no threshold,
        // the output is bounded by the hidden width.
        let geometry = LayerGeometry::new(1, 4, 1, 1).unwrap();
        let network = FeedForwardPerceptron::from_parts(geometry, vec![1.0; 8], vec![0.0; 5]).unwrap();

        let output = network.execute(&[1000.0]).unwrap()[0];
        assert!(output > 3.99 && output <= 4.0);
    }
}
