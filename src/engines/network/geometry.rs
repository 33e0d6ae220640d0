use crate::error::{ProvidenceError, Result};
use std::ops::Range;

/// Layer sizes of a feed-forward network and the offsets of each layer's block in the flat
/// weight and threshold arrays.
///
/// Layer 0 is the input layer, layers `1..=hidden_layers` are hidden, and the last layer is
/// the output layer. The weights feeding layer `l` are stored destination-major: the slice for
/// node `j` of layer `l` starts at `weight_offsets[l] + j * nodes[l - 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerGeometry {
    nodes: Vec<usize>,
    weight_offsets: Vec<usize>,
    threshold_offsets: Vec<usize>,
    weight_count: usize,
    threshold_count: usize,
}

impl LayerGeometry {
    pub fn new(inputs: usize, hidden: usize, outputs: usize, hidden_layers: usize) -> Result<Self> {
        for (name, value) in [
            ("inputs", inputs),
            ("hidden nodes", hidden),
            ("outputs", outputs),
            ("hidden layers", hidden_layers),
        ] {
            if value < 1 {
                return Err(ProvidenceError::InvalidArgument(format!(
                    "The number of {} must be at least 1",
                    name
                )));
            }
        }

        let mut nodes = Vec::with_capacity(hidden_layers + 2);
        nodes.push(inputs);
        nodes.extend(std::iter::repeat(hidden).take(hidden_layers));
        nodes.push(outputs);

        // Index 0 is unused for both offset tables since the input layer has no incoming block.
        let mut weight_offsets = vec![0; nodes.len()];
        let mut threshold_offsets = vec![0; nodes.len()];
        let mut weight_count = 0;
        let mut threshold_count = 0;

        for layer in 1..nodes.len() {
            weight_offsets[layer] = weight_count;
            threshold_offsets[layer] = threshold_count;
            weight_count += nodes[layer - 1] * nodes[layer];
            threshold_count += nodes[layer];
        }

        Ok(Self {
            nodes,
            weight_offsets,
            threshold_offsets,
            weight_count,
            threshold_count,
        })
    }

    pub fn inputs(&self) -> usize {
        self.nodes[0]
    }

    pub fn outputs(&self) -> usize {
        self.nodes[self.output_layer_index()]
    }

    pub fn hidden(&self) -> usize {
        self.nodes[1]
    }

    pub fn hidden_layers(&self) -> usize {
        self.nodes.len() - 2
    }

    pub fn output_layer_index(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn weight_count(&self) -> usize {
        self.weight_count
    }

    pub fn threshold_count(&self) -> usize {
        self.threshold_count
    }

    pub fn nodes_in_layer(&self, layer: usize) -> Result<usize> {
        self.nodes.get(layer).copied().ok_or_else(|| {
            ProvidenceError::IndexOutOfRange(format!(
                "Layer {} is outside [0, {}]",
                layer,
                self.output_layer_index()
            ))
        })
    }

    /// Number of weights leaving `layer` for the next layer.
    pub fn weights_in_layer(&self, layer: usize) -> Result<usize> {
        if layer >= self.output_layer_index() {
            return Err(ProvidenceError::IndexOutOfRange(format!(
                "Layer {} has no outgoing weights; valid layers are [0, {})",
                layer,
                self.output_layer_index()
            )));
        }
        Ok(self.nodes[layer] * self.nodes[layer + 1])
    }

    /// Range of the weight array feeding node `index` of `layer`.
    pub fn weights_to_node(&self, layer: usize, index: usize) -> Result<Range<usize>> {
        self.check_fed_node(layer, index)?;
        let per_node = self.nodes[layer - 1];
        let start = self.weight_offsets[layer] + per_node * index;
        Ok(start..start + per_node)
    }

    /// Position in the threshold array of node `index` of `layer`.
    pub fn threshold_index(&self, layer: usize, index: usize) -> Result<usize> {
        self.check_fed_node(layer, index)?;
        Ok(self.threshold_offsets[layer] + index)
    }

    fn check_fed_node(&self, layer: usize, index: usize) -> Result<()> {
        if layer == 0 || layer > self.output_layer_index() {
            return Err(ProvidenceError::IndexOutOfRange(format!(
                "Layer {} has no incoming weights; valid layers are [1, {}]",
                layer,
                self.output_layer_index()
            )));
        }
        if index >= self.nodes[layer] {
            return Err(ProvidenceError::IndexOutOfRange(format!(
                "Node {} is outside layer {} of {} nodes",
                index, layer, self.nodes[layer]
            )));
        }
        Ok(())
    }
}
