use super::traits::{check_at_least, ConfigManifest, ConfigSection, FieldKind, FieldManifest};
use crate::engines::network::StepFunction;
use crate::error::ProvidenceError;
use serde::{Deserialize, Serialize};

/// Shape and initial state of each evolved network. The input width comes from the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub hidden_nodes: usize,
    pub hidden_layers: usize,
    pub outputs: usize,
    pub default_threshold: f64,
    pub weight_lower_bound: f64,
    pub weight_upper_bound: f64,
    pub hidden_step: StepFunction,
    pub output_step: StepFunction,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hidden_nodes: 9,
            hidden_layers: 1,
            outputs: 1,
            default_threshold: 1.0,
            weight_lower_bound: -5.0,
            weight_upper_bound: 5.0,
            hidden_step: StepFunction::Logistic,
            output_step: StepFunction::Linear,
        }
    }
}

impl ConfigSection for NetworkConfig {
    fn section_name() -> &'static str {
        "network"
    }

    fn validate(&self) -> Result<(), ProvidenceError> {
        check_at_least("Hidden nodes", self.hidden_nodes, 1)?;
        check_at_least("Hidden layers", self.hidden_layers, 1)?;
        check_at_least("Outputs", self.outputs, 1)?;
        if self.weight_lower_bound >= self.weight_upper_bound {
            return Err(ProvidenceError::Configuration(
                "The weight lower bound must be below the upper bound".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest::for_section::<Self>(vec![
            FieldManifest::new(
                "hidden_nodes",
                FieldKind::Integer,
                Some((1.0, 1000.0)),
                "Width of every hidden layer",
            ),
            FieldManifest::new(
                "hidden_layers",
                FieldKind::Integer,
                Some((1.0, 20.0)),
                "Number of hidden layers",
            ),
            FieldManifest::new(
                "outputs",
                FieldKind::Integer,
                Some((1.0, 100.0)),
                "Output nodes; only the first is scored",
            ),
            FieldManifest::new(
                "default_threshold",
                FieldKind::Float,
                None,
                "Initial threshold of every node",
            ),
            FieldManifest::new(
                "weight_lower_bound",
                FieldKind::Float,
                None,
                "Lowest initial weight",
            ),
            FieldManifest::new(
                "weight_upper_bound",
                FieldKind::Float,
                None,
                "Highest initial weight",
            ),
            FieldManifest::new(
                "hidden_step",
                FieldKind::choice(&["Logistic", "Linear"]),
                None,
                "Activation of hidden nodes",
            ),
            FieldManifest::new(
                "output_step",
                FieldKind::choice(&["Logistic", "Linear"]),
                None,
                "Activation of output nodes",
            ),
        ])
    }
}
