use serde::{Deserialize, Serialize};

/// Activation applied to a node's weighted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepFunction {
    Logistic,
    Linear,
}

impl StepFunction {
    pub fn response(&self, x: f64) -> f64 {
        match self {
            Self::Logistic => 1.0 / (1.0 + (-x).exp()),
            Self::Linear => x,
        }
    }
}
