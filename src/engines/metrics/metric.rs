use super::logarithmic::LogarithmicStandardDeviationError;
use super::relative::{
    MeanBalancedRelativeError, MeanInvertedBalancedRelativeError, MeanMagnitudeRelativeError,
    Pred25Error,
};
use crate::error::{ProvidenceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Scores a set of estimates against the values they estimate.
pub trait ErrorMetric: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Whether lower errors are better.
    fn is_minimising(&self) -> bool;

    fn error(&self, actuals: &[f64], estimates: &[f64]) -> Result<f64>;

    /// Range the metric is plotted over.
    fn bounds(&self) -> (f64, f64) {
        (0.0, 5.0)
    }
}

/// Configurable choice of metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorMetricKind {
    #[serde(rename = "LSD")]
    Lsd,
    #[serde(rename = "MMRE")]
    Mmre,
    #[serde(rename = "PRED25")]
    Pred25,
    #[serde(rename = "MBRE")]
    Mbre,
    #[serde(rename = "MIBRE")]
    Mibre,
}

impl ErrorMetricKind {
    pub fn build(&self) -> Arc<dyn ErrorMetric> {
        match self {
            Self::Lsd => Arc::new(LogarithmicStandardDeviationError),
            Self::Mmre => Arc::new(MeanMagnitudeRelativeError),
            Self::Pred25 => Arc::new(Pred25Error),
            Self::Mbre => Arc::new(MeanBalancedRelativeError),
            Self::Mibre => Arc::new(MeanInvertedBalancedRelativeError),
        }
    }
}

pub(crate) fn check_arguments(actuals: &[f64], estimates: &[f64]) -> Result<()> {
    if actuals.len() != estimates.len() {
        return Err(ProvidenceError::InvalidArgument(format!(
            "The number of actuals and estimates must match. Actuals: {} Estimates: {}",
            actuals.len(),
            estimates.len()
        )));
    }
    if actuals.is_empty() {
        return Err(ProvidenceError::InvalidArgument(
            "There must exist at least one actual and estimated effort.".to_string(),
        ));
    }
    Ok(())
}
