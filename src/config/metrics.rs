use super::traits::{ConfigManifest, ConfigSection, FieldKind, FieldManifest};
use crate::engines::metrics::{ErrorMetric, ErrorMetricKind};
use crate::error::ProvidenceError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Error metrics used as objectives, in objective order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub metrics: Vec<ErrorMetricKind>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            metrics: vec![
                ErrorMetricKind::Lsd,
                ErrorMetricKind::Mmre,
                ErrorMetricKind::Pred25,
            ],
        }
    }
}

impl MetricsConfig {
    pub fn build(&self) -> Vec<Arc<dyn ErrorMetric>> {
        self.metrics.iter().map(ErrorMetricKind::build).collect()
    }
}

impl ConfigSection for MetricsConfig {
    fn section_name() -> &'static str {
        "metrics"
    }

    fn validate(&self) -> Result<(), ProvidenceError> {
        if self.metrics.is_empty() {
            return Err(ProvidenceError::Configuration(
                "At least one error metric is required".to_string(),
            ));
        }
        for (i, metric) in self.metrics.iter().enumerate() {
            if self.metrics[..i].contains(metric) {
                return Err(ProvidenceError::Configuration(format!(
                    "{} is listed more than once",
                    metric.build().name()
                )));
            }
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest::for_section::<Self>(vec![FieldManifest::new(
            "metrics",
            FieldKind::choice_list(&["LSD", "MMRE", "PRED25", "MBRE", "MIBRE"]),
            None,
            "Error metrics used as objectives, in objective order",
        )])
    }
}
