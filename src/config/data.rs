use super::traits::{ConfigManifest, ConfigSection, FieldKind, FieldManifest};
use crate::error::ProvidenceError;
use serde::{Deserialize, Serialize};

/// How the project data is prepared before evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Feature names estimated by the networks. The rest are inputs.
    pub output_columns: Vec<String>,
    pub training_ratio: f64,
    pub remove_outliers: bool,
    pub normalise: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            output_columns: vec!["effort".to_string()],
            training_ratio: 0.4,
            remove_outliers: true,
            normalise: true,
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), ProvidenceError> {
        if self.output_columns.is_empty() {
            return Err(ProvidenceError::Configuration(
                "At least one output column is required".to_string(),
            ));
        }
        if self.training_ratio <= 0.0 || self.training_ratio > 1.0 {
            return Err(ProvidenceError::Configuration(
                "Training ratio must be in (0, 1]".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest::for_section::<Self>(vec![
            FieldManifest::new(
                "output_columns",
                FieldKind::StringList,
                None,
                "Features the networks estimate",
            ),
            FieldManifest::new(
                "training_ratio",
                FieldKind::Float,
                Some((0.0, 1.0)),
                "Share of projects used for training",
            ),
            FieldManifest::new(
                "remove_outliers",
                FieldKind::Bool,
                None,
                "Drop projects flagged by silhouette outlier detection",
            ),
            FieldManifest::new(
                "normalise",
                FieldKind::Bool,
                None,
                "Min-max scale every feature before training",
            ),
        ])
    }
}
