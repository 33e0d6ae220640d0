use super::traits::{check_at_least, ConfigManifest, ConfigSection, FieldKind, FieldManifest};
use crate::engines::clustering::InitialiserKind;
use crate::error::ProvidenceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub lower_bound: usize,
    pub upper_bound: usize,
    pub min_cluster_size: usize,
    pub max_iterations: usize,
    pub initialiser: InitialiserKind,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            lower_bound: 2,
            upper_bound: 5,
            min_cluster_size: 3,
            max_iterations: 1000,
            initialiser: InitialiserKind::PlusPlus,
        }
    }
}

impl ConfigSection for ClusteringConfig {
    fn section_name() -> &'static str {
        "clustering"
    }

    fn validate(&self) -> Result<(), ProvidenceError> {
        check_at_least("The lowest cluster count", self.lower_bound, 2)?;
        check_at_least("k-means iterations", self.max_iterations, 1)?;
        if self.upper_bound < self.lower_bound {
            return Err(ProvidenceError::Configuration(
                "The highest cluster count must not be below the lowest".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest::for_section::<Self>(vec![
            FieldManifest::new(
                "lower_bound",
                FieldKind::Integer,
                Some((2.0, 100.0)),
                "Fewest clusters tried when looking for outliers",
            ),
            FieldManifest::new(
                "upper_bound",
                FieldKind::Integer,
                Some((2.0, 100.0)),
                "Most clusters tried; clipped to the number of projects",
            ),
            FieldManifest::new(
                "min_cluster_size",
                FieldKind::Integer,
                Some((1.0, 100.0)),
                "Clusters smaller than this are treated as outliers",
            ),
            FieldManifest::new(
                "max_iterations",
                FieldKind::Integer,
                Some((1.0, 1000000.0)),
                "k-means iteration cap",
            ),
            FieldManifest::new(
                "initialiser",
                FieldKind::choice(&["Forgy", "PlusPlus"]),
                None,
                "Centroid seeding: Forgy or PlusPlus",
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ClusteringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_single_cluster_lower_bound() {
        let config = ClusteringConfig {
            lower_bound: 1,
            ..ClusteringConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
