use crate::error::{ProvidenceError, Result};
use crate::types::{Point, Project};
use crate::utils::scale_feature;
use serde::{Deserialize, Serialize};

/// A named column of values, one per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub values: Vec<f64>,
}

impl Feature {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All data known about a set of projects, held both as columns (features) and rows (projects).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSet {
    features: Vec<Feature>,
    projects: Vec<Project>,
}

impl DataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_features(features: Vec<Feature>) -> Result<Self> {
        let mut data_set = Self::new();
        for feature in features {
            data_set.add_feature(feature)?;
        }
        Ok(data_set)
    }

    /// Adds a column. Every column must describe the same number of projects.
    ///
    /// Project rows are rebuilt, so ids are reassigned from zero.
    pub fn add_feature(&mut self, feature: Feature) -> Result<()> {
        if let Some(first) = self.features.first() {
            if first.len() != feature.len() {
                return Err(ProvidenceError::InvalidArgument(format!(
                    "The number of projects in each feature must be the same: Expected: {} Actual: {}",
                    first.len(),
                    feature.len()
                )));
            }
        }

        self.features.push(feature);
        self.rebuild_projects();
        Ok(())
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: usize) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Removes the project with the given id from every feature and from the rows.
    pub fn remove_project(&mut self, id: usize) -> Result<Project> {
        let position = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| {
                ProvidenceError::IndexOutOfRange(format!("No project with id {}", id))
            })?;

        for feature in &mut self.features {
            feature.values.remove(position);
        }

        Ok(self.projects.remove(position))
    }

    pub fn remove_projects(&mut self, projects: &[Project]) -> Result<()> {
        for project in projects {
            self.remove_project(project.id)?;
        }
        Ok(())
    }

    /// Min-max scales every feature into [0, 1]. Constant features become all zeros.
    pub fn normalise(&mut self) -> Result<()> {
        for feature in &mut self.features {
            let lower = feature.values.iter().copied().fold(f64::INFINITY, f64::min);
            let upper = feature.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            if feature.values.is_empty() || lower == upper {
                feature.values.iter_mut().for_each(|v| *v = 0.0);
                continue;
            }

            for value in &mut feature.values {
                *value = scale_feature(*value, lower, upper)?;
            }
        }

        for (row, project) in self.projects.iter_mut().enumerate() {
            project.data = self.features.iter().map(|f| f.values[row]).collect();
        }

        Ok(())
    }

    fn rebuild_projects(&mut self) {
        let count = self.features.first().map(Feature::len).unwrap_or(0);

        self.projects = (0..count)
            .map(|row| {
                let data: Point = self.features.iter().map(|f| f.values[row]).collect();
                Project::new(row, data)
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataSet {
        DataSet::from_features(vec![
            Feature::new("size", vec![10.0, 20.0, 30.0]),
            Feature::new("effort", vec![1.0, 2.0, 4.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_projects_are_rows_of_features() {
        let ds = sample();

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.projects()[1].data, vec![20.0, 2.0]);
        assert_eq!(ds.feature_names(), vec!["size", "effort"]);
    }

    #[test]
    fn test_add_feature_rejects_different_length() {
        let mut ds = sample();
        let result = ds.add_feature(Feature::new("bad", vec![1.0]));
        assert!(matches!(result, Err(ProvidenceError::InvalidArgument(_))));
    }

    #[test]
    fn test_remove_project_keeps_other_ids() {
        let mut ds = sample();
        let removed = ds.remove_project(1).unwrap();

        assert_eq!(removed.data, vec![20.0, 2.0]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.features()[0].values, vec![10.0, 30.0]);
        assert!(ds.project(2).is_some());
        assert!(ds.project(1).is_none());
        assert!(ds.remove_project(1).is_err());
    }

    #[test]
    fn test_normalise_scales_columns() {
        let mut ds = sample();
        ds.normalise().unwrap();

        assert_eq!(ds.features()[0].values, vec![0.0, 0.5, 1.0]);
        assert_eq!(ds.projects()[2].data, vec![1.0, 1.0]);
    }
}
