use crate::error::{ProvidenceError, Result};
use crate::types::{Point, Project};

/// A group of projects that share a partition cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    points: Vec<Project>,
}

impl Cluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(points: Vec<Project>) -> Self {
        Self { points }
    }

    pub fn add_point(&mut self, point: Project) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Project] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Component-wise mean of the member points.
    pub fn mean(&self) -> Result<Point> {
        let first = self.points.first().ok_or_else(|| {
            ProvidenceError::InvalidArgument(
                "There must be points in the cluster to calculate the mean.".to_string(),
            )
        })?;

        let mut mean = vec![0.0; first.dimensions()];

        for point in &self.points {
            for (total, value) in mean.iter_mut().zip(&point.data) {
                *total += value;
            }
        }

        let count = self.points.len() as f64;
        mean.iter_mut().for_each(|total| *total /= count);

        Ok(mean)
    }
}
