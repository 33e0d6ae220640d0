use serde::{Deserialize, Serialize};

/// A feature vector or an objective vector.
pub type Point = Vec<f64>;

/// Everything known about a single project: a stable id and its feature values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: usize,
    pub data: Point,
}

impl Project {
    pub fn new(id: usize, data: Point) -> Self {
        Self { id, data }
    }

    pub fn dimensions(&self) -> usize {
        self.data.len()
    }
}

/// Anything that occupies a position in objective space.
pub trait Objectives {
    fn objectives(&self) -> &[f64];
}

impl Objectives for Vec<f64> {
    fn objectives(&self) -> &[f64] {
        self
    }
}

impl Objectives for &[f64] {
    fn objectives(&self) -> &[f64] {
        self
    }
}
