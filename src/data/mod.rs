pub mod dataset;
pub mod training;

pub use dataset::{DataSet, Feature};
pub use training::{TrainingData, TrainingRow};
