pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;
pub mod utils;

pub use config::{AppConfig, ConfigManager};
pub use data::{DataSet, Feature, TrainingData, TrainingRow};
pub use engines::evolution::{AlgorithmRunner, ParetoEnsemble, Rhadmoea, SeeProblem};
pub use error::{ProvidenceError, Result};
pub use types::{Objectives, Point, Project};
