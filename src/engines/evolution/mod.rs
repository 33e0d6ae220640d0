pub mod algorithm;
pub mod crowding;
pub mod ensemble;
pub mod operators;
pub mod pareto;
pub mod problem;
pub mod r_dominance;
pub mod rhadmoea;
pub mod runner;
pub mod snapshot;
pub mod solution;

pub use algorithm::EvolutionaryAlgorithm;
pub use crowding::HarmonicCrowdingDistance;
pub use ensemble::ParetoEnsemble;
pub use operators::{GaussianMutation, MlpCrossover};
pub use problem::SeeProblem;
pub use r_dominance::RDominanceRanking;
pub use rhadmoea::Rhadmoea;
pub use runner::{AlgorithmRunner, RunLength, RunState, RunnerHandle, SnapshotListener};
pub use snapshot::PopulationSnapshot;
pub use solution::Solution;
