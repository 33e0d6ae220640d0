use super::solution::Solution;
use crate::error::{ProvidenceError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

pub const DEFAULT_MUTATION_STANDARD_DEVIATION: f64 = 0.1;

fn check_probability(name: &str, probability: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(ProvidenceError::InvalidArgument(format!(
            "The {} probability must be between 0 and 1: {}",
            name, probability
        )));
    }
    Ok(())
}

fn normal(standard_deviation: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, standard_deviation)
        .map_err(|e| ProvidenceError::InvalidArgument(format!("Invalid standard deviation: {}", e)))
}

/// Three-parent arithmetic crossover for network weights.
///
/// The child starts as a copy of the first parent. One Gaussian slope is drawn per child, with a
/// standard deviation of `2 - 1 / (1 + e^(anneal_time - generation))`. Each variable is then,
/// with `probability`, moved along the difference of the other two parents by that slope.
#[derive(Debug, Clone, PartialEq)]
pub struct MlpCrossover {
    probability: f64,
    anneal_time: f64,
    generation: usize,
}

impl MlpCrossover {
    pub fn new(probability: f64, anneal_time: f64) -> Result<Self> {
        check_probability("crossover", probability)?;
        Ok(Self {
            probability,
            anneal_time,
            generation: 0,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn increment_generation(&mut self) {
        self.generation += 1;
    }

    pub fn reset_generation(&mut self) {
        self.generation = 0;
    }

    pub fn annealing_standard_deviation(&self) -> f64 {
        2.0 - 1.0 / (1.0 + (self.anneal_time - self.generation as f64).exp())
    }

    pub fn crossover<R: Rng + ?Sized>(&self, parents: &[&Solution], rng: &mut R) -> Result<Solution> {
        let [first, second, third] = parents else {
            return Err(ProvidenceError::InvalidArgument(format!(
                "Crossover needs exactly 3 parents, got {}",
                parents.len()
            )));
        };

        let mut child = (*first).clone();
        let slope = normal(self.annealing_standard_deviation())?.sample(rng);

        for i in 0..child.number_of_variables() {
            if rng.gen::<f64>() >= self.probability {
                continue;
            }

            let value = first.variable(i)? + slope * (second.variable(i)? - third.variable(i)?);
            child.set_variable(i, value)?;
        }

        Ok(child)
    }
}

/// Adds Gaussian noise to each variable with a fixed probability.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianMutation {
    probability: f64,
    standard_deviation: f64,
}

impl GaussianMutation {
    pub fn new(probability: f64) -> Result<Self> {
        Self::with_standard_deviation(probability, DEFAULT_MUTATION_STANDARD_DEVIATION)
    }

    pub fn with_standard_deviation(probability: f64, standard_deviation: f64) -> Result<Self> {
        check_probability("mutation", probability)?;
        normal(standard_deviation)?;
        Ok(Self {
            probability,
            standard_deviation,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn mutate<R: Rng + ?Sized>(&self, solution: &mut Solution, rng: &mut R) -> Result<()> {
        let noise = normal(self.standard_deviation)?;

        for i in 0..solution.number_of_variables() {
            if rng.gen::<f64>() >= self.probability {
                continue;
            }

            let value = solution.variable(i)? + noise.sample(rng);
            solution.set_variable(i, value)?;
        }

        Ok(())
    }
}
