use super::algorithm::EvolutionaryAlgorithm;
use super::crowding::HarmonicCrowdingDistance;
use super::operators::{GaussianMutation, MlpCrossover};
use super::problem::SeeProblem;
use super::r_dominance::RDominanceRanking;
use super::solution::Solution;
use crate::config::EvolutionConfig;
use crate::error::{ProvidenceError, Result};
use crate::types::Point;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use rayon::prelude::*;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::Arc;

/// R-dominance harmonic-distance multi-objective evolutionary algorithm.
///
/// Every member of the population may mate. Survivors are chosen from the joint parent and
/// offspring pool by r-dominance rank; the front that overflows the population is truncated by
/// harmonic crowding distance, sparsest first.
#[derive(Debug)]
pub struct Rhadmoea {
    problem: Arc<SeeProblem>,
    population_size: usize,
    crossover: MlpCrossover,
    mutation: GaussianMutation,
    ranking: RDominanceRanking,
    crowding: HarmonicCrowdingDistance,
    rng: StdRng,
}

impl Rhadmoea {
    pub fn new(
        problem: Arc<SeeProblem>,
        population_size: usize,
        crossover: MlpCrossover,
        mutation: GaussianMutation,
        ranking: RDominanceRanking,
        crowding: HarmonicCrowdingDistance,
        seed: Option<u64>,
    ) -> Result<Self> {
        if population_size < 3 {
            return Err(ProvidenceError::InvalidArgument(format!(
                "The population must hold at least 3 solutions to pick crossover parents: {}",
                population_size
            )));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut algorithm = Self {
            problem,
            population_size,
            crossover,
            mutation,
            ranking: ranking.clone(),
            crowding,
            rng,
        };
        algorithm.set_aspiration_point(ranking.aspiration_point().map(<[f64]>::to_vec))?;

        Ok(algorithm)
    }

    pub fn from_config(problem: Arc<SeeProblem>, config: &EvolutionConfig) -> Result<Self> {
        let mut ranking = RDominanceRanking::new(config.non_r_dominance_threshold)?;
        ranking.set_aspiration_point(config.aspiration_point.clone());

        Self::new(
            problem,
            config.population_size,
            MlpCrossover::new(config.crossover_probability, config.anneal_time)?,
            GaussianMutation::with_standard_deviation(
                config.mutation_probability,
                config.mutation_standard_deviation,
            )?,
            ranking,
            HarmonicCrowdingDistance::new(config.crowding_neighbours)?,
            config.seed,
        )
    }

    pub fn problem(&self) -> &Arc<SeeProblem> {
        &self.problem
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn generation(&self) -> usize {
        self.crossover.generation()
    }

    pub fn aspiration_point(&self) -> Option<&[f64]> {
        self.ranking.aspiration_point()
    }

    /// Steers later generations towards `aspiration_point`, or back to plain Pareto ranking
    /// when `None`. Takes effect at the next replacement.
    pub fn set_aspiration_point(&mut self, aspiration_point: Option<Point>) -> Result<()> {
        if let Some(point) = &aspiration_point {
            let objectives = self.problem.number_of_objectives();
            if point.len() != objectives {
                return Err(ProvidenceError::IndexOutOfRange(format!(
                    "The aspiration point has {} values but there are {} objectives",
                    point.len(),
                    objectives
                )));
            }
        }

        log::info!("Aspiration point set to {:?}", aspiration_point);
        self.ranking.set_aspiration_point(aspiration_point);
        Ok(())
    }

    /// Restarts the annealing schedule for a fresh run.
    pub fn reset(&mut self) {
        self.crossover.reset_generation();
    }
}

impl EvolutionaryAlgorithm for Rhadmoea {
    fn create_initial_population(&mut self) -> Result<Vec<Solution>> {
        Ok((0..self.population_size)
            .map(|_| self.problem.create_solution(&mut self.rng))
            .collect())
    }

    fn evaluate_population(&self, population: &mut [Solution]) -> Result<()> {
        let problem = &self.problem;
        population
            .par_iter_mut()
            .try_for_each(|solution| problem.evaluate(solution))
    }

    fn selection<'a>(&mut self, population: &'a [Solution]) -> Result<Cow<'a, [Solution]>> {
        Ok(Cow::Borrowed(population))
    }

    fn reproduction(&mut self, mating_pool: &[Solution]) -> Result<Vec<Solution>> {
        if mating_pool.len() < 3 {
            return Err(ProvidenceError::InvalidArgument(format!(
                "At least 3 solutions are needed to reproduce, got {}",
                mating_pool.len()
            )));
        }

        let mut offspring = Vec::with_capacity(self.population_size);

        while offspring.len() < self.population_size {
            let picks = index::sample(&mut self.rng, mating_pool.len(), 3);
            let parents: Vec<&Solution> = picks.iter().map(|i| &mating_pool[i]).collect();

            let mut child = self.crossover.crossover(&parents, &mut self.rng)?;
            self.mutation.mutate(&mut child, &mut self.rng)?;
            offspring.push(child);
        }

        Ok(offspring)
    }

    fn replacement(&mut self, population: &[Solution], offspring: Vec<Solution>) -> Result<Vec<Solution>> {
        let mut joint = population.to_vec();
        joint.extend(offspring);

        let fronts = self.ranking.rank(&joint)?;
        let mut survivors: Vec<usize> = Vec::with_capacity(self.population_size);

        for front in fronts {
            let remaining = self.population_size - survivors.len();
            if remaining == 0 {
                break;
            }

            if front.len() < remaining {
                survivors.extend(front);
                continue;
            }

            let scores = self.crowding.scores(&front, &joint)?;
            let mut scored: Vec<(usize, f64)> = front.into_iter().zip(scores).collect();
            scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

            survivors.extend(scored.into_iter().take(remaining).map(|(i, _)| i));
            break;
        }

        let mut slots: Vec<Option<Solution>> = joint.into_iter().map(Some).collect();
        Ok(survivors
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect())
    }

    fn next_generation(&mut self) {
        self.crossover.increment_generation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TrainingRow;
    use crate::engines::metrics::ErrorMetricKind;
    use crate::types::Objectives;

    fn problem() -> Arc<SeeProblem> {
        let rows = (1..=8)
            .map(|i| {
                let x = i as f64 / 8.0;
                TrainingRow::from_parts(vec![x, 1.0 - x], vec![2.0 * x + 0.5]).unwrap()
            })
            .collect();
        let metrics = vec![
            ErrorMetricKind::Lsd.build(),
            ErrorMetricKind::Mmre.build(),
            ErrorMetricKind::Pred25.build(),
        ];
        Arc::new(SeeProblem::new(rows, metrics).unwrap())
    }

    fn algorithm(seed: u64) -> Rhadmoea {
        let config = EvolutionConfig {
            population_size: 12,
            seed: Some(seed),
            ..EvolutionConfig::default()
        };
        Rhadmoea::from_config(problem(), &config).unwrap()
    }

    #[test]
    fn test_population_size_is_preserved() {
        let mut algorithm = algorithm(1);
        let mut population = algorithm.initialise().unwrap();

        for _ in 0..3 {
            population = algorithm.step(&population).unwrap();
            assert_eq!(population.len(), 12);
        }
        assert_eq!(algorithm.generation(), 3);
    }

    #[test]
    fn test_replacement_keeps_first_front_members() {
        let mut algorithm = algorithm(2);
        let population = algorithm.initialise().unwrap();
        let mut offspring = algorithm.reproduction(&population).unwrap();
        algorithm.evaluate_population(&mut offspring).unwrap();

        let mut joint = population.clone();
        joint.extend(offspring.iter().cloned());
        let best = crate::engines::evolution::pareto::non_dominated(&joint);

        let survivors = algorithm.replacement(&population, offspring).unwrap();

        if best.len() <= survivors.len() {
            for i in best {
                assert!(survivors.iter().any(|s| s.objectives() == joint[i].objectives()));
            }
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut algorithm = algorithm(seed);
            let population = algorithm.initialise().unwrap();
            algorithm.step(&population).unwrap()
        };

        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_aspiration_point_must_match_objectives() {
        let mut algorithm = algorithm(3);

        assert!(matches!(
            algorithm.set_aspiration_point(Some(vec![0.2, 0.2])),
            Err(ProvidenceError::IndexOutOfRange(_))
        ));
        algorithm.set_aspiration_point(Some(vec![0.2, 0.2, 0.2])).unwrap();
        assert_eq!(algorithm.aspiration_point(), Some(&[0.2, 0.2, 0.2][..]));
        algorithm.set_aspiration_point(None).unwrap();
        assert!(algorithm.aspiration_point().is_none());
    }

    #[test]
    fn test_tiny_population_is_rejected() {
        let config = EvolutionConfig {
            population_size: 2,
            ..EvolutionConfig::default()
        };
        assert!(Rhadmoea::from_config(problem(), &config).is_err());
    }
}
