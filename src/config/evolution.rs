use super::traits::{
    check_at_least, check_probability, ConfigManifest, ConfigSection, FieldKind, FieldManifest,
};
use crate::error::ProvidenceError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub crossover_probability: f64,
    pub mutation_probability: f64,
    pub mutation_standard_deviation: f64,
    pub anneal_time: f64,
    pub non_r_dominance_threshold: f64,
    pub crowding_neighbours: usize,
    pub seed: Option<u64>,
    pub aspiration_point: Option<Vec<f64>>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            crossover_probability: 0.2,
            mutation_probability: 0.2,
            mutation_standard_deviation: 0.1,
            anneal_time: 300.0,
            non_r_dominance_threshold: 0.2,
            crowding_neighbours: 2,
            seed: None,
            aspiration_point: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), ProvidenceError> {
        check_at_least("Population size", self.population_size, 3)?;
        check_at_least("Crowding neighbours", self.crowding_neighbours, 1)?;
        check_probability("Crossover probability", self.crossover_probability)?;
        check_probability("Mutation probability", self.mutation_probability)?;
        check_probability("Non r-dominance threshold", self.non_r_dominance_threshold)?;
        if self.mutation_standard_deviation <= 0.0 {
            return Err(ProvidenceError::Configuration(
                "Mutation standard deviation must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest::for_section::<Self>(vec![
            FieldManifest::new(
                "population_size",
                FieldKind::Integer,
                Some((3.0, 10000.0)),
                "Number of networks in the population",
            ),
            FieldManifest::new(
                "generations",
                FieldKind::Integer,
                Some((1.0, 100000.0)),
                "Generations per run",
            ),
            FieldManifest::new(
                "crossover_probability",
                FieldKind::Float,
                Some((0.0, 1.0)),
                "Chance each weight is recombined",
            ),
            FieldManifest::new(
                "mutation_probability",
                FieldKind::Float,
                Some((0.0, 1.0)),
                "Chance each weight receives Gaussian noise",
            ),
            FieldManifest::new(
                "mutation_standard_deviation",
                FieldKind::Float,
                Some((0.0, 10.0)),
                "Spread of the mutation noise",
            ),
            FieldManifest::new(
                "anneal_time",
                FieldKind::Float,
                Some((0.0, 100000.0)),
                "Generation at which the crossover slope spread is halfway between 2 and 1",
            ),
            FieldManifest::new(
                "non_r_dominance_threshold",
                FieldKind::Float,
                Some((0.0, 1.0)),
                "How much closer to the aspiration point a solution must be to r-dominate",
            ),
            FieldManifest::new(
                "crowding_neighbours",
                FieldKind::Integer,
                Some((1.0, 100.0)),
                "Neighbours used by the harmonic crowding distance",
            ),
            FieldManifest::new(
                "seed",
                FieldKind::Integer,
                None,
                "Random seed; empty for a fresh seed each run",
            ),
            FieldManifest::new(
                "aspiration_point",
                FieldKind::FloatList,
                None,
                "Preferred objective values, one per error metric",
            ),
        ])
    }
}
