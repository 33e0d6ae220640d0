use super::solution::Solution;
use crate::error::Result;
use std::borrow::Cow;

/// The phases of one generation of a population-based optimiser.
pub trait EvolutionaryAlgorithm: Send {
    fn create_initial_population(&mut self) -> Result<Vec<Solution>>;

    fn evaluate_population(&self, population: &mut [Solution]) -> Result<()>;

    /// Mating pool drawn from the current population.
    fn selection<'a>(&mut self, population: &'a [Solution]) -> Result<Cow<'a, [Solution]>>;

    fn reproduction(&mut self, mating_pool: &[Solution]) -> Result<Vec<Solution>>;

    /// Chooses the survivors from the current population and its evaluated offspring.
    fn replacement(&mut self, population: &[Solution], offspring: Vec<Solution>) -> Result<Vec<Solution>>;

    /// Called once a generation has been committed.
    fn next_generation(&mut self);

    /// An evaluated starting population.
    fn initialise(&mut self) -> Result<Vec<Solution>> {
        let mut population = self.create_initial_population()?;
        self.evaluate_population(&mut population)?;
        Ok(population)
    }

    /// Runs one generation and returns the survivors. `population` is left untouched on error.
    fn step(&mut self, population: &[Solution]) -> Result<Vec<Solution>> {
        let mut offspring = {
            let mating_pool = self.selection(population)?;
            self.reproduction(&mating_pool)?
        };

        self.evaluate_population(&mut offspring)?;
        let survivors = self.replacement(population, offspring)?;
        self.next_generation();

        Ok(survivors)
    }
}
