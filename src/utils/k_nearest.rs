use crate::error::{ProvidenceError, Result};
use crate::types::Objectives;
use crate::utils::distance::euclidean;

/// A neighbour found by [`find`]: its index in the searched population and its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    pub index: usize,
    pub distance: f64,
}

/// Finds the `k` nearest members of `population` to `population[target]` in objective space.
///
/// The target itself is skipped. Neighbours are kept in a running list ordered by insertion sort,
/// so members at equal distance stay in the order they were encountered. Fewer than `k`
/// neighbours are returned when the population is too small.
pub fn find<T: Objectives>(target: usize, population: &[T], k: usize) -> Result<Vec<Neighbour>> {
    let origin = population
        .get(target)
        .ok_or_else(|| {
            ProvidenceError::IndexOutOfRange(format!(
                "Target {} is outside a population of {}",
                target,
                population.len()
            ))
        })?
        .objectives();

    let mut nearest: Vec<Neighbour> = Vec::with_capacity(population.len());

    for (index, candidate) in population.iter().enumerate() {
        if index == target {
            continue;
        }

        let distance = euclidean(origin, candidate.objectives())?;
        let position = nearest
            .iter()
            .position(|n| distance < n.distance)
            .unwrap_or(nearest.len());

        nearest.insert(position, Neighbour { index, distance });
    }

    nearest.truncate(k);
    Ok(nearest)
}
