//! Pareto utilities over minimised objectives.
//! Implements NSGA-II style fast non-dominated sorting.

use crate::types::Objectives;

/// Check if objective vector A dominates B.
/// A dominates B if A is no worse than B in all objectives and strictly better in at least one.
pub fn dominates(a_objectives: &[f64], b_objectives: &[f64]) -> bool {
    if a_objectives.len() != b_objectives.len() {
        return false;
    }

    let mut at_least_one_better = false;

    for (a_val, b_val) in a_objectives.iter().zip(b_objectives) {
        if b_val < a_val {
            // B is better in this objective, so A does not dominate B
            return false;
        }

        if a_val < b_val {
            at_least_one_better = true;
        }
    }

    at_least_one_better
}

/// Fast non-dominated sorting (NSGA-II algorithm).
/// Returns population indices grouped by Pareto front (0 = best, 1 = second best, etc.)
pub fn fast_non_dominated_sort<T: Objectives>(population: &[T]) -> Vec<Vec<usize>> {
    let n = population.len();

    // For each member, track:
    // - domination_count: how many members dominate it
    // - dominated_solutions: indices of members it dominates
    let mut domination_count = vec![0usize; n];
    let mut dominated_solutions: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut fronts: Vec<Vec<usize>> = Vec::new();

    let mut first_front = Vec::new();

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }

            let (a, b) = (population[i].objectives(), population[j].objectives());
            if dominates(a, b) {
                dominated_solutions[i].push(j);
            } else if dominates(b, a) {
                domination_count[i] += 1;
            }
        }

        if domination_count[i] == 0 {
            first_front.push(i);
        }
    }

    if first_front.is_empty() {
        return fronts;
    }
    fronts.push(first_front);

    // Generate subsequent fronts
    let mut front_index = 0;
    while front_index < fronts.len() {
        let mut next_front = Vec::new();

        for &i in &fronts[front_index] {
            for &j in &dominated_solutions[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next_front.push(j);
                }
            }
        }

        if !next_front.is_empty() {
            // keep each front in population order
            next_front.sort_unstable();
            fronts.push(next_front);
        }
        front_index += 1;
    }

    fronts
}

/// Indices of the non-dominated members.
pub fn non_dominated<T: Objectives>(population: &[T]) -> Vec<usize> {
    (0..population.len())
        .filter(|&i| {
            !population
                .iter()
                .any(|other| dominates(other.objectives(), population[i].objectives()))
        })
        .collect()
}
