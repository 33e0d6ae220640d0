use super::problem::{first_output, SeeProblem};
use super::solution::Solution;
use crate::data::TrainingRow;
use crate::engines::metrics::ErrorMetric;
use crate::error::{ProvidenceError, Result};
use crate::types::Objectives;

/// Averages the estimates of the front's best solution for each objective.
#[derive(Debug, Clone)]
pub struct ParetoEnsemble {
    members: Vec<Solution>,
}

impl ParetoEnsemble {
    /// Picks, for every objective, the front member with the lowest value. The first member wins
    /// ties; a member best at several objectives is included once per objective.
    pub fn from_front(front: &[&Solution]) -> Result<Self> {
        let first = front.first().ok_or_else(|| {
            ProvidenceError::InvalidArgument("An ensemble needs at least one solution".to_string())
        })?;

        let members = (0..first.number_of_objectives())
            .map(|objective| {
                let mut best = *first;
                let mut best_value = objective_value(first, objective)?;
                for &candidate in front {
                    let value = objective_value(candidate, objective)?;
                    if value < best_value {
                        best = candidate;
                        best_value = value;
                    }
                }
                Ok(best.clone())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { members })
    }

    pub fn members(&self) -> &[Solution] {
        &self.members
    }

    /// Mean of the members' first outputs.
    pub fn estimate(&self, inputs: &[f64]) -> Result<f64> {
        let mut total = 0.0;
        for member in &self.members {
            total += first_output(&member.network().execute(inputs)?)?;
        }
        Ok(total / self.members.len() as f64)
    }

    /// Scores the ensemble on `rows` with `metric`.
    pub fn error(&self, rows: &[TrainingRow], metric: &dyn ErrorMetric) -> Result<f64> {
        let estimates = rows
            .iter()
            .map(|row| self.estimate(row.inputs()))
            .collect::<Result<Vec<_>>>()?;
        let actuals = rows
            .iter()
            .map(|row| first_output(row.outputs()))
            .collect::<Result<Vec<_>>>()?;

        metric.error(&actuals, &estimates)
    }

    /// Per-member error on `rows`, in member order.
    pub fn member_errors(&self, rows: &[TrainingRow], metric: &dyn ErrorMetric) -> Result<Vec<f64>> {
        let actuals = rows
            .iter()
            .map(|row| first_output(row.outputs()))
            .collect::<Result<Vec<_>>>()?;

        self.members
            .iter()
            .map(|member| metric.error(&actuals, &SeeProblem::estimates(member.network(), rows)?))
            .collect()
    }
}

fn objective_value(solution: &Solution, objective: usize) -> Result<f64> {
    solution.objectives().get(objective).copied().ok_or_else(|| {
        ProvidenceError::IndexOutOfRange(format!(
            "Objective {} requested from a solution with {} objectives",
            objective,
            solution.number_of_objectives()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::metrics::ErrorMetricKind;
    use crate::engines::network::{FeedForwardPerceptron, LayerGeometry, StepFunction};
    use approx::assert_relative_eq;

    // Linear one-hidden-node network computing weight * x.
    fn solution(weight: f64, objectives: &[f64]) -> Solution {
        let geometry = LayerGeometry::new(1, 1, 1, 1).unwrap();
        let network = FeedForwardPerceptron::from_parts(geometry, vec![weight, 1.0], vec![0.0, 0.0])
            .unwrap()
            .with_step_functions(StepFunction::Linear, StepFunction::Linear);
        let mut s = Solution::new(network, objectives.len());
        for (i, &v) in objectives.iter().enumerate() {
            s.set_objective(i, v).unwrap();
        }
        s
    }

    #[test]
    fn test_members_are_best_per_objective() {
        let a = solution(1.0, &[0.1, 0.9]);
        let b = solution(3.0, &[0.9, 0.1]);
        let c = solution(5.0, &[0.5, 0.5]);

        let ensemble = ParetoEnsemble::from_front(&[&a, &b, &c]).unwrap();

        assert_eq!(ensemble.members(), &[a, b]);
        assert_relative_eq!(ensemble.estimate(&[2.0]).unwrap(), 4.0);
    }

    #[test]
    fn test_error_uses_mean_estimate() {
        let a = solution(1.0, &[0.1, 0.9]);
        let b = solution(3.0, &[0.9, 0.1]);
        let ensemble = ParetoEnsemble::from_front(&[&a, &b]).unwrap();
        let rows = vec![TrainingRow::from_parts(vec![1.0], vec![2.0]).unwrap()];
        let mmre = ErrorMetricKind::Mmre.build();

        assert_relative_eq!(ensemble.error(&rows, mmre.as_ref()).unwrap(), 0.0);
        assert_eq!(ensemble.member_errors(&rows, mmre.as_ref()).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_front_with_fewer_objectives_is_an_error() {
        let a = solution(1.0, &[0.1, 0.9]);
        let b = solution(3.0, &[0.2]);

        assert!(matches!(
            ParetoEnsemble::from_front(&[&a, &b]),
            Err(ProvidenceError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn test_empty_front_is_rejected() {
        assert!(ParetoEnsemble::from_front(&[]).is_err());
    }
}
