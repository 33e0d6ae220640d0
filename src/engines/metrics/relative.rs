// Metrics built on per-project relative error. A zero actual (or, for the balanced variants,
// a zero denominator) is treated as 1 so a single empty project cannot produce an infinite error.
use super::metric::{check_arguments, ErrorMetric};
use crate::error::Result;

fn non_zero(value: f64) -> f64 {
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

/// Magnitude of relative error of a single estimate.
pub fn magnitude_relative_error(actual: f64, estimate: f64) -> f64 {
    (actual - estimate).abs() / non_zero(actual)
}

fn balanced_relative_error(actual: f64, estimate: f64) -> f64 {
    let diff = estimate - actual;
    if diff >= 0.0 {
        (diff / non_zero(actual)).abs()
    } else {
        (diff / non_zero(estimate)).abs()
    }
}

fn inverted_balanced_relative_error(actual: f64, estimate: f64) -> f64 {
    let diff = estimate - actual;
    if diff >= 0.0 {
        (diff / non_zero(estimate)).abs()
    } else {
        (diff / non_zero(actual)).abs()
    }
}

fn mean_of(actuals: &[f64], estimates: &[f64], error: fn(f64, f64) -> f64) -> Result<f64> {
    check_arguments(actuals, estimates)?;

    let total: f64 = actuals
        .iter()
        .zip(estimates)
        .map(|(&a, &e)| error(a, e))
        .sum();

    Ok(total / actuals.len() as f64)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MeanMagnitudeRelativeError;

impl ErrorMetric for MeanMagnitudeRelativeError {
    fn name(&self) -> &'static str {
        "MMRE"
    }

    fn is_minimising(&self) -> bool {
        true
    }

    fn error(&self, actuals: &[f64], estimates: &[f64]) -> Result<f64> {
        mean_of(actuals, estimates, magnitude_relative_error)
    }
}

/// Share of estimates within 25% of their actual.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pred25Error;

impl ErrorMetric for Pred25Error {
    fn name(&self) -> &'static str {
        "PRED25"
    }

    fn is_minimising(&self) -> bool {
        false
    }

    fn error(&self, actuals: &[f64], estimates: &[f64]) -> Result<f64> {
        mean_of(actuals, estimates, |a, e| {
            if magnitude_relative_error(a, e) <= 0.25 {
                1.0
            } else {
                0.0
            }
        })
    }

    fn bounds(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// Over-estimates are relative to the actual, under-estimates to the estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanBalancedRelativeError;

impl ErrorMetric for MeanBalancedRelativeError {
    fn name(&self) -> &'static str {
        "MBRE"
    }

    fn is_minimising(&self) -> bool {
        true
    }

    fn error(&self, actuals: &[f64], estimates: &[f64]) -> Result<f64> {
        mean_of(actuals, estimates, balanced_relative_error)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MeanInvertedBalancedRelativeError;

impl ErrorMetric for MeanInvertedBalancedRelativeError {
    fn name(&self) -> &'static str {
        "MIBRE"
    }

    fn is_minimising(&self) -> bool {
        true
    }

    fn error(&self, actuals: &[f64], estimates: &[f64]) -> Result<f64> {
        mean_of(actuals, estimates, inverted_balanced_relative_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvidenceError;
    use approx::assert_relative_eq;

    #[test]
    fn test_mmre() {
        let error = MeanMagnitudeRelativeError
            .error(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0])
            .unwrap();
        assert_relative_eq!(error, 1.0);
    }

    #[test]
    fn test_pred25_counts_estimates_within_a_quarter() {
        let error = Pred25Error
            .error(&[1.0, 1.0, 1.0, 1.0], &[1.0, 0.75, 0.5, 0.25])
            .unwrap();
        assert_relative_eq!(error, 0.5);
    }

    #[test]
    fn test_balanced_variants_mirror_each_other() {
        let actuals = [2.0, 4.0];
        let estimates = [4.0, 2.0];

        // MBRE divides each difference by the smaller value, MIBRE by the larger.
        assert_relative_eq!(MeanBalancedRelativeError.error(&actuals, &estimates).unwrap(), 1.0);
        assert_relative_eq!(
            MeanInvertedBalancedRelativeError.error(&actuals, &estimates).unwrap(),
            0.5
        );
    }

    #[test]
    fn test_zero_actual_is_treated_as_one() {
        assert_relative_eq!(magnitude_relative_error(0.0, 0.5), 0.5);
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        assert!(matches!(
            MeanMagnitudeRelativeError.error(&[1.0, 2.0], &[1.0]),
            Err(ProvidenceError::InvalidArgument(_))
        ));
        assert!(Pred25Error.error(&[], &[]).is_err());
    }
}
