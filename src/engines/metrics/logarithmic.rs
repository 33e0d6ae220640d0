use super::metric::{check_arguments, ErrorMetric};
use crate::error::Result;
use crate::utils::variance;

/// Standard deviation of log errors, corrected by half their variance.
///
/// Non-positive actuals and estimates are replaced by 1 before the logarithm is taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogarithmicStandardDeviationError;

impl LogarithmicStandardDeviationError {
    fn log_error(actual: f64, estimate: f64) -> f64 {
        let actual = if actual <= 0.0 { 1.0 } else { actual };
        let estimate = if estimate <= 0.0 { 1.0 } else { estimate };
        actual.ln() - estimate.ln()
    }
}

impl ErrorMetric for LogarithmicStandardDeviationError {
    fn name(&self) -> &'static str {
        "LSD"
    }

    fn is_minimising(&self) -> bool {
        true
    }

    fn error(&self, actuals: &[f64], estimates: &[f64]) -> Result<f64> {
        check_arguments(actuals, estimates)?;

        let errors: Vec<f64> = actuals
            .iter()
            .zip(estimates)
            .map(|(&a, &e)| Self::log_error(a, e))
            .collect();

        let half_variance = variance(&errors)? / 2.0;
        let sum: f64 = errors.iter().map(|e| (e + half_variance).powi(2)).sum();

        Ok((sum / errors.len() as f64).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_lsd_known_value() {
        let error = LogarithmicStandardDeviationError
            .error(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0])
            .unwrap();
        assert_abs_diff_eq!(error, 0.7, epsilon = 0.03);
    }

    #[test]
    fn test_perfect_estimates_score_zero() {
        let error = LogarithmicStandardDeviationError
            .error(&[3.0, 7.5], &[3.0, 7.5])
            .unwrap();
        assert_abs_diff_eq!(error, 0.0);
    }

    #[test]
    fn test_non_positive_values_are_clamped() {
        let error = LogarithmicStandardDeviationError
            .error(&[0.0, -2.0], &[1.0, 1.0])
            .unwrap();
        assert_abs_diff_eq!(error, 0.0);
    }
}
