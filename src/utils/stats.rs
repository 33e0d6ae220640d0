// Population statistics used by the error metrics and the data layer.
use crate::error::{ProvidenceError, Result};

pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(ProvidenceError::InvalidArgument(
            "There must be one or more values to calculate a mean".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (divides by n, not n - 1).
pub fn variance(values: &[f64]) -> Result<f64> {
    let mean = mean(values)?;

    let squared_difference: f64 = values.iter().map(|&v| (v - mean).powi(2)).sum();

    Ok(squared_difference / values.len() as f64)
}

pub fn std_dev(values: &[f64]) -> Result<f64> {
    Ok(variance(values)?.sqrt())
}

/// Min-max scales a value into [0, 1] given the bounds the value could take.
pub fn scale_feature(value: f64, lower_bound: f64, upper_bound: f64) -> Result<f64> {
    if lower_bound > upper_bound {
        return Err(ProvidenceError::InvalidArgument(format!(
            "The lower bound is greater than the upper bound. Lower bound: {} Upper bound: {}",
            lower_bound, upper_bound
        )));
    }

    Ok((value - lower_bound) / (upper_bound - lower_bound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
        assert_relative_eq!(mean(&[-3.0]).unwrap(), -3.0);
    }

    #[test]
    fn test_mean_of_nothing_fails() {
        assert!(matches!(mean(&[]), Err(ProvidenceError::InvalidArgument(_))));
    }

    #[test]
    fn test_variance_is_population_variance() {
        // mean 5, squared deviations sum to 32 over 8 values
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(variance(&values).unwrap(), 4.0);
        assert_relative_eq!(std_dev(&values).unwrap(), 2.0);
    }

    #[test]
    fn test_variance_of_constant_is_zero() {
        assert_eq!(variance(&[3.0, 3.0, 3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_variance_of_nothing_fails() {
        assert!(variance(&[]).is_err());
    }

    #[test]
    fn test_scale_feature() {
        assert_relative_eq!(scale_feature(5.0, 0.0, 10.0).unwrap(), 0.5);
        assert_relative_eq!(scale_feature(0.0, 0.0, 10.0).unwrap(), 0.0);
        assert_relative_eq!(scale_feature(10.0, 0.0, 10.0).unwrap(), 1.0);
    }

    #[test]
    fn test_scale_feature_rejects_inverted_bounds() {
        assert!(scale_feature(1.0, 2.0, 1.0).is_err());
    }
}
