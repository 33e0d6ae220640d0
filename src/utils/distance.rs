use crate::error::{ProvidenceError, Result};

/// Straight line distance between two points of equal dimensionality.
pub fn euclidean(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(ProvidenceError::InvalidArgument(format!(
            "The points being compared must have the same number of dimensions: X:{}, Y:{}",
            x.len(),
            y.len()
        )));
    }

    let squared: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - b).powi(2))
        .sum();

    Ok(squared.sqrt())
}
