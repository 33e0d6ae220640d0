use super::cluster::Cluster;
use crate::error::{ProvidenceError, Result};
use crate::utils::euclidean;

fn average_distance(point: &[f64], cluster: &Cluster) -> Result<f64> {
    let total = cluster
        .points()
        .iter()
        .map(|other| euclidean(point, &other.data))
        .sum::<Result<f64>>()?;

    Ok(total / cluster.len() as f64)
}

/// Silhouette of `point` given the cluster it belongs to and the remaining clusters.
///
/// `a` is the mean distance to every member of `own` (the point itself included), `b` the lowest
/// mean distance to any non-empty cluster in `others`. The result lies in [-1, 1]; a point whose
/// `a` and `b` are both zero scores 0.
pub fn silhouette_value(point: &[f64], own: &Cluster, others: &[&Cluster]) -> Result<f64> {
    if others.is_empty() {
        return Err(ProvidenceError::InvalidArgument(
            "There must be at least one other cluster to compute a silhouette value".to_string(),
        ));
    }

    let a = if own.is_empty() {
        0.0
    } else {
        average_distance(point, own)?
    };

    let mut b = f64::MAX;
    for cluster in others.iter().filter(|c| !c.is_empty()) {
        let candidate = average_distance(point, cluster)?;
        if candidate < b {
            b = candidate;
        }
    }

    let scale = a.max(b);
    if scale == 0.0 {
        return Ok(0.0);
    }

    Ok((b - a) / scale)
}
