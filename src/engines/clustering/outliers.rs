use super::cluster::Cluster;
use super::initialisers::InitialiserKind;
use super::kmeans::{Clustering, KMeansClustering};
use super::silhouette::silhouette_value;
use crate::config::ClusteringConfig;
use crate::error::{ProvidenceError, Result};
use crate::types::Project;
use rand::Rng;

pub const DEFAULT_LOWER_BOUND: usize = 2;
pub const DEFAULT_UPPER_BOUND: usize = 5;
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;

/// Flags projects that do not sit comfortably in any cluster.
///
/// Every cluster count in `[lower_bound, upper_bound]` is tried and the clustering with the
/// highest mean silhouette wins. Within that clustering, members of clusters smaller than
/// `min_cluster_size` are outliers, as is any point with a negative silhouette.
#[derive(Debug, Clone)]
pub struct OutlierDetector<C> {
    clustering: C,
    lower_bound: usize,
    upper_bound: usize,
    min_cluster_size: usize,
}

impl OutlierDetector<KMeansClustering<InitialiserKind>> {
    pub fn from_config(config: &ClusteringConfig) -> Self {
        let clustering =
            KMeansClustering::new(config.initialiser).with_max_iterations(config.max_iterations);

        Self {
            clustering,
            lower_bound: config.lower_bound,
            upper_bound: config.upper_bound,
            min_cluster_size: config.min_cluster_size,
        }
    }
}

impl<C: Clustering> OutlierDetector<C> {
    pub fn new(clustering: C) -> Self {
        Self {
            clustering,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
        }
    }

    pub fn with_bounds(mut self, lower_bound: usize, upper_bound: usize) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
        self
    }

    pub fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    /// Returns the outlying projects, in cluster order.
    ///
    /// The upper bound is clipped to the number of points.
    pub fn get_outliers<R: Rng + ?Sized>(&self, points: &[Project], rng: &mut R) -> Result<Vec<Project>> {
        let upper_bound = self.upper_bound.min(points.len());
        let clusters = self.find_best_clustering(points, self.lower_bound, upper_bound, rng)?;

        let mut outliers = Vec::new();

        for (i, cluster) in clusters.iter().enumerate() {
            if cluster.len() < self.min_cluster_size {
                outliers.extend(cluster.points().iter().cloned());
                continue;
            }

            let others = others_of(&clusters, i);
            for point in cluster.points() {
                if silhouette_value(&point.data, cluster, &others)? < 0.0 {
                    outliers.push(point.clone());
                }
            }
        }

        log::info!(
            "Outlier detection chose {} clusters and flagged {} of {} projects",
            clusters.len(),
            outliers.len(),
            points.len()
        );

        Ok(outliers)
    }

    /// Clusters `points` once per k in `[lower_bound, upper_bound]` and keeps the partition with
    /// the highest mean silhouette. Ties keep the smaller k.
    pub fn find_best_clustering<R: Rng + ?Sized>(
        &self,
        points: &[Project],
        lower_bound: usize,
        upper_bound: usize,
        rng: &mut R,
    ) -> Result<Vec<Cluster>> {
        if lower_bound < 2 {
            return Err(ProvidenceError::InvalidArgument(format!(
                "The lower bound must be at least 2: {}",
                lower_bound
            )));
        }
        if upper_bound < lower_bound {
            return Err(ProvidenceError::InvalidArgument(format!(
                "The upper bound must not be below the lower bound. Lower: {} Upper: {}",
                lower_bound, upper_bound
            )));
        }
        if upper_bound > points.len() {
            return Err(ProvidenceError::IndexOutOfRange(format!(
                "The upper bound exceeds the number of points. Upper: {} Points: {}",
                upper_bound,
                points.len()
            )));
        }

        let mut best_score = f64::NEG_INFINITY;
        let mut best = Vec::new();

        for k in lower_bound..=upper_bound {
            let clusters = self.clustering.run(points, k, rng)?;
            let score = mean_silhouette(&clusters, points.len())?;
            log::debug!("k={} mean silhouette {:.4}", k, score);

            if score > best_score {
                best_score = score;
                best = clusters;
            }
        }

        Ok(best)
    }
}

fn others_of(clusters: &[Cluster], index: usize) -> Vec<&Cluster> {
    clusters
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(_, c)| c)
        .collect()
}

fn mean_silhouette(clusters: &[Cluster], point_count: usize) -> Result<f64> {
    let mut total = 0.0;

    for (i, cluster) in clusters.iter().enumerate() {
        let others = others_of(clusters, i);
        for point in cluster.points() {
            total += silhouette_value(&point.data, cluster, &others)?;
        }
    }

    Ok(total / point_count as f64)
}
