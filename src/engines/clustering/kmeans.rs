use super::cluster::Cluster;
use super::initialisers::MeanInitialiser;
use crate::error::{ProvidenceError, Result};
use crate::types::{Point, Project};
use crate::utils::euclidean;
use rand::Rng;

pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Partitions points into a fixed number of clusters.
pub trait Clustering {
    fn run<R: Rng + ?Sized>(&self, points: &[Project], k: usize, rng: &mut R) -> Result<Vec<Cluster>>;
}

/// Lloyd's k-means with a pluggable centroid initialiser.
///
/// Clusters that empty out during an update step lose their centroid, so fewer than `k`
/// clusters may end up populated; the returned vector always has `k` slots. Convergence is
/// exact equality of consecutive centroid sets. Iteration stops at `max_iterations` even if the
/// centroids are still moving.
#[derive(Debug, Clone)]
pub struct KMeansClustering<I> {
    initialiser: I,
    max_iterations: usize,
}

impl<I: MeanInitialiser> KMeansClustering<I> {
    pub fn new(initialiser: I) -> Self {
        Self {
            initialiser,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    fn assignment_step(clusters: &mut [Cluster], means: &[Point], points: &[Project]) -> Result<()> {
        clusters.iter_mut().for_each(Cluster::clear);

        for point in points {
            let mut closest = 0;
            let mut closest_distance = f64::MAX;

            for (j, mean) in means.iter().enumerate() {
                let distance = euclidean(&point.data, mean)?;
                if distance < closest_distance {
                    closest = j;
                    closest_distance = distance;
                }
            }

            clusters[closest].add_point(point.clone());
        }

        Ok(())
    }

    fn update_step(clusters: &[Cluster]) -> Result<Vec<Point>> {
        clusters
            .iter()
            .filter(|c| !c.is_empty())
            .map(Cluster::mean)
            .collect()
    }

    fn converged(means: &[Point], previous: &[Point]) -> bool {
        means.len() == previous.len() && means.iter().zip(previous).all(|(a, b)| a == b)
    }
}

impl<I: MeanInitialiser> Clustering for KMeansClustering<I> {
    fn run<R: Rng + ?Sized>(&self, points: &[Project], k: usize, rng: &mut R) -> Result<Vec<Cluster>> {
        if k == 0 {
            return Err(ProvidenceError::InvalidArgument(
                "At least one cluster must be requested".to_string(),
            ));
        }

        let mut clusters = vec![Cluster::new(); k];
        let mut means = self.initialiser.initialise_means(k, points, rng)?;

        for iteration in 1..=self.max_iterations {
            Self::assignment_step(&mut clusters, &means, points)?;
            let updated = Self::update_step(&clusters)?;

            if Self::converged(&updated, &means) {
                log::debug!("k-means with k={} converged after {} iterations", k, iteration);
                return Ok(clusters);
            }

            means = updated;
        }

        log::warn!(
            "k-means with k={} stopped at the {} iteration cap before converging",
            k,
            self.max_iterations
        );
        Ok(clusters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::clustering::initialisers::{ForgyInitialisation, PlusPlusInitialisation};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_groups() -> Vec<Project> {
        vec![
            Project::new(0, vec![0.0, 0.0]),
            Project::new(1, vec![0.5, 0.0]),
            Project::new(2, vec![0.0, 0.5]),
            Project::new(3, vec![50.0, 50.0]),
            Project::new(4, vec![50.5, 50.0]),
            Project::new(5, vec![50.0, 50.5]),
        ]
    }

    #[test]
    fn test_forgy_returns_k_slots_holding_every_point() {
        let points = two_groups();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let clustering = KMeansClustering::new(ForgyInitialisation);

            for k in 1..=points.len() {
                let clusters = clustering.run(&points, k, &mut rng).unwrap();
                assert_eq!(clusters.len(), k);
                let total: usize = clusters.iter().map(Cluster::len).sum();
                assert_eq!(total, points.len());
            }
        }
    }

    #[test]
    fn test_plus_plus_separates_groups() {
        let points = two_groups();
        let mut rng = StdRng::seed_from_u64(42);
        let clustering = KMeansClustering::new(PlusPlusInitialisation);

        let clusters = clustering.run(&points, 2, &mut rng).unwrap();

        let mut sizes: Vec<usize> = clusters.iter().map(Cluster::len).collect();
        sizes.sort();
        assert_eq!(sizes, vec![3, 3]);
        for cluster in &clusters {
            let near_origin = cluster.points()[0].data[0] < 25.0;
            assert!(cluster.points().iter().all(|p| (p.data[0] < 25.0) == near_origin));
        }
    }

    #[test]
    fn test_too_many_clusters_is_rejected() {
        let points = two_groups();
        let mut rng = StdRng::seed_from_u64(1);
        let clustering = KMeansClustering::new(PlusPlusInitialisation);

        assert!(matches!(
            clustering.run(&points, 7, &mut rng),
            Err(ProvidenceError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn test_zero_clusters_is_rejected() {
        let points = two_groups();
        let mut rng = StdRng::seed_from_u64(1);
        let clustering = KMeansClustering::new(ForgyInitialisation);

        assert!(clustering.run(&points, 0, &mut rng).is_err());
    }

    #[test]
    fn test_iteration_cap_still_returns_partition() {
        let points = two_groups();
        let mut rng = StdRng::seed_from_u64(5);
        let clustering = KMeansClustering::new(ForgyInitialisation).with_max_iterations(1);

        let clusters = clustering.run(&points, 3, &mut rng).unwrap();
        let total: usize = clusters.iter().map(Cluster::len).sum();
        assert_eq!(total, 6);
    }
}
