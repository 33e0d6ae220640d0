//! Strategies for placing the starting centroids of k-means.

use crate::error::{ProvidenceError, Result};
use crate::types::{Point, Project};
use crate::utils::euclidean;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chooses `k` initial centroids from a set of candidate points.
pub trait MeanInitialiser {
    fn initialise_means<R: Rng + ?Sized>(
        &self,
        k: usize,
        points: &[Project],
        rng: &mut R,
    ) -> Result<Vec<Point>>;
}

/// Selects which initialiser a configured clustering uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InitialiserKind {
    Forgy,
    #[default]
    PlusPlus,
}

impl MeanInitialiser for InitialiserKind {
    fn initialise_means<R: Rng + ?Sized>(
        &self,
        k: usize,
        points: &[Project],
        rng: &mut R,
    ) -> Result<Vec<Point>> {
        match self {
            Self::Forgy => ForgyInitialisation.initialise_means(k, points, rng),
            Self::PlusPlus => PlusPlusInitialisation.initialise_means(k, points, rng),
        }
    }
}

fn check_enough_candidates(k: usize, points: &[Project]) -> Result<()> {
    if k > points.len() {
        return Err(ProvidenceError::IndexOutOfRange(format!(
            "The number of centers requested is larger than the number of candidate points. k: {} points: {}",
            k,
            points.len()
        )));
    }
    Ok(())
}

/// Forgy method: k distinct candidates picked uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForgyInitialisation;

impl MeanInitialiser for ForgyInitialisation {
    fn initialise_means<R: Rng + ?Sized>(
        &self,
        k: usize,
        points: &[Project],
        rng: &mut R,
    ) -> Result<Vec<Point>> {
        check_enough_candidates(k, points)?;

        let mut order: Vec<usize> = (0..points.len()).collect();
        order.shuffle(rng);

        Ok(order
            .into_iter()
            .take(k)
            .map(|i| points[i].data.clone())
            .collect())
    }
}

/// k-means++ seeding: the first centre is uniform, each further centre is drawn with
/// probability proportional to its (unsquared) distance to the nearest centre so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlusPlusInitialisation;

impl PlusPlusInitialisation {
    fn distance_to_nearest_center(point: &[f64], centers: &[Point]) -> Result<f64> {
        let mut nearest = f64::MAX;
        for center in centers {
            let distance = euclidean(point, center)?;
            if distance < nearest {
                nearest = distance;
            }
        }
        Ok(nearest)
    }

    /// Roulette wheel over the cumulative share of total distance.
    fn choose_center<R: Rng + ?Sized>(points: &[Project], distances: &[f64], rng: &mut R) -> Point {
        let total: f64 = distances.iter().sum();
        let target: f64 = rng.gen();

        if total > 0.0 {
            let mut cumulative = 0.0;
            for (point, distance) in points.iter().zip(distances) {
                cumulative += distance / total;
                if cumulative >= target {
                    return point.data.clone();
                }
            }
        }

        // Rounding left the wheel short of the target, or every candidate already sits on a
        // centre; fall back to the last candidate with any weight.
        points
            .iter()
            .zip(distances)
            .rev()
            .find(|(_, &d)| d > 0.0)
            .map(|(p, _)| p.data.clone())
            .unwrap_or_else(|| points[points.len() - 1].data.clone())
    }
}

impl MeanInitialiser for PlusPlusInitialisation {
    fn initialise_means<R: Rng + ?Sized>(
        &self,
        k: usize,
        points: &[Project],
        rng: &mut R,
    ) -> Result<Vec<Point>> {
        check_enough_candidates(k, points)?;

        let mut centers = Vec::with_capacity(k);
        if k == 0 {
            return Ok(centers);
        }

        let first = rng.gen_range(0..points.len());
        centers.push(points[first].data.clone());

        while centers.len() < k {
            let distances = points
                .iter()
                .map(|p| Self::distance_to_nearest_center(&p.data, &centers))
                .collect::<Result<Vec<_>>>()?;

            centers.push(Self::choose_center(points, &distances, rng));
        }

        Ok(centers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidates() -> Vec<Project> {
        (0..6)
            .map(|i| Project::new(i, vec![i as f64, (i * i) as f64]))
            .collect()
    }

    #[test]
    fn test_forgy_returns_k_distinct_candidates() {
        let points = candidates();
        let mut rng = StdRng::seed_from_u64(3);

        let means = ForgyInitialisation.initialise_means(4, &points, &mut rng).unwrap();

        assert_eq!(means.len(), 4);
        for mean in &means {
            assert!(points.iter().any(|p| &p.data == mean));
        }
        for i in 0..means.len() {
            for j in (i + 1)..means.len() {
                assert_ne!(means[i], means[j]);
            }
        }
    }

    #[test]
    fn test_forgy_rejects_too_many_centers() {
        let points = candidates();
        let mut rng = StdRng::seed_from_u64(3);

        let result = ForgyInitialisation.initialise_means(7, &points, &mut rng);
        assert!(matches!(result, Err(ProvidenceError::IndexOutOfRange(_))));
    }

    #[test]
    fn test_plus_plus_rejects_too_many_centers() {
        let points = candidates();
        let mut rng = StdRng::seed_from_u64(3);

        let result = PlusPlusInitialisation.initialise_means(10, &points, &mut rng);
        assert!(matches!(result, Err(ProvidenceError::IndexOutOfRange(_))));
    }

    #[test]
    fn test_plus_plus_spreads_centers_across_groups() {
        // Two tight groups far apart: the second centre must come from the other group.
        let mut points: Vec<Project> = (0..5).map(|i| Project::new(i, vec![0.0, i as f64 * 0.01])).collect();
        points.extend((5..10).map(|i| Project::new(i, vec![1000.0, i as f64 * 0.01])));

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let means = PlusPlusInitialisation.initialise_means(2, &points, &mut rng).unwrap();

            assert_eq!(means.len(), 2);
            assert!((means[0][0] - means[1][0]).abs() > 999.0);
        }
    }

    #[test]
    fn test_plus_plus_handles_identical_points() {
        let points: Vec<Project> = (0..4).map(|i| Project::new(i, vec![1.0, 1.0])).collect();
        let mut rng = StdRng::seed_from_u64(11);

        let means = PlusPlusInitialisation.initialise_means(3, &points, &mut rng).unwrap();
        assert_eq!(means.len(), 3);
    }
}
