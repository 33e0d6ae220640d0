use anyhow::{Context, Result};
use log::info;
use providence::config::ConfigManager;
use providence::data::{DataSet, Feature, TrainingData};
use providence::engines::clustering::OutlierDetector;
use providence::engines::evolution::{AlgorithmRunner, ParetoEnsemble, Rhadmoea, SeeProblem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::sync::Arc;

const PROJECTS: usize = 60;

/// Effort grows slightly sub-linearly with size and linearly with team size, with 15% noise.
fn synthetic_projects<R: Rng>(rng: &mut R) -> Result<DataSet> {
    let noise = Normal::<f64>::new(1.0, 0.15)?;
    let mut size = Vec::with_capacity(PROJECTS + 2);
    let mut team = Vec::with_capacity(PROJECTS + 2);
    let mut effort = Vec::with_capacity(PROJECTS + 2);

    for _ in 0..PROJECTS {
        let s: f64 = rng.gen_range(50.0..1000.0);
        let t: f64 = rng.gen_range(2.0..20.0_f64).round();
        size.push(s);
        team.push(t);
        effort.push((3.0 * s.powf(0.9) + 40.0 * t) * noise.sample(&mut *rng).max(0.1));
    }

    // Two projects nothing like the rest
    size.extend([4800.0, 5200.0]);
    team.extend([1.0, 90.0]);
    effort.extend([120.0, 95000.0]);

    Ok(DataSet::from_features(vec![
        Feature::new("size", size),
        Feature::new("team", team),
        Feature::new("effort", effort),
    ])?)
}

fn main() -> Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    match std::env::args().nth(1) {
        Some(path) => manager
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => manager.load_from_env()?,
    }
    let config = manager.get();

    let mut rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut data_set = synthetic_projects(&mut rng)?;
    if config.data.remove_outliers {
        let outliers = OutlierDetector::from_config(&config.clustering)
            .get_outliers(data_set.projects(), &mut rng)?;
        info!("Removing {} outlying projects", outliers.len());
        data_set.remove_projects(&outliers)?;
    }
    if config.data.normalise {
        data_set.normalise()?;
    }

    let output_names: Vec<&str> = config.data.output_columns.iter().map(String::as_str).collect();
    let mut training_data = TrainingData::with_output_names(&data_set, &output_names)?;
    let (training, testing) = training_data.split_of_ratio(config.data.training_ratio, &mut rng)?;
    info!("Training on {} projects, testing on {}", training.len(), testing.len());

    let metrics = config.metrics.build();
    let problem = Arc::new(SeeProblem::with_network(training, metrics.clone(), &config.network)?);
    let algorithm = Rhadmoea::from_config(problem, &config.evolution)?;
    let mut runner = AlgorithmRunner::new(algorithm);

    runner.add_finished_listener(|snapshot| {
        info!(
            "Generation {}: {} non-dominated of {}",
            snapshot.generation(),
            snapshot.non_dominated().len(),
            snapshot.len()
        );
    })?;

    let objectives = metrics.len();
    let stages = [
        config.evolution.aspiration_point.clone(),
        Some(vec![0.2; objectives]),
        Some(vec![0.4; objectives]),
    ];
    for aspiration_point in stages {
        info!("Aspiration point: {:?}", aspiration_point);
        runner.with_algorithm(|algorithm| algorithm.set_aspiration_point(aspiration_point))??;
        runner.run_for(config.evolution.generations)?;
    }

    let snapshot = runner
        .latest_snapshot()?
        .context("The runner finished without producing a population")?;
    let ensemble = ParetoEnsemble::from_front(&snapshot.non_dominated())?;
    for metric in &metrics {
        info!(
            "Ensemble {} on the testing sample: {:.4}",
            metric.name(),
            ensemble.error(&testing, metric.as_ref())?
        );
    }

    Ok(())
}
