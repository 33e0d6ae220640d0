use providence::config::EvolutionConfig;
use providence::data::TrainingRow;
use providence::engines::evolution::{
    AlgorithmRunner, PopulationSnapshot, RunLength, RunState, Rhadmoea, SeeProblem,
};
use providence::engines::metrics::ErrorMetricKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn runner() -> AlgorithmRunner<Rhadmoea> {
    let rows = (1..=10)
        .map(|i| {
            let x = i as f64 / 10.0;
            TrainingRow::from_parts(vec![x], vec![3.0 * x + 1.0]).unwrap()
        })
        .collect();
    let metrics = vec![ErrorMetricKind::Mmre.build(), ErrorMetricKind::Mbre.build()];
    let problem = SeeProblem::new(rows, metrics).unwrap();
    let config = EvolutionConfig {
        population_size: 8,
        seed: Some(9),
        ..EvolutionConfig::default()
    };

    AlgorithmRunner::new(Rhadmoea::from_config(Arc::new(problem), &config).unwrap())
}

fn counter(runner: &AlgorithmRunner<Rhadmoea>, finished: bool) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    let listener = move |_: &Arc<PopulationSnapshot>| {
        inner.fetch_add(1, Ordering::SeqCst);
    };
    if finished {
        runner.add_finished_listener(listener).unwrap();
    } else {
        runner.add_update_listener(listener).unwrap();
    }
    count
}

#[test]
fn test_paused_start_waits_for_continue() {
    let mut runner = runner();
    let updates = counter(&runner, false);

    runner.start(RunLength::Generations(4), false, true).unwrap();
    thread::sleep(Duration::from_millis(100));
    assert_eq!(updates.load(Ordering::SeqCst), 0);
    assert_eq!(runner.state().unwrap(), RunState::Paused);

    runner.continue_run().unwrap();
    runner.join().unwrap();

    assert_eq!(updates.load(Ordering::SeqCst), 4);
    assert_eq!(runner.state().unwrap(), RunState::Stopped);
}

#[test]
fn test_stop_ends_an_endless_run() {
    let mut runner = runner();
    let updates = counter(&runner, false);
    let finished = counter(&runner, true);

    runner.start(RunLength::Forever, false, false).unwrap();
    thread::sleep(Duration::from_millis(100));
    runner.stop().unwrap();
    runner.join().unwrap();

    let after_stop = updates.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(50));

    assert_eq!(updates.load(Ordering::SeqCst), after_stop);
    assert_eq!(finished.load(Ordering::SeqCst), 1);
    // The generation in flight when stop arrived completes but is never published.
    let generation = runner.generation().unwrap();
    assert!(generation == after_stop || generation == after_stop + 1);
}

#[test]
fn test_listeners_see_consecutive_generations() {
    let mut runner = runner();
    let rx = runner.subscribe().unwrap();

    runner.run_for(3).unwrap();
    runner.step().unwrap();

    let generations: Vec<usize> = rx.try_iter().map(|s| s.generation()).collect();
    assert_eq!(generations, vec![1, 2, 3, 4]);
}
