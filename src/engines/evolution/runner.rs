use super::algorithm::EvolutionaryAlgorithm;
use super::snapshot::PopulationSnapshot;
use super::solution::Solution;
use crate::error::{ProvidenceError, Result};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

/// Receives every snapshot the runner publishes.
pub type SnapshotListener = Arc<dyn Fn(&Arc<PopulationSnapshot>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Paused,
    Running,
    Stopped,
}

/// How many generations a call to [`AlgorithmRunner::start`] runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLength {
    Forever,
    Generations(usize),
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| ProvidenceError::Runner("A runner lock was poisoned".to_string()))
}

/// Cloneable pause/continue/stop control for a running [`AlgorithmRunner`].
///
/// Requests take effect at the next generation boundary.
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    control: Arc<(Mutex<RunState>, Condvar)>,
}

impl RunnerHandle {
    fn new() -> Self {
        Self {
            control: Arc::new((Mutex::new(RunState::Paused), Condvar::new())),
        }
    }

    pub fn state(&self) -> Result<RunState> {
        Ok(*lock(&self.control.0)?)
    }

    pub fn pause(&self) -> Result<()> {
        self.transition(|state| match state {
            RunState::Running => RunState::Paused,
            other => other,
        })
    }

    pub fn continue_run(&self) -> Result<()> {
        self.transition(|state| match state {
            RunState::Paused => RunState::Running,
            other => other,
        })
    }

    pub fn stop(&self) -> Result<()> {
        self.transition(|_| RunState::Stopped)
    }

    fn set(&self, state: RunState) -> Result<()> {
        self.transition(|_| state)
    }

    fn transition(&self, f: impl FnOnce(RunState) -> RunState) -> Result<()> {
        let (state, changed) = &*self.control;
        let mut guard = lock(state)?;
        *guard = f(*guard);
        changed.notify_all();
        Ok(())
    }

    /// Blocks while paused and returns the state that ended the wait.
    fn wait_while_paused(&self) -> Result<RunState> {
        let (state, changed) = &*self.control;
        let guard = changed
            .wait_while(lock(state)?, |s| *s == RunState::Paused)
            .map_err(|_| ProvidenceError::Runner("A runner lock was poisoned".to_string()))?;
        Ok(*guard)
    }
}

#[derive(Default)]
struct Listeners {
    update: Vec<SnapshotListener>,
    finished: Vec<SnapshotListener>,
}

struct RunnerCore<A> {
    algorithm: A,
    population: Option<Vec<Solution>>,
    generation: usize,
    latest: Option<Arc<PopulationSnapshot>>,
}

impl<A: EvolutionaryAlgorithm> RunnerCore<A> {
    /// Creates and evaluates generation 0 if there is no population yet.
    fn ensure_initialised(&mut self) -> Result<Arc<PopulationSnapshot>> {
        if let (Some(_), Some(latest)) = (&self.population, &self.latest) {
            return Ok(Arc::clone(latest));
        }

        let population = self.algorithm.initialise()?;
        self.generation = 0;
        Ok(self.commit(population))
    }

    fn advance(&mut self) -> Result<Arc<PopulationSnapshot>> {
        self.ensure_initialised()?;
        let next = match &self.population {
            Some(population) => self.algorithm.step(population)?,
            None => return Err(ProvidenceError::Runner("No population to evolve".to_string())),
        };

        self.generation += 1;
        Ok(self.commit(next))
    }

    fn commit(&mut self, population: Vec<Solution>) -> Arc<PopulationSnapshot> {
        let snapshot = Arc::new(PopulationSnapshot::new(self.generation, population.clone()));
        self.population = Some(population);
        self.latest = Some(Arc::clone(&snapshot));
        snapshot
    }
}

struct Shared<A> {
    core: Mutex<RunnerCore<A>>,
    listeners: Mutex<Listeners>,
    handle: RunnerHandle,
}

impl<A: EvolutionaryAlgorithm> Shared<A> {
    fn notify(&self, snapshot: &Arc<PopulationSnapshot>, finished: bool) -> Result<()> {
        let listeners = {
            let listeners = lock(&self.listeners)?;
            if finished {
                listeners.finished.clone()
            } else {
                listeners.update.clone()
            }
        };

        for listener in listeners {
            listener(snapshot);
        }
        Ok(())
    }

    fn run(&self, length: RunLength) -> Result<()> {
        let outcome = self.run_generations(length);

        // Finished listeners hear about every run exactly once, even one that failed.
        let stopped = self.handle.stop();
        let latest = lock(&self.core)?.latest.clone();
        if let Some(snapshot) = latest {
            self.notify(&snapshot, true)?;
        }

        outcome.and(stopped)
    }

    fn run_generations(&self, length: RunLength) -> Result<()> {
        let mut completed = 0;

        loop {
            if let RunLength::Generations(limit) = length {
                if completed >= limit {
                    return Ok(());
                }
            }

            if self.handle.wait_while_paused()? == RunState::Stopped {
                return Ok(());
            }

            let snapshot = lock(&self.core)?.advance()?;
            completed += 1;

            if self.handle.state()? == RunState::Stopped {
                return Ok(());
            }

            log::debug!("Generation {} complete", snapshot.generation());
            self.notify(&snapshot, false)?;
        }
    }
}

/// Drives an [`EvolutionaryAlgorithm`] generation by generation and publishes snapshots.
///
/// A run goes from paused to running to stopped. The population persists between runs, so a
/// later `start` carries on from where the previous run stopped; [`AlgorithmRunner::restart`]
/// discards it.
pub struct AlgorithmRunner<A: EvolutionaryAlgorithm + 'static> {
    shared: Arc<Shared<A>>,
    worker: Option<JoinHandle<Result<()>>>,
}

impl<A: EvolutionaryAlgorithm + 'static> AlgorithmRunner<A> {
    pub fn new(algorithm: A) -> Self {
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(RunnerCore {
                    algorithm,
                    population: None,
                    generation: 0,
                    latest: None,
                }),
                listeners: Mutex::new(Listeners::default()),
                handle: RunnerHandle::new(),
            }),
            worker: None,
        }
    }

    pub fn handle(&self) -> RunnerHandle {
        self.shared.handle.clone()
    }

    pub fn state(&self) -> Result<RunState> {
        self.shared.handle.state()
    }

    pub fn pause(&self) -> Result<()> {
        self.shared.handle.pause()
    }

    pub fn continue_run(&self) -> Result<()> {
        self.shared.handle.continue_run()
    }

    pub fn stop(&self) -> Result<()> {
        self.shared.handle.stop()
    }

    pub fn add_update_listener<F>(&self, listener: F) -> Result<()>
    where
        F: Fn(&Arc<PopulationSnapshot>) + Send + Sync + 'static,
    {
        lock(&self.shared.listeners)?.update.push(Arc::new(listener));
        Ok(())
    }

    pub fn add_finished_listener<F>(&self, listener: F) -> Result<()>
    where
        F: Fn(&Arc<PopulationSnapshot>) + Send + Sync + 'static,
    {
        lock(&self.shared.listeners)?.finished.push(Arc::new(listener));
        Ok(())
    }

    /// Channel fed with every update snapshot.
    pub fn subscribe(&self) -> Result<Receiver<Arc<PopulationSnapshot>>> {
        let (tx, rx) = channel();
        let tx = Mutex::new(tx);
        self.add_update_listener(move |snapshot| {
            if let Ok(tx) = tx.lock() {
                let _ = tx.send(Arc::clone(snapshot));
            }
        })?;
        Ok(rx)
    }

    /// Begins a run. The starting population is created here if there is none, without
    /// notifying listeners.
    ///
    /// A synchronous run returns once it stops; otherwise the run continues on a worker thread
    /// and [`AlgorithmRunner::join`] waits for it. A synchronous run cannot start paused, since
    /// nothing could continue it while the caller is blocked.
    pub fn start(&mut self, length: RunLength, synchronous: bool, start_paused: bool) -> Result<()> {
        if synchronous && start_paused {
            return Err(ProvidenceError::Runner(
                "A synchronous run cannot start paused".to_string(),
            ));
        }
        self.reap_finished_worker()?;
        if self.worker.is_some() {
            return Err(ProvidenceError::Runner("The runner is already running".to_string()));
        }

        lock(&self.shared.core)?.ensure_initialised()?;
        self.shared.handle.set(if start_paused {
            RunState::Paused
        } else {
            RunState::Running
        })?;

        log::info!("Starting run of {:?} (synchronous: {})", length, synchronous);

        if synchronous {
            return self.shared.run(length);
        }

        let shared = Arc::clone(&self.shared);
        let worker = thread::Builder::new()
            .name("algorithm-runner".to_string())
            .spawn(move || {
                let outcome = shared.run(length);
                if let Err(e) = &outcome {
                    log::error!("Background run failed: {}", e);
                }
                outcome
            })
            .map_err(|e| ProvidenceError::Runner(format!("Failed to spawn runner thread: {}", e)))?;

        self.worker = Some(worker);
        Ok(())
    }

    /// Runs `generations` generations on the calling thread.
    pub fn run_for(&mut self, generations: usize) -> Result<()> {
        self.start(RunLength::Generations(generations), true, false)
    }

    /// Advances a single generation on the calling thread and notifies update listeners.
    pub fn step(&mut self) -> Result<Arc<PopulationSnapshot>> {
        self.reap_finished_worker()?;
        if self.worker.is_some() {
            return Err(ProvidenceError::Runner(
                "Cannot step while a run is in progress".to_string(),
            ));
        }

        let snapshot = lock(&self.shared.core)?.advance()?;
        self.shared.notify(&snapshot, false)?;
        Ok(snapshot)
    }

    /// Waits for an asynchronous run to end and returns its outcome.
    pub fn join(&mut self) -> Result<()> {
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .map_err(|_| ProvidenceError::Runner("The runner thread panicked".to_string()))?,
            None => Ok(()),
        }
    }

    /// Stops any run, waits for it, and discards the population so the next start begins again
    /// from generation 0.
    pub fn restart(&mut self) -> Result<()> {
        self.stop()?;
        self.join()?;

        let mut core = lock(&self.shared.core)?;
        core.population = None;
        core.latest = None;
        core.generation = 0;
        Ok(())
    }

    pub fn generation(&self) -> Result<usize> {
        Ok(lock(&self.shared.core)?.generation)
    }

    pub fn latest_snapshot(&self) -> Result<Option<Arc<PopulationSnapshot>>> {
        Ok(lock(&self.shared.core)?.latest.clone())
    }

    /// Runs `f` against the algorithm between generations, e.g. to move the aspiration point.
    pub fn with_algorithm<T>(&self, f: impl FnOnce(&mut A) -> T) -> Result<T> {
        let mut core = lock(&self.shared.core)?;
        Ok(f(&mut core.algorithm))
    }

    fn reap_finished_worker(&mut self) -> Result<()> {
        if self.worker.as_ref().is_some_and(JoinHandle::is_finished) {
            return self.join();
        }
        Ok(())
    }
}

impl<A: EvolutionaryAlgorithm + 'static> Drop for AlgorithmRunner<A> {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
