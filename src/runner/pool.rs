//! Bounded worker pool for batch execution
//!
//! Tasks are spawned onto a tokio `JoinSet`; a `Semaphore` with one permit
//! per worker bounds how many run at once. Results are slotted by input
//! index, so output order always matches input order regardless of
//! completion order.

use crate::runner::command::{CommandOutput, CommandSpec};
use crate::runner::error::{RunnerError, RunnerResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

const FALLBACK_WORKERS: usize = 4;

/// Worker pool settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    workers: usize,
}

impl RunnerConfig {
    pub fn with_workers(workers: usize) -> RunnerResult<Self> {
        if workers == 0 {
            return Err(RunnerError::InvalidWorkers { workers });
        }
        Ok(Self { workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for RunnerConfig {
    /// One worker per available CPU
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(FALLBACK_WORKERS);
        Self { workers }
    }
}

/// Run every command as a child process, at most `workers` at a time
///
/// A command that cannot be started occupies its own slot as
/// [`RunnerError::Spawn`]; the other commands are unaffected.
pub async fn run_commands(
    config: &RunnerConfig,
    specs: Vec<CommandSpec>,
) -> Vec<RunnerResult<CommandOutput>> {
    let count = specs.len();
    let semaphore = Arc::new(Semaphore::new(config.workers));
    let mut tasks = JoinSet::new();

    log::debug!("Running {} commands on {} workers", count, config.workers);

    for (index, spec) in specs.into_iter().enumerate() {
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            (index, spec.execute().await)
        });
    }

    let mut slots: Vec<Option<RunnerResult<CommandOutput>>> = (0..count).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(e) => log::error!("Command task failed: {}", e),
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.unwrap_or(Err(RunnerError::TaskPanicked { index })))
        .collect()
}

/// Apply `f` to every argument on blocking worker threads
///
/// Returns the results in input order, or the first
/// [`RunnerError::TaskPanicked`] observed if any call panicked.
pub async fn run_calls<F, A, R>(config: &RunnerConfig, f: F, args: Vec<A>) -> RunnerResult<Vec<R>>
where
    F: Fn(A) -> R + Send + Sync + 'static,
    A: Send + 'static,
    R: Send + 'static,
{
    let count = args.len();
    let f = Arc::new(f);
    let semaphore = Arc::new(Semaphore::new(config.workers));
    let mut tasks = JoinSet::new();

    log::debug!("Running {} calls on {} workers", count, config.workers);

    for (index, arg) in args.into_iter().enumerate() {
        let f = Arc::clone(&f);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            let result = tokio::task::spawn_blocking(move || f(arg)).await;
            (index, result)
        });
    }

    let mut slots: Vec<Option<R>> = (0..count).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(value))) => slots[index] = Some(value),
            Ok((index, Err(e))) => {
                log::error!("Call {} failed: {}", index, e);
                return Err(RunnerError::TaskPanicked { index });
            }
            Err(e) => log::error!("Call task failed: {}", e),
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(RunnerError::TaskPanicked { index }))
        .collect()
}

/// Run `f` and log how long it took
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    log::info!("{} cost {:.2} second(s)", label, start.elapsed().as_secs_f64());
    result
}

/// Await `future` and log how long it took
pub async fn timed_async<T>(label: &str, future: impl Future<Output = T>) -> T {
    let start = Instant::now();
    let result = future.await;
    log::info!("{} cost {:.2} second(s)", label, start.elapsed().as_secs_f64());
    result
}
