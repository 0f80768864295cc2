//! Subcommand implementations
//!
//! Each handler does the work and returns printable results; `startup`
//! owns the terminal output.

use crate::app::cli::{ConfigAction, NormalizeMode, QueueDemoArgs, RunArgs, TextAction};
use crate::app::error::{AppError, AppResult};
use crate::app::settings::Settings;
use crate::document::{parse_assignments, ConfigDocument};
use crate::queue::{Priority, PriorityBoundedQueue, QueueResult, QueueStats};
use crate::runner::{
    run_commands, timed_async, CommandOutput, CommandSpec, RunnerConfig, RunnerResult,
};
use crate::text;
use serde_json::Value;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use strum::IntoEnumIterator;

const BACKPRESSURE_PAUSE: Duration = Duration::from_millis(1);

/// Messages seen by one consumer thread, in delivery order
#[derive(Debug, Clone)]
pub struct ConsumerReport {
    pub consumer_id: String,
    pub received: Vec<(String, Priority)>,
}

impl ConsumerReport {
    pub fn count_for(&self, priority: Priority) -> usize {
        self.received.iter().filter(|(_, p)| *p == priority).count()
    }
}

#[derive(Debug, Clone)]
pub struct DemoReport {
    pub consumers: Vec<ConsumerReport>,
    pub stats: QueueStats,
    /// Publish attempts refused by a full queue and retried
    pub backpressure_retries: u64,
    pub elapsed: Duration,
}

impl DemoReport {
    pub fn total_received(&self) -> usize {
        self.consumers.iter().map(|c| c.received.len()).sum()
    }
}

fn join_worker<R>(handle: thread::JoinHandle<R>, name: String) -> AppResult<R> {
    handle.join().map_err(|_| AppError::WorkerPanicked { name })
}

/// Publish from several producer threads while consumer threads drain
///
/// Producers cycle through the priorities and retry when the queue pushes
/// back. Once every message has been published and completed the queue is
/// closed, which releases the consumers.
pub fn queue_demo(settings: &Settings, args: &QueueDemoArgs) -> AppResult<DemoReport> {
    let capacity = args.capacity.unwrap_or(settings.queue_capacity);
    let queue = Arc::new(PriorityBoundedQueue::<String>::new(capacity)?);
    let start = Instant::now();

    log::info!(
        "Queue demo: {} producers x {} messages, {} consumers, capacity {}",
        args.producers,
        args.messages,
        args.consumers,
        capacity
    );

    let consumers: Vec<_> = (0..args.consumers)
        .map(|n| {
            let consumer = queue.create_consumer(format!("consumer-{}", n));
            thread::spawn(move || -> QueueResult<ConsumerReport> {
                let mut received = Vec::new();
                while let Some(delivery) = consumer.receive(None)? {
                    let message = delivery.complete()?;
                    received.push((message.id().to_string(), message.priority()));
                }
                Ok(ConsumerReport {
                    consumer_id: consumer.consumer_id().to_string(),
                    received,
                })
            })
        })
        .collect();

    let producers: Vec<_> = (0..args.producers)
        .map(|n| {
            let publisher = queue.create_publisher(format!("producer-{}", n));
            let messages = args.messages;
            thread::spawn(move || -> QueueResult<u64> {
                let mut retries = 0;
                for (i, priority) in Priority::iter().cycle().take(messages).enumerate() {
                    let id = format!("{}-{}", publisher.producer_id(), i);
                    let content = format!("payload {} from {}", i, publisher.producer_id());
                    while !publisher.publish_with(id.clone(), content.clone(), priority)? {
                        retries += 1;
                        thread::sleep(BACKPRESSURE_PAUSE);
                    }
                }
                Ok(retries)
            })
        })
        .collect();

    let mut backpressure_retries = 0;
    for (n, handle) in producers.into_iter().enumerate() {
        backpressure_retries += join_worker(handle, format!("producer-{}", n))??;
    }

    queue.wait_all();
    queue.close();

    let mut reports = Vec::with_capacity(consumers.len());
    for (n, handle) in consumers.into_iter().enumerate() {
        reports.push(join_worker(handle, format!("consumer-{}", n))??);
    }

    let report = DemoReport {
        consumers: reports,
        stats: queue.stats(),
        backpressure_retries,
        elapsed: start.elapsed(),
    };
    log::info!(
        "Queue demo delivered {} messages in {:.2}s ({} backpressure retries)",
        report.total_received(),
        report.elapsed.as_secs_f64(),
        report.backpressure_retries
    );
    Ok(report)
}

/// Apply a `config` action and return the text to print
pub fn config_command(document: &mut ConfigDocument, action: &ConfigAction) -> AppResult<String> {
    match action {
        ConfigAction::Show => Ok(pretty(&Value::Object(document.as_map().clone()))),
        ConfigAction::Get { key } => document
            .get_path(key)
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => pretty(other),
            })
            .ok_or_else(|| AppError::MissingKey { key: key.clone() }),
        ConfigAction::Set { assignments } => {
            let parsed = parse_assignments(assignments);
            let count = parsed.len();
            for (key, value) in parsed {
                log::debug!("Setting {} = {}", key, value);
                document.set_path(&key, value)?;
            }
            document.save()?;
            let location = document
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            Ok(format!("Saved {} key(s) to {}", count, location))
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Parsed commands and their results, in the same order
pub struct RunReport {
    pub specs: Vec<CommandSpec>,
    pub results: Vec<RunnerResult<CommandOutput>>,
}

impl RunReport {
    pub fn failures(&self) -> usize {
        self.results
            .iter()
            .filter(|r| !matches!(r, Ok(output) if output.success))
            .count()
    }
}

/// Split each command line on whitespace and run the batch
pub async fn run_command(settings: &Settings, args: &RunArgs) -> AppResult<RunReport> {
    let config = match args.workers.or(settings.runner_workers) {
        Some(workers) => RunnerConfig::with_workers(workers)?,
        None => RunnerConfig::default(),
    };
    let specs = args
        .commands
        .iter()
        .map(|line| CommandSpec::from_argv(line.split_whitespace()))
        .collect::<RunnerResult<Vec<_>>>()?;

    let label = format!("{} command(s)", specs.len());
    let results = timed_async(&label, run_commands(&config, specs.clone())).await;
    Ok(RunReport { specs, results })
}

/// Apply a `text` action to `input` (already joined) and return the lines to print
pub fn text_command(action: &TextAction, input: &str) -> Vec<String> {
    match action {
        TextAction::Dates { .. } => text::find_dates(input),
        TextAction::Normalize { mode, replace, .. } => vec![match mode {
            NormalizeMode::Collapse => text::collapse_blanks(input),
            NormalizeMode::Strip => text::strip_whitespace(input, replace),
        }],
        TextAction::Similarity { first, second } => {
            vec![format!("{:.4}", text::similarity(first, second))]
        }
        TextAction::Classify { .. } => Vec::new(),
        TextAction::Escape { .. } => vec![text::escape_code_points(input)],
    }
}

/// Positional words of a text action, if it takes free text
pub fn text_words(action: &TextAction) -> Option<&[String]> {
    match action {
        TextAction::Dates { text }
        | TextAction::Normalize { text, .. }
        | TextAction::Classify { text }
        | TextAction::Escape { text } => Some(text),
        TextAction::Similarity { .. } => None,
    }
}
