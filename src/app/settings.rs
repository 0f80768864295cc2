//! Settings resolved from the configuration document
//!
//! Recognized keys: `queue.capacity`, `runner.workers` and `log.level`.
//! Command-line flags take precedence over every value read here.

use crate::app::error::AppResult;
use crate::document::ConfigDocument;
use crate::queue::DEFAULT_CAPACITY;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

pub const QUEUE_CAPACITY_KEY: &str = "queue.capacity";
pub const RUNNER_WORKERS_KEY: &str = "runner.workers";
pub const LOG_LEVEL_KEY: &str = "log.level";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub queue_capacity: usize,
    pub runner_workers: Option<usize>,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_CAPACITY,
            runner_workers: None,
            log_level: None,
        }
    }
}

impl Settings {
    pub fn from_document(document: &ConfigDocument) -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            queue_capacity: document
                .get_as(QUEUE_CAPACITY_KEY)?
                .unwrap_or(defaults.queue_capacity),
            runner_workers: document.get_as(RUNNER_WORKERS_KEY)?,
            log_level: document.get_as(LOG_LEVEL_KEY)?,
        })
    }
}

/// Contents written to a newly created config file
pub fn default_document() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("queue".to_string(), json!({ "capacity": DEFAULT_CAPACITY }));
    defaults
}

/// `<config dir>/utilkit/config.json`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("utilkit").join("config.json"))
}

/// Open the configuration document
///
/// An explicit path is always opened (and created when missing). The
/// default location is only created when `create` is set; otherwise a
/// missing default file yields an in-memory document holding the defaults.
pub fn load_document(explicit: Option<&Path>, create: bool) -> AppResult<ConfigDocument> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|path| create || path.is_file()),
    };

    match path {
        Some(path) => {
            log::debug!("Using config file {}", path.display());
            Ok(ConfigDocument::open(path, default_document())?)
        }
        None => {
            log::debug!("No config file, using built-in defaults");
            let mut document = ConfigDocument::in_memory();
            for (key, value) in default_document() {
                document.set(&key, value)?;
            }
            Ok(document)
        }
    }
}
