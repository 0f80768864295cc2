//! Common test utilities and helpers

#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};
use std::sync::Arc;
use utilkit::queue::{Message, Priority, PriorityBoundedQueue};

/// Run the built binary with colors disabled and an explicit config file
pub fn run_utilkit(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_utilkit"))
        .arg("--no-color")
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to run utilkit binary")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn message(id: &str, priority: Priority) -> Message<String> {
    Message::new(id, format!("content of {}", id)).with_priority(priority)
}

/// Pop everything currently queued, completing each message
pub fn drain_ids(queue: &Arc<PriorityBoundedQueue<String>>) -> Vec<String> {
    let mut ids = Vec::new();
    while let Some(message) = queue.try_get() {
        ids.push(message.id().to_string());
        queue.mark_done().expect("mark_done after get");
    }
    ids
}
