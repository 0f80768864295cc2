//! JSON configuration documents
//!
//! Provides a key/value document backed by a JSON file, with typed access
//! through serde, dotted-path access into nested objects, and a parser for
//! `key=value` command-line assignments.

mod config;
mod error;

pub use config::{parse_assignments, ConfigDocument};
pub use error::{DocumentError, DocumentResult};
