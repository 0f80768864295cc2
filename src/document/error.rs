//! Document Error Types

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Value for '{key}' could not be converted: {source}")]
    Conversion {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Expected a JSON object at '{key}'")]
    NotAnObject { key: String },

    #[error("Config file {path} does not contain a JSON object")]
    RootNotAnObject { path: PathBuf },

    #[error("Config document has no backing file")]
    NoBackingFile,
}

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

impl crate::core::error_handling::ContextualError for DocumentError {
    fn user_message(&self) -> Option<&str> {
        match self {
            DocumentError::Parse { .. } => Some("Config file is not valid JSON"),
            DocumentError::RootNotAnObject { .. } => {
                Some("Config file must contain a JSON object")
            }
            DocumentError::NotAnObject { .. } => {
                Some("Config file must contain a JSON object at the requested key")
            }
            _ => None,
        }
    }
}
