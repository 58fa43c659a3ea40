// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// A selector lookup that produced no text. Always recovered to the sentinel.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("No element matches selector '{selector}'")]
    NoMatch { selector: String },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("YAML serialization failed: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("Field '{field}' contains a character YAML cannot carry: {character:?}")]
    UnsupportedCharacter { field: &'static str, character: char },

    #[error("Failed to save {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Execution context '{0}' is closed")]
    ContextClosed(String),

    #[error("No listener for '{action}' in context '{context}'")]
    NoListener {
        context: String,
        action: &'static str,
    },

    #[error("Malformed message: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No active tab found")]
    NoActiveTab,

    #[error(transparent)]
    Messaging(#[from] MessagingError),
}
