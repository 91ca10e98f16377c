/// Unified error type for pathlink
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Scanning errors
    #[error("Cannot read pipeline directory {path:?}: {reason}")]
    ScanRoot { path: PathBuf, reason: String },

    #[error("Invalid root marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    // Mapping errors
    #[error("Invalid mapping file {path:?}: {reason}")]
    Mapping { path: PathBuf, reason: String },

    #[error("Invalid target for '{logical}': {reason}")]
    InvalidTarget { logical: String, reason: String },

    #[error("Invalid logical path: {0}")]
    InvalidLogical(String),

    // Prompting errors
    #[error("Input closed while waiting for a target for '{0}'")]
    PromptAborted(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

/// Result type alias using LinkError
pub type Result<T> = std::result::Result<T, LinkError>;

impl LinkError {
    /// Create a scan root error
    pub fn scan_root(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ScanRoot {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a mapping file error
    pub fn mapping(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Mapping {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid target error
    pub fn invalid_target(logical: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            logical: logical.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
