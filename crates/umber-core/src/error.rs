//! Error types for the Umber toning pipeline.
//!
//! Errors are organized by stage so every message carries the file path and
//! the stage that detected the problem. Only discovery failures abort a run;
//! decode, transform, and persist errors are contained per item.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Umber operations.
#[derive(Error, Debug)]
pub enum UmberError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stage task panicked or was cancelled before returning its counters
    #[error("Stage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize configuration to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input enumeration failed — fatal, the run never starts
    #[error("Discovery error for {path}: {message}")]
    Discovery { path: PathBuf, message: String },

    /// Image decoding failed — recovered per item
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// A transform rejected the in-memory buffer — recovered per item
    #[error("Transform error for {path}: {message}")]
    Transform { path: PathBuf, message: String },

    /// Encoding or writing the output file failed — recovered per item
    #[error("Persist error for {path}: {message}")]
    Persist { path: PathBuf, message: String },

    /// Output directory could not be created — logged once up front; every
    /// item then fails at its own persist step and is counted there
    #[error("Cannot create output directory {path}: {message}")]
    OutputDir { path: PathBuf, message: String },
}

impl PipelineError {
    /// Whether this error aborts the whole run rather than one item.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::Discovery { .. })
    }
}

/// Convenience type alias for Umber results.
pub type Result<T> = std::result::Result<T, UmberError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
