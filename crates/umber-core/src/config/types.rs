//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of transform workers. 0 means auto-detect from the host's
    /// available parallelism at run construction.
    pub parallel_workers: usize,

    /// Supported input extensions (case-insensitive)
    pub supported_formats: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 0,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
            ],
        }
    }
}

impl ProcessingConfig {
    /// Resolve the configured worker count, falling back to the host's
    /// available parallelism when set to 0. Never returns 0.
    pub fn resolve_workers(&self) -> usize {
        if self.parallel_workers > 0 {
            return self.parallel_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Pipeline settings for queue sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Capacity of each intermediate queue, per transform worker.
    /// A full queue blocks the sender — that is backpressure, not an error.
    pub buffer_per_worker: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            buffer_per_worker: 1,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JPEG encode quality (1-100)
    pub jpeg_quality: u8,

    /// Where the sequential run writes its results
    pub sequential_dir: PathBuf,

    /// Where the parallel run writes its results.
    /// Kept distinct from `sequential_dir` so the two trees can be compared.
    pub parallel_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 90,
            sequential_dir: PathBuf::from("output_sequential"),
            parallel_dir: PathBuf::from("output_parallel"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
