//! The toning pipeline and its stages.
//!
//! - **discovery**: find image files in the input directory
//! - **decode**: load a file into an RGBA buffer
//! - **encode**: persist a toned buffer to the output directory
//! - **channel**: bounded queues coupling the stages
//! - **stages**: the load / transform / save loops
//! - **parallel**: the staged concurrent orchestrator
//! - **sequential**: the single-threaded baseline runner

pub mod channel;
pub mod decode;
pub mod discovery;
pub mod encode;
pub mod parallel;
pub mod sequential;
mod stages;

pub use discovery::FileDiscovery;
pub use parallel::ParallelPipeline;
pub use sequential::SequentialRunner;

use crate::config::Config;
use std::path::PathBuf;

/// Resolved parameters for a single run, sequential or parallel.
///
/// Immutable for the run's duration. `workers` is always > 0 after
/// resolution (a configured 0 means auto-detect).
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Transform pool size
    pub workers: usize,

    /// Intermediate queue capacity per worker
    pub buffer_per_worker: usize,

    /// Where this run writes its results
    pub output_dir: PathBuf,

    /// JPEG encode quality
    pub jpeg_quality: u8,
}

impl RunOptions {
    /// Options for the sequential baseline run.
    pub fn sequential(config: &Config) -> Self {
        Self::with_output(config, config.output.sequential_dir.clone())
    }

    /// Options for the parallel run.
    pub fn parallel(config: &Config) -> Self {
        Self::with_output(config, config.output.parallel_dir.clone())
    }

    fn with_output(config: &Config, output_dir: PathBuf) -> Self {
        Self {
            workers: config.processing.resolve_workers(),
            buffer_per_worker: config.pipeline.buffer_per_worker,
            output_dir,
            jpeg_quality: config.output.jpeg_quality,
        }
    }
}
