//! Umber Core - batch image toning pipeline.
//!
//! Umber takes a directory of images and runs each through a fixed toning
//! chain (grayscale, then sepia), writing the results out under a new base
//! directory. The same batch can be executed two ways:
//!
//! ```text
//! sequential:  path → decode → tone → persist        (one item at a time)
//! parallel:    load ─→ [transform × N] ─→ save       (bounded queues)
//! ```
//!
//! The parallel pipeline couples its stages with bounded MPMC queues and
//! guarantees that every discovered file reaches exactly one terminal
//! outcome: an output file, or a logged and counted failure.
//!
//! # Usage
//!
//! ```rust,ignore
//! use umber_core::{Config, FileDiscovery, ParallelPipeline, RunOptions};
//!
//! #[tokio::main]
//! async fn main() -> umber_core::Result<()> {
//!     let config = Config::load()?;
//!     let paths = FileDiscovery::new(config.processing.clone())
//!         .discover("./photos".as_ref())?;
//!
//!     let pipeline = ParallelPipeline::new(RunOptions::parallel(&config));
//!     let report = pipeline.run(&paths).await?;
//!     println!("{} of {} images toned", report.succeeded, report.discovered);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, UmberError};
pub use pipeline::{FileDiscovery, ParallelPipeline, RunOptions, SequentialRunner};
pub use types::{RunMode, RunReport, StageStats, WorkItem};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
