//! Sequential baseline runner.
//!
//! Performs the same three logical steps as the parallel pipeline — decode,
//! tone, persist — in one control flow per item. It is the correctness
//! oracle (its outputs must be byte-identical to the parallel run's) and the
//! baseline for the timing comparison.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::Result;
use crate::filter;
use crate::types::{RunMode, RunReport};

use super::encode;
use super::{decode, RunOptions};

/// Single-threaded reference implementation of the pipeline.
pub struct SequentialRunner {
    options: RunOptions,
}

impl SequentialRunner {
    /// Create a runner from resolved run options. Worker count is ignored;
    /// this runner never fans out.
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Process every path in order, one at a time.
    ///
    /// Per-item error policy is identical to the parallel pipeline: log,
    /// count, continue.
    pub async fn run(&self, paths: &[PathBuf]) -> Result<RunReport> {
        let start = Instant::now();
        let discovered = paths.len() as u64;
        let mut succeeded: u64 = 0;
        let mut failed: u64 = 0;

        // Not fatal: if the directory cannot be created, every item fails
        // at its own persist step and is counted there.
        if let Err(e) = encode::ensure_output_dir(&self.options.output_dir) {
            tracing::error!("{}", e);
        }

        for path in paths {
            match self.process_one(path).await {
                Ok(()) => succeeded += 1,
                Err(e) => {
                    failed += 1;
                    tracing::error!("{}", e);
                }
            }
        }

        Ok(RunReport {
            mode: RunMode::Sequential,
            discovered,
            succeeded,
            failed,
            elapsed: start.elapsed(),
        })
    }

    /// Decode → tone → persist for a single file.
    async fn process_one(&self, path: &Path) -> std::result::Result<(), crate::error::PipelineError> {
        let image = decode::decode_file(path).await?;
        let toned = filter::apply_chain(path, &image)?;
        let dest = encode::output_path(&self.options.output_dir, path);
        encode::write_image(&toned, &dest, self.options.jpeg_quality)
    }
}
