//! Parallel pipeline orchestration: load → transform pool → save.
//!
//! The orchestrator owns all three queues for the duration of a run. Stages
//! hold only endpoints, and every endpoint is dropped by the task that owns
//! it, so the shutdown order falls out of ownership:
//!
//! ```text
//! paths enqueued, sender dropped      → input queue closes
//! loader drains input, exits          → transform queue closes
//! last of N workers drains, exits     → save queue closes
//! saver drains, exits                 → counters joined, report finalized
//! ```
//!
//! All loads therefore finish before the transform queue can close, and all
//! transforms before the save queue can close, even though the stages overlap
//! in wall-clock time across different items.

use std::path::PathBuf;
use std::time::Instant;
use tokio::task::JoinSet;

use crate::error::Result;
use crate::types::{RunMode, RunReport, StageStats};

use super::channel;
use super::encode;
use super::stages::{load_stage, save_stage, transform_worker};
use super::RunOptions;

/// The staged concurrent pipeline.
pub struct ParallelPipeline {
    options: RunOptions,
}

impl ParallelPipeline {
    /// Create a pipeline from resolved run options (`workers > 0`).
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Number of transform workers this pipeline will spawn.
    pub fn workers(&self) -> usize {
        self.options.workers
    }

    /// Run the pipeline over the given paths and produce a report.
    ///
    /// Per-item failures are logged and counted; the only error return left
    /// is a joined task panic. `succeeded + failed == paths.len()` on every
    /// `Ok` return. An uncreatable output directory is not fatal: each item
    /// then fails at the save stage and is counted like any other persist
    /// failure.
    pub async fn run(&self, paths: &[PathBuf]) -> Result<RunReport> {
        let start = Instant::now();
        let discovered = paths.len() as u64;
        let workers = self.options.workers;

        if let Err(e) = encode::ensure_output_dir(&self.options.output_dir) {
            tracing::error!("{}", e);
        }

        // Input queue holds the whole batch; intermediates stay small so
        // memory is capped by worker count, not batch size.
        let intermediate = workers * self.options.buffer_per_worker;
        let (path_tx, path_rx) = channel::bounded::<PathBuf>(paths.len().max(1));
        let (item_tx, item_rx) = channel::bounded(intermediate);
        let (result_tx, result_rx) = channel::bounded(intermediate);

        let saver = tokio::spawn(save_stage(
            result_rx,
            self.options.output_dir.clone(),
            self.options.jpeg_quality,
        ));

        let mut pool = JoinSet::new();
        for _ in 0..workers {
            pool.spawn(transform_worker(item_rx.clone(), result_tx.clone()));
        }
        // The orchestrator keeps no live endpoints on the intermediate
        // queues; only the stage tasks can hold them open now.
        drop(item_rx);
        drop(result_tx);

        let loader = tokio::spawn(load_stage(path_rx, item_tx));

        for path in paths {
            if path_tx.send_async(path.clone()).await.is_err() {
                break;
            }
        }
        drop(path_tx);

        let mut stats = StageStats::default();
        stats.merge(loader.await?);
        while let Some(worker_stats) = pool.join_next().await {
            stats.merge(worker_stats?);
        }
        stats.merge(saver.await?);

        Ok(RunReport {
            mode: RunMode::Parallel,
            discovered,
            succeeded: stats.succeeded,
            failed: stats.failed,
            elapsed: start.elapsed(),
        })
    }
}
