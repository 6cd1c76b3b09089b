//! Core data types for the Umber toning pipeline.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// One image moving through the pipeline, from decode to persistence.
///
/// Identity is the source path. The payload is replaced wholesale by the
/// transform stage — stages never mutate a buffer another stage might still
/// reference; ownership moves with the item across each queue boundary.
#[derive(Debug)]
pub struct WorkItem {
    /// Path of the source file this image was decoded from
    pub source: PathBuf,

    /// Decoded (and later, transformed) pixel buffer
    pub image: RgbaImage,
}

/// Which execution strategy produced a run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Sequential,
    Parallel,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::Sequential => write!(f, "sequential"),
            RunMode::Parallel => write!(f, "parallel"),
        }
    }
}

/// Aggregate outcome of one full pipeline execution.
///
/// Read-only once produced. `succeeded + failed == discovered` always holds:
/// every discovered file reaches exactly one terminal outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Execution strategy that produced this report
    pub mode: RunMode,

    /// Files found by input enumeration
    pub discovered: u64,

    /// Files fully processed and written
    pub succeeded: u64,

    /// Files that failed at any stage (decode, transform, persist)
    pub failed: u64,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunReport {
    /// Items processed per second over the whole run.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.succeeded as f64 / secs
        } else {
            0.0
        }
    }
}

/// Per-stage success/failure counters.
///
/// Each stage owns its own counters and returns them on exit; the
/// orchestrator sums them after joining all stage tasks. No counter is ever
/// shared between concurrently running tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStats {
    pub succeeded: u64,
    pub failed: u64,
}

impl StageStats {
    /// Fold another stage's counters into this one.
    pub fn merge(&mut self, other: StageStats) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_stats_merge() {
        let mut a = StageStats {
            succeeded: 3,
            failed: 1,
        };
        a.merge(StageStats {
            succeeded: 2,
            failed: 4,
        });
        assert_eq!(a.succeeded, 5);
        assert_eq!(a.failed, 5);
    }

    #[test]
    fn test_run_report_rate_zero_elapsed() {
        let report = RunReport {
            mode: RunMode::Sequential,
            discovered: 0,
            succeeded: 0,
            failed: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(report.rate(), 0.0);
    }

    #[test]
    fn test_run_mode_display() {
        assert_eq!(RunMode::Sequential.to_string(), "sequential");
        assert_eq!(RunMode::Parallel.to_string(), "parallel");
    }

    #[test]
    fn test_work_item_identity_is_source_path() {
        let item = WorkItem {
            source: PathBuf::from("/photos/cat.jpg"),
            image: RgbaImage::new(1, 1),
        };
        assert_eq!(item.source, PathBuf::from("/photos/cat.jpg"));
    }
}
