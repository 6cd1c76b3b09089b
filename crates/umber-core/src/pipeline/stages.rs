//! Stage loops for the parallel pipeline.
//!
//! Each stage owns its queue endpoints and its own counters, and returns the
//! counters when its input queue is closed and drained. Queue closure is
//! expressed by sender drop: the load stage's output sender drops when the
//! loader exits, and each transform worker holds its own clone of the save
//! queue sender, so a downstream queue can only close after every upstream
//! producer has finished. That makes send-on-closed structurally impossible
//! rather than a matter of timing.

use flume::{Receiver, Sender};
use std::path::PathBuf;

use crate::error::PipelineError;
use crate::filter;
use crate::types::{StageStats, WorkItem};

use super::{decode, encode};

/// Load stage: decode each discovered path into a [`WorkItem`].
///
/// A file that fails to decode is logged and counted; it never halts the
/// stage. Exits once the path queue is exhausted and closed.
pub(crate) async fn load_stage(paths: Receiver<PathBuf>, items: Sender<WorkItem>) -> StageStats {
    let mut stats = StageStats::default();

    while let Ok(path) = paths.recv_async().await {
        match decode::decode_file(&path).await {
            Ok(image) => {
                let item = WorkItem {
                    source: path,
                    image,
                };
                if let Err(e) = items.send_async(item).await {
                    // Transform queue gone: nothing downstream can complete.
                    tracing::error!("load stage: transform queue closed early: {}", e);
                    stats.failed += 1;
                    break;
                }
            }
            Err(e) => {
                stats.failed += 1;
                tracing::error!("{}", e);
            }
        }
    }

    tracing::debug!(failed = stats.failed, "load stage drained");
    stats
    // `items` drops here, closing the transform queue's write side.
}

/// One transform worker: apply the toning chain to items from a shared queue.
///
/// A malformed buffer fails that item only; the worker keeps consuming. The
/// pixel work is CPU-bound and runs on the blocking thread pool.
pub(crate) async fn transform_worker(
    items: Receiver<WorkItem>,
    results: Sender<WorkItem>,
) -> StageStats {
    let mut stats = StageStats::default();

    while let Ok(item) = items.recv_async().await {
        let outcome = tokio::task::spawn_blocking(move || transform_item(item)).await;

        match outcome {
            Ok(Ok(item)) => {
                if let Err(e) = results.send_async(item).await {
                    tracing::error!("transform worker: save queue closed early: {}", e);
                    stats.failed += 1;
                    break;
                }
            }
            Ok(Err(e)) => {
                stats.failed += 1;
                tracing::error!("{}", e);
            }
            Err(e) => {
                stats.failed += 1;
                tracing::error!("transform worker: task join error: {}", e);
            }
        }
    }

    stats
    // This worker's `results` clone drops here; the save queue closes once
    // the last worker in the pool has exited its loop.
}

/// Apply the filter chain, replacing the payload with a new buffer.
fn transform_item(item: WorkItem) -> Result<WorkItem, PipelineError> {
    let toned = filter::apply_chain(&item.source, &item.image)?;
    Ok(WorkItem {
        source: item.source,
        image: toned,
    })
}

/// Save stage: encode each finished item and write it under `out_dir`.
///
/// Completes when the save queue is closed and drained. Encode or write
/// failures are per-item.
pub(crate) async fn save_stage(
    results: Receiver<WorkItem>,
    out_dir: PathBuf,
    jpeg_quality: u8,
) -> StageStats {
    let mut stats = StageStats::default();

    while let Ok(item) = results.recv_async().await {
        let dest = encode::output_path(&out_dir, &item.source);
        let written =
            tokio::task::spawn_blocking(move || encode::write_image(&item.image, &dest, jpeg_quality))
                .await;

        match written {
            Ok(Ok(())) => stats.succeeded += 1,
            Ok(Err(e)) => {
                stats.failed += 1;
                tracing::error!("{}", e);
            }
            Err(e) => {
                stats.failed += 1;
                tracing::error!("save stage: task join error: {}", e);
            }
        }
    }

    tracing::debug!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        "save stage drained"
    );
    stats
}
