//! End-to-end pipeline tests: accounting, sequential/parallel parity,
//! idempotence, and bounded termination.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::{Rgb, RgbImage};
use umber_core::config::ProcessingConfig;
use umber_core::{FileDiscovery, ParallelPipeline, RunOptions, SequentialRunner};

/// Write a small deterministic test image with per-pixel variation.
/// RGB, not RGBA, so the same fixture can be saved as PNG or JPEG.
fn write_image(path: &Path, w: u32, h: u32, seed: u8) {
    let img = RgbImage::from_fn(w, h, |x, y| {
        Rgb([
            (x * 7 + seed as u32) as u8,
            (y * 13 + seed as u32) as u8,
            ((x + y) * 3) as u8,
        ])
    });
    img.save(path).unwrap();
}

fn options(out: PathBuf, workers: usize) -> RunOptions {
    RunOptions {
        workers,
        buffer_per_worker: 1,
        output_dir: out,
        jpeg_quality: 90,
    }
}

/// Read every file in a directory into a name → bytes map.
fn read_tree(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut tree = BTreeMap::new();
    for entry in std::fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        tree.insert(
            entry.file_name().to_string_lossy().into_owned(),
            std::fs::read(entry.path()).unwrap(),
        );
    }
    tree
}

fn discover(dir: &Path) -> Vec<PathBuf> {
    FileDiscovery::new(ProcessingConfig::default())
        .discover(dir)
        .unwrap()
}

#[tokio::test]
async fn sequential_and_parallel_produce_identical_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    std::fs::create_dir(&input).unwrap();
    write_image(&input.join("a.png"), 16, 12, 1);
    write_image(&input.join("b.png"), 9, 21, 2);
    write_image(&input.join("c.jpg"), 31, 7, 3);

    let paths = discover(&input);
    assert_eq!(paths.len(), 3);

    let seq_out = dir.path().join("seq");
    let par_out = dir.path().join("par");

    let seq = SequentialRunner::new(options(seq_out.clone(), 1))
        .run(&paths)
        .await
        .unwrap();
    let par = ParallelPipeline::new(options(par_out.clone(), 4))
        .run(&paths)
        .await
        .unwrap();

    assert_eq!(seq.succeeded, 3);
    assert_eq!(par.succeeded, 3);
    assert_eq!(seq.succeeded + seq.failed, seq.discovered);
    assert_eq!(par.succeeded + par.failed, par.discovered);

    // Byte-identical trees: the transform is deterministic and no race
    // corrupts pixels on the parallel path.
    assert_eq!(read_tree(&seq_out), read_tree(&par_out));
}

#[tokio::test]
async fn single_worker_pool_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    std::fs::create_dir(&input).unwrap();
    write_image(&input.join("only.png"), 24, 24, 9);

    let paths = discover(&input);
    let seq_out = dir.path().join("seq");
    let par_out = dir.path().join("par");

    SequentialRunner::new(options(seq_out.clone(), 1))
        .run(&paths)
        .await
        .unwrap();
    ParallelPipeline::new(options(par_out.clone(), 1))
        .run(&paths)
        .await
        .unwrap();

    assert_eq!(read_tree(&seq_out), read_tree(&par_out));
}

#[tokio::test]
async fn corrupt_file_fails_without_stopping_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    std::fs::create_dir(&input).unwrap();
    write_image(&input.join("valid.png"), 10, 10, 4);
    std::fs::write(input.join("corrupt.jpg"), b"definitely not a jpeg").unwrap();

    let paths = discover(&input);
    assert_eq!(paths.len(), 2);

    for (out, workers) in [(dir.path().join("seq"), 1), (dir.path().join("par"), 3)] {
        let report = if workers == 1 {
            SequentialRunner::new(options(out.clone(), 1))
                .run(&paths)
                .await
                .unwrap()
        } else {
            ParallelPipeline::new(options(out.clone(), workers))
                .run(&paths)
                .await
                .unwrap()
        };

        assert_eq!(report.discovered, 2);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(read_tree(&out).len(), 1);
        assert!(out.join("valid.png").is_file());
    }
}

#[tokio::test]
async fn empty_input_directory_yields_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    std::fs::create_dir(&input).unwrap();

    let paths = discover(&input);
    assert!(paths.is_empty());

    let out = dir.path().join("out");
    let report = ParallelPipeline::new(options(out.clone(), 4))
        .run(&paths)
        .await
        .unwrap();

    assert_eq!(report.discovered, 0);
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.failed, 0);
    assert!(read_tree(&out).is_empty());
}

#[tokio::test]
async fn rerun_on_unchanged_input_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    std::fs::create_dir(&input).unwrap();
    write_image(&input.join("a.png"), 14, 14, 5);
    write_image(&input.join("b.jpg"), 20, 10, 6);

    let paths = discover(&input);
    let out = dir.path().join("out");
    let pipeline = ParallelPipeline::new(options(out.clone(), 2));

    pipeline.run(&paths).await.unwrap();
    let first = read_tree(&out);
    pipeline.run(&paths).await.unwrap();
    let second = read_tree(&out);

    assert_eq!(first, second);
}

#[tokio::test]
async fn pipeline_terminates_on_all_corrupt_input() {
    // Every item fails at the decode stage; the drain protocol must still
    // close every queue and join every worker within bounded time.
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    std::fs::create_dir(&input).unwrap();
    for i in 0..10 {
        std::fs::write(input.join(format!("bad{i}.jpg")), b"junk").unwrap();
    }

    let paths = discover(&input);
    let pipeline = ParallelPipeline::new(options(dir.path().join("out"), 4));

    let report = tokio::time::timeout(Duration::from_secs(30), pipeline.run(&paths))
        .await
        .expect("pipeline must not hang")
        .unwrap();

    assert_eq!(report.discovered, 10);
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.failed, 10);
}
