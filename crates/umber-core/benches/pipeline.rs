//! Benchmarks for the Umber toning pipeline.
//!
//! Run with: cargo bench -p umber-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use umber_core::{filter, ParallelPipeline, RunOptions, SequentialRunner};

fn test_image(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x * 3) as u8, (y * 5) as u8, ((x + y) * 7) as u8, 255])
    })
}

fn benchmark_grayscale(c: &mut Criterion) {
    let img = test_image(256, 256);
    c.bench_function("grayscale_256", |b| {
        b.iter(|| filter::grayscale(black_box(&img)))
    });
}

fn benchmark_sepia(c: &mut Criterion) {
    let img = test_image(256, 256);
    c.bench_function("sepia_256", |b| b.iter(|| filter::sepia(black_box(&img))));
}

fn benchmark_chain(c: &mut Criterion) {
    let img = test_image(256, 256);
    let source = Path::new("bench.png");
    c.bench_function("tone_chain_256", |b| {
        b.iter(|| filter::apply_chain(black_box(source), black_box(&img)).unwrap())
    });
}

/// Sequential vs parallel end-to-end over a small synthetic batch.
fn benchmark_runners(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    std::fs::create_dir(&input).unwrap();
    let mut paths: Vec<PathBuf> = Vec::new();
    for i in 0..8 {
        let path = input.join(format!("img{i}.png"));
        test_image(128, 128).save(&path).unwrap();
        paths.push(path);
    }

    let rt = tokio::runtime::Runtime::new().unwrap();

    let seq_opts = RunOptions {
        workers: 1,
        buffer_per_worker: 1,
        output_dir: dir.path().join("seq"),
        jpeg_quality: 90,
    };
    c.bench_function("run_sequential_8x128", |b| {
        let runner = SequentialRunner::new(seq_opts.clone());
        b.iter(|| rt.block_on(runner.run(black_box(&paths))).unwrap())
    });

    let par_opts = RunOptions {
        workers: 4,
        buffer_per_worker: 1,
        output_dir: dir.path().join("par"),
        jpeg_quality: 90,
    };
    c.bench_function("run_parallel_8x128", |b| {
        let pipeline = ParallelPipeline::new(par_opts.clone());
        b.iter(|| rt.block_on(pipeline.run(black_box(&paths))).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_grayscale,
    benchmark_sepia,
    benchmark_chain,
    benchmark_runners
);
criterion_main!(benches);
