//! The `umber run` command: tone a directory, sequentially, in parallel, or both.

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use umber_core::{Config, FileDiscovery, ParallelPipeline, RunOptions, RunReport, SequentialRunner};

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory of images to tone (non-recursive)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Which pipeline(s) to execute
    #[arg(short, long, value_enum, default_value = "both")]
    pub mode: Mode,

    /// Transform pool size (defaults to available CPU parallelism)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Output directory for the sequential run
    #[arg(long)]
    pub sequential_dir: Option<PathBuf>,

    /// Output directory for the parallel run
    #[arg(long)]
    pub parallel_dir: Option<PathBuf>,

    /// JPEG encode quality (1-100)
    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    /// Print the run reports as JSON to stdout
    #[arg(long)]
    pub json: bool,
}

/// Execution mode for the batch.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Single-threaded baseline only
    Sequential,
    /// Staged concurrent pipeline only
    Parallel,
    /// Both, with a timing comparison
    Both,
}

impl Mode {
    fn runs_sequential(self) -> bool {
        matches!(self, Mode::Sequential | Mode::Both)
    }

    fn runs_parallel(self) -> bool {
        matches!(self, Mode::Parallel | Mode::Both)
    }
}

/// Execute the run command.
pub async fn execute(args: RunArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(workers) = args.workers {
        if workers == 0 {
            anyhow::bail!("--workers must be at least 1");
        }
        config.processing.parallel_workers = workers;
    }
    if let Some(quality) = args.jpeg_quality {
        if quality == 0 || quality > 100 {
            anyhow::bail!("--jpeg-quality must be between 1 and 100");
        }
        config.output.jpeg_quality = quality;
    }
    if let Some(dir) = &args.sequential_dir {
        config.output.sequential_dir = dir.clone();
    }
    if let Some(dir) = &args.parallel_dir {
        config.output.parallel_dir = dir.clone();
    }
    // Same rule the config file loader enforces: the two runs must never
    // overwrite each other's outputs.
    if config.output.sequential_dir == config.output.parallel_dir {
        anyhow::bail!("--sequential-dir and --parallel-dir must differ");
    }

    // Enumeration failure is the one fatal condition: nothing has started yet.
    let discovery = FileDiscovery::new(config.processing.clone());
    let paths = discovery.discover(&args.input)?;
    tracing::info!("Discovered {} files in {}", paths.len(), args.input.display());
    if paths.is_empty() {
        tracing::warn!("No supported images found in {}", args.input.display());
    }

    let mut sequential_report = None;
    let mut parallel_report = None;

    if args.mode.runs_sequential() {
        let runner = SequentialRunner::new(RunOptions::sequential(&config));
        tracing::info!("Starting sequential run");
        let report = runner.run(&paths).await?;
        print_report(&report, None);
        sequential_report = Some(report);
    }

    if args.mode.runs_parallel() {
        let pipeline = ParallelPipeline::new(RunOptions::parallel(&config));
        tracing::info!(workers = pipeline.workers(), "Starting parallel run");
        let report = pipeline.run(&paths).await?;
        print_report(&report, Some(pipeline.workers()));
        parallel_report = Some(report);
    }

    if let (Some(seq), Some(par)) = (&sequential_report, &parallel_report) {
        let par_secs = par.elapsed.as_secs_f64();
        if par_secs > 0.0 {
            eprintln!(
                "    Speedup:      {:>7.2}x",
                seq.elapsed.as_secs_f64() / par_secs
            );
        }
    }

    if args.json {
        let reports: Vec<&RunReport> = sequential_report
            .iter()
            .chain(parallel_report.iter())
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

/// Print a formatted per-run summary.
fn print_report(report: &RunReport, workers: Option<usize>) {
    eprintln!("{}", format_report(report, workers));
}

/// Render the per-run summary. Discovered, succeeded, and failed are always
/// all three shown, even when zero.
fn format_report(report: &RunReport, workers: Option<usize>) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("  ==== {} run ====\n", report.mode));
    if let Some(workers) = workers {
        out.push_str(&format!("    Workers:      {:>8}\n", workers));
    }
    out.push_str(&format!("    Discovered:   {:>8}\n", report.discovered));
    out.push_str(&format!("    Succeeded:    {:>8}\n", report.succeeded));
    out.push_str(&format!("    Failed:       {:>8}\n", report.failed));
    out.push_str(&format!(
        "    Duration:     {:>7.2}s\n",
        report.elapsed.as_secs_f64()
    ));
    out.push_str(&format!("    Rate:         {:>7.1} img/sec", report.rate()));
    out
}
