//! handink-bench: CLI tool for replaying recorded landmark sessions.
//!
//! Feeds a recorded session through the ink pipeline with configurable
//! options, printing every finished stroke along with session
//! diagnostics. Useful for:
//!
//! - Tuning stabilization, smoothing and admission thresholds
//! - Checking which shapes a recording is recognized as
//! - Measuring per-frame processing cost
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin handink-bench -- [OPTIONS] <RECORDING>
//! ```
//!
//! A recording is JSON: the canvas the session was drawn on, and one entry
//! per captured frame, either `null` (no hand) or a list of `[x, y, z]`
//! landmarks in normalized frame space.
//!
//! ```json
//! { "canvas": { "width": 1280, "height": 720, "mirror": true },
//!   "frames": [null, [[0.5, 0.8, 0.0], ...], ...] }
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use handink_pipeline::{
    FinalizeOptions, FinishedStroke, InkConfig, InkError, InkPipeline, LandmarkFrame, ScaleMapping,
    SessionDiagnostics, StrokeStyle, SystemClock,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Replay recorded hand-landmark sessions through the handink pipeline.
///
/// Prints each finished stroke and a diagnostics report with per-gesture,
/// admission and per-kind stroke counts.
#[derive(Parser)]
#[command(name = "handink-bench", version)]
struct Cli {
    /// Path to the recorded session (JSON).
    recording: PathBuf,

    /// Reduce every stroke to a straight line between its endpoints.
    #[arg(long)]
    straight_line: bool,

    /// Disable shape recognition (fallback simplification only).
    #[arg(long)]
    no_shapes: bool,

    /// Stroke color.
    #[arg(long, default_value = "#000000")]
    color: String,

    /// Stroke width in canvas units.
    #[arg(long, default_value_t = 2.0)]
    width: f64,

    /// Stroke opacity (0.0-1.0).
    #[arg(long, default_value_t = 1.0)]
    opacity: f64,

    /// Full pipeline config as a JSON string.
    ///
    /// Missing fields take their defaults. The JSON must be a valid
    /// `InkConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Number of runs for averaging.
    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    runs: usize,

    /// Output strokes and diagnostics as JSON instead of a report.
    #[arg(long)]
    json: bool,

    /// Log pipeline decisions (debug level) to stderr.
    #[arg(short, long)]
    verbose: bool,
}

/// A recorded session.
#[derive(Debug, Deserialize)]
struct Recording {
    /// The canvas the session was drawn on.
    canvas: ScaleMapping,
    /// One entry per captured frame; `None` when no hand was tracked.
    frames: Vec<Option<LandmarkFrame>>,
}

/// What one replay produced.
#[derive(Debug, Serialize)]
struct Replay {
    strokes: Vec<FinishedStroke>,
    diagnostics: SessionDiagnostics,
    #[serde(skip)]
    duration: Duration,
}

/// Errors that stop the bench before or during replay.
#[derive(Debug, thiserror::Error)]
enum BenchError {
    #[error("Error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error parsing recording {}: {source}", .path.display())]
    Recording {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Error parsing --config-json: {0}")]
    Config(#[source] serde_json::Error),
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] InkError),
    #[error("Error serializing output: {0}")]
    Output(#[source] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "handink=debug"
    } else {
        "handink=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), BenchError> {
    let config = config_from_cli(cli)?;
    let options = options_from_cli(cli);
    let recording = load_recording(&cli.recording)?;

    info!(
        recording = %cli.recording.display(),
        frames = recording.frames.len(),
        width = recording.canvas.width,
        height = recording.canvas.height,
        "loaded recording"
    );
    eprintln!("Config: {config:#?}");
    eprintln!("Options: {options:#?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut durations = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        let replay = replay(&recording, &config, &options)?;
        debug!(run, elapsed = ?replay.duration, "replay finished");

        // Print results from the first run only; later runs are timing.
        if run == 0 {
            if cli.json {
                let json = serde_json::to_string_pretty(&replay).map_err(BenchError::Output)?;
                println!("{json}");
            } else {
                print_strokes(&replay.strokes);
                println!("{}", replay.diagnostics.report());
            }
        }

        eprintln!(
            "Replay: {:.3}ms ({:.3}us/frame)",
            duration_ms(replay.duration),
            per_frame_us(replay.duration, recording.frames.len()),
        );
        durations.push(replay.duration);
    }

    if cli.runs > 1 {
        print_multi_run_summary(&durations, recording.frames.len());
    }

    Ok(())
}

/// Build an [`InkConfig`] from `--config-json`, or the defaults.
fn config_from_cli(cli: &Cli) -> Result<InkConfig, BenchError> {
    let config = match cli.config_json {
        Some(ref json) => serde_json::from_str(json).map_err(BenchError::Config)?,
        None => InkConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn options_from_cli(cli: &Cli) -> FinalizeOptions {
    FinalizeOptions {
        straight_line_mode: cli.straight_line,
        shape_recognition: !cli.no_shapes,
        style: StrokeStyle {
            color: cli.color.clone(),
            width: cli.width,
            opacity: cli.opacity,
        },
    }
}

fn load_recording(path: &Path) -> Result<Recording, BenchError> {
    let text = std::fs::read_to_string(path).map_err(|source| BenchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| BenchError::Recording {
        path: path.to_path_buf(),
        source,
    })
}

/// Run every frame of `recording` through a fresh pipeline.
fn replay(
    recording: &Recording,
    config: &InkConfig,
    options: &FinalizeOptions,
) -> Result<Replay, BenchError> {
    let mut pipeline = InkPipeline::new(config.clone(), recording.canvas, SystemClock)?;
    let mut strokes = Vec::new();

    let start = Instant::now();
    for frame in &recording.frames {
        let output = pipeline.process_frame(frame.as_ref(), options);
        strokes.extend(output.stroke);
    }
    // A session that ends mid-stroke still yields that stroke.
    strokes.extend(pipeline.process_frame(None, options).stroke);
    let duration = start.elapsed();

    Ok(Replay {
        strokes,
        diagnostics: pipeline.diagnostics().clone(),
        duration,
    })
}

fn print_strokes(strokes: &[FinishedStroke]) {
    println!("{:<18} {:<10} {:>6}  {}", "Stroke", "Kind", "Points", "Start -> End");
    println!("{}", "-".repeat(60));
    for stroke in strokes {
        let ends = match (stroke.points.first(), stroke.points.last()) {
            (Some(a), Some(b)) => format!("({:.1}, {:.1}) -> ({:.1}, {:.1})", a.x, a.y, b.x, b.y),
            _ => String::new(),
        };
        println!(
            "{:<18} {:<10} {:>6}  {ends}",
            stroke.id.to_string(),
            stroke.kind,
            stroke.points.len(),
        );
    }
    println!();
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Mean microseconds per frame.
#[allow(clippy::cast_precision_loss)]
fn per_frame_us(d: Duration, frames: usize) -> f64 {
    if frames == 0 {
        return 0.0;
    }
    d.as_secs_f64() * 1_000_000.0 / frames as f64
}

/// Print aggregated timing across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(durations: &[Duration], frames: usize) {
    println!();
    println!("Summary ({} runs)\n{}", durations.len(), "=".repeat(60));

    if durations.is_empty() {
        println!("Warning: no runs to summarize");
        return;
    }

    let ms: Vec<f64> = durations.iter().copied().map(duration_ms).collect();
    let min = ms.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = ms.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = ms.iter().sum::<f64>() / ms.len() as f64;

    println!("Replay duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");
    let runs = u32::try_from(durations.len()).unwrap_or(u32::MAX);
    let mean_frame = durations.iter().sum::<Duration>() / runs;
    println!("Per frame (mean): {:.3}us", per_frame_us(mean_frame, frames));
}
