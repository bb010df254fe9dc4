use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use voice_segmenter::fixtures::{read_wav, ExpectationDiff, FixtureExpectations};
use voice_segmenter::{AppConfig, SpeechSegment, VoiceDetector};

#[derive(Parser, Debug)]
#[command(
    name = "voice_segmenter_cli",
    about = "Offline speech segment detection over mono WAV files"
)]
struct Cli {
    /// Log pipeline diagnostics to stderr
    #[arg(long, short)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect speech segments and optionally compare against expectations
    Detect {
        #[arg(long)]
        wav: PathBuf,
        /// JSON configuration file (defaults are used when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        expect: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print per-frame energy and ZCR as JSON lines
    Features {
        #[arg(long)]
        wav: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    voice_segmenter::init_logging(level);

    match cli.command {
        Commands::Detect {
            wav,
            config,
            expect,
            output,
        } => run_detect(&wav, config.as_deref(), expect.as_deref(), output),
        Commands::Features { wav, config } => run_features(&wav, config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> AppConfig {
    match path {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::default(),
    }
}

fn run_detect(
    wav: &Path,
    config_path: Option<&Path>,
    expect_path: Option<&Path>,
    output_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let config = load_config(config_path);
    let expectations = expect_path.map(FixtureExpectations::load).transpose()?;
    let (samples, sample_rate) = read_wav(wav)?;

    let detector = VoiceDetector::from_app_config(&config);
    let report = detector
        .analyze(&samples, samples.len(), sample_rate)
        .with_context(|| format!("detecting segments in {}", wav.display()))?;

    let payload = DetectReportPayload {
        source: wav.display().to_string(),
        sample_rate,
        frame_count: report.frame_count,
        threshold: report.threshold,
        segment_count: report.segments.len(),
        segments: &report.segments,
    };
    emit_report(&payload, output_path)?;

    if let Some(expectations) = expectations {
        match expectations.verify(&report.segments) {
            Ok(()) => Ok(ExitCode::from(0)),
            Err(diff) => {
                emit_diff(&diff)?;
                Ok(ExitCode::from(2))
            }
        }
    } else {
        Ok(ExitCode::from(0))
    }
}

fn run_features(wav: &Path, config_path: Option<&Path>) -> Result<ExitCode> {
    let config = load_config(config_path);
    let (samples, sample_rate) = read_wav(wav)?;

    let report = VoiceDetector::from_app_config(&config)
        .analyze(&samples, samples.len(), sample_rate)
        .with_context(|| format!("extracting features from {}", wav.display()))?;

    let frames = report.features.energy.iter().zip(report.features.zcr.iter());
    for (index, (&energy, &zcr)) in frames.enumerate() {
        let line = FrameFeaturePayload { index, energy, zcr };
        println!("{}", serde_json::to_string(&line)?);
    }

    Ok(ExitCode::from(0))
}

fn emit_report(report: &DetectReportPayload<'_>, output_path: Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(())
}

fn emit_diff(diff: &ExpectationDiff) -> Result<()> {
    let json = serde_json::to_string_pretty(&diff.to_json())?;
    eprintln!("{json}");
    Ok(())
}

#[derive(Serialize)]
struct DetectReportPayload<'a> {
    source: String,
    sample_rate: u32,
    frame_count: usize,
    threshold: f64,
    segment_count: usize,
    segments: &'a [SpeechSegment],
}

#[derive(Serialize)]
struct FrameFeaturePayload {
    index: usize,
    energy: f64,
    zcr: u32,
}
