//! Batch command - feed a sequence of OCR passes through one capture session.
//!
//! Each input file is one pass, in sorted path order, the way successive
//! camera frames reach the scanner.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, info};

use docscan_core::{CaptureMode, ScanStats, Scanner};

use super::config::load_config;
use super::scan::{build_classifier, format_records, read_pass, resolve_mode, ModeArg, OutputFormat, ScanRecord};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files as a glob pattern (e.g. "frames/*.txt")
    #[arg(required = true)]
    input: String,

    /// Capture mode (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Output file for the per-pass results (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for the per-pass results
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Keep scanning after the first match
    #[arg(long)]
    all: bool,

    /// Write a JSON session report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verify the IBAN MOD-97 checksum
    #[arg(long)]
    checksum: bool,

    /// Continue on unreadable input files
    #[arg(long)]
    continue_on_error: bool,
}

/// Session summary written with `--report`.
#[derive(Debug, Serialize)]
struct BatchReport {
    generated_at: DateTime<Utc>,
    mode: CaptureMode,
    files: usize,
    errors: Vec<String>,
    stats: ScanStats,
    first_match: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let mode = resolve_mode(args.mode, &config);
    let stop_on_match = config.scan.stop_on_first_match && !args.all;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "json")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    info!("Found {} passes to scan in {} mode", files.len(), mode);

    // Load every pass up front; unreadable files never reach the session
    let mut passes = Vec::with_capacity(files.len());
    let mut errors = Vec::new();
    for path in &files {
        match read_pass(path) {
            Ok(text) => passes.push((path, text)),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                if !args.continue_on_error {
                    return Err(e);
                }
                errors.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    let pb = ProgressBar::new(passes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} passes")?
            .progress_chars("=>-"),
    );

    let mut scanner = Scanner::with_classifier(mode, build_classifier(&config, args.checksum));
    let mut records = Vec::with_capacity(passes.len());

    let matched_at = scanner.scan_passes(
        passes.iter().map(|(_, text)| text),
        stop_on_match,
        |i, outcome| {
            pb.inc(1);
            let path = passes[i].0;
            debug!("{}: {:?}", path.display(), outcome);
            records.push(ScanRecord::new(
                path.display().to_string(),
                mode,
                outcome.clone(),
                &config,
            ));
        },
    );

    if records.len() < passes.len() {
        debug!("Stopped at first match, {} passes left", passes.len() - records.len());
    }
    let first_match = matched_at
        .and_then(|i| records.get(i))
        .and_then(|record| record.view.as_ref())
        .map(|view| view.raw.clone());

    pb.finish_and_clear();

    let output = format_records(&records, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    let stats = scanner.stats();

    if let Some(report_path) = &args.report {
        let report = BatchReport {
            generated_at: Utc::now(),
            mode,
            files: files.len(),
            errors: errors.clone(),
            stats,
            first_match: first_match.clone(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };
        fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
    }

    eprintln!();
    eprintln!(
        "{} Scanned {} passes, {} lines, {} matched{}",
        style("ℹ").blue(),
        stats.passes,
        stats.lines,
        stats.matches,
        if errors.is_empty() {
            String::new()
        } else {
            format!(", {} unreadable", errors.len())
        }
    );
    if mode == CaptureMode::Document && scanner.capture_ready() {
        eprintln!("{} Document in view, ready to capture", style("✓").green());
    }

    Ok(())
}
