//! Scan command - run one OCR pass through a capture session.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use docscan_core::models::config::DocscanConfig;
use docscan_core::{CaptureMode, Classifier, RecognizedText, ResultView, ScanOutcome, Scanner};

use super::config::load_config;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input file with recognized text (.txt lines or .json blocks), - for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Capture mode (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verify the IBAN MOD-97 checksum
    #[arg(long)]
    checksum: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// French IBAN
    Iban,
    /// Passport / ID-card MRZ
    Document,
}

impl From<ModeArg> for CaptureMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Iban => CaptureMode::Iban,
            ModeArg::Document => CaptureMode::Document,
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Serializable record of one scanned pass.
#[derive(Debug, Serialize)]
pub struct ScanRecord {
    pub source: String,
    pub mode: CaptureMode,
    pub outcome: ScanOutcome,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ResultView>,
}

impl ScanRecord {
    pub fn new(source: impl Into<String>, mode: CaptureMode, outcome: ScanOutcome, config: &DocscanConfig) -> Self {
        let view = outcome
            .as_match()
            .and_then(|m| ResultView::with_config(m, &config.display));
        Self {
            source: source.into(),
            mode,
            feedback: outcome.feedback(mode).to_string(),
            outcome,
            view,
        }
    }
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mode = resolve_mode(args.mode, &config);
    let classifier = build_classifier(&config, args.checksum);

    let text = read_pass(&args.input)?;
    info!(
        "Scanning {} ({} lines) in {} mode",
        args.input.display(),
        text.line_count(),
        mode
    );

    let mut scanner = Scanner::with_classifier(mode, classifier);
    let outcome = scanner.scan(&text);
    debug!("Scan outcome: {:?}", outcome);

    let record = ScanRecord::new(args.input.display().to_string(), mode, outcome, &config);
    let output = format_records(std::slice::from_ref(&record), args.format)?;

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

    Ok(())
}

/// Command-line mode wins over the configured default.
pub fn resolve_mode(arg: Option<ModeArg>, config: &DocscanConfig) -> CaptureMode {
    arg.map(CaptureMode::from).unwrap_or(config.scan.default_mode)
}

pub fn build_classifier(config: &DocscanConfig, checksum: bool) -> Classifier {
    Classifier::new().with_iban_checksum(checksum || config.scan.validate_iban_checksum)
}

/// Read one OCR pass from a file or stdin.
pub fn read_pass(path: &Path) -> anyhow::Result<RecognizedText> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return parse_pass(&content, content.trim_start().starts_with('{'));
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let content = fs::read_to_string(path)?;
    parse_pass(&content, is_json)
}

fn parse_pass(content: &str, is_json: bool) -> anyhow::Result<RecognizedText> {
    if is_json {
        Ok(RecognizedText::from_json(content)?)
    } else {
        Ok(RecognizedText::from_plain_text(content))
    }
}

pub fn format_records(records: &[ScanRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => match records {
            [record] => Ok(serde_json::to_string_pretty(record)?),
            _ => Ok(serde_json::to_string_pretty(records)?),
        },
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv(records: &[ScanRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["source", "mode", "matched", "kind", "value", "feedback"])?;

    for record in records {
        let kind = record.view.as_ref().map(|v| v.title.as_str()).unwrap_or("");
        let value = record.view.as_ref().map(|v| v.raw.as_str()).unwrap_or("");
        wtr.write_record([
            record.source.as_str(),
            record.mode.as_str(),
            if record.outcome.is_match() { "true" } else { "false" },
            kind,
            value,
            record.feedback.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[ScanRecord]) -> String {
    let mut output = String::new();

    for record in records {
        if records.len() > 1 {
            output.push_str(&format!("{}:\n", record.source));
        }
        match &record.view {
            Some(view) => {
                output.push_str(&format!("{} {}\n", style("✓").green(), record.feedback));
                output.push_str(&format!("  {}: {}\n", view.title, view.value));
                if let Some(detail) = &view.detail {
                    output.push_str(&format!("  Holder: {}\n", detail));
                }
            }
            None => {
                output.push_str(&format!("{} {}\n", style("✗").yellow(), record.feedback));
            }
        }
    }

    output.trim_end().to_string()
}
