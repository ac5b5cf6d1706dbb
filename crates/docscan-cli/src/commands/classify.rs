//! Classify command - match a single recognized line.

use clap::Args;
use console::style;

use docscan_core::{MatchResult, ResultView};

use super::config::load_config;
use super::scan::{build_classifier, resolve_mode, ModeArg};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Recognized line of text
    #[arg(required = true)]
    line: String,

    /// Capture mode (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Print the match as JSON
    #[arg(long)]
    json: bool,

    /// Verify the IBAN MOD-97 checksum
    #[arg(long)]
    checksum: bool,
}

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mode = resolve_mode(args.mode, &config);
    let classifier = build_classifier(&config, args.checksum);

    let result = classifier.classify(mode, &args.line);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match (&result, ResultView::with_config(&result, &config.display)) {
        (MatchResult::NoMatch, _) | (_, None) => {
            println!("{} {}", style("✗").yellow(), mode.retry_prompt());
        }
        (_, Some(view)) => {
            println!(
                "{} {}",
                style("✓").green(),
                result.feedback().unwrap_or_default()
            );
            println!("  {}: {}", view.title, view.value);
            println!("  Normalized: {}", view.raw);
            if let Some(detail) = view.detail {
                println!("  Holder: {}", detail);
            }
        }
    }

    Ok(())
}
