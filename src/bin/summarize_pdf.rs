//! One-shot summarizer for a local PDF.
//!
//! Runs the same extraction and chunking pipeline as the server, using the configured model,
//! and prints the summary to stdout. Nothing is copied into the upload directory.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rustysummary::{config, extraction, logging, processing, summarization};

#[derive(Parser)]
#[command(
    name = "summarize-pdf",
    about = "Summarize a local PDF with the configured model"
)]
struct Cli {
    /// PDF to summarize.
    path: PathBuf,
    /// Print the strategy, length bounds and model call count to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    config::init_config();
    logging::init_cli_tracing(cli.verbose);

    let config = config::get_config();
    let model = summarization::build_summarization_model(config);

    let path = cli.path.clone();
    let text = tokio::task::spawn_blocking(move || extraction::extract_text_from_pdf(&path))
        .await
        .context("extraction task failed")??;

    let summary = processing::summarize_text(model.as_ref(), &text)
        .await
        .with_context(|| format!("failed to summarize {}", cli.path.display()))?;

    if cli.verbose {
        eprintln!(
            "strategy={} words={} calls={} bounds={}",
            summary.strategy.as_str(),
            summary.input_words,
            summary.model_invocations,
            summary
                .bounds
                .map(|bounds| format!("{}..={}", bounds.min_length, bounds.max_length))
                .unwrap_or_else(|| "-".into())
        );
    }
    println!("{}", summary.summary);
    Ok(())
}
