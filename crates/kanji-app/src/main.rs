use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use kanji_config::Config;
use kanji_core::{AugmentReport, Pipeline, ProgressReporter};
use kanji_docx::DocxTable;
use kanji_lang_japanese::JishoSource;
use kanji_lookup::DefinitionSource;
use tracing_subscriber::EnvFilter;

pub mod cli;

#[cfg(test)]
mod tests;

use self::cli::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.log_level.as_deref());

    let config = load_config(&args)?;
    let report = run(&args, &config).await?;

    println!(
        "Saved {} definitions for {} rows to {}",
        report.entries,
        report.rows,
        report.output.display()
    );
    Ok(())
}

/// Logs go to stderr so they do not tear the progress line on stdout
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };
    args.apply(&mut config);
    config.validate()?;
    Ok(config)
}

async fn run(args: &Args, config: &Config) -> anyhow::Result<AugmentReport> {
    let timeout = match config.lookup.timeout_seconds {
        0 => None,
        seconds => Some(Duration::from_secs(seconds)),
    };
    let source = JishoSource::with_settings(&config.lookup.base_url, timeout, &config.lookup.user_agent)?
        .with_kanji_marker(config.lookup.kanji_marker.clone());
    tracing::info!("Using {} at {}", source.metadata().name, source.metadata().base_url);

    let out: Box<dyn Write> = if config.progress.enabled && atty::is(atty::Stream::Stdout) {
        Box::new(io::stdout())
    } else {
        Box::new(io::sink())
    };
    let reporter = ProgressReporter::new(out, config.progress.style());

    let table = DocxTable::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let mut pipeline = Pipeline::new(source, reporter)
        .with_layout(config.table.layout())
        .with_output_prefix(config.table.output_prefix.clone());

    let report = pipeline
        .run(table, &args.input, args.output.as_deref())
        .await
        .context("Kanji list was not saved")?;

    Ok(report)
}
