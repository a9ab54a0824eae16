use std::path::PathBuf;

use clap::Parser;
use kanji_config::Config;

/// Fill the definitions column of a kanji vocabulary table
#[derive(Parser, Debug)]
#[command(name = "kanji-list", version)]
pub struct Args {
    /// Word document (.docx) whose first table lists the kanji
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to save the result (default: "new <INPUT>" next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 0-based column holding the kanji entries
    #[arg(long)]
    pub kanji_column: Option<usize>,

    /// 0-based column that receives the definitions
    #[arg(long)]
    pub definition_column: Option<usize>,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Log filter, e.g. "debug" or "kanji_core=trace" (default: RUST_LOG or "warn")
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Command line flags take precedence over file and environment values
    pub fn apply(&self, config: &mut Config) {
        if let Some(column) = self.kanji_column {
            config.table.kanji_column = column;
        }
        if let Some(column) = self.definition_column {
            config.table.definition_column = column;
        }
        if self.no_progress {
            config.progress.enabled = false;
        }
    }
}
