use kanji_lookup::LookupError;

use crate::table::TableError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Lookup failed for {term} (row {row}): {source}")]
    Lookup {
        row: usize,
        term: String,
        #[source]
        source: LookupError,
    },

    #[error("Failed to write progress: {0}")]
    Progress(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
