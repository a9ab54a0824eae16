use std::path::Path;

/// Row/column access over the first table of a document.
///
/// Row 0 is the header row. Column indices are 0-based and are not checked
/// against any schema; asking for a column a row does not have is a
/// [`TableError::Structure`].
pub trait TableAccessor {
    /// Number of rows, header included
    fn row_count(&self) -> usize;

    /// Non-blank paragraphs of a cell, in document order
    fn sub_entries(&self, row: usize, column: usize) -> Result<Vec<String>, TableError>;

    /// Replace the full text of a cell. Lines are separated by `\n`.
    fn write_cell(&mut self, row: usize, column: usize, text: &str) -> Result<(), TableError>;

    /// Persist all writes to `path`
    fn save(self, path: &Path) -> Result<(), TableError>
    where
        Self: Sized;

    /// Number of rows below the header
    fn data_row_count(&self) -> usize {
        self.row_count().saturating_sub(1)
    }
}

/// Where the pipeline reads terms from and writes definitions to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub kanji_column: usize,
    pub definition_column: usize,
}

impl ColumnLayout {
    pub const DEFAULT_KANJI_COLUMN: usize = 3;
    pub const DEFAULT_DEFINITION_COLUMN: usize = 4;

    pub fn new(kanji_column: usize, definition_column: usize) -> Self {
        Self {
            kanji_column,
            definition_column,
        }
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KANJI_COLUMN, Self::DEFAULT_DEFINITION_COLUMN)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid document format: {0}")]
    Format(String),

    #[error("Unexpected table structure: {0}")]
    Structure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
