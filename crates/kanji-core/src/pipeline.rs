use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use kanji_lookup::DefinitionSource;
use unicode_normalization::UnicodeNormalization;

use crate::error::PipelineError;
use crate::progress::ProgressReporter;
use crate::table::{ColumnLayout, TableAccessor};

pub const DEFAULT_OUTPUT_PREFIX: &str = "new ";

/// Outcome of one completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentReport {
    /// Data rows processed, header excluded
    pub rows: usize,
    /// Sub-entries looked up across all rows
    pub entries: usize,
    pub output: PathBuf,
}

/// Fills the definitions column of a kanji table, one lookup per sub-entry.
///
/// Rows and sub-entries are processed strictly in document order. Any error
/// aborts the run before the table is saved.
pub struct Pipeline<S, W: Write> {
    source: S,
    reporter: ProgressReporter<W>,
    layout: ColumnLayout,
    output_prefix: String,
}

impl<S: DefinitionSource, W: Write> Pipeline<S, W> {
    pub fn new(source: S, reporter: ProgressReporter<W>) -> Self {
        Self {
            source,
            reporter,
            layout: ColumnLayout::default(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_reporter(self) -> ProgressReporter<W> {
        self.reporter
    }

    /// Augment `table` and save it next to `input`, or to `output` when given
    pub async fn run<T: TableAccessor>(
        &mut self,
        mut table: T,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<AugmentReport, PipelineError> {
        if self.layout.kanji_column == self.layout.definition_column {
            return Err(PipelineError::Config(format!(
                "kanji and definition columns are both {}",
                self.layout.kanji_column
            )));
        }

        let destination = output_path(input, output, &self.output_prefix)?;
        tracing::info!("Augmenting {} -> {}", input.display(), destination.display());

        let (rows, entries) = self.augment(&mut table).await?;

        table.save(&destination)?;
        tracing::info!("Saved {} rows ({} entries) to {}", rows, entries, destination.display());

        Ok(AugmentReport {
            rows,
            entries,
            output: destination,
        })
    }

    /// Rewrite every data row's definitions cell. Returns `(rows, entries)`.
    pub async fn augment<T: TableAccessor>(
        &mut self,
        table: &mut T,
    ) -> Result<(usize, usize), PipelineError> {
        let layout = self.layout;

        let mut terms_by_row = Vec::with_capacity(table.data_row_count());
        for row in 1..table.row_count() {
            let terms: Vec<String> = table
                .sub_entries(row, layout.kanji_column)?
                .iter()
                .map(|term| term.nfc().collect())
                .collect();
            terms_by_row.push(terms);
        }

        let total: usize = terms_by_row.iter().map(Vec::len).sum();
        if terms_by_row.is_empty() {
            tracing::warn!("Table has no data rows");
        }

        self.reporter
            .message(&format!("Starting search for {total} kanji compounds..."))?;
        self.reporter.report(0, terms_by_row.len(), "", "")?;

        let mut done = 0;
        let mut last_status_len = 0;

        for (index, terms) in terms_by_row.iter().enumerate() {
            let row = index + 1;
            table.write_cell(row, layout.definition_column, "")?;

            let mut cell = String::new();
            for (position, term) in terms.iter().enumerate() {
                tracing::debug!("Looking up {} (row {}, entry {})", term, row, position + 1);
                let definition =
                    self.source
                        .lookup(term)
                        .await
                        .map_err(|source| PipelineError::Lookup {
                            row,
                            term: term.clone(),
                            source,
                        })?;

                done += 1;
                let status = format!("{}.{}:{} - {}", row, position + 1, term, definition);
                let padded = self.reporter.pad_status(&status, last_status_len);
                self.reporter.report(done, total, "", &padded)?;
                last_status_len = status.chars().count();

                if position == 0 {
                    cell.push_str(&definition);
                } else {
                    cell.push_str(&format!("\n{}-{}", position + 1, definition));
                }
                table.write_cell(row, layout.definition_column, &cell)?;
            }
        }

        if total == 0 && !terms_by_row.is_empty() {
            // The 0% bar never reaches completion, so end its line here
            self.reporter.message("")?;
        }

        Ok((terms_by_row.len(), total))
    }
}

/// Where the augmented document is saved.
///
/// An explicit path wins; otherwise the input's file name gets `prefix`
/// prepended, in the same directory.
pub fn output_path(
    input: &Path,
    explicit: Option<&Path>,
    prefix: &str,
) -> Result<PathBuf, PipelineError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let name = input.file_name().ok_or_else(|| {
        PipelineError::Config(format!("{} has no file name", input.display()))
    })?;

    let mut prefixed = OsString::from(prefix);
    prefixed.push(name);
    Ok(input.with_file_name(prefixed))
}
