use kanji_core::ColumnLayout;
use serde::{Deserialize, Serialize};

fn default_kanji_column() -> usize {
    ColumnLayout::DEFAULT_KANJI_COLUMN
}

fn default_definition_column() -> usize {
    ColumnLayout::DEFAULT_DEFINITION_COLUMN
}

fn default_output_prefix() -> String {
    kanji_core::pipeline::DEFAULT_OUTPUT_PREFIX.to_string()
}

/// Column layout of the vocabulary table, 0-based
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    #[serde(default = "default_kanji_column")]
    pub kanji_column: usize,
    #[serde(default = "default_definition_column")]
    pub definition_column: usize,
    /// Prepended to the input file name when no output path is given
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
}

impl TableConfig {
    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout::new(self.kanji_column, self.definition_column)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            kanji_column: default_kanji_column(),
            definition_column: default_definition_column(),
            output_prefix: default_output_prefix(),
        }
    }
}
