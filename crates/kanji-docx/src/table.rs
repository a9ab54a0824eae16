use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use docx_rs::{
    BreakType, DocumentChild, Docx, Paragraph, ParagraphChild, Run, RunChild, Table,
    TableCell, TableCellContent, TableChild, TableRow, TableRowChild,
};
use kanji_core::table::{TableAccessor, TableError};

/// The first table of a `.docx` document, held in memory until saved
pub struct DocxTable {
    docx: Docx,
}

impl DocxTable {
    /// Open a document and locate its first table
    pub fn open(path: &Path) -> Result<Self, TableError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TableError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Loaded {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TableError> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| TableError::Format(e.to_string()))?;
        Self::from_docx(docx)
    }

    pub fn from_docx(docx: Docx) -> Result<Self, TableError> {
        let table = Self { docx };
        let rows = table.table()?.rows.len();
        tracing::debug!("First table has {} rows", rows);
        Ok(table)
    }

    /// Full text of a cell, paragraphs and line breaks joined with `\n`
    pub fn cell_text(&self, row: usize, column: usize) -> Result<String, TableError> {
        let cell = self.cell(row, column)?;
        let paragraphs: Vec<String> = paragraphs(cell).map(paragraph_text).collect();
        Ok(paragraphs.join("\n"))
    }

    fn table(&self) -> Result<&Table, TableError> {
        self.docx
            .document
            .children
            .iter()
            .find_map(|child| match child {
                DocumentChild::Table(table) => Some(&**table),
                _ => None,
            })
            .ok_or_else(no_table)
    }

    fn table_mut(&mut self) -> Result<&mut Table, TableError> {
        self.docx
            .document
            .children
            .iter_mut()
            .find_map(|child| match child {
                DocumentChild::Table(table) => Some(&mut **table),
                _ => None,
            })
            .ok_or_else(no_table)
    }

    fn cell(&self, row: usize, column: usize) -> Result<&TableCell, TableError> {
        let table_row = self
            .table()?
            .rows
            .get(row)
            .and_then(as_row)
            .ok_or_else(|| missing(row, None))?;

        table_row
            .cells
            .get(column)
            .and_then(as_cell)
            .ok_or_else(|| missing(row, Some(column)))
    }

    fn cell_mut(&mut self, row: usize, column: usize) -> Result<&mut TableCell, TableError> {
        let table_row = self
            .table_mut()?
            .rows
            .get_mut(row)
            .and_then(as_row_mut)
            .ok_or_else(|| missing(row, None))?;

        table_row
            .cells
            .get_mut(column)
            .and_then(as_cell_mut)
            .ok_or_else(|| missing(row, Some(column)))
    }
}

impl TableAccessor for DocxTable {
    fn row_count(&self) -> usize {
        self.table().map(|table| table.rows.len()).unwrap_or(0)
    }

    fn sub_entries(&self, row: usize, column: usize) -> Result<Vec<String>, TableError> {
        let cell = self.cell(row, column)?;
        Ok(paragraphs(cell)
            .map(paragraph_text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect())
    }

    fn write_cell(&mut self, row: usize, column: usize, text: &str) -> Result<(), TableError> {
        let mut run = Run::new();
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                run = run.add_break(BreakType::TextWrapping);
            }
            if !line.is_empty() {
                run = run.add_text(line);
            }
        }

        let cell = self.cell_mut(row, column)?;
        cell.children = vec![TableCellContent::Paragraph(Box::new(
            Paragraph::new().add_run(run),
        ))];
        Ok(())
    }

    fn save(self, path: &Path) -> Result<(), TableError> {
        // Packed in memory so a failed pack leaves the destination untouched
        let mut buffer = Cursor::new(Vec::new());
        self.docx
            .build()
            .pack(&mut buffer)
            .map_err(|e| TableError::Io(io::Error::other(e.to_string())))?;
        fs::write(path, buffer.into_inner())?;
        tracing::info!("Wrote {}", path.display());
        Ok(())
    }
}

fn no_table() -> TableError {
    TableError::Structure("document has no tables".to_string())
}

fn missing(row: usize, column: Option<usize>) -> TableError {
    match column {
        Some(column) => TableError::Structure(format!("row {row} has no column {column}")),
        None => TableError::Structure(format!("table has no row {row}")),
    }
}

#[allow(irrefutable_let_patterns)]
fn as_row(child: &TableChild) -> Option<&TableRow> {
    if let TableChild::TableRow(row) = child { Some(row) } else { None }
}

#[allow(irrefutable_let_patterns)]
fn as_row_mut(child: &mut TableChild) -> Option<&mut TableRow> {
    if let TableChild::TableRow(row) = child { Some(row) } else { None }
}

#[allow(irrefutable_let_patterns)]
fn as_cell(child: &TableRowChild) -> Option<&TableCell> {
    if let TableRowChild::TableCell(cell) = child { Some(cell) } else { None }
}

#[allow(irrefutable_let_patterns)]
fn as_cell_mut(child: &mut TableRowChild) -> Option<&mut TableCell> {
    if let TableRowChild::TableCell(cell) = child { Some(cell) } else { None }
}

fn paragraphs(cell: &TableCell) -> impl Iterator<Item = &Paragraph> {
    cell.children.iter().filter_map(|content| match content {
        TableCellContent::Paragraph(paragraph) => Some(&**paragraph),
        _ => None,
    })
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Break(_) => text.push('\n'),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}
