//! Training Import
//!
//! Bulk sources of training messages for the CLI:
//! - plain text, one message per line
//! - CSV chat exports with a content column and an optional author filter

use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Errors raised while reading a training source
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column not found: {0}")]
    MissingColumn(String),
}

/// Messages read from a source plus counters for reporting
#[derive(Debug, Default)]
pub struct ImportResult {
    pub messages: Vec<String>,
    pub rows_processed: usize,
    /// Rows dropped for being blank or by the author filter
    pub rows_skipped: usize,
}

/// Read one message per non-blank line
pub fn import_text(path: &Path) -> Result<ImportResult, ImportError> {
    let content = std::fs::read_to_string(path)?;
    Ok(import_text_str(&content))
}

pub fn import_text_str(content: &str) -> ImportResult {
    let mut result = ImportResult::default();

    for line in content.lines() {
        result.rows_processed += 1;
        if line.trim().is_empty() {
            result.rows_skipped += 1;
        } else {
            result.messages.push(line.to_string());
        }
    }

    result
}

/// CSV chat-export importer with header-based column selection
pub struct CsvImporter {
    /// Header of the message text column
    content_column: String,
    /// Header of the author column
    author_column: String,
    /// Keep only rows from this author (case-insensitive)
    author: Option<String>,
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvImporter {
    /// Create an importer for the common `Author`/`Content` export layout
    pub fn new() -> Self {
        Self {
            content_column: "Content".to_string(),
            author_column: "Author".to_string(),
            author: None,
        }
    }

    /// Set the message text column header
    pub fn with_content_column(mut self, column: &str) -> Self {
        self.content_column = column.to_string();
        self
    }

    /// Set the author column header
    pub fn with_author_column(mut self, column: &str) -> Self {
        self.author_column = column.to_string();
        self
    }

    /// Keep only messages written by `author`
    pub fn with_author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn import(&self, path: &Path) -> Result<ImportResult, ImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    pub fn import_str(&self, data: &str) -> Result<ImportResult, ImportError> {
        self.import_reader(data.as_bytes())
    }

    fn import_reader<R: Read>(&self, reader: R) -> Result<ImportResult, ImportError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();

        let content_idx = find_column(&headers, &self.content_column)?;
        let author_idx = match self.author {
            Some(_) => Some(find_column(&headers, &self.author_column)?),
            None => None,
        };

        let mut result = ImportResult::default();

        for record in reader.records() {
            let record = record?;
            result.rows_processed += 1;

            if let (Some(idx), Some(author)) = (author_idx, self.author.as_deref()) {
                let row_author = record.get(idx).unwrap_or("");
                if !row_author.trim().eq_ignore_ascii_case(author.trim()) {
                    result.rows_skipped += 1;
                    continue;
                }
            }

            match record.get(content_idx) {
                Some(text) if !text.trim().is_empty() => result.messages.push(text.to_string()),
                _ => result.rows_skipped += 1,
            }
        }

        tracing::debug!(
            "CSV import: {} rows, {} messages, {} skipped",
            result.rows_processed,
            result.messages.len(),
            result.rows_skipped
        );

        Ok(result)
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, ImportError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ImportError::MissingColumn(name.to_string()))
}
