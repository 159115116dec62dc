use serde::{Deserialize, Serialize};
use std::path::Path;

/// Core trait that all table extractors must implement
pub trait TableExtractor {
    /// Extract the cells of the document's leading tables, in reading order
    fn extract_cells(&self, path: &Path) -> Result<Vec<RawCell>, ExtractionError>;

    /// Which document format does this extractor read?
    fn format(&self) -> DocumentFormat;
}

/// Turns a document into DOCX bytes that the DOCX extractor can read
pub trait DocumentConverter {
    fn convert_to_docx(&self, path: &Path) -> Result<Vec<u8>, ExtractionError>;
}

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conversion error: {0}")]
    ConversionError(String),
}

/// Document formats the scanner knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Odt,
    /// Legacy binary Word document, read after conversion to DOCX
    Doc,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "odt" => Some(Self::Odt),
            "doc" => Some(Self::Doc),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Odt => "odt",
            Self::Doc => "doc",
        }
    }
}

/// Text of one table cell plus where it sat in the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCell {
    /// 0-based index of the table within the document
    pub table: usize,
    /// 0-based index of the cell within its table, row by row
    pub position: usize,
    pub text: String,
}

impl RawCell {
    pub fn new(table: usize, position: usize, text: impl Into<String>) -> Self {
        Self {
            table,
            position,
            text: text.into(),
        }
    }
}

/// Which tables and cells of a document get parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSelection {
    pub max_tables: usize,
    /// Parse only this cell of each table; `None` parses every cell
    pub cell_index: Option<usize>,
}

impl Default for TableSelection {
    fn default() -> Self {
        Self {
            max_tables: 1,
            cell_index: Some(1),
        }
    }
}

impl TableSelection {
    /// Keep the cells this selection asks for, preserving document order
    pub fn select(&self, cells: Vec<RawCell>) -> Vec<RawCell> {
        cells
            .into_iter()
            .filter(|cell| cell.table < self.max_tables)
            .filter(|cell| match self.cell_index {
                Some(index) => cell.position == index,
                None => true,
            })
            .collect()
    }
}
