use pdfplumber::{Pdf, TableSettings};
use shared_types::{DocumentFormat, ExtractionError, RawCell, TableExtractor};
use std::path::Path;
use tracing::debug;

/// Reads ruled tables from the first page of a PDF.
///
/// Cells of each table are flattened row by row and empty cells are dropped,
/// so positions count only cells that hold text.
pub struct PdfTableExtractor {
    max_tables: usize,
    settings: TableSettings,
}

impl PdfTableExtractor {
    pub fn new(max_tables: usize) -> Self {
        Self {
            max_tables,
            settings: TableSettings::default(),
        }
    }

    pub fn extract_from_bytes(&self, bytes: &[u8]) -> Result<Vec<RawCell>, ExtractionError> {
        let pdf = Pdf::open_bytes(bytes, None)
            .map_err(|e| ExtractionError::ParseError(format!("Failed to load PDF: {}", e)))?;
        self.extract_from_pdf(&pdf)
    }

    fn extract_from_pdf(&self, pdf: &Pdf) -> Result<Vec<RawCell>, ExtractionError> {
        if self.max_tables == 0 || pdf.page_count() == 0 {
            return Ok(Vec::new());
        }

        let page = pdf.page(0).map_err(|e| {
            ExtractionError::ParseError(format!("Failed to read first page: {}", e))
        })?;
        let tables = page.extract_tables(&self.settings);

        let cells = flatten_tables(tables, self.max_tables);
        debug!("Read {} cells from PDF tables", cells.len());
        Ok(cells)
    }
}

impl TableExtractor for PdfTableExtractor {
    fn extract_cells(&self, path: &Path) -> Result<Vec<RawCell>, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::InvalidInput(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let pdf = Pdf::open_path(path, None)
            .map_err(|e| ExtractionError::ParseError(format!("Failed to load PDF: {}", e)))?;
        self.extract_from_pdf(&pdf)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }
}

/// Row-major cells of the first `max_tables` tables, skipping spanned and
/// blank cells
fn flatten_tables(tables: Vec<Vec<Vec<Option<String>>>>, max_tables: usize) -> Vec<RawCell> {
    tables
        .into_iter()
        .take(max_tables)
        .enumerate()
        .flat_map(|(table, rows)| {
            rows.into_iter()
                .flatten()
                .flatten()
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .enumerate()
                .map(move |(position, text)| RawCell::new(table, position, text))
        })
        .collect()
}
