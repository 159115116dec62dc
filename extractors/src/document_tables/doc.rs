//! Legacy Word (.doc) support through conversion to DOCX.

use crate::document_tables::DocxTableExtractor;
use shared_types::{DocumentConverter, DocumentFormat, ExtractionError, RawCell, TableExtractor};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::debug;

/// Converts documents with a headless LibreOffice (`soffice`) process
#[derive(Debug, Clone)]
pub struct SofficeConverter {
    program: PathBuf,
}

impl SofficeConverter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check whether the converter binary can be launched
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for SofficeConverter {
    fn default() -> Self {
        Self::new("soffice")
    }
}

impl DocumentConverter for SofficeConverter {
    fn convert_to_docx(&self, path: &Path) -> Result<Vec<u8>, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::InvalidInput(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let temp_dir = TempDir::new()?;

        debug!(
            "Converting {} with {}",
            path.display(),
            self.program.display()
        );

        let output = Command::new(&self.program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("docx:MS Word 2007 XML")
            .arg("--outdir")
            .arg(temp_dir.path())
            .arg(path)
            .output()
            .map_err(|e| {
                ExtractionError::ConversionError(format!(
                    "Failed to execute {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::ConversionError(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        let stem = path
            .file_stem()
            .ok_or_else(|| ExtractionError::InvalidInput("Invalid input filename".to_string()))?
            .to_string_lossy();
        let docx_path = temp_dir.path().join(format!("{}.docx", stem));

        if !docx_path.exists() {
            return Err(ExtractionError::ConversionError(format!(
                "Converted DOCX not found at {}",
                docx_path.display()
            )));
        }

        Ok(std::fs::read(&docx_path)?)
    }
}

/// Reads `.doc` tables by converting the file and handing the DOCX bytes to
/// the DOCX extractor
pub struct LegacyDocExtractor {
    converter: Box<dyn DocumentConverter>,
    docx: DocxTableExtractor,
}

impl LegacyDocExtractor {
    pub fn new(converter: Box<dyn DocumentConverter>, docx: DocxTableExtractor) -> Self {
        Self { converter, docx }
    }
}

impl TableExtractor for LegacyDocExtractor {
    fn extract_cells(&self, path: &Path) -> Result<Vec<RawCell>, ExtractionError> {
        let bytes = self.converter.convert_to_docx(path)?;
        self.docx.extract_from_bytes(&bytes)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Doc
    }
}
