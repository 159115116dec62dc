mod doc;
mod docx;
mod odt;
mod pdf;

pub use doc::{LegacyDocExtractor, SofficeConverter};
pub use docx::DocxTableExtractor;
pub use odt::OdtTableExtractor;
pub use pdf::PdfTableExtractor;

use shared_types::{DocumentConverter, DocumentFormat, ExtractionError, TableExtractor};
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Routes documents to the table extractor registered for their format
pub struct DocumentTableExtractor {
    extractors: HashMap<DocumentFormat, Box<dyn TableExtractor>>,
}

impl DocumentTableExtractor {
    /// Extractor with no formats registered
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Register the PDF, DOCX and ODT readers, plus the legacy DOC reader
    /// when a converter is supplied
    pub fn new(max_tables: usize, converter: Option<Box<dyn DocumentConverter>>) -> Self {
        let mut extractor = Self::empty()
            .with_extractor(Box::new(PdfTableExtractor::new(max_tables)))
            .with_extractor(Box::new(DocxTableExtractor::new(max_tables)))
            .with_extractor(Box::new(OdtTableExtractor::new(max_tables)));

        if let Some(converter) = converter {
            extractor = extractor.with_extractor(Box::new(LegacyDocExtractor::new(
                converter,
                DocxTableExtractor::new(max_tables),
            )));
        }

        extractor
    }

    /// Register (or replace) the extractor for its format
    pub fn with_extractor(mut self, extractor: Box<dyn TableExtractor>) -> Self {
        self.extractors.insert(extractor.format(), extractor);
        self
    }

    pub fn extractor_for(&self, format: DocumentFormat) -> Option<&dyn TableExtractor> {
        self.extractors.get(&format).map(|e| e.as_ref())
    }
}

/// Read one entry of an office document's ZIP container as UTF-8 text
pub(crate) fn read_archive_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, ExtractionError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| ExtractionError::ParseError(format!("Missing {}: {}", name, e)))?;

    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(content)
}

pub(crate) fn open_archive<R: Read + Seek>(reader: R) -> Result<ZipArchive<R>, ExtractionError> {
    ZipArchive::new(reader)
        .map_err(|e| ExtractionError::ParseError(format!("Not a valid document archive: {}", e)))
}

#[cfg(test)]
pub(crate) fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::RawCell;
    use std::path::Path;

    struct FixedExtractor;

    impl TableExtractor for FixedExtractor {
        fn extract_cells(&self, _path: &Path) -> Result<Vec<RawCell>, ExtractionError> {
            Ok(vec![RawCell::new(0, 0, "fixed")])
        }

        fn format(&self) -> DocumentFormat {
            DocumentFormat::Pdf
        }
    }

    #[test]
    fn test_default_registry_without_converter() {
        let extractor = DocumentTableExtractor::new(1, None);

        assert!(extractor.extractor_for(DocumentFormat::Pdf).is_some());
        assert!(extractor.extractor_for(DocumentFormat::Docx).is_some());
        assert!(extractor.extractor_for(DocumentFormat::Odt).is_some());
        assert!(extractor.extractor_for(DocumentFormat::Doc).is_none());
    }

    #[test]
    fn test_default_registry_with_converter() {
        let extractor =
            DocumentTableExtractor::new(1, Some(Box::new(SofficeConverter::default())));

        let doc = extractor.extractor_for(DocumentFormat::Doc).unwrap();
        assert_eq!(doc.format(), DocumentFormat::Doc);
    }

    #[test]
    fn test_with_extractor_replaces_format() {
        let extractor = DocumentTableExtractor::new(1, None).with_extractor(Box::new(FixedExtractor));

        let cells = extractor
            .extractor_for(DocumentFormat::Pdf)
            .unwrap()
            .extract_cells(Path::new("ignored.pdf"))
            .unwrap();
        assert_eq!(cells[0].text, "fixed");
    }

    #[test]
    fn test_missing_archive_entry() {
        let bytes = zip_bytes(&[("other.xml", "<x/>")]);
        let mut archive = open_archive(std::io::Cursor::new(bytes)).unwrap();

        let err = read_archive_entry(&mut archive, "content.xml").unwrap_err();
        assert!(err.to_string().contains("content.xml"));
    }

    #[test]
    fn test_not_an_archive() {
        let result = open_archive(std::io::Cursor::new(b"plain text".to_vec()));
        assert!(matches!(result, Err(ExtractionError::ParseError(_))));
    }
}
