use crate::document_tables::{open_archive, read_archive_entry};
use quick_xml::events::Event;
use quick_xml::Reader;
use shared_types::{DocumentFormat, ExtractionError, RawCell, TableExtractor};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

const DOCUMENT_XML: &str = "word/document.xml";

/// Reads table cells from the main part of a Word (OOXML) document
pub struct DocxTableExtractor {
    max_tables: usize,
}

impl DocxTableExtractor {
    pub fn new(max_tables: usize) -> Self {
        Self { max_tables }
    }

    /// Extract from DOCX bytes already in memory, e.g. a converted legacy file
    pub fn extract_from_bytes(&self, bytes: &[u8]) -> Result<Vec<RawCell>, ExtractionError> {
        self.extract_from_reader(Cursor::new(bytes))
    }

    fn extract_from_reader<R: Read + Seek>(
        &self,
        reader: R,
    ) -> Result<Vec<RawCell>, ExtractionError> {
        let mut archive = open_archive(reader)?;
        let xml = read_archive_entry(&mut archive, DOCUMENT_XML)?;
        parse_document_tables(&xml, self.max_tables)
    }
}

impl TableExtractor for DocxTableExtractor {
    fn extract_cells(&self, path: &Path) -> Result<Vec<RawCell>, ExtractionError> {
        let file = File::open(path)?;
        self.extract_from_reader(BufReader::new(file))
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }
}

/// Walk `word/document.xml` and collect the cells of the first `max_tables`
/// top-level tables. Paragraphs within a cell are separated by newlines and
/// nested tables contribute their text to the enclosing cell.
fn parse_document_tables(xml: &str, max_tables: usize) -> Result<Vec<RawCell>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut cells = Vec::new();
    let mut tables_done = 0;
    let mut table_depth = 0usize;
    let mut position = 0;

    let mut in_cell = false;
    let mut in_run = false;
    let mut in_text = false;
    let mut paragraphs = 0;
    let mut cell_text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:tbl" => {
                        table_depth += 1;
                        if table_depth == 1 {
                            if tables_done >= max_tables {
                                break;
                            }
                            position = 0;
                        }
                    }
                    b"w:tc" if table_depth == 1 => {
                        in_cell = true;
                        paragraphs = 0;
                        cell_text.clear();
                    }
                    b"w:p" if in_cell => {
                        if paragraphs > 0 {
                            cell_text.push('\n');
                        }
                        paragraphs += 1;
                    }
                    b"w:r" if in_cell => in_run = true,
                    b"w:t" if in_run => in_text = true,
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:p" if in_cell => {
                        if paragraphs > 0 {
                            cell_text.push('\n');
                        }
                        paragraphs += 1;
                    }
                    b"w:br" | b"w:cr" if in_run => cell_text.push('\n'),
                    b"w:tab" if in_run => cell_text.push('\t'),
                    b"w:tc" if table_depth == 1 => {
                        cells.push(RawCell::new(tables_done, position, ""));
                        position += 1;
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| ExtractionError::ParseError(e.to_string()))?;
                cell_text.push_str(&text);
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:t" => in_text = false,
                    b"w:r" => in_run = false,
                    b"w:tc" if table_depth == 1 && in_cell => {
                        cells.push(RawCell::new(tables_done, position, cell_text.trim()));
                        position += 1;
                        in_cell = false;
                    }
                    b"w:tbl" => {
                        if table_depth == 1 {
                            tables_done += 1;
                        }
                        table_depth = table_depth.saturating_sub(1);
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::ParseError(format!(
                    "Malformed {} at position {}: {}",
                    DOCUMENT_XML,
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    debug!(
        "Read {} cells from {} DOCX table(s)",
        cells.len(),
        tables_done
    );

    Ok(cells)
}
