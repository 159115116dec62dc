use crate::document_tables::{open_archive, read_archive_entry};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use shared_types::{DocumentFormat, ExtractionError, RawCell, TableExtractor};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

const CONTENT_XML: &str = "content.xml";

/// Reads table cells from an OpenDocument text file
pub struct OdtTableExtractor {
    max_tables: usize,
}

impl OdtTableExtractor {
    pub fn new(max_tables: usize) -> Self {
        Self { max_tables }
    }
}

impl TableExtractor for OdtTableExtractor {
    fn extract_cells(&self, path: &Path) -> Result<Vec<RawCell>, ExtractionError> {
        let file = File::open(path)?;
        let mut archive = open_archive(BufReader::new(file))?;
        let xml = read_archive_entry(&mut archive, CONTENT_XML)?;
        parse_content_tables(&xml, self.max_tables)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Odt
    }
}

/// Number of spaces a `<text:s/>` element stands for
fn space_count(element: &BytesStart) -> usize {
    element
        .try_get_attribute("text:c")
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
        .and_then(|value| value.parse().ok())
        .unwrap_or(1)
}

fn parse_content_tables(xml: &str, max_tables: usize) -> Result<Vec<RawCell>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut cells = Vec::new();
    let mut tables_done = 0;
    let mut table_depth = 0usize;
    let mut position = 0;

    let mut in_cell = false;
    let mut paragraph_depth = 0usize;
    let mut paragraphs = 0;
    let mut cell_text = String::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"table:table" => {
                        table_depth += 1;
                        if table_depth == 1 {
                            if tables_done >= max_tables {
                                break;
                            }
                            position = 0;
                        }
                    }
                    b"table:table-cell" if table_depth == 1 => {
                        in_cell = true;
                        paragraphs = 0;
                        cell_text.clear();
                    }
                    b"text:p" | b"text:h" if in_cell => {
                        if paragraph_depth == 0 {
                            if paragraphs > 0 {
                                cell_text.push('\n');
                            }
                            paragraphs += 1;
                        }
                        paragraph_depth += 1;
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"table:table-cell" if table_depth == 1 => {
                        cells.push(RawCell::new(tables_done, position, ""));
                        position += 1;
                    }
                    b"text:p" | b"text:h" if in_cell && paragraph_depth == 0 => {
                        if paragraphs > 0 {
                            cell_text.push('\n');
                        }
                        paragraphs += 1;
                    }
                    b"text:s" if paragraph_depth > 0 => {
                        cell_text.push_str(&" ".repeat(space_count(&e)));
                    }
                    b"text:tab" if paragraph_depth > 0 => cell_text.push('\t'),
                    b"text:line-break" if paragraph_depth > 0 => cell_text.push('\n'),
                    _ => {}
                }
            }
            Ok(Event::Text(e)) if paragraph_depth > 0 => {
                let text = e
                    .unescape()
                    .map_err(|e| ExtractionError::ParseError(e.to_string()))?;
                cell_text.push_str(&text);
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                match name.as_ref() {
                    b"text:p" | b"text:h" if paragraph_depth > 0 => paragraph_depth -= 1,
                    b"table:table-cell" if table_depth == 1 && in_cell => {
                        cells.push(RawCell::new(tables_done, position, cell_text.trim()));
                        position += 1;
                        in_cell = false;
                    }
                    b"table:table" => {
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
                    CONTENT_XML,
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    debug!("Read {} cells from {} ODT table(s)", cells.len(), tables_done);

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_tables::zip_bytes;
    use std::io::Write;

    fn content(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:text>{body}</office:text></office:body></office:document-content>"#
        )
    }

    #[test]
    fn test_cells_in_reading_order() {
        let xml = content(
            r#"<text:p>Intro</text:p><table:table table:name="Tableau1"><table:table-column/><table:table-row><table:table-cell><text:p>Nom</text:p></table:table-cell><table:table-cell><text:p>Jean Dupont</text:p><text:p>12 Rue de Paris</text:p></table:table-cell></table:table-row><table:table-row><table:table-cell/><table:covered-table-cell/><table:table-cell><text:p>06 12 34 56 78</text:p></table:table-cell></table:table-row></table:table>"#,
        );

        let cells = parse_content_tables(&xml, 1).unwrap();
        let texts: Vec<_> = cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Nom", "Jean Dupont\n12 Rue de Paris", "", "06 12 34 56 78"]
        );
        assert_eq!(cells[3].position, 3);
    }

    #[test]
    fn test_spans_spaces_tabs_and_breaks() {
        let xml = content(
            r#"<table:table><table:table-row><table:table-cell><text:p><text:span text:style-name="T1">Cabinet</text:span><text:s text:c="3"/>Martin<text:line-break/>Lyon<text:tab/>69002<text:s/>France</text:p></table:table-cell></table:table-row></table:table>"#,
        );

        let cells = parse_content_tables(&xml, 1).unwrap();
        assert_eq!(cells[0].text, "Cabinet   Martin\nLyon\t69002 France");
    }

    #[test]
    fn test_max_tables_and_nested_tables() {
        let xml = content(
            r#"<table:table><table:table-row><table:table-cell><text:p>outer</text:p><table:table><table:table-row><table:table-cell><text:p>inner</text:p></table:table-cell></table:table-row></table:table></table:table-cell></table:table-row></table:table><table:table><table:table-row><table:table-cell><text:p>second</text:p></table:table-cell></table:table-row></table:table>"#,
        );

        let first = parse_content_tables(&xml, 1).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].text, "outer\ninner");

        let both = parse_content_tables(&xml, 5).unwrap();
        assert_eq!(both[1], RawCell::new(1, 0, "second"));
    }

    #[test]
    fn test_extract_cells_from_file() {
        let xml = content(
            r#"<table:table><table:table-row><table:table-cell><text:p>Contact</text:p></table:table-cell><table:table-cell><text:p>M. Durand</text:p></table:table-cell></table:table-row></table:table>"#,
        );
        let bytes = zip_bytes(&[
            ("mimetype", "application/vnd.oasis.opendocument.text"),
            ("content.xml", &xml),
        ]);

        let mut file = tempfile::Builder::new().suffix(".odt").tempfile().unwrap();
        file.write_all(&bytes).unwrap();

        let cells = OdtTableExtractor::new(1).extract_cells(file.path()).unwrap();
        assert_eq!(cells[1].text, "M. Durand");
    }

    #[test]
    fn test_malformed_xml() {
        let xml = content("<table:table><table:table-row></table:table>");
        let result = parse_content_tables(&xml, 1);
        assert!(matches!(result, Err(ExtractionError::ParseError(_))));
    }
}
