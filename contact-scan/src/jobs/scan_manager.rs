use anyhow::{bail, Result};
use extractors::{dedupe, ContactParser, DocumentTableExtractor};
use shared_types::{
    ContactRecord, DocumentFormat, ExtractionError, ScanEvent, ScanObserver, ScanSummary,
    TableExtractor, TableSelection,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Records left after deduplication, plus counters for the whole run
#[derive(Debug)]
pub struct ScanOutcome {
    pub records: Vec<ContactRecord>,
    pub summary: ScanSummary,
}

/// Walks a directory tree and turns every supported document into contacts
pub struct ScanManager {
    extractor: DocumentTableExtractor,
    parser: ContactParser,
    selection: TableSelection,
    observer: Arc<dyn ScanObserver>,
}

impl ScanManager {
    pub fn new(
        extractor: DocumentTableExtractor,
        parser: ContactParser,
        selection: TableSelection,
        observer: Arc<dyn ScanObserver>,
    ) -> Self {
        Self {
            extractor,
            parser,
            selection,
            observer,
        }
    }

    /// Scan `root` recursively. A document that cannot be read is reported and
    /// skipped; only an unusable root aborts the run.
    pub fn run(&self, root: &Path) -> Result<ScanOutcome> {
        if !root.is_dir() {
            bail!("Scan root is not a directory: {}", root.display());
        }

        let started = Instant::now();
        self.observer.on_event(&ScanEvent::ScanStarted {
            root: root.to_path_buf(),
        });

        let mut summary = ScanSummary::default();
        let mut records = Vec::new();

        for path in collect_files(root) {
            let Some(format) = DocumentFormat::from_path(&path) else {
                continue;
            };
            summary.documents_seen += 1;

            let Some(extractor) = self.extractor.extractor_for(format) else {
                summary.documents_skipped += 1;
                self.observer.on_event(&ScanEvent::DocumentSkipped {
                    path,
                    format,
                    reason: "no reader configured for this format".to_string(),
                });
                continue;
            };

            match self.process_document(&path, extractor) {
                Ok(found) if found.is_empty() => {
                    summary.documents_empty += 1;
                    self.observer
                        .on_event(&ScanEvent::DocumentEmpty { path, format });
                }
                Ok(found) => {
                    summary.documents_with_data += 1;
                    summary.records_parsed += found.len();
                    self.observer.on_event(&ScanEvent::DocumentParsed {
                        path,
                        format,
                        records: found.len(),
                    });
                    records.extend(found);
                }
                Err(e) => {
                    summary.documents_failed += 1;
                    self.observer.on_event(&ScanEvent::DocumentFailed {
                        path,
                        error: e.to_string(),
                    });
                }
            }
        }

        let outcome = dedupe(records);
        summary.duplicates_removed = outcome.removed;
        self.observer.on_event(&ScanEvent::DuplicatesRemoved {
            removed: outcome.removed,
        });

        summary.elapsed = started.elapsed();
        self.observer.on_event(&ScanEvent::ScanFinished {
            summary: summary.clone(),
        });

        Ok(ScanOutcome {
            records: outcome.kept,
            summary,
        })
    }

    /// Parse the selected cells of one document and tag each record with it
    fn process_document(
        &self,
        path: &Path,
        extractor: &dyn TableExtractor,
    ) -> Result<Vec<ContactRecord>, ExtractionError> {
        let cells = extractor.extract_cells(path)?;
        let selected = self.selection.select(cells);
        debug!("{} cell(s) selected in {}", selected.len(), path.display());

        let source = path.display().to_string();
        Ok(selected
            .iter()
            .filter_map(|cell| self.parser.parse(&cell.text))
            .map(|record| record.with_source(source.clone()))
            .collect())
    }
}

/// Every file below `root` in sorted depth-first order. Entries that cannot
/// be read are logged and skipped, and symlinked directories are not
/// followed.
fn collect_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Cannot read directory entry: {}", e);
                None
            }
        })
        .filter(|entry| !entry.file_type().is_dir() && entry.path().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
