use crate::extraction::DocumentFormat;
use std::path::PathBuf;
use std::time::Duration;

/// Events emitted while walking a directory tree for documents
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    ScanStarted {
        root: PathBuf,
    },
    /// A supported document that was deliberately not read
    DocumentSkipped {
        path: PathBuf,
        format: DocumentFormat,
        reason: String,
    },
    DocumentParsed {
        path: PathBuf,
        format: DocumentFormat,
        records: usize,
    },
    /// The document was read but no selected cell produced a contact
    DocumentEmpty {
        path: PathBuf,
        format: DocumentFormat,
    },
    DocumentFailed {
        path: PathBuf,
        error: String,
    },
    DuplicatesRemoved {
        removed: usize,
    },
    ScanFinished {
        summary: ScanSummary,
    },
}

/// Receives scan events. Implementations decide how to surface them.
pub trait ScanObserver {
    fn on_event(&self, event: &ScanEvent);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub documents_seen: usize,
    pub documents_with_data: usize,
    pub documents_empty: usize,
    pub documents_failed: usize,
    pub documents_skipped: usize,
    pub records_parsed: usize,
    pub duplicates_removed: usize,
    pub elapsed: Duration,
}

impl ScanSummary {
    pub fn records_kept(&self) -> usize {
        self.records_parsed.saturating_sub(self.duplicates_removed)
    }
}
