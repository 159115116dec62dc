pub mod contact;
pub mod extraction;
pub mod scan;

pub use contact::{ContactRecord, DedupeOutcome, UNKNOWN_CONTACT_NAME};
pub use extraction::{
    DocumentConverter, DocumentFormat, ExtractionError, RawCell, TableExtractor, TableSelection,
};
pub use scan::{ScanEvent, ScanObserver, ScanSummary};
