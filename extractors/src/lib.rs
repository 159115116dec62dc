//! Extractors Crate
//!
//! Turns office documents into contact records. The pieces are independent so
//! callers can swap any of them:
//!
//! - **Table readers** (`document_tables`): yield the raw text of table cells
//!   for PDF, DOCX, ODT and legacy DOC files
//! - **Contact parser** (`contact_parser`): splits one cell into name, address,
//!   phones and emails
//! - **Deduplication** (`dedupe`): drops records that describe the same contact
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{dedupe, ContactParser};
//!
//! let parser = ContactParser::with_defaults();
//! let records: Vec<_> = cells.iter().filter_map(|c| parser.parse(&c.text)).collect();
//! let outcome = dedupe(records);
//! ```

pub mod contact_parser;
pub mod dedupe;
pub mod document_tables;

// Re-export commonly used types
pub use contact_parser::{ContactParser, ContactPatterns, ParserConfig};
pub use dedupe::dedupe;
pub use document_tables::{
    DocumentTableExtractor, DocxTableExtractor, LegacyDocExtractor, OdtTableExtractor,
    PdfTableExtractor, SofficeConverter,
};

// Re-export the extractor traits from shared-types for convenience
pub use shared_types::{DocumentConverter, TableExtractor};
