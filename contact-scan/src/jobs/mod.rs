pub mod scan_manager;

pub use scan_manager::{ScanManager, ScanOutcome};
