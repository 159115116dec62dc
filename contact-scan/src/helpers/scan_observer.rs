use shared_types::{ScanEvent, ScanObserver};
use tracing::{debug, error, info, warn};

/// Logs scan events through `tracing`
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn on_event(&self, event: &ScanEvent) {
        match event {
            ScanEvent::ScanStarted { root } => {
                info!("Starting scan in: {}", root.display());
            }
            ScanEvent::DocumentSkipped {
                path,
                format,
                reason,
            } => {
                warn!(
                    "Skipping .{} file {}: {}",
                    format.extension(),
                    path.display(),
                    reason
                );
            }
            ScanEvent::DocumentParsed {
                path,
                records,
                ..
            } => {
                info!(
                    "Data found in: {} ({} contact(s))",
                    file_name(path),
                    records
                );
            }
            ScanEvent::DocumentEmpty { path, .. } => {
                debug!("No valid table data found in {}", file_name(path));
            }
            ScanEvent::DocumentFailed { path, error } => {
                error!("Error processing {}: {}", path.display(), error);
            }
            ScanEvent::DuplicatesRemoved { removed } => {
                if *removed > 0 {
                    info!("Removed {} duplicate contact(s)", removed);
                }
            }
            ScanEvent::ScanFinished { summary } => {
                info!(
                    "Scan finished in {:.2?}: {} document(s), {} with data, {} empty, {} failed, {} skipped; {} contact(s) kept",
                    summary.elapsed,
                    summary.documents_seen,
                    summary.documents_with_data,
                    summary.documents_empty,
                    summary.documents_failed,
                    summary.documents_skipped,
                    summary.records_kept()
                );
            }
        }
    }
}

/// Keeps every event in memory, in the order received
#[cfg(test)]
#[derive(Default)]
pub struct RecordingObserver {
    events: std::sync::Mutex<Vec<ScanEvent>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScanEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl ScanObserver for RecordingObserver {
    fn on_event(&self, event: &ScanEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
