mod csv_export;
mod json_export;

pub use csv_export::{csv_headers, write_csv};
pub use json_export::write_json;

use crate::config::ExportConfig;
use anyhow::{Context, Result};
use shared_types::ContactRecord;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

/// Write the records in every format enabled in `config`. Returns the files
/// written.
pub fn export_records(records: &[ContactRecord], config: &ExportConfig) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let mut written = Vec::new();

    if config.csv {
        let path = config.output_dir.join(format!("{}.csv", config.file_stem));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_csv(records, BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    if config.json {
        let path = config.output_dir.join(format!("{}.json", config.file_stem));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_json(records, BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    for path in &written {
        info!("Exported {} contact(s) to {}", records.len(), path.display());
    }

    Ok(written)
}
