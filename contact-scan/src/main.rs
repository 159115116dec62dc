use anyhow::Context;
use clap::Parser;
use contact_scan::config::ScanConfig;
use contact_scan::export::export_records;
use contact_scan::helpers::logging::init_tracing;
use contact_scan::helpers::scan_observer::TracingObserver;
use contact_scan::jobs::ScanManager;
use extractors::{ContactParser, DocumentTableExtractor, SofficeConverter};
use shared_types::DocumentConverter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory scanned recursively (defaults to the current directory)
    root: Option<PathBuf>,

    /// Where export files are written
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Config file to use instead of the one in the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write a JSON export
    #[arg(long)]
    json: bool,

    /// Parse every table cell instead of the configured one
    #[arg(long)]
    all_cells: bool,

    #[arg(long)]
    max_tables: Option<usize>,

    /// Skip legacy .doc files instead of converting them
    #[arg(long)]
    no_convert: bool,

    #[arg(long)]
    log_file_path: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(args.log_file_path.clone());

    let (config, config_path) =
        ScanConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    info!("Using config file: {}", config_path.display());

    let mut tables = config.tables();
    if args.all_cells {
        tables.all_cells = true;
    }
    if let Some(max_tables) = args.max_tables {
        tables.max_tables = max_tables;
    }

    let mut converter_config = config.converter();
    if args.no_convert {
        converter_config.enabled = false;
    }

    let mut export = config.export();
    if let Some(output_dir) = args.output_dir {
        export.output_dir = output_dir;
    }
    if args.json {
        export.json = true;
    }

    let converter: Option<Box<dyn DocumentConverter>> = if converter_config.enabled {
        let soffice = SofficeConverter::new(&converter_config.program);
        if soffice.is_available() {
            Some(Box::new(soffice))
        } else {
            warn!(
                "{} not found, legacy .doc files will be skipped",
                converter_config.program
            );
            None
        }
    } else {
        None
    };

    let manager = ScanManager::new(
        DocumentTableExtractor::new(tables.max_tables, converter),
        ContactParser::new(config.parser()),
        tables.selection(),
        Arc::new(TracingObserver),
    );

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let outcome = manager.run(&root)?;

    if outcome.records.is_empty() {
        warn!("No data extracted. Check your files or table structures.");
        return Ok(());
    }

    let written = export_records(&outcome.records, &export)?;

    println!("Extraction finished!");
    for path in &written {
        println!("File created : {}", path.display());
    }
    println!("Total contacts found : {}", outcome.records.len());

    Ok(())
}
