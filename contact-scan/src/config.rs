use config::{Config, ConfigError, File};
use extractors::ParserConfig;
use serde::{Deserialize, Serialize};
use shared_types::TableSelection;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[tables]
# Number of tables read from each document
max_tables = 1
# Cell holding the contact in each table (0-based, row by row)
cell_index = 1
# Parse every cell instead of only cell_index
all_cells = false

[parser]
# Cells shorter than this (after trimming) are ignored
min_cell_length = 5
unknown_name = "Unknown"

[converter]
# Convert legacy .doc files to DOCX with LibreOffice before reading them
enabled = true
program = "soffice"

[export]
output_dir = "."
file_stem = "contacts_export"
csv = true
json = false
"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ScanConfig {
    pub tables: Option<TablesConfig>,
    pub parser: Option<ParserConfig>,
    pub converter: Option<ConverterConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TablesConfig {
    pub max_tables: usize,
    pub cell_index: usize,
    pub all_cells: bool,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            max_tables: 1,
            cell_index: 1,
            all_cells: false,
        }
    }
}

impl TablesConfig {
    pub fn selection(&self) -> TableSelection {
        TableSelection {
            max_tables: self.max_tables,
            cell_index: (!self.all_cells).then_some(self.cell_index),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ConverterConfig {
    pub enabled: bool,
    pub program: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "soffice".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub file_stem: String,
    pub csv: bool,
    pub json: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_stem: "contacts_export".to_string(),
            csv: true,
            json: false,
        }
    }
}

impl ScanConfig {
    /// Load the config file, writing the default one first when the standard
    /// location has none yet. An explicit `path` must already exist.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::Message(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => {
                let config_path = get_config_path();
                write_default_config(&config_path)?;
                config_path
            }
        };

        let config = Self::from_file(&config_path)?;
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()?
            .try_deserialize()
    }

    pub fn tables(&self) -> TablesConfig {
        self.tables.clone().unwrap_or_default()
    }

    pub fn parser(&self) -> ParserConfig {
        self.parser.clone().unwrap_or_default()
    }

    pub fn converter(&self) -> ConverterConfig {
        self.converter.clone().unwrap_or_default()
    }

    pub fn export(&self) -> ExportConfig {
        self.export.clone().unwrap_or_default()
    }
}

fn write_default_config(config_path: &Path) -> Result<(), ConfigError> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("contact-scan").join("config.toml")
    } else {
        PathBuf::from("contact-scan.toml")
    }
}
