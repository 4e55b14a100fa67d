use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use docmeta_core::analytics::{ReportOptions, DEFAULT_TOP_N};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default = "default_json_file")]
    pub json_file: PathBuf,
    #[serde(default = "default_csv_file")]
    pub csv_file: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            json_file: default_json_file(),
            csv_file: default_csv_file(),
        }
    }
}

fn default_pretty() -> bool {
    true
}
fn default_json_file() -> PathBuf {
    PathBuf::from("database-export.json")
}
fn default_csv_file() -> PathBuf {
    PathBuf::from("database.csv")
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            top_n: self.reports.top_n,
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::minimal())
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.reports.top_n < 1 {
        anyhow::bail!("reports.top_n must be >= 1");
    }

    if config.export.json_file.as_os_str().is_empty() {
        anyhow::bail!("export.json_file must not be empty");
    }

    if config.export.csv_file.as_os_str().is_empty() {
        anyhow::bail!("export.csv_file must not be empty");
    }

    Ok(())
}
