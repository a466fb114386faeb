use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::system::locator::DEFAULT_CMDLINE_LIMIT;
use crate::system::procfs::DEFAULT_PROC_ROOT;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub pattern: String,
    pub proc_root: PathBuf,
    pub cmdline_limit: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            pattern: "node".to_string(),
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
            cmdline_limit: DEFAULT_CMDLINE_LIMIT,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("procmem").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            warn!("ignoring invalid config {}: {err}", path.display());
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}
