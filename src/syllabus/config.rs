use crate::error::{Result, SyllabusError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "syllabus.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration for the syllabus CLI, stored in syllabus.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyllabusConfig {
    /// Log level passed to the logger (e.g. "warn", "info", "debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Print the module outline above the course
    #[serde(default = "default_true")]
    pub show_outline: bool,

    /// Print link urls and file names next to item titles
    #[serde(default = "default_true")]
    pub show_urls: bool,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for SyllabusConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            show_outline: true,
            show_urls: true,
        }
    }
}

impl SyllabusConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SyllabusError::Io)?;
        let config: SyllabusConfig =
            serde_json::from_str(&content).map_err(SyllabusError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SyllabusError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SyllabusError::Serialization)?;
        fs::write(config_path, content).map_err(SyllabusError::Io)?;
        Ok(())
    }
}
