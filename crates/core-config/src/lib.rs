//! Configuration loading and parsing.
//!
//! Parses `jot.toml`, or an override path provided by the binary, covering
//! the autosave sweep interval and the set of file extensions that get the
//! source-code highlight profile at open time. Unknown fields are ignored
//! (TOML deserialization tolerance) to allow forward evolution without
//! immediate warnings; a file that fails to parse falls back to defaults
//! rather than blocking startup.

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Deserialize, Clone)]
pub struct AutosaveConfig {
    /// Seconds between autosave sweeps.
    #[serde(default = "AutosaveConfig::default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            interval_secs: Self::default_interval_secs(),
        }
    }
}

impl AutosaveConfig {
    const fn default_interval_secs() -> u64 {
        DEFAULT_AUTOSAVE_INTERVAL_SECS
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HighlightConfig {
    /// Extensions (without the leading dot) that receive syntax highlighting.
    #[serde(default = "HighlightConfig::default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            extensions: Self::default_extensions(),
        }
    }
}

impl HighlightConfig {
    fn default_extensions() -> Vec<String> {
        ["py", "md", "html"].map(str::to_string).to_vec()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub autosave: AutosaveConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

impl Config {
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.file.autosave.interval_secs)
    }

    pub fn highlight_extensions(&self) -> &[String] {
        &self.file.highlight.extensions
    }
}

/// Best-effort config path following platform conventions: prefer a local
/// working-directory `jot.toml` before falling back to the platform config
/// dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("jot.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("jot").join("jot.toml");
    }
    // Final fallback relative filename.
    PathBuf::from("jot.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                info!(target: "config", path = %path.display(), "config_loaded");
                Ok(Config {
                    raw: Some(content),
                    file,
                })
            }
            Err(e) => {
                // On parse error fall back to defaults rather than refusing
                // to start.
                warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}
