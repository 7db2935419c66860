use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Global user configuration loaded from `~/.airdep/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub log: LogConfig,

    /// Substitution values applied beneath every repository's own values.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

/// Build manifest settings from `[output]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File name (or path, relative to the manifest directory) to write.
    #[serde(default)]
    pub file: Option<String>,
}

/// Logging defaults from `[log]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// A `tracing` filter directive, e.g. `info` or `airdep_resolver=debug`.
    #[serde(default)]
    pub level: Option<String>,
}

impl GlobalConfig {
    /// Load the global configuration from `~/.airdep/config.toml`, or return
    /// defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path, or defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if path.is_file() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                airdep_util::errors::AirdepError::Config {
                    message: format!("Failed to read {}: {e}", path.display()),
                }
            })?;
            toml::from_str(&content).map_err(|e| {
                airdep_util::errors::AirdepError::Config {
                    message: format!("Failed to parse {}: {e}", path.display()),
                }
                .into()
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the airdep data directory (`~/.airdep/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".airdep")
}
