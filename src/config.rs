//! Configuration for mediacat.
//!
//! Configuration sources (highest priority first):
//! 1. Explicit `--config <path>`
//! 2. Config file (.mediacat/config.yaml) in the current directory or a parent
//! 3. User config file (<config dir>/mediacat/config.yaml)
//! 4. Defaults (ffprobe on PATH, built-in extension sets)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Directory searched for in the current directory and its parents
const PROJECT_CONFIG_DIR: &str = ".mediacat";

/// Config file name, both project-local and per-user
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub extensions: ExtensionsConfig,
}

fn default_version() -> String {
    "1".to_string()
}

/// Video probe settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Disable to skip ffprobe entirely (mp4 then always counts as audio)
    #[serde(default = "default_probe_enabled")]
    pub enabled: bool,
    /// Program name or absolute path of ffprobe
    #[serde(default = "default_ffprobe")]
    pub ffprobe: String,
}

fn default_probe_enabled() -> bool {
    true
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: default_probe_enabled(),
            ffprobe: default_ffprobe(),
        }
    }
}

/// Extra extensions merged into the built-in sets
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtensionsConfig {
    #[serde(default)]
    pub audio: Vec<String>,
    #[serde(default)]
    pub video: Vec<String>,
    #[serde(default)]
    pub image: Vec<String>,
}

/// Resolved configuration
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub probe: ProbeConfig,
    pub extensions: ExtensionsConfig,
    /// Path to config file (if one was used)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching `start` and its parents
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Per-user config file, if present
fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("mediacat").join(CONFIG_FILE_NAME);
    path.exists().then_some(path)
}

/// Load and parse config file
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from all sources
pub fn load_config(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let config_file = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => std::env::current_dir()
            .ok()
            .and_then(|cwd| find_config_file(&cwd))
            .or_else(user_config_file),
    };

    let Some(path) = config_file else {
        return Ok(ResolvedConfig::default());
    };

    let file = load_config_file(&path)?;
    tracing::debug!(config = %path.display(), version = %file.version, "loaded config");

    Ok(ResolvedConfig {
        probe: file.probe,
        extensions: file.extensions,
        config_file: Some(path),
    })
}
