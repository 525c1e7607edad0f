//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Defaults used when the matching command-line flag is absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Generative Language API key.
    pub gemini: Option<String>,
}

/// Default parameter values from config file.
#[derive(Debug, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Default model name or alias.
    pub model: Option<String>,
    /// Default aspect ratio.
    pub aspect_ratio: Option<String>,
    /// Default download path.
    pub output: Option<String>,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the API key, preferring environment variables over the file.
    #[must_use]
    pub fn gemini_key(&self) -> Option<String> {
        self.gemini_key_from(|name| std::env::var(name).ok())
    }

    fn gemini_key_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.is_empty()))
            .or_else(|| self.keys.gemini.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `THUMBGEN_CONFIG` environment variable
/// 3. `~/.config/thumbgen/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("THUMBGEN_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/thumbgen/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/thumbgen/config.toml")
    } else {
        PathBuf::from("thumbgen.toml")
    }
}
