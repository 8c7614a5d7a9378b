//! Configuration loading.
//!
//! Reads `~/.config/fanforge/config.toml`. A missing file yields the
//! defaults; the `GEMINI_API_KEY` environment variable overrides the
//! configured API key either way.

use fanforge_core::error::{ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Root configuration for the workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Settings for the Gemini generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; usually supplied via `GEMINI_API_KEY` instead.
    pub api_key: Option<String>,
    /// Model name sent to the generateContent endpoint.
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

/// Orchestration settings for outbound generation calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Per-call deadline in seconds. Absent means no timeout, matching
    /// the historical behavior of the app this core was extracted from.
    pub timeout_secs: Option<u64>,
}

impl ForgeConfig {
    /// Loads configuration from the default path, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path).map_err(|e| {
                    ForgeError::config(format!("Failed to read config at {:?}: {}", path, e))
                })?;
                toml::from_str(&content).map_err(|e| {
                    ForgeError::config(format!("Failed to parse config at {:?}: {}", path, e))
                })?
            }
            _ => Self::default(),
        };

        if let Ok(key) = std::env::var("GEMINI_API_KEY")
            && !key.is_empty()
        {
            config.gemini.api_key = Some(key);
        }

        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fanforge").join("config.toml"))
    }
}
