use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Viva application.
///
/// Loaded from `~/.viva/config.toml` by default. Each section corresponds to
/// a bounded concern: general process settings, the generation backend,
/// default sampling parameters, and export behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VivaConfig {
    pub general: GeneralConfig,
    pub backend: BackendConfig,
    pub generation: GenerationConfig,
    pub export: ExportConfig,
}

impl Default for VivaConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            backend: BackendConfig::default(),
            generation: GenerationConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl VivaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VivaConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory where exported documents are written.
    pub output_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output_dir: "./output".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Generation backend settings.
///
/// `base_model` and `adapter_path` are opaque strings forwarded to the
/// backend collaborator unchanged; Viva never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base model identifier, forwarded to the backend.
    pub base_model: String,
    /// LoRA adapter path, forwarded to the backend.
    pub adapter_path: String,
    /// HTTP endpoint of the text-generation backend.
    pub endpoint: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_model: "TinyLlama/TinyLlama-1.1B-Chat-v1.0".to_string(),
            adapter_path: "./tinyllama-lora-ftuned-adapted-v2/".to_string(),
            endpoint: "http://127.0.0.1:8080/generate".to_string(),
        }
    }
}

/// Default sampling parameters applied when a flow does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: 512,
            temperature: 0.7,
            top_p: 0.9,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// External markdown-to-PDF converter command.
    pub pdf_command: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pdf_command: "pandoc".to_string(),
        }
    }
}
