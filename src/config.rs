use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".autosrt";
const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_MODEL: &str = "models/ggml-base.bin";

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Path to a ggml whisper model; `~/` is expanded.
    pub model: Option<String>,
    /// Whisper language code, `auto` to detect.
    pub language: Option<String>,
    pub whisper: WhisperConfig,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct WhisperConfig {
    pub beam_size: Option<u32>,
    pub patience: Option<f32>,
    pub temperature: Option<f32>,
    pub initial_prompt: Option<String>,
}

impl AppConfig {
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("auto")
    }

    pub fn model_path(&self) -> anyhow::Result<PathBuf> {
        match &self.model {
            Some(model) => expand_home(model),
            None => {
                let home = dirs::home_dir().context("Could not find home directory")?;
                Ok(home.join(CONFIG_DIR).join(DEFAULT_MODEL))
            }
        }
    }
}

fn expand_home(path: &str) -> anyhow::Result<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().context("Could not find home directory")?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    let config_path = home.join(CONFIG_DIR).join(CONFIG_FILE);

    if !config_path.exists() {
        log::debug!("No config file at {:?}, using defaults", config_path);
        return Ok(AppConfig::default());
    }

    load_config_file(&config_path)
}

pub fn load_config_file(path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    parse_config(&content).with_context(|| format!("Invalid config file {:?}", path))
}

fn parse_config(content: &str) -> anyhow::Result<AppConfig> {
    // an empty document deserializes to unit, not to a mapping
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(content)?;
    Ok(config)
}
