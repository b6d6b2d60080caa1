//! Service configuration at ~/.config/anima/config.toml.
//!
//! Every field has a default so an empty file (or no file at all) is a
//! working configuration. The chat API key can live in the file but the
//! `OPENAI_API_KEY` environment variable takes precedence; with neither set,
//! only the chat reply path is disabled.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{AnimaError, AnimaResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimaConfig {
    /// Directory holding the per-user JSON documents
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Provider API key; OPENAI_API_KEY overrides this when set
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Timeout for the outbound completion request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnimaConfig {
    fn default() -> Self {
        AnimaConfig {
            data_dir: default_data_dir(),
            server: ServerConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_data_dir() -> String {
    "~/.anima".to_string()
}

fn default_port() -> u16 {
    4310
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl AnimaConfig {
    pub fn config_path() -> AnimaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AnimaError::Config("Could not determine config directory".into()))?
            .join("anima");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the configuration, writing a commented default file on first run.
    pub fn load() -> AnimaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::write_default(&config_path)?;
        }

        let mut config: AnimaConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| AnimaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AnimaError::Config(e.to_string()))?;

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                config.chat.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.data_dir).into_owned())
    }

    pub fn chat_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.chat.timeout_secs)
    }

    fn write_default(path: &Path) -> AnimaResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&AnimaConfig::default())
            .map_err(|e| AnimaError::Config(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_working_defaults() {
        let config: AnimaConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_dir, "~/.anima");
        assert_eq!(config.server.port, 4310);
        assert_eq!(config.chat.model, "gpt-4o-mini");
        assert!(config.chat.api_key.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: AnimaConfig = toml::from_str(
            r#"
            data_dir = "/srv/anima"

            [chat]
            model = "gpt-4o"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, "/srv/anima");
        assert_eq!(config.chat.model, "gpt-4o");
        assert_eq!(config.chat.timeout_secs, 30);
        assert_eq!(config.server.port, 4310);
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let content = toml::to_string_pretty(&AnimaConfig::default()).unwrap();
        let config: AnimaConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.data_dir, AnimaConfig::default().data_dir);
    }
}
