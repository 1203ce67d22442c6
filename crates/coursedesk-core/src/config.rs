//! Application configuration management.
//!
//! Holds the API root, which session backend to use, and the last email
//! that signed in. Stored at `~/.config/coursedesk/config.json`; the API
//! root can be overridden with `COURSEDESK_API_URL`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::client::DEFAULT_BASE_URL;
use crate::auth::{FileSlot, KeyringSlot, SessionSlot};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "coursedesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Overrides the configured API root
pub const API_URL_ENV: &str = "COURSEDESK_API_URL";

/// Prefills the sign-in email
pub const EMAIL_ENV: &str = "COURSEDESK_EMAIL";

/// Where the session record is kept between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    #[default]
    File,
    Keyring,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub session_backend: SessionBackend,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
            Ok(serde_json::from_str(&contents).context("Failed to parse config file")?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// API root: environment first, then config, then the default.
    pub fn api_base_url(&self) -> String {
        self.resolve_api_base_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_base_url(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Build the configured persistence slot.
    pub fn session_slot(&self) -> Result<Box<dyn SessionSlot>> {
        Ok(match self.session_backend {
            SessionBackend::File => Box::new(FileSlot::new(self.cache_dir()?)),
            SessionBackend::Keyring => Box::new(KeyringSlot::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.api_base_url.is_none());
        assert_eq!(config.session_backend, SessionBackend::File);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_base_url: Some("http://example.test/api".to_string()),
            session_backend: SessionBackend::Keyring,
            last_email: Some("a@b.com".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_base_url.as_deref(), Some("http://example.test/api"));
        assert_eq!(loaded.session_backend, SessionBackend::Keyring);
        assert_eq!(loaded.last_email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_backend_defaults_when_absent() {
        let config: Config = serde_json::from_str(r#"{"last_email":"a@b.com"}"#).unwrap();
        assert_eq!(config.session_backend, SessionBackend::File);
        let config: Config = serde_json::from_str(r#"{"session_backend":"keyring"}"#).unwrap();
        assert_eq!(config.session_backend, SessionBackend::Keyring);
    }

    #[test]
    fn test_api_base_url_precedence() {
        let mut config = Config::default();
        assert_eq!(config.resolve_api_base_url(None), DEFAULT_BASE_URL);

        config.api_base_url = Some("http://configured/api".to_string());
        assert_eq!(config.resolve_api_base_url(None), "http://configured/api");
        assert_eq!(
            config.resolve_api_base_url(Some("http://env/api".to_string())),
            "http://env/api"
        );
        assert_eq!(
            config.resolve_api_base_url(Some("  ".to_string())),
            "http://configured/api"
        );
    }
}
