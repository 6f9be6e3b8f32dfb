use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct MemoConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub client: ClientConfig,
    pub reminders: RemindersConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub session_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClientConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RemindersConfig {
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".into(),
            timeout_secs: 30,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let session_path = default_memogenius_dir()
            .join("session.json")
            .to_string_lossy()
            .into_owned();
        Self { session_path }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
        }
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self { page_size: 100 }
    }
}

/// Returns `~/.memogenius/`, falling back to `./.memogenius/` when no home
/// directory can be determined.
pub fn default_memogenius_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".memogenius")
}

/// Returns the default config file path: `~/.memogenius/config.toml`
pub fn default_config_path() -> PathBuf {
    default_memogenius_dir().join("config.toml")
}

impl MemoConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MemoConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (MEMOGENIUS_API_URL, MEMOGENIUS_SESSION, MEMOGENIUS_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MEMOGENIUS_API_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = std::env::var("MEMOGENIUS_SESSION") {
            self.storage.session_path = val;
        }
        if let Ok(val) = std::env::var("MEMOGENIUS_LOG_LEVEL") {
            self.client.log_level = val;
        }
    }

    /// Resolve the session file path, expanding `~` if needed.
    pub fn resolved_session_path(&self) -> PathBuf {
        expand_tilde(&self.storage.session_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MemoConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.client.log_level, "warn");
        assert_eq!(config.reminders.page_size, 100);
        assert!(config.storage.session_path.ends_with("session.json"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[api]
base_url = "https://memo.example.com/api"

[client]
log_level = "debug"

[storage]
session_path = "/tmp/session.json"
"#;
        let config: MemoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://memo.example.com/api");
        assert_eq!(config.client.log_level, "debug");
        assert_eq!(config.storage.session_path, "/tmp/session.json");
        // defaults still apply for unset fields
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.reminders.page_size, 100);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = MemoConfig::default();
        std::env::set_var("MEMOGENIUS_API_URL", "http://127.0.0.1:9000/api");
        std::env::set_var("MEMOGENIUS_SESSION", "/tmp/override.json");
        std::env::set_var("MEMOGENIUS_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.storage.session_path, "/tmp/override.json");
        assert_eq!(config.client.log_level, "trace");

        // Clean up
        std::env::remove_var("MEMOGENIUS_API_URL");
        std::env::remove_var("MEMOGENIUS_SESSION");
        std::env::remove_var("MEMOGENIUS_LOG_LEVEL");
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/lib/s.json"), PathBuf::from("/var/lib/s.json"));
    }
}
