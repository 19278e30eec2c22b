use serde::Deserialize;
use std::fs;

use crate::constants::{backend, server};
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Clone, Debug, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub server: ServerConfig,

    /// Cron expression for background refreshes of the global overview
    #[serde(default)]
    pub refresh_cron: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            server: ServerConfig::default(),
            refresh_cron: None,
            log_level: default_log_level(),
            event_bus_capacity: default_event_bus_capacity(),
        }
    }
}

fn default_base_url() -> String {
    backend::DEFAULT_BASE_URL.to_string()
}

fn default_bind_addr() -> String {
    server::DEFAULT_BIND_ADDR.to_string()
}

fn default_log_level() -> String {
    server::DEFAULT_LOG_LEVEL.to_string()
}

fn default_event_bus_capacity() -> usize {
    server::DEFAULT_EVENT_BUS_CAPACITY
}

impl AppConfig {
    /// Load `config.yaml` (or `$DASHBOARD_CONFIG`), falling back to defaults when
    /// the file does not exist, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = match fs::read_to_string(&path) {
            Ok(content) => Self::from_yaml(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Environment wins over the file. `lookup` is injected so tests don't touch the process env.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("NEWS_BACKEND_URL").filter(|v| !v.trim().is_empty()) {
            self.backend.base_url = url;
        }
        if let Some(addr) = lookup("DASHBOARD_BIND_ADDR").filter(|v| !v.trim().is_empty()) {
            self.server.bind_addr = addr;
        }
        if let Some(cron) = lookup("DASHBOARD_REFRESH_CRON").filter(|v| !v.trim().is_empty()) {
            self.refresh_cron = Some(cron);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.backend.base_url).map_err(|e| ConfigError::InvalidBackendUrl {
            url: self.backend.base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBackendUrl {
                url: self.backend.base_url.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        Ok(())
    }
}
