use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DietMoodConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub analysis: AnalysisConfig,
    pub insights: InsightsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_key: Option<String>,
    /// Upstream request timeout. `None` waits for the upstream indefinitely.
    pub timeout_secs: Option<u64>,
}

/// Trailing window sizes, in days, for each insight.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct InsightsConfig {
    pub stats_window_days: u32,
    pub pattern_window_days: u32,
    pub trend_window_days: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3001,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_dietmood_dir()
            .join("journal.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".into(),
            endpoint: "https://api.kimi.com/coding".into(),
            model: "k2p5".into(),
            max_tokens: 1024,
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            stats_window_days: 30,
            pattern_window_days: 14,
            trend_window_days: 7,
        }
    }
}

/// Returns `~/.dietmood/`
pub fn default_dietmood_dir() -> PathBuf {
    home_dir().join(".dietmood")
}

/// Returns the default config file path: `~/.dietmood/config.toml`
pub fn default_config_path() -> PathBuf {
    default_dietmood_dir().join("config.toml")
}

impl DietMoodConfig {
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
            DietMoodConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (DIETMOOD_DB, DIETMOOD_LOG_LEVEL,
    /// DIETMOOD_HOST, DIETMOOD_PORT, DIETMOOD_API_KEY or KIMI_API_KEY).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DIETMOOD_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("DIETMOOD_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("DIETMOOD_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("DIETMOOD_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %val, "ignoring invalid DIETMOOD_PORT"),
            }
        }
        let key = std::env::var("DIETMOOD_API_KEY").or_else(|_| std::env::var("KIMI_API_KEY"));
        if let Ok(val) = key {
            if !val.is_empty() {
                self.analysis.api_key = Some(val);
            }
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

    /// `host:port` the HTTP server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else {
        PathBuf::from(path)
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
