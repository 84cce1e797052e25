//! Application configuration.
//!
//! Configuration is read from `config.yaml` in the platform config directory
//! (or the file named by `HERODEX_CONFIG`) and includes:
//! - Catalog endpoint, page size and fetch batching
//! - Display-worthiness policy and search tuning
//! - Theme and favorites storage location
//! - API credentials (environment variables take precedence)

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::catalog::DisplayPolicy;
use crate::catalog::auth::Credentials;
use crate::error::{HerodexError, Result};
use crate::view::Theme;

pub const CONFIG_ENV: &str = "HERODEX_CONFIG";
pub const PUBLIC_KEY_ENV: &str = "MARVEL_PUBLIC_KEY";
pub const PRIVATE_KEY_ENV: &str = "MARVEL_PRIVATE_KEY";

const DEFAULT_BASE_URL: &str = "https://gateway.marvel.com/v1/public";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Items per page window (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum results kept from a name search (default: 100)
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Raw records requested per over-fetch batch (default: 100)
    #[serde(default = "default_fetch_batch_size")]
    pub fetch_batch_size: u32,

    /// Quiet period before typed search text is submitted (default: 500)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum trimmed length before typed text triggers a search (default: 2)
    #[serde(default = "default_min_search_len")]
    pub min_search_len: usize,

    /// Delay before the initial loading splash is shown (default: 2000)
    #[serde(default = "default_splash_delay_ms")]
    pub splash_delay_ms: u64,

    /// Remote operation timeout in seconds (default: 30)
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout: u64,

    /// Which catalog items are worth displaying
    #[serde(default)]
    pub display_policy: DisplayPolicy,

    /// Replaces the catalog's reported total when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominal_total: Option<u64>,

    #[serde(default)]
    pub theme: Theme,

    /// Directory holding the favorites slot (default: platform data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_search_limit() -> u32 {
    100
}

fn default_fetch_batch_size() -> u32 {
    100
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_search_len() -> usize {
    2
}

fn default_splash_delay_ms() -> u64 {
    2000
}

fn default_remote_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            search_limit: default_search_limit(),
            fetch_batch_size: default_fetch_batch_size(),
            debounce_ms: default_debounce_ms(),
            min_search_len: default_min_search_len(),
            splash_delay_ms: default_splash_delay_ms(),
            remote_timeout: default_remote_timeout(),
            display_policy: DisplayPolicy::default(),
            nominal_total: None,
            theme: Theme::default(),
            data_dir: None,
            auth: AuthConfig::default(),
        }
    }
}

/// Credentials stored in the config file
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("public_key", &self.public_key)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Config {
    /// Path of the config file, honoring `HERODEX_CONFIG`
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        project_dirs().map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url).map_err(|e| {
            HerodexError::Config(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        if self.page_size == 0 {
            return Err(HerodexError::Config("page_size must be at least 1".to_string()));
        }
        if self.fetch_batch_size == 0 {
            return Err(HerodexError::Config(
                "fetch_batch_size must be at least 1".to_string(),
            ));
        }
        if self.search_limit == 0 {
            return Err(HerodexError::Config(
                "search_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Public key from environment or config file
    pub fn public_key(&self) -> Option<String> {
        env_value(PUBLIC_KEY_ENV).or_else(|| self.auth.public_key.clone())
    }

    /// Private key from environment or config file
    pub fn private_key(&self) -> Option<String> {
        env_value(PRIVATE_KEY_ENV).or_else(|| self.auth.private_key.clone())
    }

    /// Signing credentials, or an auth error naming what is missing
    pub fn credentials(&self) -> Result<Credentials> {
        let public_key = self.public_key().ok_or_else(|| {
            HerodexError::Auth(format!(
                "catalog public key not configured. Set {PUBLIC_KEY_ENV} or auth.public_key in the config file"
            ))
        })?;
        let private_key = self.private_key().ok_or_else(|| {
            HerodexError::Auth(format!(
                "catalog private key not configured. Set {PRIVATE_KEY_ENV} or auth.private_key in the config file"
            ))
        })?;
        Ok(Credentials::new(public_key, private_key))
    }

    /// Directory holding persisted favorites
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                HerodexError::Config(
                    "could not determine a data directory; set data_dir in the config file"
                        .to_string(),
                )
            })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout)
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "herodex", "herodex")
}
