//! # Client Configuration
//!
//! Where the burger API lives and how long a fresh access token is trusted.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BURGER_API_URL=https://norma.nomoreparties.space/api               │
//! │     BURGER_ACCESS_TOKEN_MAX_AGE=1200                                   │
//! │     BURGER_CREDENTIALS_PATH=/tmp/burger-session.json                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/stellar-burgers/client.toml (Linux)                      │
//! │     ~/Library/Application Support/space.stellar.burgers/client.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! base_url = "https://norma.nomoreparties.space/api"
//! access_token_max_age_secs = 1200
//! credentials_path = "/home/me/.local/share/stellar-burgers/session.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "https://norma.nomoreparties.space/api";
pub const DEFAULT_ACCESS_TOKEN_MAX_AGE_SECS: u64 = 1200;
/// One year.
pub const MAX_ACCESS_TOKEN_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

const CONFIG_FILE: &str = "client.toml";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Lifetime given to an access token received at login.
    #[serde(default = "default_access_token_max_age")]
    pub access_token_max_age_secs: u64,

    /// Where the session is kept. Defaults to the platform data directory.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_access_token_max_age() -> u64 {
    DEFAULT_ACCESS_TOKEN_MAX_AGE_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: default_base_url(),
            access_token_max_age_secs: default_access_token_max_age(),
            credentials_path: None,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.access_token_max_age_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "access_token_max_age_secs must be greater than 0".into(),
            ));
        }

        if self.access_token_max_age_secs > MAX_ACCESS_TOKEN_MAX_AGE_SECS {
            return Err(ClientError::InvalidConfig(format!(
                "access_token_max_age_secs must be at most {}, got: {}",
                MAX_ACCESS_TOKEN_MAX_AGE_SECS, self.access_token_max_age_secs
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BURGER_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.base_url = url;
        }

        if let Ok(max_age) = std::env::var("BURGER_ACCESS_TOKEN_MAX_AGE") {
            match max_age.parse::<u64>() {
                Ok(secs) => self.access_token_max_age_secs = secs,
                Err(_) => warn!(value = %max_age, "Ignoring non-numeric BURGER_ACCESS_TOKEN_MAX_AGE"),
            }
        }

        if let Ok(path) = std::env::var("BURGER_CREDENTIALS_PATH") {
            debug!(path = %path, "Overriding credentials path from environment");
            self.credentials_path = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("space", "stellar", "stellar-burgers")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Full URL of an endpoint path such as `/orders/all`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Capped at [`MAX_ACCESS_TOKEN_MAX_AGE_SECS`] for configs built
    /// without `validate()`.
    pub fn access_token_max_age(&self) -> chrono::Duration {
        let secs = self.access_token_max_age_secs.min(MAX_ACCESS_TOKEN_MAX_AGE_SECS);
        i64::try_from(secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or_else(|| chrono::Duration::seconds(DEFAULT_ACCESS_TOKEN_MAX_AGE_SECS as i64))
    }

    /// Configured session file, or the platform default.
    pub fn resolved_credentials_path(&self) -> Option<PathBuf> {
        self.credentials_path
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join(SESSION_FILE)))
    }
}
