//! Client configuration.
//!
//! Values are resolved in layers, later layers winning: built-in defaults,
//! an optional TOML file, the process environment (after loading `.env`),
//! then explicit overrides from the command line.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_URL: &str = "MOVIEVERSE_API_URL";
pub const ENV_HTTP_TIMEOUT: &str = "MOVIEVERSE_HTTP_TIMEOUT";

/// Raw configuration as written in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub api: FileApiConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Human-readable duration such as `10s` or `1m 30s`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileIo {
                path: path.to_path_buf(),
                source,
            })?;
        toml::from_str(&text).map_err(|source| ConfigError::FileParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given explicitly by the caller, e.g. CLI flags.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub timeout: Option<Duration>,
}

/// Fully resolved settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute http(s) origin without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Resolve against the real environment, loading `.env` if present.
    pub fn load(
        config_path: Option<&Path>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env file"),
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err.into()),
        }

        let file = config_path.map(FileConfig::read).transpose()?;
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::resolve(file.as_ref(), &env, overrides)
    }

    /// Resolve from explicit sources without touching the process.
    pub fn resolve(
        file: Option<&FileConfig>,
        env: &HashMap<String, String>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file_api = file.map(|f| &f.api);

        let raw_url = overrides
            .api_url
            .or_else(|| non_empty(env.get(ENV_API_URL)))
            .or_else(|| file_api.and_then(|api| api.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match overrides.timeout {
            Some(timeout) => timeout,
            None => non_empty(env.get(ENV_HTTP_TIMEOUT))
                .or_else(|| file_api.and_then(|api| api.timeout.clone()))
                .map(|text| parse_timeout(&text))
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT),
        };
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            base_url: normalize_base_url(&raw_url)?,
            timeout,
        })
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_owned)
}

pub fn parse_timeout(text: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(text.trim()).map_err(|source| {
        ConfigError::InvalidTimeout {
            value: text.to_string(),
            source,
        }
    })
}

/// Validate a base URL and strip any trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url =
        Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl {
            value: trimmed.to_string(),
            source,
        })?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(ConfigError::UnsupportedBaseUrl {
            value: trimmed.to_string(),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Default location of the optional config file.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .map(|dir| dir.join("movieverse").join("config.toml"))
}
