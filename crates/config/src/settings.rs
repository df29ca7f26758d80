// Monitoring API settings
// Loaded from conf/config.toml, or ~/.config/hone/config.toml

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const ENV_API_KEY: &str = "HONE_API_KEY";
pub const ENV_API_SECRET: &str = "HONE_API_SECRET";
pub const ENV_API_ENDPOINT: &str = "HONE_API_ENDPOINT";

/// Top-level config file.
///
/// ```toml
/// [openapi]
/// endpoint = "https://monitoring.example.net"
/// key = "..."
/// secret = "..."
/// verify = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openapi: ApiSettings,
}

/// Monitoring OpenAPI access.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL, e.g. "https://monitoring.example.net" (no /openapi suffix)
    pub endpoint: String,

    /// API key id
    pub key: String,

    /// API signing secret
    pub secret: String,

    /// Verify the server's TLS certificate
    pub verify: bool,

    /// Master switch for API access
    pub enabled: bool,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Agents requested per page
    pub page_size: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            key: String::new(),
            secret: String::new(),
            verify: true,
            enabled: true,
            timeout_secs: 60,
            page_size: 500,
        }
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("endpoint", &self.endpoint)
            .field("key", &self.redacted_key())
            .field("secret", &"***")
            .field("verify", &self.verify)
            .field("enabled", &self.enabled)
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl ApiSettings {
    /// Key with everything past the first four characters masked.
    pub fn redacted_key(&self) -> String {
        let prefix: String = self.key.chars().take(4).collect();
        if self.key.chars().count() > 4 {
            format!("{prefix}…")
        } else {
            prefix
        }
    }
}

impl Config {
    /// Candidate config paths, in search order.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("conf").join("config.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("hone").join("config.toml"));
        }
        paths
    }

    /// Load from `explicit`, or the first existing search path, then apply
    /// environment overrides and validate.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let searched = Self::search_paths();
                match searched.iter().find(|p| p.is_file()) {
                    Some(p) => p.clone(),
                    None => return Err(ConfigError::NotFound(searched)),
                }
            }
        };

        log::debug!("loading config from {}", path.display());
        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let mut config = Self::parse(&contents)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate, without environment overrides.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config = Self::parse(input)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Environment beats file. Empty variables are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let api = &mut self.openapi;
        for (name, slot) in [
            (ENV_API_KEY, &mut api.key),
            (ENV_API_SECRET, &mut api.secret),
            (ENV_API_ENDPOINT, &mut api.endpoint),
        ] {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                log::debug!("{name} overrides config file value");
                *slot = value;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let api = &self.openapi;

        if !api.enabled {
            return Err(ConfigError::Disabled);
        }

        if api.endpoint.trim().is_empty() {
            return Err(ConfigError::Missing("openapi.endpoint"));
        }
        if !(api.endpoint.starts_with("https://") || api.endpoint.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "openapi.endpoint",
                message: format!("expected an http(s) URL, got \"{}\"", api.endpoint),
            });
        }
        if api.key.trim().is_empty() {
            return Err(ConfigError::Missing("openapi.key"));
        }
        if api.secret.trim().is_empty() {
            return Err(ConfigError::Missing("openapi.secret"));
        }
        if api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "openapi.timeout_secs",
                message: "must be greater than 0".into(),
            });
        }
        if api.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "openapi.page_size",
                message: "must be greater than 0".into(),
            });
        }

        if !api.verify {
            log::warn!("TLS certificate verification is disabled for {}", api.endpoint);
        }

        Ok(())
    }
}
