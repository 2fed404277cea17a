//! Configuration for uniscan.
//!
//! Layered settings (defaults → TOML file → `UNISCAN_*` environment),
//! API-key resolution (env var or key file), and translation into the
//! transport and pagination settings of `uniscan_api`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use uniscan_api::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE, Paginator, TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no controller host configured")]
    NoHost,

    #[error("unable to read API key from {path:?}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("API key from {origin} is empty")]
    EmptyKey { origin: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Everything needed to reach one controller.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Controller base URL (e.g., "https://192.168.1.1").
    pub host: Option<String>,

    /// File containing the API key.
    #[serde(default = "default_key_file")]
    pub key_file: PathBuf,

    /// Environment variable name containing the API key (checked first).
    pub api_key_env: Option<String>,

    /// Items requested per page on list endpoints.
    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Upper bound on pages fetched for one listing.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept any TLS certificate, including self-signed ones.
    #[serde(default)]
    pub insecure: bool,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            key_file: default_key_file(),
            api_key_env: None,
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

fn default_key_file() -> PathBuf {
    PathBuf::from("key")
}
fn default_page_size() -> i32 {
    DEFAULT_PAGE_SIZE
}
fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// The configured host, or [`ConfigError::NoHost`].
    pub fn host(&self) -> Result<&str, ConfigError> {
        self.host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::NoHost)
    }

    /// Reject settings the client cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size < 1 {
            return Err(ConfigError::Validation {
                field: "page_size".into(),
                reason: format!("must be at least 1, got {}", self.page_size),
            });
        }
        if self.max_pages == 0 {
            return Err(ConfigError::Validation {
                field: "max_pages".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(())
    }

    pub fn transport_config(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.timeout),
        }
    }

    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.page_size).with_max_pages(self.max_pages)
    }

    /// Resolve the API key: `api_key_env` first, then the key file.
    pub fn resolve_api_key(&self) -> Result<SecretString, ConfigError> {
        if let Some(ref env_name) = self.api_key_env {
            if let Ok(val) = std::env::var(env_name) {
                debug!(env = %env_name, "using API key from environment");
                return non_empty(&val, || format!("${env_name}"));
            }
        }

        read_api_key(&self.key_file)
    }
}

/// Read an API key from `path`, trimmed of surrounding whitespace.
pub fn read_api_key(path: &Path) -> Result<SecretString, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::KeyFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "using API key from file");
    non_empty(&raw, || path.display().to_string())
}

fn non_empty(raw: &str, origin: impl FnOnce() -> String) -> Result<SecretString, ConfigError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(ConfigError::EmptyKey { origin: origin() });
    }
    Ok(SecretString::from(key.to_owned()))
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "uniscan", "uniscan").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("uniscan");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from `path` (or the platform default) plus environment.
///
/// A missing file is not an error; defaults and environment still apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    debug!(path = %path.display(), "loading config");

    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("UNISCAN_"))
        .extract()?;
    Ok(config)
}
