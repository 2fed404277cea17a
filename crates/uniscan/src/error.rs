//! CLI error types with miette diagnostics.
//!
//! Maps `uniscan_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use uniscan_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("No controller host configured")]
    #[diagnostic(
        code(uniscan::no_host),
        help(
            "Pass --host <URL>, set UNISCAN_HOST, or add `host = \"https://...\"` to {path}"
        )
    )]
    NoHost { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(uniscan::config),
        help("Check the key file (--key) and the config file (--config).")
    )]
    Config(ConfigError),

    // ── Controller ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(uniscan::connection_failed),
        help("Check that the controller is running and reachable from this host.")
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: uniscan_api::Error,
    },

    #[error("Request to {url} timed out")]
    #[diagnostic(code(uniscan::timeout), help("Raise the limit with --timeout <SECS>."))]
    Timeout { url: String },

    #[error("Controller rejected the API key (HTTP {status})")]
    #[diagnostic(
        code(uniscan::auth_failed),
        help("Create a key under Settings > Control Plane > Integrations and pass it with --key.")
    )]
    AuthFailed { status: u16 },

    #[error("Controller resource not found (HTTP 404)")]
    #[diagnostic(
        code(uniscan::not_found),
        help("The site or device may have been removed while listing.")
    )]
    NotFound,

    #[error("Interrupted")]
    #[diagnostic(code(uniscan::interrupted))]
    Interrupted,

    #[error(transparent)]
    #[diagnostic(code(uniscan::api))]
    Api(uniscan_api::Error),

    // ── Output ───────────────────────────────────────────────────────
    #[error("Failed to render output: {0}")]
    #[diagnostic(code(uniscan::render))]
    Render(#[from] serde_json::Error),
}

impl CliError {
    /// Map a client error, naming the controller for connection problems.
    pub fn from_api(err: uniscan_api::Error, url: &str) -> Self {
        if matches!(err, uniscan_api::Error::Cancelled) {
            return Self::Interrupted;
        }
        if let Some(status @ (401 | 403)) = err.status() {
            return Self::AuthFailed { status };
        }
        if err.is_not_found() {
            return Self::NotFound;
        }
        if matches!(&err, uniscan_api::Error::Transport(e) if e.is_timeout()) {
            return Self::Timeout {
                url: url.to_owned(),
            };
        }
        if err.is_transient() {
            return Self::ConnectionFailed {
                url: url.to_owned(),
                source: err,
            };
        }
        Self::Api(err)
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoHost { .. } => exit_code::USAGE,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound => exit_code::NOT_FOUND,
            Self::Interrupted => exit_code::INTERRUPTED,
            Self::Config(_) | Self::Api(_) | Self::Render(_) => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoHost => Self::NoHost {
                path: uniscan_config::config_path().display().to_string(),
            },
            other => Self::Config(other),
        }
    }
}
