use thiserror::Error;

/// Top-level error type for the `uniscan-api` crate.
///
/// Every variant is fatal to the call that produced it. The client never
/// retries; callers decide whether a failed read is worth repeating.
#[derive(Debug, Error)]
pub enum Error {
    // ── Construction ────────────────────────────────────────────────
    /// Host and endpoint path could not be joined into a usable URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key contains bytes that cannot be sent in an HTTP header.
    #[error("Invalid API key: not a valid header value")]
    InvalidApiKey,

    /// TLS setup or HTTP client construction failed.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Transport ───────────────────────────────────────────────────
    /// Network-level failure (DNS, connection refused, timeout, body read).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The controller answered with anything other than `200 OK`.
    #[error("Unexpected response status: HTTP {status}")]
    UnexpectedStatus { status: u16 },

    /// The attached cancellation token fired before the exchange finished.
    #[error("Request cancelled")]
    Cancelled,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Decode error: {message}")]
    Decode { message: String, body: String },

    // ── Pagination ──────────────────────────────────────────────────
    /// The controller's `totalCount` was never reached within the page budget.
    #[error("Pagination did not converge after {max_pages} pages")]
    PageLimitExceeded { max_pages: usize },
}

impl Error {
    /// HTTP status carried by an [`UnexpectedStatus`](Self::UnexpectedStatus) error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` for connect and timeout failures.
    ///
    /// Purely informational: nothing in this crate acts on it.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the controller rejected the API key.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
