//! Error type for the Bitmap REST API layer.

/// Errors from the Bitmap REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Bitmap API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error-reason string from a `{"reason": ...}` body, if present.
        reason: Option<String>,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// An authenticated endpoint was called without an access token.
    #[error("{0} requires an access token")]
    Unauthenticated(&'static str),
}

impl ApiError {
    /// The server's error reason, when it sent one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Api { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// Message-catalog key for showing this error inline.
    ///
    /// The server reason doubles as the key; everything else maps to a
    /// generic key per failure kind.
    pub fn message_key(&self) -> &str {
        match self {
            Self::Api {
                reason: Some(reason),
                ..
            } => reason,
            Self::Api { status: 401, .. } | Self::Unauthenticated(_) => "error.unauthenticated",
            Self::Api { status: 404, .. } => "error.not_found",
            Self::Api { .. } => "error.server",
            Self::Request(_) => "error.network",
            Self::Decode(_) => "error.unexpected_response",
        }
    }
}
