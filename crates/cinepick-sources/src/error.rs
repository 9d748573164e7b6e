/// Errors raised by movie catalogs.
///
/// Malformed upstream payloads are rejected at the client edge as `Malformed`
/// rather than being passed on half-parsed.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}: {message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Malformed response from {endpoint}: {reason}")]
    Malformed { endpoint: String, reason: String },

    #[error("TMDB credentials are not configured (run `cinepick config tmdb` or set TMDB_API_KEY)")]
    NotConfigured,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0} is not supported by this catalog")]
    Unsupported(&'static str),
}

impl SourceError {
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        SourceError::Malformed {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}
