use thiserror::Error;

/// Failures talking to the VocaHire backend. Every variant surfaces to the
/// webview as a blocking alert string; there is no retry.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}
