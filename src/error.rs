use thiserror::Error;

/// Failures raised by this crate itself.
///
/// Transport and JSON errors are passed through untouched, so look for
/// `reqwest::Error` or `serde_json::Error` in the returned `anyhow::Error` for those.
#[derive(Error, Debug)]
pub enum RetroError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unexpected HTTP status {status}, body: {body}")]
    Status { status: u16, body: String },

    #[error("{0} not set in environment variables")]
    MissingCredential(&'static str),
}
