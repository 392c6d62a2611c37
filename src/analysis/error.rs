use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Service reported an error: {0}")]
    Service(String),

    #[error("Failed to read response stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed response chunk: {0}")]
    Decode(#[from] serde_json::Error),
}
