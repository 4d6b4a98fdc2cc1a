use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("API key not found in environment variables")]
    MissingCredential,

    #[error("failed to analyze image: {0}")]
    Failed(#[from] BackendError),
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("backend returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed backend response: {0}")]
    Decode(String),
}
