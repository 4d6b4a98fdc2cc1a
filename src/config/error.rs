use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration JSON failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration YAML failure: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
