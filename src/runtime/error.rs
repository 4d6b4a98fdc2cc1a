use crate::config::ConfigError;
use crate::inference::AnalysisError;
use crate::media::MediaError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("media error: {0}")]
    Media(#[from] MediaError),

    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
}
