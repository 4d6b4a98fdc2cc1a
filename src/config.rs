mod error;
mod settings;


pub use error::{ConfigError, Result};
pub use settings::{
    API_KEY_ENV, DEFAULT_TIMEOUT_SECS, ENDPOINT_ENV, FALLBACK_API_KEY_ENV, MODEL_ENV, Settings,
};
