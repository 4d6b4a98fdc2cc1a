use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::inference::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

use super::{ConfigError, Result};

pub const API_KEY_ENV: &str = "API_KEY";
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "VISIONCRAFT_MODEL";
pub const ENDPOINT_ENV: &str = "VISIONCRAFT_ENDPOINT";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Startup configuration. Precedence: environment, then file, then defaults.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub camera_index: u32,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            camera_index: 0,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(|name| std::env::var(name).ok());
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let settings = if matches!(extension.as_str(), "yaml" | "yml") {
            serde_yaml::from_str::<Settings>(&raw)?
        } else {
            serde_json::from_str::<Settings>(&raw)?
        };
        Ok(settings)
    }

    /// Overrides fields from environment variables. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = lookup(API_KEY_ENV).or_else(|| lookup(FALLBACK_API_KEY_ENV)) {
            self.api_key = Some(key);
        }
        if let Some(model) = lookup(MODEL_ENV) {
            self.model = model;
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.endpoint = endpoint;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "endpoint `{}` must be an http(s) URL",
                self.endpoint
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("camera_index", &self.camera_index)
            .field("log_level", &self.log_level)
            .finish()
    }
}
