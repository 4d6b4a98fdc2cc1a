use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::model::ImageAsset;

use super::{AnalysisError, GenerateRequest, InferenceBackend, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Low sampling temperature; extraction should be repeatable.
pub const TEMPERATURE: f32 = 0.4;
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "No text generated.";

/// Sends one image and instruction to the backend per call. Never retries.
#[derive(Clone)]
pub struct Analyzer {
    backend: Arc<dyn InferenceBackend>,
    api_key: Option<String>,
    model: String,
}

impl Analyzer {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            api_key,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn analyze(
        &self,
        image: &ImageAsset,
        instruction: &str,
        system_instruction: Option<&str>,
    ) -> Result<String> {
        let api_key = self.credential().ok_or(AnalysisError::MissingCredential)?;

        let request = GenerateRequest {
            model: &self.model,
            image_data: image.payload(),
            mime_type: &image.mime_type,
            prompt: instruction,
            system_instruction,
            temperature: TEMPERATURE,
        };

        let started = Instant::now();
        info!(model = %self.model, mime = %image.mime_type, "analysis request sent");
        match self.backend.generate(api_key, &request) {
            Ok(text) => {
                info!(
                    latency_ms = started.elapsed().as_millis() as u64,
                    empty = text.is_none(),
                    "analysis response received"
                );
                Ok(text
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| EMPTY_RESPONSE_PLACEHOLDER.to_string()))
            }
            Err(source) => {
                error!(error = %source, "analysis request failed");
                Err(AnalysisError::Failed(source))
            }
        }
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("model", &self.model)
            .field("has_credential", &self.has_credential())
            .finish_non_exhaustive()
    }
}
