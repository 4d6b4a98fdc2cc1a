use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::inference::{Analyzer, GeminiClient, InferenceBackend};
use crate::media::{CameraDevice, default_camera};

use super::Result;

/// Long-lived collaborators built once at startup and handed to the UI or CLI.
#[derive(Clone)]
pub struct AppContext {
    settings: Settings,
    analyzer: Analyzer,
    camera: Arc<dyn CameraDevice>,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        let backend: Arc<dyn InferenceBackend> =
            Arc::new(GeminiClient::new(settings.endpoint.clone(), settings.timeout()));
        let camera = default_camera(settings.camera_index);
        Self::with_parts(settings, backend, camera)
    }

    pub fn load(config: Option<&Path>) -> Result<Self> {
        let settings = Settings::load(config)?;
        Ok(Self::new(settings))
    }

    pub fn with_parts(
        settings: Settings,
        backend: Arc<dyn InferenceBackend>,
        camera: Arc<dyn CameraDevice>,
    ) -> Self {
        let analyzer = Analyzer::new(backend, settings.api_key.clone(), settings.model.clone());
        info!(
            model = %settings.model,
            endpoint = %settings.endpoint,
            credential = analyzer.has_credential(),
            "application context ready"
        );
        Self {
            settings,
            analyzer,
            camera,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn camera(&self) -> &dyn CameraDevice {
        self.camera.as_ref()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("settings", &self.settings)
            .field("analyzer", &self.analyzer)
            .finish_non_exhaustive()
    }
}
