use image::RgbImage;
use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use tracing::{debug, warn};

use super::{CameraDevice, MediaError, Result, VideoStream};

/// Camera backed by the platform capture API.
#[derive(Debug, Clone, Copy)]
pub struct NativeCamera {
    index: u32,
}

impl NativeCamera {
    pub fn new(index: u32) -> Self {
        Self { index }
    }
}

impl CameraDevice for NativeCamera {
    fn open(&self) -> Result<Box<dyn VideoStream>> {
        // Desktop capture APIs do not expose facing; the configured index wins.
        debug!(index = self.index, "opening native camera");
        let format =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(self.index), format)
            .map_err(|error| MediaError::CameraUnavailable(error.to_string()))?;
        camera
            .open_stream()
            .map_err(|error| MediaError::CameraUnavailable(error.to_string()))?;
        Ok(Box::new(NativeStream { camera }))
    }
}

struct NativeStream {
    camera: Camera,
}

impl VideoStream for NativeStream {
    fn frame(&mut self) -> Result<RgbImage> {
        let buffer = self
            .camera
            .frame()
            .map_err(|error| MediaError::CaptureFailed(error.to_string()))?;
        let resolution = buffer.resolution();
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|error| MediaError::CaptureFailed(error.to_string()))?;
        RgbImage::from_raw(resolution.width(), resolution.height(), decoded.into_raw())
            .ok_or_else(|| MediaError::CaptureFailed("frame size mismatch".to_string()))
    }

    fn stop(&mut self) {
        if let Err(error) = self.camera.stop_stream() {
            warn!(%error, "failed to stop camera stream");
        }
    }
}
