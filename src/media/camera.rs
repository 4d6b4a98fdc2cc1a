use std::fmt;
use std::sync::Arc;

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use tracing::{info, warn};

use crate::model::ImageAsset;

use super::{MediaError, Result};

/// JPEG quality used for camera snapshots (0.8 on a unit scale).
pub const JPEG_QUALITY: u8 = 80;

/// A live video feed. Implementations release the device in `stop`.
pub trait VideoStream {
    fn frame(&mut self) -> Result<RgbImage>;
    fn stop(&mut self);
}

/// Host capability for opening a video stream.
pub trait CameraDevice: Send + Sync {
    /// Opens the environment-facing (rear) camera where the host tells them apart.
    fn open(&self) -> Result<Box<dyn VideoStream>>;
}

/// Device used when no capture backend is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableCamera;

impl CameraDevice for UnavailableCamera {
    fn open(&self) -> Result<Box<dyn VideoStream>> {
        Err(MediaError::CameraUnavailable(
            "no camera backend in this build".to_string(),
        ))
    }
}

#[cfg(feature = "camera")]
pub fn default_camera(index: u32) -> Arc<dyn CameraDevice> {
    Arc::new(super::NativeCamera::new(index))
}

#[cfg(not(feature = "camera"))]
pub fn default_camera(_index: u32) -> Arc<dyn CameraDevice> {
    Arc::new(UnavailableCamera)
}

/// An open camera. The stream is stopped on capture, on `close`, and on drop.
pub struct CameraSession {
    stream: Option<Box<dyn VideoStream>>,
}

impl CameraSession {
    pub fn open(device: &dyn CameraDevice) -> Result<Self> {
        let stream = device.open()?;
        info!("camera session opened");
        Ok(Self {
            stream: Some(stream),
        })
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    pub fn preview_frame(&mut self) -> Result<RgbImage> {
        self.stream
            .as_mut()
            .ok_or(MediaError::CameraClosed)?
            .frame()
    }

    /// Snapshots the current frame as JPEG and ends the session, whether or not
    /// the snapshot succeeded.
    pub fn capture(&mut self) -> Result<ImageAsset> {
        let mut stream = self.stream.take().ok_or(MediaError::CameraClosed)?;
        let frame = stream.frame();
        stream.stop();
        info!("camera session closed after capture");
        encode_jpeg(&frame?)
    }

    pub fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            info!("camera session closed");
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        if self.stream.is_some() {
            warn!("camera session dropped while open");
        }
        self.close();
    }
}

impl fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraSession")
            .field("open", &self.is_open())
            .finish()
    }
}

pub fn encode_jpeg(frame: &RgbImage) -> Result<ImageAsset> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(MediaError::CaptureFailed("empty frame".to_string()));
    }
    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
        encoder.encode_image(frame)?;
    }
    Ok(ImageAsset::from_bytes(&bytes, "image/jpeg"))
}
