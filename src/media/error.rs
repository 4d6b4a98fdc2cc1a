use thiserror::Error;

pub type Result<T> = std::result::Result<T, MediaError>;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unreadable file {path}: {reason}")]
    UnreadableFile { path: String, reason: String },

    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("a camera session is already open")]
    CameraBusy,

    #[error("camera session is already closed")]
    CameraClosed,

    #[error("frame capture failed: {0}")]
    CaptureFailed(String),

    #[error("image encode failure: {0}")]
    Encode(#[from] image::ImageError),
}
