mod camera;
mod error;
mod file;
mod mime;
#[cfg(feature = "camera")]
mod native;


pub use camera::{
    CameraDevice, CameraSession, JPEG_QUALITY, UnavailableCamera, VideoStream,
    default_camera, encode_jpeg,
};
pub use error::{MediaError, Result};
pub use file::{DroppedItem, acquire_from_bytes, acquire_from_drop, acquire_from_file};
pub use mime::{IMAGE_EXTENSIONS, detect_mime_type, is_image, sniff_mime_type};
#[cfg(feature = "camera")]
pub use native::NativeCamera;
