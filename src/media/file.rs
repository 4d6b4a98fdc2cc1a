use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::model::ImageAsset;

use super::mime::{detect_mime_type, is_image, sniff_mime_type};
use super::{MediaError, Result};

const FALLBACK_MIME: &str = "application/octet-stream";

/// A single item released over the drop zone.
#[derive(Debug, Clone, Default)]
pub struct DroppedItem {
    pub name: String,
    pub path: Option<PathBuf>,
    /// Declared MIME type; may be empty when the host does not report one.
    pub mime: String,
    pub bytes: Option<Arc<[u8]>>,
}

impl DroppedItem {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            path: Some(path),
            ..Self::default()
        }
    }

    /// Declared MIME type, or one derived from the file name when none was given.
    pub fn resolved_mime(&self) -> String {
        if !self.mime.is_empty() {
            return self.mime.clone();
        }
        self.path
            .as_deref()
            .and_then(detect_mime_type)
            .or_else(|| detect_mime_type(Path::new(&self.name)))
            .or_else(|| self.bytes.as_deref().and_then(sniff_mime_type))
            .unwrap_or(FALLBACK_MIME)
            .to_string()
    }
}

pub fn acquire_from_file(path: &Path) -> Result<ImageAsset> {
    let bytes = fs::read(path).map_err(|error| unreadable(path, error.to_string()))?;
    let mime = detect_mime_type(path)
        .or_else(|| sniff_mime_type(&bytes))
        .unwrap_or(FALLBACK_MIME);
    let asset = encode(&path.display().to_string(), &bytes, mime)?;
    info!(path = %path.display(), mime, size = bytes.len(), "image acquired from file");
    Ok(asset)
}

pub fn acquire_from_bytes(bytes: &[u8], mime: &str) -> Result<ImageAsset> {
    encode("<memory>", bytes, mime)
}

/// Accepts a dropped item only when its MIME type is `image/*`; anything else is
/// ignored and yields `Ok(None)`.
pub fn acquire_from_drop(item: &DroppedItem) -> Result<Option<ImageAsset>> {
    let mime = item.resolved_mime();
    if !is_image(&mime) {
        debug!(name = %item.name, mime = %mime, "ignoring non-image drop");
        return Ok(None);
    }

    let asset = match (&item.bytes, &item.path) {
        (Some(bytes), _) => acquire_from_bytes(bytes, &mime)?,
        (None, Some(path)) => {
            let bytes = fs::read(path).map_err(|error| unreadable(path, error.to_string()))?;
            encode(&item.name, &bytes, &mime)?
        }
        (None, None) => {
            return Err(MediaError::UnreadableFile {
                path: item.name.clone(),
                reason: "drop carried neither a path nor data".to_string(),
            });
        }
    };
    info!(name = %item.name, mime = %mime, "image acquired from drop");
    Ok(Some(asset))
}

fn encode(source: &str, bytes: &[u8], mime: &str) -> Result<ImageAsset> {
    if bytes.is_empty() {
        return Err(MediaError::UnreadableFile {
            path: source.to_string(),
            reason: "file is empty".to_string(),
        });
    }
    Ok(ImageAsset::from_bytes(bytes, mime))
}

fn unreadable(path: &Path, reason: String) -> MediaError {
    MediaError::UnreadableFile {
        path: path.display().to_string(),
        reason,
    }
}
