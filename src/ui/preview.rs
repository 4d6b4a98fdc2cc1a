use eframe::egui;
use image::RgbImage;
use tracing::debug;

use crate::media::DroppedItem;
use crate::model::ImageAsset;

pub(super) fn color_image_from_rgb(frame: &RgbImage) -> egui::ColorImage {
    let size = [frame.width() as usize, frame.height() as usize];
    egui::ColorImage::from_rgb(size, frame.as_raw())
}

/// Decodes the asset for display. Formats the `image` crate cannot read (HEIC)
/// yield `None` and are still analyzable.
pub(super) fn decode_preview(asset: &ImageAsset) -> Option<egui::ColorImage> {
    let bytes = asset.decode_bytes().ok()?;
    let decoded = match image::load_from_memory(&bytes) {
        Ok(decoded) => decoded,
        Err(error) => {
            debug!(mime = %asset.mime_type, %error, "no preview for image");
            return None;
        }
    };
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Largest size with the texture's aspect ratio that fits inside `bounds`.
/// Never scales up.
pub(super) fn fit_within(size: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (bounds.x / size.x).min(bounds.y / size.y).min(1.0);
    size * scale.max(0.0)
}

pub(super) fn dropped_item(file: &egui::DroppedFile) -> DroppedItem {
    DroppedItem {
        name: file.name.clone(),
        path: file.path.clone(),
        mime: file.mime.clone(),
        bytes: file.bytes.clone(),
    }
}
