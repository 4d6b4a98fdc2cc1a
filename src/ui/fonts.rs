use std::fs;
use std::sync::Arc;

use eframe::egui;
use tracing::{debug, info};

const CJK_FONT_NAME: &str = "cjk-fallback";

const CJK_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
];

/// Appends the first system CJK font found as a fallback for both families.
pub(super) fn install_cjk_fonts(ctx: &egui::Context) {
    let Some((path, data)) = CJK_FONT_CANDIDATES
        .iter()
        .find_map(|path| fs::read(path).ok().map(|data| (*path, data)))
    else {
        debug!("no system CJK font found");
        return;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        CJK_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(data)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        if let Some(names) = fonts.families.get_mut(&family) {
            names.push(CJK_FONT_NAME.to_owned());
        }
    }
    ctx.set_fonts(fonts);
    info!(path, "CJK fallback font installed");
}
