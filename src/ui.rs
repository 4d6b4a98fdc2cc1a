mod app;
mod fonts;
mod preview;


use std::path::PathBuf;

use eframe::egui;

use crate::logging;
use crate::runtime::AppContext;

use app::VisionCraftApp;

const WINDOW_TITLE: &str = "VisionCraft";
const WINDOW_SIZE: [f32; 2] = [1080.0, 720.0];
const WINDOW_MIN_SIZE: [f32; 2] = [760.0, 520.0];

pub const CAMERA_UNAVAILABLE_NOTICE: &str = "无法访问相机。请检查权限设置。";

/// Opens the native window with settings from the environment.
pub fn run(startup_input: Option<PathBuf>) -> Result<(), String> {
    let app = AppContext::load(None).map_err(|error| error.to_string())?;
    run_with_context(app, startup_input)
}

pub fn run_with_context(app: AppContext, startup_input: Option<PathBuf>) -> Result<(), String> {
    logging::init(&app.settings().log_level);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(WINDOW_MIN_SIZE)
            .with_resizable(true)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(VisionCraftApp::new(cc, app, startup_input)))),
    )
    .map_err(|error| error.to_string())
}
