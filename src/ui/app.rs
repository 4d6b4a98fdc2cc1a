use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use eframe::egui;
use rfd::FileDialog;
use tracing::{info, warn};

use crate::catalog::list_scenarios;
use crate::inference::{self, Analyzer};
use crate::media::{IMAGE_EXTENSIONS, MediaError, acquire_from_drop, acquire_from_file};
use crate::model::Scenario;
use crate::runtime::AppContext;
use crate::session::{AnalysisJob, AnalysisTicket, Coordinator, ResultEditor, ResultView};

use super::CAMERA_UNAVAILABLE_NOTICE;
use super::fonts::install_cjk_fonts;
use super::preview::{color_image_from_rgb, decode_preview, dropped_item, fit_within};

const ACTIVE_REPAINT_INTERVAL: Duration = Duration::from_millis(33);
const MODEL_FOOTER: &str = "由 Gemini 2.5 Flash 生成";

#[derive(Debug)]
pub(super) enum WorkerEvent {
    AnalysisFinished {
        ticket: AnalysisTicket,
        result: inference::Result<String>,
    },
}

pub(super) fn spawn_analysis(analyzer: Analyzer, job: AnalysisJob, tx: Sender<WorkerEvent>) {
    std::thread::spawn(move || {
        let result = job.run(&analyzer);
        let _ = tx.send(WorkerEvent::AnalysisFinished {
            ticket: job.ticket,
            result,
        });
    });
}

/// Returns `true` when the event changed what the result pane shows.
pub(super) fn apply_worker_event(coordinator: &mut Coordinator, event: WorkerEvent) -> bool {
    match event {
        WorkerEvent::AnalysisFinished { ticket, result } => {
            coordinator.complete_analysis(ticket, result)
        }
    }
}

struct ImagePreview {
    generation: u64,
    texture: Option<egui::TextureHandle>,
}

pub(super) struct VisionCraftApp {
    app: AppContext,
    coordinator: Coordinator,
    editor: ResultEditor,
    image_preview: Option<ImagePreview>,
    camera_texture: Option<egui::TextureHandle>,
    notice: Option<String>,
    worker_tx: Sender<WorkerEvent>,
    worker_rx: Receiver<WorkerEvent>,
}

impl VisionCraftApp {
    pub(super) fn new(
        cc: &eframe::CreationContext<'_>,
        app: AppContext,
        startup_input: Option<PathBuf>,
    ) -> Self {
        install_cjk_fonts(&cc.egui_ctx);
        let (worker_tx, worker_rx) = mpsc::channel();
        let mut this = Self {
            app,
            coordinator: Coordinator::new(),
            editor: ResultEditor::new(),
            image_preview: None,
            camera_texture: None,
            notice: None,
            worker_tx,
            worker_rx,
        };
        if let Some(path) = startup_input {
            this.open_path(&path);
        }
        this
    }

    fn poll_worker_events(&mut self) -> bool {
        let mut state_changed = false;
        while let Ok(event) = self.worker_rx.try_recv() {
            apply_worker_event(&mut self.coordinator, event);
            state_changed = true;
        }
        state_changed
    }

    fn open_path(&mut self, path: &Path) {
        match acquire_from_file(path) {
            Ok(image) => {
                self.notice = None;
                self.coordinator.set_image(image);
            }
            Err(error) => self.show_media_error(error),
        }
    }

    fn pick_file(&mut self) {
        let picked = FileDialog::new()
            .add_filter("图片", IMAGE_EXTENSIONS)
            .pick_file();
        if let Some(path) = picked {
            self.open_path(&path);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            match acquire_from_drop(&dropped_item(&file)) {
                Ok(Some(image)) => {
                    self.notice = None;
                    self.coordinator.set_image(image);
                }
                Ok(None) => {}
                Err(error) => self.show_media_error(error),
            }
        }
    }

    fn show_media_error(&mut self, error: MediaError) {
        warn!(%error, "media acquisition failed");
        self.notice = Some(match error {
            MediaError::CameraUnavailable(_) => CAMERA_UNAVAILABLE_NOTICE.to_string(),
            other => other.to_string(),
        });
    }

    fn start_analysis(&mut self) {
        let Some(job) = self.coordinator.begin_analysis() else {
            return;
        };
        spawn_analysis(self.app.analyzer().clone(), job, self.worker_tx.clone());
    }

    fn open_camera(&mut self) {
        match self.coordinator.open_camera(self.app.camera()) {
            Ok(()) => self.notice = None,
            Err(error) => self.show_media_error(error),
        }
    }

    fn capture_camera(&mut self) {
        self.camera_texture = None;
        if let Err(error) = self.coordinator.capture_camera() {
            self.show_media_error(error);
        }
    }

    fn close_camera(&mut self) {
        self.camera_texture = None;
        self.coordinator.close_camera();
    }

    fn refresh_image_preview(&mut self, ctx: &egui::Context) {
        let generation = self.coordinator.generation();
        if self
            .image_preview
            .as_ref()
            .is_some_and(|preview| preview.generation == generation)
        {
            return;
        }
        let texture = self
            .coordinator
            .image()
            .and_then(decode_preview)
            .map(|image| ctx.load_texture("selected-image", image, egui::TextureOptions::LINEAR));
        self.image_preview = Some(ImagePreview {
            generation,
            texture,
        });
    }

    fn refresh_camera_frame(&mut self, ctx: &egui::Context) {
        let Some(session) = self.coordinator.camera_mut() else {
            return;
        };
        match session.preview_frame() {
            Ok(frame) => {
                let image = color_image_from_rgb(&frame);
                match &mut self.camera_texture {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.camera_texture = Some(ctx.load_texture(
                            "camera-preview",
                            image,
                            egui::TextureOptions::LINEAR,
                        ));
                    }
                }
            }
            Err(error) => {
                self.close_camera();
                self.show_media_error(error);
            }
        }
    }

    fn draw_scenario_picker(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("分析场景").strong());

        let current = self.coordinator.scenario();
        let mut chosen: Option<&'static Scenario> = None;
        egui::ComboBox::from_id_salt("scenario-picker")
            .selected_text(scenario_label(current))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for scenario in list_scenarios() {
                    if ui
                        .selectable_label(scenario.id == current.id, scenario_label(scenario))
                        .on_hover_text(scenario.description)
                        .clicked()
                    {
                        chosen = Some(scenario);
                    }
                }
            });
        if let Some(scenario) = chosen {
            if scenario.id != current.id {
                self.coordinator.select_scenario(scenario);
            }
        }

        ui.label(egui::RichText::new(self.coordinator.scenario().description).weak());
        ui.add_space(6.0);

        let customizing = self.coordinator.is_customizing();
        let toggle = if customizing { "使用默认指令" } else { "自定义指令" };
        if ui.button(toggle).clicked() {
            self.coordinator.set_customizing(!customizing);
        }

        if self.coordinator.is_customizing() {
            let default_prompt = self.coordinator.scenario().prompt;
            ui.add(
                egui::TextEdit::multiline(self.coordinator.instruction_override_mut())
                    .hint_text(default_prompt)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
        } else {
            ui.label(egui::RichText::new(self.coordinator.effective_instruction()).small());
        }
    }

    fn draw_image_zone(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.label(egui::RichText::new("图片").strong());

        if self.coordinator.is_camera_open() {
            self.refresh_camera_frame(ctx);
            if let Some(texture) = &self.camera_texture {
                let size = fit_within(texture.size_vec2(), egui::vec2(ui.available_width(), 280.0));
                ui.add(egui::Image::new(texture).fit_to_exact_size(size));
            } else {
                ui.spinner();
            }
            ui.horizontal(|ui| {
                if ui.button("📸 拍照").clicked() {
                    self.capture_camera();
                }
                if ui.button("取消").clicked() {
                    self.close_camera();
                }
            });
            return;
        }

        self.refresh_image_preview(ctx);
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let mut clear = false;

        let texture = self
            .image_preview
            .as_ref()
            .and_then(|preview| preview.texture.as_ref());

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_height(200.0);
            ui.set_width(ui.available_width());
            match (self.coordinator.image(), texture) {
                (Some(image), Some(texture)) => {
                    let size =
                        fit_within(texture.size_vec2(), egui::vec2(ui.available_width(), 280.0));
                    ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                    ui.label(egui::RichText::new(&image.mime_type).weak().small());
                    clear = ui.button("移除图片").clicked();
                }
                (Some(image), _) => {
                    ui.label(format!("已选择图片（{}），无法预览", image.mime_type));
                    clear = ui.button("移除图片").clicked();
                }
                (None, _) => {
                    let hint = if hovering {
                        "松开以上传图片"
                    } else {
                        "拖放图片到此处"
                    };
                    ui.centered_and_justified(|ui| {
                        ui.label(egui::RichText::new(hint).weak());
                    });
                }
            }
        });
        if clear {
            self.coordinator.clear_image();
        }

        ui.horizontal(|ui| {
            if ui.button("📁 选择文件").clicked() {
                self.pick_file();
            }
            if ui.button("📷 打开相机").clicked() {
                self.open_camera();
            }
        });

        if let Some(notice) = &self.notice {
            ui.colored_label(egui::Color32::from_rgb(220, 90, 90), notice);
        }
    }

    fn draw_analyze_button(&mut self, ui: &mut egui::Ui) {
        let label = analyze_button_label(&self.coordinator);
        let button = egui::Button::new(egui::RichText::new(label).strong())
            .min_size(egui::vec2(ui.available_width(), 32.0));
        if ui.add_enabled(self.coordinator.can_analyze(), button).clicked() {
            self.start_analysis();
        }
    }

    fn draw_result_pane(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let now = Instant::now();
        let view = self
            .editor
            .view(self.coordinator.is_analyzing(), self.coordinator.result_text().is_some());

        match view {
            ResultView::Hidden => {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("选择场景和图片后开始分析").weak());
                });
                return;
            }
            ResultView::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("正在分析图片…");
                });
                return;
            }
            ResultView::Editing | ResultView::ReadOnly => {}
        }

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("分析结果").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let copy_label = if self.editor.is_copied(now) {
                    "✔ 已复制"
                } else {
                    "复制"
                };
                if ui.button(copy_label).clicked() {
                    ctx.copy_text(self.editor.copy(now));
                }
                if view == ResultView::Editing {
                    if ui.button("保存").clicked() {
                        let text = self.editor.save();
                        self.coordinator.commit_result(text);
                    }
                } else if ui.button("✏ 编辑").clicked() {
                    self.editor.begin_edit();
                }
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .max_height((ui.available_height() - 28.0).max(0.0))
            .show(ui, |ui| {
                if view == ResultView::Editing {
                    ui.add(
                        egui::TextEdit::multiline(self.editor.text_mut())
                            .desired_width(f32::INFINITY)
                            .desired_rows(16),
                    );
                } else {
                    ui.add(egui::Label::new(self.editor.text()).selectable(true).wrap());
                }
            });

        ui.separator();
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("{} 字符", self.editor.char_count())).weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(MODEL_FOOTER).weak());
            });
        });
    }
}

/// A request for a replaced image still holds the single slot while the pane
/// no longer shows it as running.
pub(super) fn analyze_button_label(coordinator: &Coordinator) -> &'static str {
    match (coordinator.has_request_in_flight(), coordinator.is_analyzing()) {
        (true, true) => "分析中…",
        (true, false) => "上一请求处理中",
        (false, _) => "开始分析",
    }
}

fn scenario_label(scenario: &Scenario) -> String {
    format!("{} {}", scenario.icon.glyph(), scenario.title)
}

impl eframe::App for VisionCraftApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let worker_state_changed = self.poll_worker_events();

        if ctx.input(|i| i.viewport().close_requested()) && self.coordinator.is_camera_open() {
            info!("window closing; releasing camera");
            self.close_camera();
        }

        self.handle_dropped_files(ctx);
        self.editor.sync(
            self.coordinator.result_revision(),
            self.coordinator.result_text(),
        );

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("VisionCraft");
                ui.label(egui::RichText::new("智能图像分析").weak());
            });
        });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(380.0)
            .min_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_scenario_picker(ui);
                    ui.separator();
                    self.draw_image_zone(ui, ctx);
                    ui.separator();
                    self.draw_analyze_button(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_result_pane(ui, ctx);
        });

        if worker_state_changed {
            ctx.request_repaint();
        } else if self.coordinator.has_request_in_flight() || self.coordinator.is_camera_open() {
            ctx.request_repaint_after(ACTIVE_REPAINT_INTERVAL);
        }
        if let Some(remaining) = self.editor.copy_ack_remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
    }
}

impl Drop for VisionCraftApp {
    fn drop(&mut self) {
        self.coordinator.close_camera();
    }
}
