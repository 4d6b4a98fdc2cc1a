use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use image::{ImageBuffer, Rgb, RgbImage};

use crate::catalog::{find_scenario, list_scenarios};
use crate::inference::{
    AnalysisError, Analyzer, BackendError, DEFAULT_MODEL, GenerateRequest, InferenceBackend,
};
use crate::media::{self, CameraDevice, MediaError, VideoStream};
use crate::model::ImageAsset;

use super::{
    ANALYSIS_FAILURE_MESSAGE, AnalysisOutcome, Coordinator, ResultEditor, ResultView, ViewState,
    render_mode,
};

struct ScriptedBackend {
    reply: Result<&'static str, u16>,
    calls: AtomicUsize,
}

impl InferenceBackend for ScriptedBackend {
    fn generate(
        &self,
        _api_key: &str,
        _request: &GenerateRequest<'_>,
    ) -> Result<Option<String>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Ok(text) => Ok(Some(text.to_string())),
            Err(code) => Err(BackendError::Status {
                code,
                body: "unauthorized".to_string(),
            }),
        }
    }
}

fn analyzer(reply: Result<&'static str, u16>) -> (Analyzer, Arc<ScriptedBackend>) {
    let backend = Arc::new(ScriptedBackend {
        reply,
        calls: AtomicUsize::new(0),
    });
    let analyzer = Analyzer::new(backend.clone(), Some("test-key".to_string()), DEFAULT_MODEL);
    (analyzer, backend)
}

fn receipt_image() -> ImageAsset {
    ImageAsset::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00], "image/jpeg")
}

fn other_image() -> ImageAsset {
    ImageAsset::from_bytes(&[0x89, b'P', b'N', b'G'], "image/png")
}

#[test]
fn starts_without_image_on_default_scenario() {
    let coordinator = Coordinator::new();
    assert_eq!(coordinator.state(), ViewState::NoImage);
    assert_eq!(coordinator.scenario().id, "general");
    assert!(!coordinator.can_analyze());
    let general = &list_scenarios()[0];
    assert_eq!(coordinator.effective_instruction(), general.prompt);
}

#[test]
fn receipt_analysis_shows_backend_text() {
    let (analyzer, _) = analyzer(Ok("商家: X, 总计: 100"));
    let mut coordinator = Coordinator::new();
    let mut editor = ResultEditor::new();

    coordinator.select_scenario(find_scenario("receipt").expect("receipt"));
    coordinator.set_image(receipt_image());
    assert_eq!(coordinator.state(), ViewState::ImageSelected);

    let job = coordinator.begin_analysis().expect("job");
    assert_eq!(coordinator.state(), ViewState::Analyzing);
    let receipt = find_scenario("receipt").expect("receipt");
    assert_eq!(job.instruction, receipt.prompt);
    assert_eq!(
        job.system_instruction.as_deref(),
        receipt.system_instruction
    );

    let result = job.run(&analyzer);
    assert!(coordinator.complete_analysis(job.ticket, result));
    assert_eq!(coordinator.state(), ViewState::ResultReady);
    assert_eq!(coordinator.result_text(), Some("商家: X, 总计: 100"));

    editor.sync(coordinator.result_revision(), coordinator.result_text());
    assert_eq!(editor.text(), "商家: X, 总计: 100");
    assert_eq!(editor.char_count(), "商家: X, 总计: 100".encode_utf16().count());
    assert_eq!(
        editor.view(coordinator.is_analyzing(), coordinator.result_text().is_some()),
        ResultView::ReadOnly
    );
    editor.begin_edit();
    assert_eq!(editor.view(false, true), ResultView::Editing);
}

#[test]
fn backend_auth_error_shows_fixed_message() {
    let (analyzer, _) = analyzer(Err(401));
    let mut coordinator = Coordinator::new();
    coordinator.set_image(receipt_image());
    let job = coordinator.begin_analysis().expect("job");
    let result = job.run(&analyzer);
    assert!(coordinator.complete_analysis(job.ticket, result));

    assert_eq!(coordinator.state(), ViewState::ResultReady);
    assert_eq!(coordinator.result_text(), Some(ANALYSIS_FAILURE_MESSAGE));
    assert!(matches!(coordinator.outcome(), AnalysisOutcome::Failed(_)));
    assert!(coordinator.can_analyze());
}

#[test]
fn missing_credential_is_shown_as_failure() {
    let backend = Arc::new(ScriptedBackend {
        reply: Ok("unused"),
        calls: AtomicUsize::new(0),
    });
    let analyzer = Analyzer::new(backend.clone(), None, DEFAULT_MODEL);
    let mut coordinator = Coordinator::new();
    coordinator.set_image(receipt_image());
    let job = coordinator.begin_analysis().expect("job");
    let result = job.run(&analyzer);
    assert!(matches!(result, Err(AnalysisError::MissingCredential)));
    coordinator.complete_analysis(job.ticket, result);

    assert_eq!(coordinator.result_text(), Some(ANALYSIS_FAILURE_MESSAGE));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn analysis_is_single_flight() {
    let (analyzer, backend) = analyzer(Ok("done"));
    let mut coordinator = Coordinator::new();
    assert!(coordinator.begin_analysis().is_none());

    coordinator.set_image(receipt_image());
    let job = coordinator.begin_analysis().expect("first job");
    assert!(coordinator.begin_analysis().is_none());
    assert!(coordinator.begin_analysis().is_none());

    coordinator.complete_analysis(job.ticket, job.run(&analyzer));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

    let retry = coordinator.begin_analysis().expect("retry after completion");
    assert_eq!(coordinator.state(), ViewState::Analyzing);
    assert_ne!(retry.ticket, job.ticket);
}

#[test]
fn scenario_change_resets_override_and_result() {
    let (analyzer, _) = analyzer(Ok("description"));
    let mut coordinator = Coordinator::new();
    coordinator.set_image(receipt_image());
    coordinator.set_customizing(true);
    coordinator.set_instruction_override("only list totals");
    assert_eq!(coordinator.effective_instruction(), "only list totals");

    let job = coordinator.begin_analysis().expect("job");
    assert_eq!(job.instruction, "only list totals");
    coordinator.complete_analysis(job.ticket, job.run(&analyzer));
    assert_eq!(coordinator.state(), ViewState::ResultReady);

    let code = find_scenario("code").expect("code");
    coordinator.select_scenario(code);
    assert_eq!(coordinator.state(), ViewState::ImageSelected);
    assert_eq!(coordinator.result_text(), None);
    assert_eq!(coordinator.instruction_override(), "");
    assert_eq!(coordinator.effective_instruction(), code.prompt);

    coordinator.select_scenario(code);
    assert_eq!(coordinator.effective_instruction(), code.prompt);
}

#[test]
fn scenario_change_keeps_pending_analysis() {
    let (analyzer, _) = analyzer(Ok("late but valid"));
    let mut coordinator = Coordinator::new();
    coordinator.set_image(receipt_image());
    let job = coordinator.begin_analysis().expect("job");

    coordinator.select_scenario(find_scenario("landmark").expect("landmark"));
    assert_eq!(coordinator.state(), ViewState::Analyzing);
    let result = job.run(&analyzer);
    assert!(coordinator.complete_analysis(job.ticket, result));
    assert_eq!(coordinator.result_text(), Some("late but valid"));
}

#[test]
fn late_result_for_replaced_image_is_discarded() {
    let (analyzer, _) = analyzer(Ok("stale"));
    let mut coordinator = Coordinator::new();
    coordinator.set_image(receipt_image());
    let job = coordinator.begin_analysis().expect("job");

    coordinator.set_image(other_image());
    assert_eq!(coordinator.state(), ViewState::ImageSelected);
    assert!(!coordinator.can_analyze());

    let result = job.run(&analyzer);
    assert!(!coordinator.complete_analysis(job.ticket, result));
    assert_eq!(coordinator.state(), ViewState::ImageSelected);
    assert_eq!(coordinator.result_text(), None);
    assert!(coordinator.can_analyze());
}

#[test]
fn clearing_image_discards_result() {
    let (analyzer, _) = analyzer(Ok("text"));
    let mut coordinator = Coordinator::new();
    coordinator.set_image(receipt_image());
    let job = coordinator.begin_analysis().expect("job");
    let result = job.run(&analyzer);
    assert!(coordinator.complete_analysis(job.ticket, result));

    coordinator.clear_image();
    assert_eq!(coordinator.state(), ViewState::NoImage);
    assert_eq!(coordinator.result_text(), None);

    coordinator.set_image(other_image());
    let job = coordinator.begin_analysis().expect("job");
    coordinator.clear_image();
    let result = job.run(&analyzer);
    assert!(!coordinator.complete_analysis(job.ticket, result));
    assert_eq!(coordinator.state(), ViewState::NoImage);
}

#[test]
fn unsaved_edit_is_discarded_by_new_analysis() {
    let (first, _) = analyzer(Ok("first result"));
    let (second, _) = analyzer(Ok("second result"));
    let mut coordinator = Coordinator::new();
    let mut editor = ResultEditor::new();
    coordinator.set_image(receipt_image());

    let job = coordinator.begin_analysis().expect("job");
    coordinator.complete_analysis(job.ticket, job.run(&first));
    editor.sync(coordinator.result_revision(), coordinator.result_text());
    editor.begin_edit();
    editor.set_text("hand-corrected");

    let job = coordinator.begin_analysis().expect("reanalysis");
    editor.sync(coordinator.result_revision(), coordinator.result_text());
    assert_eq!(
        editor.view(coordinator.is_analyzing(), false),
        ResultView::Loading
    );
    coordinator.complete_analysis(job.ticket, job.run(&second));
    editor.sync(coordinator.result_revision(), coordinator.result_text());

    assert_eq!(editor.text(), "second result");
    assert!(!editor.is_editing());
    assert_eq!(coordinator.result_text(), Some("second result"));
}

#[test]
fn saved_edit_is_committed() {
    let (analyzer, _) = analyzer(Ok("raw"));
    let mut coordinator = Coordinator::new();
    let mut editor = ResultEditor::new();
    coordinator.set_image(receipt_image());
    let job = coordinator.begin_analysis().expect("job");
    coordinator.complete_analysis(job.ticket, job.run(&analyzer));

    editor.sync(coordinator.result_revision(), coordinator.result_text());
    editor.begin_edit();
    editor.set_text("polished");
    coordinator.commit_result(editor.save());
    editor.sync(coordinator.result_revision(), coordinator.result_text());
    assert_eq!(coordinator.result_text(), Some("polished"));
    assert_eq!(editor.text(), "polished");

    editor.begin_edit();
    editor.set_text("");
    coordinator.commit_result(editor.save());
    assert_eq!(coordinator.state(), ViewState::ImageSelected);
}

#[test]
fn render_mode_is_a_pure_table() {
    assert_eq!(render_mode(true, false, false), ResultView::Loading);
    assert_eq!(render_mode(true, true, true), ResultView::Loading);
    assert_eq!(render_mode(false, false, true), ResultView::Hidden);
    assert_eq!(render_mode(false, true, true), ResultView::Editing);
    assert_eq!(render_mode(false, true, false), ResultView::ReadOnly);
}

#[test]
fn copy_acknowledgment_expires_after_two_seconds() {
    let mut editor = ResultEditor::new();
    editor.sync(1, Some("copy me"));
    let start = Instant::now();
    assert!(!editor.is_copied(start));

    assert_eq!(editor.copy(start), "copy me");
    assert!(editor.is_copied(start + Duration::from_millis(1_999)));
    assert!(!editor.is_copied(start + Duration::from_secs(2)));
    assert!(!editor.is_editing());
    let later = start + Duration::from_secs(3);
    assert!(editor.copy_ack_remaining(later).is_none());
}

struct StillCamera {
    stops: Arc<AtomicUsize>,
}

struct StillStream {
    stops: Arc<AtomicUsize>,
}

impl VideoStream for StillStream {
    fn frame(&mut self) -> media::Result<RgbImage> {
        Ok(ImageBuffer::from_pixel(8, 6, Rgb([10, 20, 30])))
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

impl CameraDevice for StillCamera {
    fn open(&self) -> media::Result<Box<dyn VideoStream>> {
        Ok(Box::new(StillStream {
            stops: Arc::clone(&self.stops),
        }))
    }
}

#[test]
fn camera_capture_sets_jpeg_image_and_releases_device() {
    let camera = StillCamera {
        stops: Arc::new(AtomicUsize::new(0)),
    };
    let mut coordinator = Coordinator::new();
    coordinator.open_camera(&camera).expect("open");
    assert!(coordinator.is_camera_open());
    assert!(matches!(
        coordinator.open_camera(&camera),
        Err(MediaError::CameraBusy)
    ));

    coordinator.capture_camera().expect("capture");
    assert!(!coordinator.is_camera_open());
    assert_eq!(camera.stops.load(Ordering::SeqCst), 1);
    assert_eq!(
        coordinator.image().map(|image| image.mime_type.as_str()),
        Some("image/jpeg")
    );
    assert_eq!(coordinator.state(), ViewState::ImageSelected);

    coordinator.close_camera();
    assert_eq!(camera.stops.load(Ordering::SeqCst), 1);
    assert!(matches!(
        coordinator.capture_camera(),
        Err(MediaError::CameraClosed)
    ));
}

#[test]
fn cancelled_camera_leaves_image_untouched() {
    let camera = StillCamera {
        stops: Arc::new(AtomicUsize::new(0)),
    };
    let mut coordinator = Coordinator::new();
    coordinator.set_image(other_image());
    coordinator.open_camera(&camera).expect("open");
    coordinator.close_camera();
    coordinator.close_camera();

    assert_eq!(camera.stops.load(Ordering::SeqCst), 1);
    assert_eq!(coordinator.image(), Some(&other_image()));
}
