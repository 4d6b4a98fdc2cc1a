use tracing::{debug, info, warn};

use crate::catalog::default_scenario;
use crate::inference::{self, AnalysisError, Analyzer};
use crate::media::{self, CameraDevice, CameraSession, MediaError};
use crate::model::{ImageAsset, Scenario};

use super::{ANALYSIS_FAILURE_MESSAGE, AnalysisOutcome, ViewState};

/// Identifies one analysis request and the image generation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket {
    id: u64,
    generation: u64,
}

/// Everything a worker needs to run one analysis off the UI thread.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub ticket: AnalysisTicket,
    pub image: ImageAsset,
    pub instruction: String,
    pub system_instruction: Option<String>,
}

impl AnalysisJob {
    pub fn run(&self, analyzer: &Analyzer) -> inference::Result<String> {
        analyzer.analyze(
            &self.image,
            &self.instruction,
            self.system_instruction.as_deref(),
        )
    }
}

/// Top-level view state: scenario selection, the current image, the single
/// in-flight analysis, its outcome and the camera slot.
#[derive(Debug)]
pub struct Coordinator {
    scenario: &'static Scenario,
    instruction_override: String,
    customizing: bool,
    image: Option<ImageAsset>,
    generation: u64,
    next_ticket_id: u64,
    in_flight: Option<AnalysisTicket>,
    outcome: AnalysisOutcome,
    result_revision: u64,
    camera: Option<CameraSession>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            scenario: default_scenario(),
            instruction_override: String::new(),
            customizing: false,
            image: None,
            generation: 0,
            next_ticket_id: 0,
            in_flight: None,
            outcome: AnalysisOutcome::Idle,
            result_revision: 0,
            camera: None,
        }
    }

    pub fn state(&self) -> ViewState {
        match (&self.image, &self.outcome) {
            (None, _) => ViewState::NoImage,
            (Some(_), AnalysisOutcome::Idle) => ViewState::ImageSelected,
            (Some(_), AnalysisOutcome::Pending) => ViewState::Analyzing,
            (Some(_), AnalysisOutcome::Succeeded(_) | AnalysisOutcome::Failed(_)) => {
                ViewState::ResultReady
            }
        }
    }

    pub fn scenario(&self) -> &'static Scenario {
        self.scenario
    }

    /// Switches scenario, dropping the instruction override and any shown result.
    /// A pending analysis keeps running and its result is still accepted.
    pub fn select_scenario(&mut self, scenario: &'static Scenario) {
        self.scenario = scenario;
        self.instruction_override.clear();
        if !self.outcome.is_pending() {
            self.set_outcome(AnalysisOutcome::Idle);
        }
        debug!(
            scenario = scenario.id,
            state = self.state().as_str(),
            "scenario selected"
        );
    }

    pub fn instruction_override(&self) -> &str {
        &self.instruction_override
    }

    pub fn set_instruction_override(&mut self, text: impl Into<String>) {
        self.instruction_override = text.into();
    }

    pub fn instruction_override_mut(&mut self) -> &mut String {
        &mut self.instruction_override
    }

    pub fn effective_instruction(&self) -> &str {
        self.scenario
            .effective_instruction(&self.instruction_override)
    }

    pub fn is_customizing(&self) -> bool {
        self.customizing
    }

    pub fn set_customizing(&mut self, customizing: bool) {
        self.customizing = customizing;
    }

    pub fn image(&self) -> Option<&ImageAsset> {
        self.image.as_ref()
    }

    /// Image generation; bumps whenever the image is replaced or cleared.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the current image. Any shown result is cleared and any in-flight
    /// analysis for the previous image will be discarded on arrival.
    pub fn set_image(&mut self, image: ImageAsset) {
        info!(mime = %image.mime_type, "image selected");
        self.image = Some(image);
        self.invalidate_image_results();
    }

    pub fn clear_image(&mut self) {
        if self.image.take().is_some() {
            info!("image cleared");
        }
        self.invalidate_image_results();
    }

    fn invalidate_image_results(&mut self) {
        self.generation = self.generation.saturating_add(1);
        self.set_outcome(AnalysisOutcome::Idle);
    }

    pub fn is_analyzing(&self) -> bool {
        self.outcome.is_pending()
    }

    /// True while any request is outstanding, including one for a replaced image.
    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && self.in_flight.is_none()
    }

    /// Starts an analysis of the current image. Returns `None` when there is no
    /// image or another request is still outstanding.
    pub fn begin_analysis(&mut self) -> Option<AnalysisJob> {
        if !self.can_analyze() {
            debug!(state = self.state().as_str(), "analysis trigger ignored");
            return None;
        }
        let image = self.image.clone()?;

        self.next_ticket_id = self.next_ticket_id.saturating_add(1);
        let ticket = AnalysisTicket {
            id: self.next_ticket_id,
            generation: self.generation,
        };
        self.in_flight = Some(ticket);
        self.set_outcome(AnalysisOutcome::Pending);
        info!(
            ticket = ticket.id,
            scenario = self.scenario.id,
            "analysis started"
        );

        Some(AnalysisJob {
            ticket,
            image,
            instruction: self.effective_instruction().to_string(),
            system_instruction: self.scenario.system_instruction.map(str::to_string),
        })
    }

    /// Applies a finished analysis. Returns `false` when the result was discarded
    /// because the image changed since the request was issued.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        result: Result<String, AnalysisError>,
    ) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        } else {
            warn!(ticket = ticket.id, "completion for unknown analysis ticket");
            return false;
        }

        if ticket.generation != self.generation {
            info!(ticket = ticket.id, "discarding result for a replaced image");
            return false;
        }

        let outcome = match result {
            Ok(text) => AnalysisOutcome::Succeeded(text),
            Err(error) => {
                warn!(ticket = ticket.id, %error, "analysis failed");
                AnalysisOutcome::Failed(ANALYSIS_FAILURE_MESSAGE.to_string())
            }
        };
        self.set_outcome(outcome);
        true
    }

    pub fn outcome(&self) -> &AnalysisOutcome {
        &self.outcome
    }

    pub fn result_text(&self) -> Option<&str> {
        self.outcome.text()
    }

    /// Bumps on every outcome change; the result editor resyncs on it.
    pub fn result_revision(&self) -> u64 {
        self.result_revision
    }

    /// Commits an edited result. Committing empty text hides the result.
    pub fn commit_result(&mut self, text: String) {
        let outcome = match &self.outcome {
            AnalysisOutcome::Succeeded(_) | AnalysisOutcome::Failed(_) if text.is_empty() => {
                AnalysisOutcome::Idle
            }
            AnalysisOutcome::Succeeded(_) => AnalysisOutcome::Succeeded(text),
            AnalysisOutcome::Failed(_) => AnalysisOutcome::Failed(text),
            AnalysisOutcome::Idle | AnalysisOutcome::Pending => return,
        };
        self.set_outcome(outcome);
    }

    fn set_outcome(&mut self, outcome: AnalysisOutcome) {
        self.result_revision = self.result_revision.saturating_add(1);
        self.outcome = outcome;
    }

    pub fn is_camera_open(&self) -> bool {
        self.camera.as_ref().is_some_and(CameraSession::is_open)
    }

    /// Opens the single camera session. Fails with `CameraBusy` if one is open.
    pub fn open_camera(&mut self, device: &dyn CameraDevice) -> media::Result<()> {
        if self.is_camera_open() {
            return Err(MediaError::CameraBusy);
        }
        self.camera = Some(CameraSession::open(device)?);
        Ok(())
    }

    pub fn camera_mut(&mut self) -> Option<&mut CameraSession> {
        self.camera.as_mut()
    }

    /// Captures a frame into the current image. The session ends either way.
    pub fn capture_camera(&mut self) -> media::Result<()> {
        let mut session = self.camera.take().ok_or(MediaError::CameraClosed)?;
        let image = session.capture()?;
        self.set_image(image);
        Ok(())
    }

    pub fn close_camera(&mut self) {
        if let Some(mut session) = self.camera.take() {
            session.close();
        }
    }
}
