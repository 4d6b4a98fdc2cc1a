use std::time::{Duration, Instant};

/// How long the "copied" acknowledgment stays visible.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView {
    Hidden,
    Loading,
    Editing,
    ReadOnly,
}

pub fn render_mode(is_loading: bool, has_text: bool, is_editing: bool) -> ResultView {
    if is_loading {
        ResultView::Loading
    } else if !has_text {
        ResultView::Hidden
    } else if is_editing {
        ResultView::Editing
    } else {
        ResultView::ReadOnly
    }
}

/// Local, editable copy of the shared result text.
///
/// The copy follows the coordinator's result revision: a new revision replaces
/// the local text and leaves edit mode, so unsaved edits never outlive the
/// result they were made against, and a stale response never clobbers an edit
/// made after it landed.
#[derive(Debug, Default)]
pub struct ResultEditor {
    local_text: String,
    synced_revision: Option<u64>,
    editing: bool,
    copied_at: Option<Instant>,
}

impl ResultEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(&mut self, revision: u64, shared: Option<&str>) {
        if self.synced_revision == Some(revision) {
            return;
        }
        self.local_text = shared.unwrap_or_default().to_string();
        self.synced_revision = Some(revision);
        self.editing = false;
    }

    pub fn text(&self) -> &str {
        &self.local_text
    }

    pub fn text_mut(&mut self) -> &mut String {
        &mut self.local_text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.local_text = text.into();
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Leaves edit mode and returns the text to commit.
    pub fn save(&mut self) -> String {
        self.editing = false;
        self.local_text.clone()
    }

    /// Returns the text to place on the clipboard and starts the acknowledgment.
    pub fn copy(&mut self, now: Instant) -> String {
        self.copied_at = Some(now);
        self.local_text.clone()
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|copied_at| now.saturating_duration_since(copied_at) < COPY_ACK_DURATION)
    }

    /// Remaining acknowledgment time, used to schedule a repaint.
    pub fn copy_ack_remaining(&self, now: Instant) -> Option<Duration> {
        self.copied_at
            .map(|copied_at| {
                COPY_ACK_DURATION.saturating_sub(now.saturating_duration_since(copied_at))
            })
            .filter(|remaining| !remaining.is_zero())
    }

    pub fn char_count(&self) -> usize {
        self.local_text.chars().count()
    }

    pub fn view(&self, is_loading: bool, has_shared_text: bool) -> ResultView {
        render_mode(is_loading, has_shared_text, self.editing)
    }
}
