/// Shown in the result pane whenever an analysis attempt fails.
pub const ANALYSIS_FAILURE_MESSAGE: &str = "错误：无法分析图片。请检查网络或尝试其他图片。";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnalysisOutcome {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl AnalysisOutcome {
    /// Text for the result pane. Failures render their message like a result.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Succeeded(text) | Self::Failed(text) => Some(text),
            Self::Idle | Self::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    NoImage,
    ImageSelected,
    Analyzing,
    ResultReady,
}

impl ViewState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoImage => "no-image",
            Self::ImageSelected => "image-selected",
            Self::Analyzing => "analyzing",
            Self::ResultReady => "result-ready",
        }
    }
}
