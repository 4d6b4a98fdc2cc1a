mod coordinator;
mod outcome;
mod result;

#[cfg(test)]
mod tests;

pub use coordinator::{AnalysisJob, AnalysisTicket, Coordinator};
pub use outcome::{ANALYSIS_FAILURE_MESSAGE, AnalysisOutcome, ViewState};
pub use result::{COPY_ACK_DURATION, ResultEditor, ResultView, render_mode};
