mod runner;
mod types;


pub use runner::{AnalysisReport, analyze_image, run_cli};
