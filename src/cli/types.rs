use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "visioncraft",
    version,
    about = "Scenario-driven image analysis with a vision-language model"
)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Prints the built-in scenario catalog as JSON.
    Scenarios,
    Analyze {
        image: PathBuf,
        #[arg(long, default_value = "general")]
        scenario: String,
        /// Replaces the scenario's default instruction when non-blank.
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Launches the native window, optionally with an image already loaded.
    View {
        #[arg(long)]
        config: Option<PathBuf>,
        image: Option<PathBuf>,
    },
}
