use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::catalog::{find_scenario, list_scenarios};
use crate::logging;
use crate::media::acquire_from_file;
use crate::runtime::{self, AppContext, AppError};

use super::types::{Cli, Commands};

/// JSON document printed by `visioncraft analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub scenario: String,
    pub mime_type: String,
    pub model: String,
    pub instruction: String,
    pub text: String,
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scenarios => {
            println!(
                "{}",
                serde_json::to_string_pretty(list_scenarios()).map_err(|error| error.to_string())?
            );
        }
        Commands::Analyze {
            image,
            scenario,
            prompt,
            config,
        } => {
            let app = AppContext::load(config.as_deref()).map_err(|error| error.to_string())?;
            logging::init(&app.settings().log_level);
            let report = analyze_image(&app, &image, &scenario, prompt.as_deref())
                .map_err(|error| error.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).map_err(|error| error.to_string())?
            );
        }
        Commands::View { config, image } => {
            let app = AppContext::load(config.as_deref()).map_err(|error| error.to_string())?;
            crate::ui::run_with_context(app, image)?;
        }
    }

    Ok(())
}

/// Runs one headless analysis: read the file, resolve the instruction, call the model.
pub fn analyze_image(
    app: &AppContext,
    image: &Path,
    scenario_id: &str,
    prompt: Option<&str>,
) -> runtime::Result<AnalysisReport> {
    let scenario = find_scenario(scenario_id)
        .ok_or_else(|| AppError::UnknownScenario(scenario_id.to_string()))?;
    let asset = acquire_from_file(image)?;
    let instruction = scenario.effective_instruction(prompt.unwrap_or_default());

    info!(scenario = scenario.id, path = %image.display(), "headless analysis");
    let text = app
        .analyzer()
        .analyze(&asset, instruction, scenario.system_instruction)?;

    Ok(AnalysisReport {
        scenario: scenario.id.to_string(),
        mime_type: asset.mime_type,
        model: app.analyzer().model().to_string(),
        instruction: instruction.to_string(),
        text,
    })
}
