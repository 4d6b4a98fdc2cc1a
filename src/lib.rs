pub mod catalog;
pub mod cli;
pub mod config;
pub mod inference;
pub mod logging;
pub mod media;
pub mod model;
pub mod runtime;
pub mod session;
pub mod ui;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
