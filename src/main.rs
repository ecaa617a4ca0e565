//! Headshot - professional headshot generator CLI.

use std::process;

use clap::Parser;

use headshot::cli::Cli;
use headshot::config::{self, Config};
use headshot::context::ServiceContext;
use headshot::error::HeadshotError;
use headshot::model::resolve_model;
use headshot::output::{resolve_output_path, save_image};
use headshot::prompt::compile_selection;
use headshot::session::{GenerationSession, SessionState};
use headshot::{logging, Orchestrator, StyleSelection};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the generation itself failed.
async fn run(cli: Cli) -> Result<bool, HeadshotError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    let defaults = &config.defaults;

    let selection = StyleSelection::resolve(
        cli.pose.as_deref().unwrap_or(&defaults.pose),
        cli.framing.as_deref().unwrap_or(&defaults.framing),
        cli.outfit.as_deref().unwrap_or(&defaults.outfit),
    );

    if cli.print_prompt {
        println!("{}", compile_selection(&selection));
        return Ok(true);
    }

    let model_name = resolve_model(cli.model.as_deref().unwrap_or(&defaults.model))
        .map_err(HeadshotError::InvalidArgument)?;

    let image_path = cli
        .image
        .as_ref()
        .ok_or_else(|| HeadshotError::InvalidArgument("No image given".into()))?;
    let image = std::fs::read(image_path)?;

    let (ctx, recording) = ServiceContext::from_env(&config)?;
    let orchestrator = Orchestrator::new(ctx.model, model_name);
    tracing::info!(model = orchestrator.model_name(), ?selection, "starting generation");

    let mut session = GenerationSession::new();
    let ticket = session.begin();
    let result = orchestrator.generate(&image, selection).await;
    session.complete(ticket, result);
    drop(orchestrator);

    if let Some(recording) = recording {
        match recording.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    match session.state() {
        SessionState::Succeeded(headshot) if cli.data_url => {
            println!("{}", headshot.image.data_url());
            Ok(true)
        }
        SessionState::Succeeded(headshot) => {
            let output_path = resolve_output_path(
                cli.output.as_deref().or(defaults.output.as_deref()),
                &headshot.image,
            );
            save_image(&headshot.image, &output_path)?;
            eprintln!("Saved: {}", output_path.display());
            Ok(true)
        }
        SessionState::Failed(failure) => {
            eprintln!("Generation failed: {failure}");
            Ok(false)
        }
        SessionState::Idle | SessionState::Pending(_) => {
            Err(HeadshotError::InvalidArgument("generation did not complete".into()))
        }
    }
}
