//! Thumbgen - one-click AI thumbnail generator.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod controller;
mod display;
mod error;
mod model;
mod output;
mod params;
mod ports;
mod prompt;

use std::path::Path;
use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::controller::{GenerationController, GenerationState, UNKNOWN_ERROR_MESSAGE};
use crate::error::AppError;
use crate::model::{detect_provider, resolve_model, DEFAULT_MODEL};
use crate::output::{resolve_output_path, save_image};
use crate::params::{validate_aspect_ratio, DEFAULT_ASPECT_RATIO};
use crate::ports::ImageSettings;
use crate::prompt::THUMBNAIL_PROMPT;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "thumbgen=debug" } else { "thumbgen=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    if cli.show_prompt {
        eprintln!("Prompt Details");
        println!("{THUMBNAIL_PROMPT}");
        return Ok(());
    }

    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(AppError::Config)?;

    // Flags win over config defaults
    let model_name =
        cli.model.as_deref().or(config.defaults.model.as_deref()).unwrap_or(DEFAULT_MODEL);
    let resolved_model = resolve_model(model_name);
    let provider = detect_provider(&resolved_model).map_err(AppError::InvalidArgument)?;
    let aspect_ratio = cli
        .aspect_ratio
        .as_deref()
        .or(config.defaults.aspect_ratio.as_deref())
        .unwrap_or(DEFAULT_ASPECT_RATIO)
        .to_string();
    validate_aspect_ratio(&aspect_ratio, provider).map_err(AppError::InvalidArgument)?;

    tracing::debug!(
        model = %resolved_model,
        alias = model_name,
        ?provider,
        %aspect_ratio,
        "resolved model"
    );
    let settings = ImageSettings { model: resolved_model, aspect_ratio };

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("THUMBGEN_REPLAY").ok();
    let is_recording = std::env::var("THUMBGEN_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::info!(cassette = %cassette_path, "replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::info!("recording mode enabled");
        let (ctx, session) = ServiceContext::recording(provider, settings, &config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(provider, settings, &config)?, None)
    };

    let controller = GenerationController::new(Arc::from(ctx.generator), THUMBNAIL_PROMPT);
    let outcome = generate(&controller).await;
    drop(controller);

    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => tracing::warn!(error = %e, "failed to save cassette"),
        }
    }

    if let Some(download) = outcome.download() {
        let output_path =
            resolve_output_path(cli.output.as_deref(), config.defaults.output.as_deref());
        save_image(&download.image_data, &output_path)?;
        eprintln!("Saved: {}", output_path.display());
        if cli.data_uri {
            println!("{}", download.data_uri());
        }
        return Ok(());
    }

    match outcome {
        GenerationState::Failed { message } => Err(AppError::GenerationFailed(message)),
        _ => Err(AppError::GenerationFailed(UNKNOWN_ERROR_MESSAGE.to_string())),
    }
}

/// Trigger one generation and render every state it passes through.
async fn generate(controller: &GenerationController) -> GenerationState {
    if !controller.can_trigger() {
        return controller.state();
    }
    tracing::debug!(prompt = controller.prompt(), "triggering generation");

    let mut states = controller.subscribe();
    let generation = controller.trigger();
    eprintln!("{}", states.borrow_and_update().view());
    let generation = tokio::spawn(generation);

    while states.changed().await.is_ok() {
        let state = states.borrow_and_update().clone();
        eprintln!("{}", state.view());
        if state.is_settled() {
            break;
        }
    }

    if let Err(e) = generation.await {
        tracing::error!(error = %e, "generation task aborted");
    }
    controller.state()
}
