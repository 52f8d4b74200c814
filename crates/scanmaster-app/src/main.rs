use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use scanmaster_config::Config;
use scanmaster_config::screen::{ScreenConfig, ScreenVariant};
use scanmaster_io::{CommandCamera, SystemClipboard};
use scanmaster_ocr::TesseractEngine;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod flow_context;
pub mod profile;
pub mod session;
pub mod state;
pub mod status;

#[cfg(test)]
mod tests;

use self::controller::{AppController, ChannelSet};
use self::profile::{ProfileStore, load_config_file};
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "scanmaster")]
#[command(about = "Capture or pick an image and detect the text in it")]
struct Args {
    /// Profile to load from the user config directory
    #[arg(long, default_value = "main")]
    profile: String,

    /// Config file used instead of the profile's settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Capture screen layout: full, text-only, camera-only, gallery-only
    #[arg(long)]
    variant: Option<ScreenVariant>,

    /// Go straight to the capture screen
    #[arg(long)]
    skip_onboarding: bool,

    /// Show the tutorial again on this start
    #[arg(long)]
    reset_onboarding: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder
            .with_ansi(atty::is(atty::Stream::Stderr))
            .init();
    }
}

/// Profile store, or `None` when no user config directory is usable
fn open_profile(name: &str) -> Option<ProfileStore> {
    let store = match ProfileStore::user(name) {
        Ok(store) => store,
        Err(e) => {
            tracing::warn!("Profiles disabled: {:#}", e);
            return None;
        }
    };

    match store.init() {
        Ok(()) => Some(store),
        Err(e) => {
            tracing::warn!("Profiles disabled: {:#}", e);
            None
        }
    }
}

fn load_config(args: &Args, profile: Option<&ProfileStore>) -> anyhow::Result<Config> {
    let mut config = match (&args.config, profile) {
        (Some(path), _) => load_config_file(path)?,
        (None, Some(store)) => store.load()?.value,
        (None, None) => Config::default(),
    };

    config.apply_env();

    if let Some(variant) = args.variant {
        config.screen = ScreenConfig::for_variant(variant);
    }
    if args.skip_onboarding {
        config.onboarding.enabled = false;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    let profile = open_profile(&args.profile);
    if let Some(store) = &profile {
        tracing::info!("Using profile {} at {}", store.name(), store.path().display());
        if args.reset_onboarding {
            store.set_onboarding_completed(false)?;
        }
    }

    let config = load_config(&args, profile.as_ref())?;

    let engine = TesseractEngine::from_config(&config.recognition);
    match engine.probe().await {
        Ok(version) => tracing::info!("Recognition engine: {} ({})", version, engine.language()),
        Err(e) => tracing::warn!("Recognition engine unavailable, recognitions will fail: {}", e),
    }

    let channels = ChannelSet::new(config.app_to_ui_capacity, config.ui_to_app_capacity);
    let camera = Arc::new(CommandCamera::new(config.camera.clone()));
    let state = Arc::new(AppState::new(
        config,
        Arc::new(engine),
        camera,
        Box::new(SystemClipboard::new()),
        profile,
    ));

    let controller = AppController::new(state, channels);
    let mut tasks = controller.spawn_tasks();

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
            }
            result = tasks.join_next() => match result {
                Some(Ok(Ok(()))) => {
                    // First task to finish takes the rest down with it
                    controller.shutdown();
                }
                Some(Ok(Err(e))) => {
                    tracing::error!("task exited: {:#}", e);
                    controller.shutdown();
                }
                Some(Err(e)) => {
                    tracing::error!("task panicked: {}", e);
                    controller.shutdown();
                }
                None => break,
            }
        }
    }

    Ok(())
}
