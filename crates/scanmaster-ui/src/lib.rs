use std::io::Write;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use scanmaster_config::Config;
use scanmaster_types::AppEvent;
use tokio::sync::RwLock;

pub mod bridge;
pub mod command;
pub mod events;
pub mod state;

use bridge::spawn_stdin_reader;
use command::{UiCommand, parse_command};
use events::handle_events;
use state::{UiScreen, UiState};

/// Terminal UI on stdin/stdout
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let variant = config.read().await.screen.variant;
    tracing::info!("[UI] terminal UI starting ({} screen)", variant);

    let lines = spawn_stdin_reader(16)?;
    run_ui(lines, std::io::stdout(), app_to_ui_rx, ui_to_app_tx).await
}

/// Render app events to `out` and turn input lines into app events
pub async fn run_ui<W: Write>(
    lines: AsyncReceiver<String>,
    mut out: W,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut state = UiState::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::warn!("[UI] app channel closed");
                    break;
                };
                if !handle_events(event, &mut state, &mut out)? {
                    break;
                }
            }
            line = lines.recv(), if input_open => {
                let Ok(line) = line else {
                    // stdin closed: treat like closing the window
                    input_open = false;
                    ui_to_app_tx.send(AppEvent::Close).await?;
                    continue;
                };

                match parse_command(&line) {
                    UiCommand::Send(event) => ui_to_app_tx.send(event).await?,
                    UiCommand::Help => render_help(&mut out, &state)?,
                    UiCommand::PickerCancelled => {
                        tracing::debug!("[UI] gallery picker cancelled");
                        writeln!(out, "No image selected")?;
                    }
                    UiCommand::Empty => {}
                    UiCommand::Unknown(word) => {
                        writeln!(out, "Unknown command '{word}'. Type 'help'.")?;
                    }
                }
                out.flush()?;
            }
        }
    }

    Ok(())
}

fn render_help(out: &mut impl Write, state: &UiState) -> std::io::Result<()> {
    match state.screen {
        UiScreen::Onboarding => {
            writeln!(out, "next    show the next page")?;
            writeln!(out, "back    show the previous page")?;
            writeln!(out, "finish  finish the tutorial")?;
        }
        UiScreen::Capture | UiScreen::Starting => {
            let controls = state.controls();
            let shown = |f: fn(&scanmaster_types::Controls) -> bool| controls.as_ref().is_none_or(f);

            if shown(|c| c.camera) {
                writeln!(out, "camera          take a photo and detect text")?;
            }
            if shown(|c| c.gallery) {
                writeln!(out, "gallery <path>  detect text in an image file")?;
            }
            if shown(|c| c.copy) {
                writeln!(out, "copy            copy the detected text")?;
            }
            if shown(|c| c.erase) {
                writeln!(out, "erase           clear the detected text")?;
            }
        }
    }
    writeln!(out, "quit            exit")
}
