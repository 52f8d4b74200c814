use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use scanmaster_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::flow_context::FlowContext;
use crate::session::Session;
use crate::state::AppState;

pub mod capture;
pub mod clipboard;
pub mod onboarding;
pub mod recognition;

use capture::{CaptureRequest, handle_capture_failed, handle_capture_request};
use clipboard::{handle_copy, handle_erase};
use onboarding::{handle_back, handle_onboarding};
use recognition::{handle_image_ready, handle_recognition_complete};

/// App's main loop. Owns every state mutation of the session
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    loopback_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let ctx = FlowContext::new(state, app_to_ui_tx, loopback_tx, cancel);
    let mut session = Session::start(&ctx).await;

    ctx.send_ui(AppEvent::BackendReady).await;
    session.show_current(&ctx).await;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = ctx.cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Shutdown requested");
                break;
            }
            event = ui_to_app_rx.recv() => event,
        };

        let event = match event {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("[EVENT_LOOP] channel closed: {}", e);
                break;
            }
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        if !handle_events(&ctx, &mut session, event).await? {
            break;
        }
    }

    session.close();
    session.status.log_summary();
    ctx.send_ui(AppEvent::Shutdown).await;

    Ok(())
}

/// Returns false once the app should stop
async fn handle_events(
    ctx: &FlowContext,
    session: &mut Session,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::CaptureFromCamera => {
            handle_capture_request(ctx, session, CaptureRequest::Camera).await;
        }
        AppEvent::PickFromGallery(reference) => {
            handle_capture_request(ctx, session, CaptureRequest::Gallery(reference)).await;
        }
        AppEvent::ImageReady { token, image } => {
            handle_image_ready(ctx, session, token, image).await;
        }
        AppEvent::CaptureFailed { token, error } => {
            handle_capture_failed(ctx, session, token, error).await;
        }
        AppEvent::RecognitionComplete { token, outcome } => {
            handle_recognition_complete(ctx, session, token, outcome).await;
        }
        AppEvent::CopyRequested => {
            handle_copy(ctx, session).await;
        }
        AppEvent::Erase => {
            handle_erase(ctx, session).await;
        }
        AppEvent::Onboarding(action) => {
            handle_onboarding(ctx, session, action).await?;
        }
        AppEvent::Back => {
            return Ok(handle_back(ctx, session).await);
        }
        AppEvent::Close => {
            tracing::info!("[NAV] close requested");
            return Ok(false);
        }
        AppEvent::BackendReady
        | AppEvent::ShowOnboardingStep { .. }
        | AppEvent::ShowCapture(_)
        | AppEvent::Notice(_)
        | AppEvent::Shutdown => {
            // UI-only event, ignore in backend
        }
    }

    Ok(true)
}
