use scanmaster_core::state::Completion;
use scanmaster_types::{AppEvent, CapturedImage, RecognitionOutcome, RequestToken};

use crate::flow_context::FlowContext;
use crate::session::Session;

pub async fn handle_image_ready(
    ctx: &FlowContext,
    session: &mut Session,
    token: RequestToken,
    image: CapturedImage,
) {
    let Some(screen) = session.active_capture() else {
        tracing::debug!("[RECOGNIZE] image ignored, capture screen not shown");
        return;
    };

    let Some(request) = screen.controller.on_image_ready(token, image) else {
        session.status.stale += 1;
        return;
    };

    tracing::info!("[RECOGNIZE] dispatching {}", request.token);
    screen.dispatcher.dispatch(request, ctx.loopback_tx.clone());
    let snapshot = screen.controller.snapshot();

    session.status.issued += 1;
    ctx.send_ui(AppEvent::ShowCapture(snapshot)).await;
}

pub async fn handle_recognition_complete(
    ctx: &FlowContext,
    session: &mut Session,
    token: RequestToken,
    outcome: RecognitionOutcome,
) {
    let Some(screen) = session.capture.as_mut() else {
        tracing::debug!("[RECOGNIZE] {} completed without a capture screen", token);
        session.status.discarded += 1;
        return;
    };

    let completion = screen.controller.on_recognition_complete(token, outcome);
    let snapshot = screen.controller.snapshot();

    match completion {
        Completion::Updated => {
            session.status.completed += 1;
            ctx.send_ui(AppEvent::ShowCapture(snapshot)).await;
        }
        Completion::Failed(notice) => {
            session.status.failed += 1;
            ctx.send_ui(AppEvent::ShowCapture(snapshot)).await;
            ctx.notify(notice).await;
        }
        Completion::Stale => {
            session.status.stale += 1;
        }
        Completion::Discarded => {
            session.status.discarded += 1;
        }
    }
}
