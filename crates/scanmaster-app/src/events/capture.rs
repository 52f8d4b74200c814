use scanmaster_types::{AppEvent, CaptureError, ContentRef, Notice, RequestToken};

use crate::flow_context::FlowContext;
use crate::session::Session;

#[derive(Debug, Clone)]
pub enum CaptureRequest {
    Camera,
    Gallery(ContentRef),
}

/// Start a camera or gallery capture; the result comes back as `ImageReady` or `CaptureFailed`
pub async fn handle_capture_request(
    ctx: &FlowContext,
    session: &mut Session,
    request: CaptureRequest,
) {
    let Some(screen) = session.active_capture() else {
        tracing::debug!("[CAPTURE] ignored, capture screen not shown");
        return;
    };

    let controls = screen.controller.controls();
    let allowed = match request {
        CaptureRequest::Camera => controls.camera,
        CaptureRequest::Gallery(_) => controls.gallery,
    };
    if !allowed {
        tracing::debug!("[CAPTURE] {:?} control hidden on this screen, ignoring", request);
        return;
    }

    let Some(token) = screen.controller.on_capture_started() else {
        return;
    };
    let cancel = screen.cancel.clone();
    session.status.record_capture();

    let image_source = ctx.state.image_source.clone();
    let loopback_tx = ctx.loopback_tx.clone();

    tokio::spawn(async move {
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[CAPTURE] cancelled");
                return;
            }
            result = async {
                match &request {
                    CaptureRequest::Camera => image_source.capture_from_camera().await,
                    CaptureRequest::Gallery(reference) => {
                        image_source.pick_from_gallery(reference).await
                    }
                }
            } => result,
        };

        let event = match result {
            Ok(image) => {
                tracing::info!(
                    "[CAPTURE] {} got {}x{} image from {:?}",
                    token,
                    image.image.width(),
                    image.image.height(),
                    image.origin
                );
                AppEvent::ImageReady { token, image }
            }
            Err(error) => {
                tracing::warn!("[CAPTURE] {} failed: {}", token, error);
                AppEvent::CaptureFailed { token, error }
            }
        };

        if let Err(e) = loopback_tx.send(event).await {
            tracing::warn!("[CAPTURE] result dropped: {}", e);
        }
    });
}

pub async fn handle_capture_failed(
    ctx: &FlowContext,
    session: &mut Session,
    token: RequestToken,
    error: CaptureError,
) {
    let Some(screen) = session.active_capture() else {
        tracing::debug!("[CAPTURE] failure after teardown ignored: {}", error);
        return;
    };
    if !screen.controller.on_capture_failed(token) {
        return;
    }

    session.status.capture_failures += 1;
    ctx.notify(Notice::from(&error)).await;
}
