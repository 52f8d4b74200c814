use std::sync::PoisonError;

use scanmaster_types::{AppEvent, Notice};

use crate::flow_context::FlowContext;
use crate::session::Session;

pub async fn handle_copy(ctx: &FlowContext, session: &mut Session) {
    let label = ctx.state.config.read().await.clipboard.label.clone();

    let Some(screen) = session.active_capture() else {
        tracing::debug!("Copy ignored, capture screen not shown");
        return;
    };
    if !screen.controller.controls().copy {
        tracing::debug!("Copy control hidden on this screen, ignoring");
        return;
    }

    let notice = {
        let mut clipboard = ctx
            .state
            .clipboard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        screen.controller.on_copy_requested(&mut **clipboard, &label)
    };

    if notice == Notice::Copied {
        session.status.copies += 1;
    }
    ctx.notify(notice).await;
}

pub async fn handle_erase(ctx: &FlowContext, session: &mut Session) {
    let Some(screen) = session.active_capture() else {
        tracing::debug!("Erase ignored, capture screen not shown");
        return;
    };
    if !screen.controller.controls().erase {
        tracing::debug!("Erase control hidden on this screen, ignoring");
        return;
    }

    screen.controller.on_erase();
    tracing::info!("Display reset to placeholder");
    ctx.send_ui(AppEvent::ShowCapture(screen.controller.snapshot()))
        .await;
}
