use std::sync::Arc;

use kanal::AsyncSender;
use scanmaster_types::{AppEvent, Notice};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Shared dependencies of the event handlers
#[derive(Clone)]
pub struct FlowContext {
    pub state: Arc<AppState>,
    /// App -> UI
    pub ui_tx: AsyncSender<AppEvent>,
    /// Back into the event loop, for spawned capture and recognition tasks
    pub loopback_tx: AsyncSender<AppEvent>,
    pub cancel: CancellationToken,
}

impl FlowContext {
    pub fn new(
        state: Arc<AppState>,
        ui_tx: AsyncSender<AppEvent>,
        loopback_tx: AsyncSender<AppEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            state,
            ui_tx,
            loopback_tx,
            cancel,
        }
    }

    /// Send to the UI. A closed UI channel is logged, not fatal
    pub async fn send_ui(&self, event: AppEvent) {
        if let Err(e) = self.ui_tx.send(event).await {
            tracing::warn!("[EVENT_LOOP] UI channel closed: {}", e);
        }
    }

    pub async fn notify(&self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!("[EVENT_LOOP] notice: {}", notice);
        } else {
            tracing::info!("[EVENT_LOOP] notice: {}", notice);
        }
        self.send_ui(AppEvent::Notice(notice)).await;
    }
}
