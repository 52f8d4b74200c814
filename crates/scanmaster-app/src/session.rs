use scanmaster_core::navigation::{Navigator, Screen};
use scanmaster_core::onboarding::OnboardingFlow;
use scanmaster_core::recognition::{Orientation, RecognitionDispatcher};
use scanmaster_core::state::PresentationController;
use scanmaster_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::flow_context::FlowContext;
use crate::status::FlowStatus;

/// The capture screen and the tasks it owns
pub struct CaptureScreen {
    pub controller: PresentationController,
    pub dispatcher: RecognitionDispatcher,
    /// Cancels camera, gallery and recognition tasks of this screen
    pub cancel: CancellationToken,
}

impl CaptureScreen {
    pub async fn open(ctx: &FlowContext) -> Self {
        let config = ctx.state.config.read().await;

        let orientation = Orientation::from_degrees(config.recognition.orientation)
            .unwrap_or_else(|| {
                tracing::warn!(
                    "Unsupported orientation {}, using upright",
                    config.recognition.orientation
                );
                Orientation::Upright
            });

        let cancel = ctx.cancel.child_token();
        let dispatcher = RecognitionDispatcher::new(
            ctx.state.recognizer.clone(),
            config.recognition.timeout(),
            orientation,
            cancel.clone(),
        );

        tracing::info!(
            "[NAV] capture screen opened ({} variant, {} engine)",
            config.screen.variant,
            ctx.state.recognizer.name()
        );

        Self {
            controller: PresentationController::new(
                config.placeholder_text.clone(),
                config.screen,
            ),
            dispatcher,
            cancel,
        }
    }

    /// Cancel in-flight work; later completions are discarded
    pub fn teardown(&mut self) {
        self.controller.close();
        self.dispatcher.cancel_all();
        tracing::debug!("[NAV] capture screen torn down");
    }
}

/// Everything the event loop owns between events
pub struct Session {
    pub navigator: Navigator,
    pub onboarding: OnboardingFlow,
    pub capture: Option<CaptureScreen>,
    pub status: FlowStatus,
}

impl Session {
    pub async fn start(ctx: &FlowContext) -> Self {
        let show_onboarding = ctx.state.onboarding_pending().await;
        let mut session = Self {
            navigator: Navigator::new(show_onboarding),
            onboarding: OnboardingFlow::tutorial(),
            capture: None,
            status: FlowStatus::new(),
        };

        if session.navigator.current() == Screen::Capture {
            session.capture = Some(CaptureScreen::open(ctx).await);
        }

        session
    }

    /// Capture screen, unless it is not the one shown
    pub fn active_capture(&mut self) -> Option<&mut CaptureScreen> {
        if self.navigator.current() != Screen::Capture {
            return None;
        }
        self.capture.as_mut().filter(|screen| !screen.controller.is_closed())
    }

    /// Onboarding -> capture, replacing the onboarding screen
    pub async fn enter_capture(&mut self, ctx: &FlowContext) {
        if !self.navigator.finish_onboarding() {
            return;
        }
        if self.capture.is_none() {
            self.capture = Some(CaptureScreen::open(ctx).await);
        }
        self.show_current(ctx).await;
    }

    /// Draw whatever screen is on top
    pub async fn show_current(&self, ctx: &FlowContext) {
        match self.navigator.current() {
            Screen::Onboarding => {
                if let Some((index, step)) = self.onboarding.current() {
                    ctx.send_ui(AppEvent::ShowOnboardingStep {
                        index,
                        total: self.onboarding.len(),
                        step: *step,
                    })
                    .await;
                }
            }
            Screen::Capture => {
                if let Some(screen) = &self.capture {
                    ctx.send_ui(AppEvent::ShowCapture(screen.controller.snapshot()))
                        .await;
                }
            }
            Screen::Closed => {}
        }
    }

    pub fn close(&mut self) {
        if let Some(screen) = self.capture.as_mut() {
            screen.teardown();
        }
        self.navigator.close();
    }
}
