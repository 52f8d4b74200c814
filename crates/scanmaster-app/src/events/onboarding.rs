use scanmaster_core::navigation::Screen;
use scanmaster_types::OnboardingAction;

use crate::flow_context::FlowContext;
use crate::session::Session;

pub async fn handle_onboarding(
    ctx: &FlowContext,
    session: &mut Session,
    action: OnboardingAction,
) -> anyhow::Result<()> {
    if session.navigator.current() != Screen::Onboarding {
        tracing::debug!("[ONBOARDING] {:?} ignored outside the tutorial", action);
        return Ok(());
    }

    match action {
        OnboardingAction::Next => {
            if session.onboarding.is_last() {
                tracing::debug!("[ONBOARDING] already on the last step");
            } else if session.onboarding.next() {
                session.show_current(ctx).await;
            }
        }
        OnboardingAction::Finish => {
            if !session.onboarding.finish() {
                return Ok(());
            }
            persist_completed(ctx).await;
            session.enter_capture(ctx).await;
        }
    }

    Ok(())
}

/// Previous tutorial step, or leave the capture screen. Returns false once the app closes
pub async fn handle_back(ctx: &FlowContext, session: &mut Session) -> bool {
    match session.navigator.current() {
        Screen::Onboarding => {
            if session.onboarding.back() {
                session.show_current(ctx).await;
            } else {
                tracing::debug!("[ONBOARDING] already on the first step");
            }
            true
        }
        Screen::Capture => {
            // Onboarding was replaced, so nothing is underneath
            let now = session.navigator.back();
            tracing::info!("[NAV] back from capture -> {:?}", now);
            !session.navigator.is_closed()
        }
        Screen::Closed => false,
    }
}

async fn persist_completed(ctx: &FlowContext) {
    let Some(profile) = ctx.state.profile.clone() else {
        return;
    };

    let result =
        tokio::task::spawn_blocking(move || profile.set_onboarding_completed(true)).await;

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("[ONBOARDING] could not save progress: {:#}", e),
        Err(e) => tracing::error!("[ONBOARDING] save task failed: {}", e),
    }
}
