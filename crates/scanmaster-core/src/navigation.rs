#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    Capture,
    Closed,
}

/// Application shell navigation: a back stack of screens
///
/// Finishing onboarding replaces it with the capture screen, so it can never be
/// reached again by going back.
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new(show_onboarding: bool) -> Self {
        let first = if show_onboarding {
            Screen::Onboarding
        } else {
            Screen::Capture
        };
        Self { stack: vec![first] }
    }

    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::Closed)
    }

    /// Onboarding -> Capture. Returns false from any other screen
    pub fn finish_onboarding(&mut self) -> bool {
        if self.current() != Screen::Onboarding {
            return false;
        }
        self.stack.pop();
        self.stack.push(Screen::Capture);
        tracing::info!("[NAV] onboarding replaced by capture screen");
        true
    }

    /// Pop the current screen and return the one now shown
    pub fn back(&mut self) -> Screen {
        self.stack.pop();
        let current = self.current();
        tracing::debug!("[NAV] back -> {:?}", current);
        current
    }

    pub fn close(&mut self) {
        self.stack.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.current() == Screen::Closed
    }
}
