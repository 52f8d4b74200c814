use scanmaster_types::{Controls, DisplaySnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiScreen {
    Starting,
    Onboarding,
    Capture,
}

/// UI-specific state (separate from the app's display state)
pub struct UiState {
    pub screen: UiScreen,
    pub last_snapshot: Option<DisplaySnapshot>,
    pub on_last_step: bool,
    pub notices_shown: usize,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            screen: UiScreen::Starting,
            last_snapshot: None,
            on_last_step: false,
            notices_shown: 0,
        }
    }

    pub fn controls(&self) -> Option<Controls> {
        self.last_snapshot.as_ref().map(|s| s.controls)
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
