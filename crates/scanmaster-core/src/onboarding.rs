use scanmaster_types::OnboardingStep;

const SUMMARY: &str =
    "I am using ML Kit to recognize text in images or video, such as the text of a street sign.";
const BODY: &str = "Recognize text in images with ML Kit on Android";

/// First-run tutorial pages, in display order
pub const TUTORIAL_STEPS: [OnboardingStep; 3] = [
    OnboardingStep {
        title: "Text Recognition from Images Using ML",
        body: BODY,
        summary: SUMMARY,
        illustration: "scan_document",
        accent: "#1A237E",
    },
    OnboardingStep {
        title: "Easily copy and utilize extracted text",
        body: BODY,
        summary: SUMMARY,
        illustration: "copy_text",
        accent: "#1E3A5F",
    },
    OnboardingStep {
        title: "This is header",
        body: BODY,
        summary: SUMMARY,
        illustration: "scan_document",
        accent: "#264653",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingState {
    Step(usize),
    Finished,
}

/// Linear walk over a fixed sequence of tutorial steps
pub struct OnboardingFlow {
    steps: &'static [OnboardingStep],
    state: OnboardingState,
}

impl OnboardingFlow {
    pub fn new(steps: &'static [OnboardingStep]) -> Self {
        let state = if steps.is_empty() {
            OnboardingState::Finished
        } else {
            OnboardingState::Step(0)
        };
        Self { steps, state }
    }

    pub fn tutorial() -> Self {
        Self::new(&TUTORIAL_STEPS)
    }

    pub fn state(&self) -> OnboardingState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.state == OnboardingState::Finished
    }

    pub fn is_last(&self) -> bool {
        matches!(self.state, OnboardingState::Step(i) if i + 1 == self.steps.len())
    }

    /// Current step with its index
    pub fn current(&self) -> Option<(usize, &'static OnboardingStep)> {
        match self.state {
            OnboardingState::Step(i) => self.steps.get(i).map(|step| (i, step)),
            OnboardingState::Finished => None,
        }
    }

    /// Advance one step. Returns false on the last step or once finished
    pub fn next(&mut self) -> bool {
        match self.state {
            OnboardingState::Step(i) if i + 1 < self.steps.len() => {
                self.move_to(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Go back one step. Returns false on the first step or once finished
    pub fn back(&mut self) -> bool {
        match self.state {
            OnboardingState::Step(i) if i > 0 => {
                self.move_to(i - 1);
                true
            }
            _ => false,
        }
    }

    /// Enter the terminal state. Only the first call returns true
    pub fn finish(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        tracing::info!("[ONBOARDING] finished");
        self.state = OnboardingState::Finished;
        true
    }

    fn move_to(&mut self, position: usize) {
        tracing::debug!("[ONBOARDING] current position: {}", position);
        self.state = OnboardingState::Step(position);
    }
}
