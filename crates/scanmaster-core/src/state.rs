use scanmaster_config::screen::ScreenConfig;
use scanmaster_types::{
    CapturedImage, Controls, DisplaySnapshot, Notice, RecognitionOutcome, RequestToken,
};

use crate::clipboard::TextClipboard;

/// Text area content. Never absent: either the placeholder or recognized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextContent {
    Placeholder,
    /// May be empty when the engine found no text
    Recognized(String),
}

#[derive(Debug, Clone)]
pub struct DisplayState {
    pub text: TextContent,
    pub source_image: Option<CapturedImage>,
}

impl DisplayState {
    pub fn initial() -> Self {
        Self {
            text: TextContent::Placeholder,
            source_image: None,
        }
    }

    pub fn is_initial(&self) -> bool {
        self.text == TextContent::Placeholder && self.source_image.is_none()
    }
}

/// Image handed to the recognizer, tagged with the token its completion must carry
#[derive(Debug, Clone)]
pub struct RecognitionRequest {
    pub token: RequestToken,
    pub image: CapturedImage,
}

/// What happened to a recognition completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Updated,
    Failed(Notice),
    /// A newer request was issued after this one
    Stale,
    /// The screen was torn down
    Discarded,
}

/// Owns the capture screen's display state and its transitions
pub struct PresentationController {
    state: DisplayState,
    placeholder: String,
    screen: ScreenConfig,
    last_issued: RequestToken,
    awaiting: Option<RequestToken>,
    closed: bool,
}

impl PresentationController {
    pub fn new(placeholder: impl Into<String>, screen: ScreenConfig) -> Self {
        Self {
            state: DisplayState::initial(),
            placeholder: placeholder.into(),
            screen,
            last_issued: RequestToken::default(),
            awaiting: None,
            closed: false,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn controls(&self) -> Controls {
        self.screen.controls()
    }

    /// Text currently shown, resolving the placeholder
    pub fn displayed_text(&self) -> &str {
        match &self.state.text {
            TextContent::Placeholder => &self.placeholder,
            TextContent::Recognized(text) => text,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            text: self.displayed_text().to_string(),
            is_placeholder: self.state.text == TextContent::Placeholder,
            image: self.state.source_image.as_ref().map(CapturedImage::summary),
            controls: self.controls(),
            pending: self.is_pending(),
        }
    }

    /// Issue the token for a new capture action. Earlier captures and recognitions become stale
    pub fn on_capture_started(&mut self) -> Option<RequestToken> {
        if self.closed {
            tracing::debug!("[CAPTURE] capture requested after teardown");
            return None;
        }

        let token = self.last_issued.next();
        self.last_issued = token;
        self.awaiting = Some(token);

        tracing::debug!("[CAPTURE] started {}", token);
        Some(token)
    }

    /// Accept the image of the latest capture and hand it on for recognition under the same token
    pub fn on_image_ready(
        &mut self,
        token: RequestToken,
        image: CapturedImage,
    ) -> Option<RecognitionRequest> {
        if self.closed {
            tracing::debug!("[CAPTURE] image arrived after teardown, dropping");
            return None;
        }

        if token != self.last_issued {
            tracing::debug!(
                "[CAPTURE] dropping image of superseded capture {} (latest {})",
                token,
                self.last_issued
            );
            return None;
        }

        if self.screen.show_image {
            self.state.source_image = Some(image.clone());
        }

        tracing::debug!(
            "[RECOGNIZE] {} recognizing {}x{} image",
            token,
            image.image.width(),
            image.image.height()
        );

        Some(RecognitionRequest { token, image })
    }

    /// Latest capture produced no image. Returns false when the capture was superseded
    pub fn on_capture_failed(&mut self, token: RequestToken) -> bool {
        if self.closed || token != self.last_issued {
            tracing::debug!("[CAPTURE] ignoring failure of superseded capture {}", token);
            return false;
        }

        self.awaiting = None;
        true
    }

    pub fn on_recognition_complete(
        &mut self,
        token: RequestToken,
        outcome: RecognitionOutcome,
    ) -> Completion {
        if self.closed {
            tracing::debug!("[RECOGNIZE] {} completed after teardown", token);
            return Completion::Discarded;
        }

        if token != self.last_issued {
            tracing::debug!(
                "[RECOGNIZE] discarding stale {} (latest {})",
                token,
                self.last_issued
            );
            return Completion::Stale;
        }

        self.awaiting = None;

        match outcome {
            RecognitionOutcome::Recognized(text) => {
                tracing::debug!("[RECOGNIZE] {} got {} chars", token, text.len());
                self.state.text = TextContent::Recognized(text);
                Completion::Updated
            }
            RecognitionOutcome::Failed(e) => {
                tracing::warn!("[RECOGNIZE] {} failed: {}", token, e);
                Completion::Failed(Notice::RecognitionFailed)
            }
        }
    }

    /// Back to the initial state. Work still in flight can no longer update the screen
    pub fn on_erase(&mut self) {
        self.state = DisplayState::initial();
        self.last_issued = self.last_issued.next();
        self.awaiting = None;
    }

    pub fn on_copy_requested(&self, clipboard: &mut dyn TextClipboard, label: &str) -> Notice {
        let text = match &self.state.text {
            TextContent::Recognized(text) if !text.is_empty() => text,
            _ => return Notice::NothingToCopy,
        };

        match clipboard.set_text(label, text) {
            Ok(()) => Notice::Copied,
            Err(e) => {
                tracing::error!("Clipboard write failed: {}", e);
                Notice::ClipboardUnavailable
            }
        }
    }

    /// Tear down: every completion arriving afterwards is discarded
    pub fn close(&mut self) {
        self.closed = true;
        self.awaiting = None;
    }
}
