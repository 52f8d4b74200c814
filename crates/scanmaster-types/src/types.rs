use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI -> app
    CaptureFromCamera,
    PickFromGallery(ContentRef),
    CopyRequested,
    Erase,
    Onboarding(OnboardingAction),
    /// Previous onboarding step, or leave the current screen
    Back,
    Close,

    // Posted back into the event loop by spawned tasks
    /// Carry the token issued when the capture was requested
    ImageReady {
        token: RequestToken,
        image: CapturedImage,
    },
    CaptureFailed {
        token: RequestToken,
        error: CaptureError,
    },
    RecognitionComplete {
        token: RequestToken,
        outcome: RecognitionOutcome,
    },

    // App -> UI
    BackendReady,
    ShowOnboardingStep {
        index: usize,
        total: usize,
        step: OnboardingStep,
    },
    ShowCapture(DisplaySnapshot),
    Notice(Notice),
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingAction {
    Next,
    Finish,
}

/// Opaque reference to user-selected content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRef {
    Path(PathBuf),
    Bytes { name: String, data: Arc<Vec<u8>> },
}

impl ContentRef {
    pub fn name(&self) -> String {
        match self {
            ContentRef::Path(path) => path.display().to_string(),
            ContentRef::Bytes { name, .. } => name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageOrigin {
    Camera,
    Gallery,
}

/// A decoded in-memory image plus where it came from
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub image: Arc<DynamicImage>,
    pub origin: ImageOrigin,
}

impl CapturedImage {
    pub fn new(image: DynamicImage, origin: ImageOrigin) -> Self {
        Self {
            image: Arc::new(image),
            origin,
        }
    }

    pub fn summary(&self) -> ImageSummary {
        ImageSummary {
            width: self.image.width(),
            height: self.image.height(),
            origin: self.origin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSummary {
    pub width: u32,
    pub height: u32,
    pub origin: ImageOrigin,
}

/// Which controls a capture screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub camera: bool,
    pub gallery: bool,
    pub copy: bool,
    pub erase: bool,
    pub image: bool,
}

/// What the rendering layer draws for the capture screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub text: String,
    pub is_placeholder: bool,
    pub image: Option<ImageSummary>,
    pub controls: Controls,
    pub pending: bool,
}

/// Monotonically increasing id attached to every recognition request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(pub u64);

impl RequestToken {
    pub fn next(self) -> Self {
        RequestToken(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum RecognitionOutcome {
    Recognized(String),
    Failed(RecognitionError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("no image captured")]
    NoImageCaptured,

    #[error("could not decode image: {0}")]
    DecodeError(String),

    #[error("unsupported content: {0}")]
    UnsupportedContent(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error("recognition engine error: {0}")]
    Engine(String),

    #[error("recognition timed out after {0:?}")]
    Timeout(Duration),
}

/// Transient, dismissible user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Copied,
    NothingToCopy,
    RecognitionFailed,
    NoImageCaptured,
    DecodeFailed,
    ClipboardUnavailable,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Copied => "Text copied to clipboard",
            Notice::NothingToCopy => "No text to copy",
            Notice::RecognitionFailed => "Text detection failed",
            Notice::NoImageCaptured => "No image captured",
            Notice::DecodeFailed => "Could not load image",
            Notice::ClipboardUnavailable => "Could not access clipboard",
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Copied | Notice::NothingToCopy)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&CaptureError> for Notice {
    fn from(err: &CaptureError) -> Self {
        match err {
            CaptureError::NoImageCaptured => Notice::NoImageCaptured,
            CaptureError::DecodeError(_) | CaptureError::UnsupportedContent(_) => {
                Notice::DecodeFailed
            }
        }
    }
}

/// One informational page of the first-run tutorial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingStep {
    pub title: &'static str,
    pub body: &'static str,
    pub summary: &'static str,
    pub illustration: &'static str,
    /// `#RRGGBB`
    pub accent: &'static str,
}

impl OnboardingStep {
    pub fn accent_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.accent.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}
