//! Scenario tests driving the event loop over kanal channels


use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::DynamicImage;
use kanal::{AsyncReceiver, AsyncSender};
use scanmaster_config::Config;
use scanmaster_config::screen::{ScreenConfig, ScreenVariant};
use scanmaster_core::clipboard::TextClipboard;
use scanmaster_core::error::ClipboardError;
use scanmaster_core::recognition::{Orientation, Recognizer};
use scanmaster_io::Camera;
use scanmaster_types::{AppEvent, CaptureError, ContentRef, DisplaySnapshot, RecognitionError};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::profile::ProfileStore;
use crate::state::AppState;

const WAIT: Duration = Duration::from_secs(3);

/// Answers by image width: (delay, result)
#[derive(Default)]
struct ScriptedRecognizer {
    scripts: HashMap<u32, (Duration, Result<String, RecognitionError>)>,
}

impl ScriptedRecognizer {
    fn with(mut self, width: u32, delay_ms: u64, result: Result<&str, RecognitionError>) -> Self {
        self.scripts.insert(
            width,
            (Duration::from_millis(delay_ms), result.map(str::to_string)),
        );
        self
    }
}

#[async_trait::async_trait]
impl Recognizer for ScriptedRecognizer {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn recognize(
        &self,
        image: Arc<DynamicImage>,
        _orientation: Orientation,
    ) -> Result<String, RecognitionError> {
        let (delay, result) = self
            .scripts
            .get(&image.width())
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(String::new())));
        tokio::time::sleep(delay).await;
        result
    }
}

/// Hands out queued photos, then reports no image
#[derive(Default)]
struct QueuedCamera {
    shots: Mutex<Vec<Result<Vec<u8>, CaptureError>>>,
    delay: Duration,
}

impl QueuedCamera {
    fn with_shot(self, shot: Result<Vec<u8>, CaptureError>) -> Self {
        self.shots.lock().unwrap().insert(0, shot);
        self
    }

    fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }
}

#[async_trait::async_trait]
impl Camera for QueuedCamera {
    async fn capture(&self) -> Result<Vec<u8>, CaptureError> {
        tokio::time::sleep(self.delay).await;
        self.shots
            .lock()
            .unwrap()
            .pop()
            .unwrap_or(Err(CaptureError::NoImageCaptured))
    }
}

#[derive(Clone, Default)]
struct RecordingClipboard {
    writes: Arc<Mutex<Vec<(String, String)>>>,
}

impl TextClipboard for RecordingClipboard {
    fn set_text(&mut self, label: &str, text: &str) -> Result<(), ClipboardError> {
        self.writes
            .lock()
            .unwrap()
            .push((label.to_string(), text.to_string()));
        Ok(())
    }
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::new_rgb8(width, height)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

/// Gallery pick of a blank image whose width selects the recognizer script
fn gallery_image(width: u32) -> AppEvent {
    AppEvent::PickFromGallery(ContentRef::Bytes {
        name: format!("photo-{width}.png"),
        data: Arc::new(png_bytes(width, 8)),
    })
}

fn capture_config(variant: ScreenVariant) -> Config {
    let mut config = Config::default();
    config.onboarding.enabled = false;
    config.screen = ScreenConfig::for_variant(variant);
    config
}

struct Harness {
    to_app: AsyncSender<AppEvent>,
    from_app: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
    clipboard: Arc<Mutex<Vec<(String, String)>>>,
}

impl Harness {
    fn start(
        config: Config,
        recognizer: ScriptedRecognizer,
        camera: QueuedCamera,
        profile: Option<ProfileStore>,
    ) -> Self {
        let (to_app, app_rx) = kanal::unbounded_async();
        let (ui_tx, from_app) = kanal::unbounded_async();
        let clipboard = RecordingClipboard::default();
        let writes = clipboard.writes.clone();

        let state = Arc::new(AppState::new(
            config,
            Arc::new(recognizer),
            Arc::new(camera),
            Box::new(clipboard),
            profile,
        ));
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(event_loop(
            state,
            app_rx,
            to_app.clone(),
            ui_tx,
            cancel.clone(),
        ));

        Self {
            to_app,
            from_app,
            cancel,
            handle,
            clipboard: writes,
        }
    }

    async fn send(&self, event: AppEvent) {
        self.to_app.send(event).await.unwrap();
    }

    async fn next(&self) -> AppEvent {
        timeout(WAIT, self.from_app.recv())
            .await
            .expect("timed out waiting for the app")
            .expect("app channel closed")
    }

    /// Next capture snapshot, skipping nothing else
    async fn next_capture(&self) -> DisplaySnapshot {
        match self.next().await {
            AppEvent::ShowCapture(snapshot) => snapshot,
            other => panic!("expected ShowCapture, got {other:?}"),
        }
    }

    /// Skip events until one matches
    async fn wait_for(&self, mut matches: impl FnMut(&AppEvent) -> bool) -> AppEvent {
        loop {
            let event = self.next().await;
            if matches(&event) {
                return event;
            }
        }
    }

    /// Nothing arrives for `window`
    async fn assert_quiet(&self, window: Duration) {
        if let Ok(Ok(event)) = timeout(window, self.from_app.recv()).await {
            panic!("unexpected event {event:?}");
        }
    }

    async fn finished(self) -> anyhow::Result<()> {
        timeout(WAIT, self.handle)
            .await
            .expect("event loop did not stop")
            .expect("event loop panicked")
    }
}
