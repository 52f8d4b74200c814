use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use image::DynamicImage;
use kanal::AsyncSender;
use scanmaster_types::{AppEvent, RecognitionError, RecognitionOutcome};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::state::RecognitionRequest;

/// Rotation hint passed along with the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Upright,
    Clockwise90,
    Rotated180,
    Clockwise270,
}

impl Orientation {
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees % 360 {
            0 => Some(Orientation::Upright),
            90 => Some(Orientation::Clockwise90),
            180 => Some(Orientation::Rotated180),
            270 => Some(Orientation::Clockwise270),
            _ => None,
        }
    }

    /// Image turned upright for the engine
    pub fn apply<'a>(&self, image: &'a DynamicImage) -> Cow<'a, DynamicImage> {
        match self {
            Orientation::Upright => Cow::Borrowed(image),
            Orientation::Clockwise90 => Cow::Owned(image.rotate270()),
            Orientation::Rotated180 => Cow::Owned(image.rotate180()),
            Orientation::Clockwise270 => Cow::Owned(image.rotate90()),
        }
    }
}

/// Text recognition engine interface
#[async_trait::async_trait]
pub trait Recognizer: Send + Sync {
    /// Engine name for logs
    fn name(&self) -> &str;

    /// Recognize the full text of an image as a single string
    async fn recognize(
        &self,
        image: Arc<DynamicImage>,
        orientation: Orientation,
    ) -> Result<String, RecognitionError>;
}

/// Runs recognition requests off the event loop and posts completions back into it
pub struct RecognitionDispatcher {
    recognizer: Arc<dyn Recognizer>,
    timeout: Duration,
    orientation: Orientation,
    cancel: CancellationToken,
}

impl RecognitionDispatcher {
    pub fn new(
        recognizer: Arc<dyn Recognizer>,
        timeout: Duration,
        orientation: Orientation,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            recognizer,
            timeout,
            orientation,
            cancel,
        }
    }

    /// Spawn one recognition. The completion is sent as `AppEvent::RecognitionComplete`
    /// unless the dispatcher is cancelled first.
    pub fn dispatch(
        &self,
        request: RecognitionRequest,
        completion_tx: AsyncSender<AppEvent>,
    ) -> JoinHandle<()> {
        let recognizer = self.recognizer.clone();
        let timeout = self.timeout;
        let orientation = self.orientation;
        let cancel = self.cancel.clone();
        let RecognitionRequest { token, image } = request;

        tokio::spawn(async move {
            tracing::debug!("[RECOGNIZE] {} dispatched to {}", token, recognizer.name());

            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("[RECOGNIZE] {} cancelled", token);
                    return;
                }
                result = tokio::time::timeout(timeout, recognizer.recognize(image.image, orientation)) => {
                    match result {
                        Ok(Ok(text)) => RecognitionOutcome::Recognized(text),
                        Ok(Err(e)) => RecognitionOutcome::Failed(e),
                        Err(_) => RecognitionOutcome::Failed(RecognitionError::Timeout(timeout)),
                    }
                }
            };

            if let Err(e) = completion_tx
                .send(AppEvent::RecognitionComplete { token, outcome })
                .await
            {
                tracing::warn!("[RECOGNIZE] {} completion dropped: {}", token, e);
            }
        })
    }

    /// Cancel every in-flight recognition
    pub fn cancel_all(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use scanmaster_types::{CapturedImage, ImageOrigin, RequestToken};

    use super::*;

    struct SlowRecognizer {
        delay: Duration,
        text: &'static str,
    }

    #[async_trait::async_trait]
    impl Recognizer for SlowRecognizer {
        fn name(&self) -> &str {
            "slow"
        }

        async fn recognize(
            &self,
            _image: Arc<DynamicImage>,
            _orientation: Orientation,
        ) -> Result<String, RecognitionError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.text.to_string())
        }
    }

    fn request(token: u64) -> RecognitionRequest {
        RecognitionRequest {
            token: RequestToken(token),
            image: CapturedImage::new(DynamicImage::new_luma8(2, 2), ImageOrigin::Camera),
        }
    }

    fn dispatcher(delay: Duration, timeout: Duration) -> RecognitionDispatcher {
        RecognitionDispatcher::new(
            Arc::new(SlowRecognizer { delay, text: "STOP" }),
            timeout,
            Orientation::Upright,
            CancellationToken::new(),
        )
    }

    #[test]
    fn test_orientation_from_degrees() {
        assert_eq!(Orientation::from_degrees(0), Some(Orientation::Upright));
        assert_eq!(Orientation::from_degrees(450), Some(Orientation::Clockwise90));
        assert_eq!(Orientation::from_degrees(45), None);
    }

    #[test]
    fn test_orientation_apply_swaps_dimensions() {
        let image = DynamicImage::new_rgb8(4, 2);
        assert!(matches!(Orientation::Upright.apply(&image), Cow::Borrowed(_)));
        let turned = Orientation::Clockwise90.apply(&image);
        assert_eq!((turned.width(), turned.height()), (2, 4));
    }

    #[tokio::test]
    async fn test_dispatch_posts_completion() {
        let (tx, rx) = kanal::unbounded_async();
        let d = dispatcher(Duration::from_millis(5), Duration::from_secs(1));

        d.dispatch(request(7), tx.clone()).await.unwrap();

        match rx.recv().await.unwrap() {
            AppEvent::RecognitionComplete {
                token,
                outcome: RecognitionOutcome::Recognized(text),
            } => {
                assert_eq!(token, RequestToken(7));
                assert_eq!(text, "STOP");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_times_out() {
        let (tx, rx) = kanal::unbounded_async();
        let d = dispatcher(Duration::from_secs(5), Duration::from_millis(10));

        d.dispatch(request(1), tx.clone()).await.unwrap();

        match rx.recv().await.unwrap() {
            AppEvent::RecognitionComplete {
                outcome: RecognitionOutcome::Failed(RecognitionError::Timeout(t)),
                ..
            } => assert_eq!(t, Duration::from_millis(10)),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_dispatch_sends_nothing() {
        let (tx, rx) = kanal::unbounded_async();
        let d = dispatcher(Duration::from_secs(5), Duration::from_secs(10));

        let handle = d.dispatch(request(1), tx.clone());
        d.cancel_all();
        handle.await.unwrap();

        assert!(d.is_cancelled());
        assert!(rx.try_recv().unwrap().is_none());
    }
}
