use std::sync::Arc;

use image::DynamicImage;
use scanmaster_types::{CaptureError, CapturedImage, ContentRef, ImageOrigin};

use crate::camera::Camera;

/// Decode encoded image bytes (PNG, JPEG, ...) into memory
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, CaptureError> {
    let format = image::guess_format(bytes)
        .map_err(|_| CaptureError::UnsupportedContent("not an image".to_string()))?;

    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| CaptureError::DecodeError(e.to_string()))
}

async fn decode_blocking(bytes: Arc<Vec<u8>>) -> Result<DynamicImage, CaptureError> {
    tokio::task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(|e| CaptureError::DecodeError(format!("decoder task failed: {e}")))?
}

/// Obtains decoded images from the camera or from gallery content
pub struct ImageSource {
    camera: Arc<dyn Camera>,
}

impl ImageSource {
    pub fn new(camera: Arc<dyn Camera>) -> Self {
        Self { camera }
    }

    /// One photo from the camera. Missing or unreadable data is `NoImageCaptured`
    pub async fn capture_from_camera(&self) -> Result<CapturedImage, CaptureError> {
        let bytes = self.camera.capture().await?;

        let image = decode_blocking(Arc::new(bytes)).await.map_err(|e| {
            tracing::warn!("[CAPTURE] camera data unreadable: {}", e);
            CaptureError::NoImageCaptured
        })?;

        Ok(CapturedImage::new(image, ImageOrigin::Camera))
    }

    /// Decode user-selected content. Never panics; every failure is a `CaptureError`
    pub async fn pick_from_gallery(
        &self,
        reference: &ContentRef,
    ) -> Result<CapturedImage, CaptureError> {
        let bytes = match reference {
            ContentRef::Path(path) => Arc::new(
                tokio::fs::read(path)
                    .await
                    .map_err(|e| CaptureError::DecodeError(format!("{}: {e}", path.display())))?,
            ),
            ContentRef::Bytes { data, .. } => data.clone(),
        };

        tracing::debug!(
            "[CAPTURE] decoding {} ({} bytes)",
            reference.name(),
            bytes.len()
        );

        let image = decode_blocking(bytes).await?;
        Ok(CapturedImage::new(image, ImageOrigin::Gallery))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    struct FixedCamera(Result<Vec<u8>, CaptureError>);

    #[async_trait::async_trait]
    impl Camera for FixedCamera {
        async fn capture(&self) -> Result<Vec<u8>, CaptureError> {
            self.0.clone()
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::new_rgb8(width, height)
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn source(camera: Result<Vec<u8>, CaptureError>) -> ImageSource {
        ImageSource::new(Arc::new(FixedCamera(camera)))
    }

    #[test]
    fn test_decode_rejects_non_image() {
        assert!(matches!(
            decode_image(b"hello world"),
            Err(CaptureError::UnsupportedContent(_))
        ));
    }

    #[test]
    fn test_decode_truncated_png() {
        let mut bytes = png_bytes(8, 8);
        bytes.truncate(20);
        assert!(matches!(
            decode_image(&bytes),
            Err(CaptureError::DecodeError(_))
        ));
    }

    #[tokio::test]
    async fn test_camera_image() {
        let image = source(Ok(png_bytes(3, 5)))
            .capture_from_camera()
            .await
            .unwrap();
        assert_eq!(image.origin, ImageOrigin::Camera);
        assert_eq!((image.image.width(), image.image.height()), (3, 5));
    }

    #[tokio::test]
    async fn test_camera_garbage_is_no_image() {
        let result = source(Ok(b"garbage".to_vec())).capture_from_camera().await;
        assert!(matches!(result, Err(CaptureError::NoImageCaptured)));

        let result = source(Err(CaptureError::NoImageCaptured))
            .capture_from_camera()
            .await;
        assert!(matches!(result, Err(CaptureError::NoImageCaptured)));
    }

    #[tokio::test]
    async fn test_gallery_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sign.png");
        std::fs::write(&path, png_bytes(6, 4)).unwrap();

        let image = source(Err(CaptureError::NoImageCaptured))
            .pick_from_gallery(&ContentRef::Path(path))
            .await
            .unwrap();
        assert_eq!(image.origin, ImageOrigin::Gallery);
        assert_eq!(image.image.width(), 6);
    }

    #[tokio::test]
    async fn test_gallery_missing_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = source(Err(CaptureError::NoImageCaptured))
            .pick_from_gallery(&ContentRef::Path(dir.path().join("missing.png")))
            .await;
        assert!(matches!(result, Err(CaptureError::DecodeError(_))));
    }

    #[tokio::test]
    async fn test_gallery_bytes_not_an_image() {
        let reference = ContentRef::Bytes {
            name: "notes.txt".into(),
            data: Arc::new(b"just text".to_vec()),
        };
        let result = source(Err(CaptureError::NoImageCaptured))
            .pick_from_gallery(&reference)
            .await;
        assert!(matches!(result, Err(CaptureError::UnsupportedContent(_))));
    }
}
