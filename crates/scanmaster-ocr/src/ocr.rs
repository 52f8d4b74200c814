use std::io::Cursor;
use std::process::Stdio;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat};
use scanmaster_config::recognition::RecognitionConfig;
use scanmaster_core::recognition::{Orientation, Recognizer};
use scanmaster_types::RecognitionError;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Encode an image as PNG bytes
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, RecognitionError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| RecognitionError::Engine(format!("Failed to encode PNG: {e}")))?;
    Ok(buffer.into_inner())
}

/// Tesseract OCR driven through its command line interface
pub struct TesseractEngine {
    engine_path: String,
    language: String,
}

impl TesseractEngine {
    /// Create an engine for the given tesseract language (e.g. "eng", "deu")
    pub fn new(engine_path: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            engine_path: engine_path.into(),
            language: language.into(),
        }
    }

    pub fn from_config(config: &RecognitionConfig) -> Self {
        Self::new(&config.engine_path, &config.language)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Check the executable runs; returns its version line
    pub async fn probe(&self) -> Result<String, RecognitionError> {
        let output = Command::new(&self.engine_path)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| RecognitionError::Engine(format!("{}: {e}", self.engine_path)))?;

        // Older releases print the version to stderr
        let text = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };

        Ok(String::from_utf8_lossy(&text)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    async fn run(&self, png: Vec<u8>) -> Result<String, RecognitionError> {
        let mut child = Command::new(&self.engine_path)
            .args(["stdin", "stdout", "-l", self.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                RecognitionError::Engine(format!("Failed to start {}: {e}", self.engine_path))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RecognitionError::Engine("stdin not captured".to_string()))?;

        // Feed stdin concurrently so a full stdout pipe cannot stall the child
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&png).await;
            drop(stdin);
            result
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| RecognitionError::Engine(format!("Failed to read output: {e}")))?;

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("tesseract stdin closed early: {}", e),
            Err(e) => tracing::debug!("stdin writer task failed: {}", e),
        }

        if !output.status.success() {
            return Err(RecognitionError::Engine(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(normalize_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Strip trailing whitespace and the page-break form feed tesseract appends
fn normalize_output(raw: &str) -> String {
    raw.trim_end().to_string()
}

#[async_trait::async_trait]
impl Recognizer for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    async fn recognize(
        &self,
        image: Arc<DynamicImage>,
        orientation: Orientation,
    ) -> Result<String, RecognitionError> {
        let png = tokio::task::spawn_blocking(move || encode_png(&orientation.apply(&image)))
            .await
            .map_err(|e| RecognitionError::Engine(format!("Encoder task failed: {e}")))??;

        tracing::debug!(
            "[OCR] sending {} bytes to tesseract ({})",
            png.len(),
            self.language
        );

        self.run(png).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&DynamicImage::new_rgb8(2, 2)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_normalize_output() {
        assert_eq!(normalize_output("STOP\n\u{c}"), "STOP");
        assert_eq!(normalize_output("  a\nb \n"), "  a\nb");
        assert_eq!(normalize_output("\u{c}"), "");
    }

    #[tokio::test]
    async fn test_missing_engine_is_engine_error() {
        let engine = TesseractEngine::new("scanmaster-no-such-tesseract", "eng");
        let result = engine
            .recognize(Arc::new(DynamicImage::new_rgb8(2, 2)), Orientation::Upright)
            .await;
        assert!(matches!(result, Err(RecognitionError::Engine(_))));
        assert!(engine.probe().await.is_err());
    }
}
