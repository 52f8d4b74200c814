use std::process::Stdio;

use scanmaster_config::camera::CameraConfig;
use scanmaster_types::CaptureError;
use tokio::process::Command;

/// Platform photo capture
#[async_trait::async_trait]
pub trait Camera: Send + Sync {
    /// Encoded image bytes of one photo, or `NoImageCaptured`
    async fn capture(&self) -> Result<Vec<u8>, CaptureError>;
}

/// Captures by running an external command that writes the photo to stdout
pub struct CommandCamera {
    config: CameraConfig,
}

impl CommandCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl Camera for CommandCamera {
    async fn capture(&self) -> Result<Vec<u8>, CaptureError> {
        tracing::debug!(
            "[CAPTURE] running {} {:?}",
            self.config.program,
            self.config.args
        );

        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                tracing::warn!("[CAPTURE] camera command unavailable: {}", e);
                CaptureError::NoImageCaptured
            })?;

        if !output.status.success() {
            tracing::warn!(
                "[CAPTURE] camera command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(CaptureError::NoImageCaptured);
        }

        if output.stdout.is_empty() {
            return Err(CaptureError::NoImageCaptured);
        }

        tracing::debug!("[CAPTURE] camera returned {} bytes", output.stdout.len());
        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn camera(program: &str, args: &[&str]) -> CommandCamera {
        CommandCamera::new(CameraConfig {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        })
    }

    #[tokio::test]
    async fn test_missing_program_is_no_image() {
        let result = camera("scanmaster-no-such-camera", &[]).capture().await;
        assert_eq!(result, Err(CaptureError::NoImageCaptured));
    }

    #[tokio::test]
    async fn test_failed_command_is_no_image() {
        let result = camera("sh", &["-c", "exit 3"]).capture().await;
        assert_eq!(result, Err(CaptureError::NoImageCaptured));
    }

    #[tokio::test]
    async fn test_empty_output_is_no_image() {
        let result = camera("sh", &["-c", "true"]).capture().await;
        assert_eq!(result, Err(CaptureError::NoImageCaptured));
    }

    #[tokio::test]
    async fn test_stdout_bytes_are_returned() {
        let result = camera("sh", &["-c", "printf abc"]).capture().await;
        assert_eq!(result, Ok(b"abc".to_vec()));
    }
}
