use std::env;

use serde::{Deserialize, Serialize};

use self::camera::CameraConfig;
use self::clipboard::ClipboardConfig;
use self::onboarding::OnboardingConfig;
use self::recognition::RecognitionConfig;
use self::screen::{ScreenConfig, ScreenVariant};

pub mod camera;
pub mod clipboard;
pub mod onboarding;
pub mod recognition;
pub mod screen;

fn default_placeholder_text() -> String {
    "Captured text content will be displayed here".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen: ScreenConfig,
    pub recognition: RecognitionConfig,
    pub camera: CameraConfig,
    pub clipboard: ClipboardConfig,
    pub onboarding: OnboardingConfig,

    /// Text shown while nothing has been recognized yet
    pub placeholder_text: String,
    /// Capacity of the app -> UI channel
    pub app_to_ui_capacity: usize,
    /// Capacity of the UI -> app channel
    pub ui_to_app_capacity: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Override fields from `SCANMASTER_*` environment variables
    pub fn apply_env(&mut self) {
        if let Ok(path) = env::var("SCANMASTER_TESSERACT") {
            self.recognition.engine_path = path;
        }

        if let Ok(lang) = env::var("SCANMASTER_LANG") {
            self.recognition.language = lang;
        }

        if let Some(timeout_ms) = env::var("SCANMASTER_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.recognition.timeout_ms = timeout_ms;
        }

        if let Ok(cmd) = env::var("SCANMASTER_CAMERA_CMD") {
            self.camera = CameraConfig::from_command_line(&cmd);
        }

        if let Some(variant) = env::var("SCANMASTER_VARIANT")
            .ok()
            .and_then(|v| v.parse::<ScreenVariant>().ok())
        {
            self.screen = ScreenConfig::for_variant(variant);
        }
    }

    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            screen: ScreenConfig::default(),
            recognition: RecognitionConfig::default(),
            camera: CameraConfig::default(),
            clipboard: ClipboardConfig::default(),
            onboarding: OnboardingConfig::default(),

            placeholder_text: default_placeholder_text(),
            app_to_ui_capacity: 256,
            ui_to_app_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = Config::from_json(r#"{ "recognition": { "language": "deu" } }"#).unwrap();
        assert_eq!(config.recognition.language, "deu");
        assert_eq!(config.recognition.engine_path, "tesseract");
        assert_eq!(config.placeholder_text, default_placeholder_text());
        assert_eq!(config.clipboard.label, "Detected Text");
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.screen, ScreenConfig::default());
        assert!(config.onboarding.enabled);
        assert_eq!(config.app_to_ui_capacity, 256);
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = Config::from_json(include_str!("../../../config.json")).unwrap();
        let defaults = Config::default();
        assert_eq!(config.screen, defaults.screen);
        assert_eq!(config.camera, defaults.camera);
        assert_eq!(config.recognition.timeout_ms, defaults.recognition.timeout_ms);
        assert_eq!(config.placeholder_text, defaults.placeholder_text);
    }
}
