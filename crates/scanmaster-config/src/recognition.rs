use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_engine_path() -> String {
    "tesseract".to_string()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_timeout_ms() -> u64 {
    15_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Path or name of the tesseract executable
    #[serde(default = "default_engine_path")]
    pub engine_path: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Clockwise rotation hint in degrees
    #[serde(default)]
    pub orientation: u16,
}

impl RecognitionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            engine_path: default_engine_path(),
            language: default_language(),
            timeout_ms: default_timeout_ms(),
            orientation: 0,
        }
    }
}
