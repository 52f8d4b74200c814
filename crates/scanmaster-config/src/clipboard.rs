use serde::{Deserialize, Serialize};

fn default_label() -> String {
    "Detected Text".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Label the copied text is placed under
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
        }
    }
}
