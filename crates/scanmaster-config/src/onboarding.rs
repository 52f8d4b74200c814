use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Show the tutorial on first run
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}
