use std::sync::{Arc, Mutex};

use scanmaster_config::Config;
use scanmaster_core::clipboard::TextClipboard;
use scanmaster_core::recognition::Recognizer;
use scanmaster_io::{Camera, ImageSource};
use tokio::sync::RwLock;

use crate::profile::ProfileStore;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub recognizer: Arc<dyn Recognizer>,
    pub image_source: Arc<ImageSource>,
    pub clipboard: Mutex<Box<dyn TextClipboard>>,
    /// Where the onboarding flag is persisted; `None` keeps it in memory only
    pub profile: Option<ProfileStore>,
}

impl AppState {
    pub fn new(
        config: Config,
        recognizer: Arc<dyn Recognizer>,
        camera: Arc<dyn Camera>,
        clipboard: Box<dyn TextClipboard>,
        profile: Option<ProfileStore>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            recognizer,
            image_source: Arc::new(ImageSource::new(camera)),
            clipboard: Mutex::new(clipboard),
            profile,
        }
    }

    /// Whether the tutorial still has to be shown
    pub async fn onboarding_pending(&self) -> bool {
        if !self.config.read().await.onboarding.enabled {
            return false;
        }

        match &self.profile {
            Some(profile) => match profile.onboarding_completed() {
                Ok(completed) => !completed,
                Err(e) => {
                    tracing::warn!("Could not read onboarding flag: {:#}", e);
                    true
                }
            },
            None => true,
        }
    }
}
