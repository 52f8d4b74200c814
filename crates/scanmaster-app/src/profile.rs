use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use scanmaster_config::Config;
use serde::{Deserialize, Serialize};

const REPO_DEFAULT_CONFIG: &str = "config.json";
const MAIN_PROFILE: &str = "main";

/// Load the default config shipped in the repo, or built-in defaults without it
fn load_repo_default_config() -> anyhow::Result<Config> {
    if !Path::new(REPO_DEFAULT_CONFIG).exists() {
        tracing::debug!("No {REPO_DEFAULT_CONFIG} in working dir, using built-in defaults");
        return Ok(Config::default());
    }

    tracing::info!("Loading repo default config...");
    let file = File::open(REPO_DEFAULT_CONFIG)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid {REPO_DEFAULT_CONFIG}"))?;
    Ok(config)
}

/// Load a config file given on the command line
pub fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Config::from_json(&data).with_context(|| format!("Invalid config {}", path.display()))
}

/// `<config dir>/ScanMaster`
pub fn scanmaster_root() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::config_dir().context("No user config directory on this platform")?;
    Ok(config_dir.join("ScanMaster"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// The first-run tutorial has been finished
    #[serde(default)]
    pub onboarding_completed: bool,
    pub value: Config,
}

/// Named profiles stored as JSON files in one directory
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profiles_dir: PathBuf,
    name: String,
}

impl ProfileStore {
    pub fn new(profiles_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
            name: name.into(),
        }
    }

    /// Store under the user's config directory
    pub fn user(name: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self::new(scanmaster_root()?.join("profiles"), name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn file_for(&self, name: &str) -> PathBuf {
        self.profiles_dir.join(format!("{name}.json"))
    }

    pub fn path(&self) -> PathBuf {
        self.file_for(&self.name)
    }

    /// Create the profiles folder and the main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.profiles_dir)
            .with_context(|| format!("Failed to create {}", self.profiles_dir.display()))?;

        let main_profile = self.file_for(MAIN_PROFILE);
        if !main_profile.exists() {
            let profile = Profile {
                name: MAIN_PROFILE.into(),
                onboarding_completed: false,
                value: load_repo_default_config()?,
            };
            write_profile(&main_profile, &profile)?;
            tracing::info!("Created main profile at {}", main_profile.display());
        }

        Ok(())
    }

    /// Load this profile, falling back to main, then to the repo default
    pub fn load(&self) -> anyhow::Result<Profile> {
        let profile_file = self.path();
        if profile_file.exists() {
            return read_profile(&profile_file);
        }

        tracing::warn!(
            "Profile {} not found, falling back to main profile or repo default",
            self.name
        );

        let main_file = self.file_for(MAIN_PROFILE);
        let value = if main_file.exists() {
            read_profile(&main_file)?.value
        } else {
            load_repo_default_config()?
        };

        Ok(Profile {
            name: self.name.clone(),
            onboarding_completed: false,
            value,
        })
    }

    pub fn save(&self, profile: &Profile) -> anyhow::Result<()> {
        fs::create_dir_all(&self.profiles_dir)?;
        write_profile(&self.path(), profile)
    }

    pub fn onboarding_completed(&self) -> anyhow::Result<bool> {
        Ok(self.load()?.onboarding_completed)
    }

    /// Persist whether the tutorial has been finished
    pub fn set_onboarding_completed(&self, completed: bool) -> anyhow::Result<()> {
        let mut profile = self.load()?;
        profile.onboarding_completed = completed;
        self.save(&profile)?;
        tracing::info!(
            "Profile {}: onboarding_completed = {}",
            self.name,
            completed
        );
        Ok(())
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Profile> {
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Invalid profile {}", path.display()))
}

fn write_profile(path: &Path, profile: &Profile) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string_pretty(profile)?)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_main_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profiles"), "main");

        store.init().unwrap();
        assert!(store.path().exists());

        let profile = store.load().unwrap();
        assert_eq!(profile.name, "main");
        assert!(!profile.onboarding_completed);
    }

    #[test]
    fn test_onboarding_flag_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path(), "main");
        store.init().unwrap();

        store.set_onboarding_completed(true).unwrap();
        assert!(store.onboarding_completed().unwrap());

        store.set_onboarding_completed(false).unwrap();
        assert!(!store.onboarding_completed().unwrap());
    }

    #[test]
    fn test_unknown_profile_falls_back_to_main_config() {
        let dir = tempfile::tempdir().unwrap();
        let main = ProfileStore::new(dir.path(), "main");
        main.init().unwrap();

        let mut profile = main.load().unwrap();
        profile.value.recognition.language = "deu".into();
        profile.onboarding_completed = true;
        main.save(&profile).unwrap();

        let work = ProfileStore::new(dir.path(), "work");
        let loaded = work.load().unwrap();
        assert_eq!(loaded.name, "work");
        assert_eq!(loaded.value.recognition.language, "deu");
        // tutorial state is per profile
        assert!(!loaded.onboarding_completed);
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_config_file(&path).is_err());
    }
}
