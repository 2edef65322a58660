use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::validation;

// Default configuration
pub const DEFAULT_STORE_URL: &str = "https://chat.devng.online";
pub const DEFAULT_USERNAME: &str = "guest";
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 5_000;
pub const DEFAULT_VISIBILITY_INTERVAL_MS: u64 = 500;

/// Intervals below this are raised to it
const MIN_INTERVAL_MS: u64 = 100;

/// Colour scheme, persisted as `"light"` / `"dark"`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// Local identity; only decides which bubbles count as our own
    pub username: String,
    pub store_url: String,
    pub refresh_interval_ms: u64,
    pub visibility_interval_ms: u64,
    /// Serve the built-in sample conversation instead of the network
    pub dummy_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            username: DEFAULT_USERNAME.to_string(),
            store_url: DEFAULT_STORE_URL.to_string(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            visibility_interval_ms: DEFAULT_VISIBILITY_INTERVAL_MS,
            dummy_mode: false,
        }
    }
}

impl Settings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(MIN_INTERVAL_MS))
    }

    pub fn visibility_interval(&self) -> Duration {
        Duration::from_millis(self.visibility_interval_ms.max(MIN_INTERVAL_MS))
    }

    /// Replace invalid fields with their defaults.
    fn sanitized(mut self) -> Self {
        match validation::validate_store_url(&self.store_url) {
            Ok(url) => self.store_url = url,
            Err(e) => {
                warn!(error = %e, url = %self.store_url, "ignoring configured store URL");
                self.store_url = DEFAULT_STORE_URL.to_string();
            }
        }
        if let Err(e) = validation::validate_username(&self.username) {
            warn!(error = %e, "ignoring configured username");
            self.username = DEFAULT_USERNAME.to_string();
        }
        self.username = self.username.trim().to_string();
        self
    }
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = ProjectDirs::from("online", "devng", "devchat-client") {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            warn!(error = %e, "failed to create config dir");
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

/// Load settings from the platform config dir, falling back to defaults.
pub fn load_settings() -> Settings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => Settings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Settings::default(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "failed to read settings");
            return Settings::default();
        }
    };

    match serde_json::from_str::<Settings>(&content) {
        Ok(settings) => settings.sanitized(),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "settings file is corrupt; using defaults");
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> io::Result<()> {
    if let Some(path) = settings_path() {
        save_settings_to(&path, settings)?;
    }
    Ok(())
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> io::Result<()> {
    let data = serde_json::to_string_pretty(settings).map_err(io::Error::other)?;
    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}
