//! Settings persistence
//!
//! [`SettingsStore`] abstracts where the settings record lives.
//! [`FileSettingsStore`] writes pretty JSON under the user's config directory;
//! [`MemorySettingsStore`] keeps the same JSON in memory when no directory is
//! writable. [`load_or_default`] is the recovery policy every caller uses.

use super::types::{AppSettings, SettingsError};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

/// Durable home of the settings record
pub trait SettingsStore {
    fn load(&self) -> Result<AppSettings, SettingsError>;

    fn save(&mut self, settings: &AppSettings) -> Result<(), SettingsError>;

    /// Keeps an unreadable record aside before defaults replace it.
    ///
    /// Returns where it was kept, if anywhere.
    fn preserve_corrupt(&mut self) -> Result<Option<PathBuf>, SettingsError> {
        Ok(None)
    }
}

/// JSON settings file on disk
pub struct FileSettingsStore {
    directory: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store in `directory`, creating the directory if needed.
    pub fn new(directory: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let directory = directory.as_ref().to_path_buf();

        if !directory.exists() {
            fs::create_dir_all(&directory)?;
        }

        Ok(FileSettingsStore { directory })
    }

    /// `<config dir>/menu_manager`, or `./config` when the platform has none
    pub fn default_directory() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("menu_manager"))
            .unwrap_or_else(|| PathBuf::from("config"))
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(SETTINGS_FILE)
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<AppSettings, SettingsError> {
        let json = fs::read_to_string(self.path())?;
        let settings: AppSettings = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    fn save(&mut self, settings: &AppSettings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(self.path(), json)?;

        log::info!("Settings saved to: {}", self.path().display());

        Ok(())
    }

    fn preserve_corrupt(&mut self) -> Result<Option<PathBuf>, SettingsError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let backup = self
            .directory
            .join(format!("settings.corrupt-{}.json", timestamp));
        fs::rename(&path, &backup)?;

        Ok(Some(backup))
    }
}

/// Settings kept in memory as JSON
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    json: Option<String>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `json` as the stored record
    #[cfg(test)]
    pub fn with_contents(json: impl Into<String>) -> Self {
        MemorySettingsStore {
            json: Some(json.into()),
        }
    }

    #[cfg(test)]
    pub fn contents(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<AppSettings, SettingsError> {
        let json = self.json.as_deref().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no settings stored")
        })?;
        let settings: AppSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    fn save(&mut self, settings: &AppSettings) -> Result<(), SettingsError> {
        self.json = Some(serde_json::to_string_pretty(settings)?);
        Ok(())
    }
}

/// Loads settings, falling back to defaults on any failure
///
/// Defaults are saved back so the next start finds a valid record. A record
/// that failed to parse is preserved first. Failures here are logged, never
/// returned.
pub fn load_or_default(store: &mut dyn SettingsStore) -> AppSettings {
    match store.load() {
        Ok(settings) => {
            log::info!("Settings loaded ({})", settings.resolution);
            return settings;
        }
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No settings found, writing defaults");
        }
        Err(e) => {
            log::warn!("Failed to load settings, using defaults: {}", e);
            if matches!(e, SettingsError::Serialization(_)) {
                match store.preserve_corrupt() {
                    Ok(Some(backup)) => {
                        log::warn!("Unreadable settings kept at {}", backup.display())
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!("Failed to keep unreadable settings: {}", e),
                }
            }
        }
    }

    let settings = AppSettings::default();
    if let Err(e) = store.save(&settings) {
        log::warn!("Failed to save default settings: {}", e);
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GraphicsDetail, Resolution};
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileSettingsStore::new(dir.path()).unwrap();

        let mut settings = AppSettings::default();
        settings.resolution = Resolution::new(1366, 768);
        settings.graphics_detail = GraphicsDetail::Full;
        settings.volume_main = 0;
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_save_of_load_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = FileSettingsStore::new(dir.path()).unwrap();
        store.save(&AppSettings::default()).unwrap();

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        let first = fs::read(store.path()).unwrap();

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();
        let second = fs::read(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_new_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let store = FileSettingsStore::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(store.path(), nested.join("settings.json"));
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let mut store = FileSettingsStore::new(dir.path()).unwrap();

        let settings = load_or_default(&mut store);

        assert_eq!(settings, AppSettings::default());
        assert!(store.path().exists());
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_corrupt_file_is_preserved_and_replaced() {
        let dir = TempDir::new().unwrap();
        let mut store = FileSettingsStore::new(dir.path()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        let settings = load_or_default(&mut store);
        assert_eq!(settings, AppSettings::default());
        assert_eq!(store.load().unwrap(), settings);

        let backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("settings.corrupt-")
            })
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(backups[0].path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut settings = AppSettings::default();
        settings.volume_main = 42;
        let json = serde_json::to_string(&settings).unwrap();
        let mut store = MemorySettingsStore::with_contents(json);

        assert_eq!(load_or_default(&mut store), AppSettings::default());
        assert_eq!(store.load().unwrap(), AppSettings::default());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemorySettingsStore::new();
        assert!(matches!(store.load(), Err(SettingsError::Io(_))));

        let mut settings = AppSettings::default();
        settings.enable_music = false;
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
        assert!(store.contents().unwrap().contains("\"enable_music\": false"));
    }

    #[test]
    fn test_bad_resolution_string_falls_back() {
        let json = serde_json::to_string(&AppSettings::default())
            .unwrap()
            .replace("800x480", "wide");
        let mut store = MemorySettingsStore::with_contents(json);

        assert_eq!(load_or_default(&mut store).resolution, Resolution::new(800, 480));
    }
}
