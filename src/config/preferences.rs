//! Persistence of user [`Preferences`].

use super::types::Preferences;
use crate::error::{Result, VarTableError};
use std::path::{Path, PathBuf};

/// Where preferences are read from and written to.
pub trait PreferencesStore {
    /// Stored preferences, or defaults when nothing usable is stored.
    fn load(&self) -> Preferences;

    fn save(&mut self, prefs: &Preferences) -> Result<()>;
}

impl<P: PreferencesStore + ?Sized> PreferencesStore for Box<P> {
    fn load(&self) -> Preferences {
        (**self).load()
    }

    fn save(&mut self, prefs: &Preferences) -> Result<()> {
        (**self).save(prefs)
    }
}

/// Preferences kept in a JSON file.
#[derive(Debug, Clone)]
pub struct FilePreferencesStore {
    path: PathBuf,
}

impl FilePreferencesStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.json` in the user config directory.
    #[must_use]
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join(super::file::CONFIG_DIR_NAME).join("preferences.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferencesStore for FilePreferencesStore {
    fn load(&self) -> Preferences {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Preferences::default();
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "cannot read preferences, using defaults");
                return Preferences::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "invalid preferences file, using defaults");
            Preferences::default()
        })
    }

    fn save(&mut self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| VarTableError::io(parent, e))?;
            }
        }
        let json = serde_json::to_string_pretty(prefs)
            .map_err(|e| VarTableError::config(format!("cannot serialize preferences: {e}")))?;
        std::fs::write(&self.path, json).map_err(|e| VarTableError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "saved preferences");
        Ok(())
    }
}

/// Preferences held in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferencesStore {
    stored: Option<Preferences>,
    saves: usize,
}

impl MemoryPreferencesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with(prefs: Preferences) -> Self {
        Self {
            stored: Some(prefs),
            saves: 0,
        }
    }

    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    fn load(&self) -> Preferences {
        self.stored.unwrap_or_default()
    }

    fn save(&mut self, prefs: &Preferences) -> Result<()> {
        self.stored = Some(*prefs);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableTheme;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let store = FilePreferencesStore::new(tmp.path().join("prefs.json"));
        assert_eq!(store.load(), Preferences::default());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let mut store = FilePreferencesStore::new(tmp.path().join("nested").join("prefs.json"));
        let prefs = Preferences {
            table_theme: TableTheme::Light,
            show_dev_token: false,
            show_swatches: true,
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.load(), prefs);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"tableTheme\": \"light\""));
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(FilePreferencesStore::new(path).load(), Preferences::default());
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let mut store = MemoryPreferencesStore::new();
        assert_eq!(store.load(), Preferences::default());
        store.save(&Preferences::default()).unwrap();
        assert_eq!(store.saves(), 1);
    }
}
