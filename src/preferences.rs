//! Display preferences that survive across sessions
//!
//! This module provides:
//! - A key-value `PreferenceStore` (file-based on native, browser local storage on WASM,
//!   in-memory for tests)
//! - The `Preferences` model: dark-mode flag and font size

use crate::types::{FontSize, FontStep};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[cfg(not(target_arch = "wasm32"))]
use std::{fs, path::PathBuf};

pub const THEME_KEY: &str = "govterms-theme";
pub const FONT_SIZE_KEY: &str = "govterms-font-size";

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("Failed to create preference directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write preference '{key}': {source}")]
    Write {
        key: String,
        source: std::io::Error,
    },

    #[error("Preference store poisoned")]
    Poisoned,

    #[error("Browser storage unavailable")]
    Unavailable,

    #[error("Browser storage rejected '{key}'")]
    Rejected { key: String },
}

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

// ============================================
// File Store (native platforms)
// ============================================

/// One file per key under a preferences directory.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStore {
    root: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store under the platform's local data directory.
    pub fn default_location() -> Self {
        if let Some(data_dir) = dirs::data_local_dir() {
            return Self::new(data_dir.join("govterms").join("preferences"));
        }
        Self::new(PathBuf::from("cache").join("preferences"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        fs::create_dir_all(&self.root).map_err(PreferenceError::CreateDir)?;
        fs::write(self.path_for(key), value).map_err(|source| PreferenceError::Write {
            key: key.to_string(),
            source,
        })
    }
}

// ============================================
// Local Storage Store (web)
// ============================================

/// `window.localStorage`, looked up on each access.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(&sanitize_key(key)).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let storage = Self::storage().ok_or(PreferenceError::Unavailable)?;
        storage
            .set_item(&sanitize_key(key), value)
            .map_err(|_| PreferenceError::Rejected {
                key: key.to_string(),
            })
    }
}

/// Sanitize a preference key for filesystem and storage use
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

// ============================================
// Memory Store
// ============================================

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut entries = self.entries.lock().map_err(|_| PreferenceError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Platform default store.
pub fn default_store() -> Arc<dyn PreferenceStore> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(FileStore::default_location())
    }
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(LocalStorageStore)
    }
}

// ============================================
// Preferences
// ============================================

#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
    dark_mode: bool,
    font_size: FontSize,
}

impl PartialEq for Preferences {
    fn eq(&self, other: &Self) -> bool {
        self.dark_mode == other.dark_mode && self.font_size == other.font_size
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences")
            .field("dark_mode", &self.dark_mode)
            .field("font_size", &self.font_size)
            .finish()
    }
}

impl Preferences {
    /// Reads both preferences, using `false` / `medium` for absent or unreadable values.
    pub fn load(store: Arc<dyn PreferenceStore>) -> Self {
        let dark_mode = store
            .get(THEME_KEY)
            .and_then(|raw| serde_json::from_str::<bool>(raw.trim()).ok())
            .unwrap_or(false);
        let font_size = store
            .get(FONT_SIZE_KEY)
            .and_then(|raw| FontSize::parse(&raw))
            .unwrap_or_default();
        Self {
            store,
            dark_mode,
            font_size,
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn toggle_dark_mode(&mut self) {
        self.set_dark_mode(!self.dark_mode);
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
        self.persist(THEME_KEY, if dark_mode { "true" } else { "false" });
    }

    pub fn step_font_size(&mut self, step: FontStep) {
        self.font_size = self.font_size.step(step);
        self.persist(FONT_SIZE_KEY, self.font_size.as_str());
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            tracing::warn!(key, error = %err, "failed to save preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
            Err(PreferenceError::Poisoned)
        }
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("govterms-theme"), "govterms-theme");
        assert_eq!(sanitize_key("user:preferences"), "user_preferences");
    }

    #[test]
    fn storage_keys_are_stored_verbatim() {
        assert_eq!(sanitize_key(THEME_KEY), THEME_KEY);
        assert_eq!(sanitize_key(FONT_SIZE_KEY), FONT_SIZE_KEY);
    }

    #[test]
    fn defaults_when_absent() {
        let prefs = Preferences::load(Arc::new(MemoryStore::default()));
        assert!(!prefs.dark_mode());
        assert_eq!(prefs.font_size(), FontSize::Medium);
    }

    #[test]
    fn defaults_when_unreadable() {
        let store = Arc::new(MemoryStore::default());
        store.set(THEME_KEY, "maybe").unwrap();
        store.set(FONT_SIZE_KEY, "gigantic").unwrap();
        let prefs = Preferences::load(store);
        assert!(!prefs.dark_mode());
        assert_eq!(prefs.font_size(), FontSize::Medium);
    }

    #[test]
    fn every_change_is_written() {
        let store = Arc::new(MemoryStore::default());
        let mut prefs = Preferences::load(store.clone());

        prefs.toggle_dark_mode();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("true"));

        prefs.step_font_size(FontStep::Increase);
        prefs.step_font_size(FontStep::Increase);
        assert_eq!(prefs.font_size(), FontSize::Large);
        assert_eq!(store.get(FONT_SIZE_KEY).as_deref(), Some("large"));

        let reloaded = Preferences::load(store);
        assert!(reloaded.dark_mode());
        assert_eq!(reloaded.font_size(), FontSize::Large);
    }

    #[test]
    fn write_failures_do_not_block_changes() {
        let mut prefs = Preferences::load(Arc::new(ReadOnlyStore));
        prefs.set_dark_mode(true);
        prefs.step_font_size(FontStep::Decrease);
        assert!(prefs.dark_mode());
        assert_eq!(prefs.font_size(), FontSize::Small);
    }
}
