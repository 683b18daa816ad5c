//! Persisted user preferences (small key-value JSON file)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

pub const THEME_PREFERENCE_KEY: &str = "theme-preference";

/// Key-value store backed by a single JSON file.
///
/// Every operation returns `Result`; callers are expected to swallow failures
/// and degrade to "no stored preference". A store constructed without a path
/// fails every operation, which models disabled storage.
#[derive(Clone, Debug)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    pub fn unavailable() -> Self {
        Self { path: None }
    }

    pub fn try_get(&self, key: &str) -> Result<Option<String>> {
        let path = self.require_path()?;
        Ok(Self::read_map(path)?.remove(key))
    }

    pub fn try_set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.require_path()?;
        let mut map = Self::read_map(path)?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(path, &map)
    }

    pub fn try_remove(&self, key: &str) -> Result<()> {
        let path = self.require_path()?;
        let mut map = Self::read_map(path)?;
        if map.remove(key).is_some() {
            self.write_map(path, &map)?;
        }
        Ok(())
    }

    fn require_path(&self) -> Result<&Path> {
        match &self.path {
            Some(path) => Ok(path),
            None => bail!("preference store unavailable"),
        }
    }

    fn read_map(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let map = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(map)
    }

    fn write_map(&self, path: &Path, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serde_json::to_string(map)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> PreferenceStore {
        let path = std::env::temp_dir()
            .join(format!("homepage-rs-prefs-{name}-{}", std::process::id()))
            .join("preferences.json");
        let _ = fs::remove_file(&path);
        PreferenceStore::new(path)
    }

    #[test]
    fn get_on_missing_file_is_none() {
        let store = temp_store("missing");
        assert_eq!(store.try_get(THEME_PREFERENCE_KEY).unwrap(), None);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let store = temp_store("roundtrip");
        store.try_set(THEME_PREFERENCE_KEY, "dark").unwrap();
        assert_eq!(
            store.try_get(THEME_PREFERENCE_KEY).unwrap().as_deref(),
            Some("dark")
        );
        store.try_set(THEME_PREFERENCE_KEY, "light").unwrap();
        assert_eq!(
            store.try_get(THEME_PREFERENCE_KEY).unwrap().as_deref(),
            Some("light")
        );
    }

    #[test]
    fn remove_clears_key() {
        let store = temp_store("remove");
        store.try_set(THEME_PREFERENCE_KEY, "dark").unwrap();
        store.try_remove(THEME_PREFERENCE_KEY).unwrap();
        assert_eq!(store.try_get(THEME_PREFERENCE_KEY).unwrap(), None);
        // Removing an absent key is still fine.
        store.try_remove(THEME_PREFERENCE_KEY).unwrap();
    }

    #[test]
    fn unavailable_store_fails_every_operation() {
        let store = PreferenceStore::unavailable();
        assert!(store.try_get("k").is_err());
        assert!(store.try_set("k", "v").is_err());
        assert!(store.try_remove("k").is_err());
    }
}
