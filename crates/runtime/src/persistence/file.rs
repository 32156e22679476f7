//! File-based profile store.

use std::fs;
use std::path::{Path, PathBuf};

use crate::persistence::{PersistenceError, PersistenceResult, PersistenceService, PlayerProfile};

/// Stores profiles as individual JSON files.
///
/// Writes go through a temp file and an atomic rename so a crash mid-save
/// never leaves a truncated profile behind.
pub struct FileProfileStore {
    base_dir: PathBuf,
}

impl FileProfileStore {
    pub fn new(base_dir: impl AsRef<Path>) -> PersistenceResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Opens the store in the platform's per-user data directory.
    pub fn in_user_data_dir() -> PersistenceResult<Self> {
        let base = directories::ProjectDirs::from("", "", "combat-runtime")
            .map(|dirs| dirs.data_dir().join("profiles"))
            .unwrap_or_else(|| PathBuf::from(".profiles"));
        Self::new(base)
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize(name)))
    }
}

/// Keeps profile names filesystem-safe without rejecting anything.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl PersistenceService for FileProfileStore {
    fn save_profile(&self, profile: &PlayerProfile) -> PersistenceResult<()> {
        let path = self.profile_path(&profile.name);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(profile)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved profile '{}' to {}", profile.name, path.display());
        Ok(())
    }

    fn load_profile(&self, name: &str) -> PersistenceResult<Option<PlayerProfile>> {
        let path = self.profile_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let profile = serde_json::from_slice(&bytes)
            .map_err(|e| PersistenceError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded profile '{}' from {}", name, path.display());
        Ok(Some(profile))
    }

    fn list_profiles(&self) -> PersistenceResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_profile(&self, name: &str) -> PersistenceResult<()> {
        let path = self.profile_path(name);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted profile '{}'", name);
        }
        Ok(())
    }
}
