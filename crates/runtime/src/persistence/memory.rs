//! In-memory profile store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::persistence::{PersistenceResult, PersistenceService, PlayerProfile};

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<String, PlayerProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceService for InMemoryProfileStore {
    fn save_profile(&self, profile: &PlayerProfile) -> PersistenceResult<()> {
        self.profiles
            .lock()
            .expect("profile store lock poisoned")
            .insert(profile.name.clone(), profile.clone());
        Ok(())
    }

    fn load_profile(&self, name: &str) -> PersistenceResult<Option<PlayerProfile>> {
        Ok(self
            .profiles
            .lock()
            .expect("profile store lock poisoned")
            .get(name)
            .cloned())
    }

    fn list_profiles(&self) -> PersistenceResult<Vec<String>> {
        let mut names: Vec<String> = self
            .profiles
            .lock()
            .expect("profile store lock poisoned")
            .keys()
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }

    fn delete_profile(&self, name: &str) -> PersistenceResult<()> {
        self.profiles
            .lock()
            .expect("profile store lock poisoned")
            .remove(name);
        Ok(())
    }
}
