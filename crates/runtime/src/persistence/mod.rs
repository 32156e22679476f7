//! Player profile persistence.
//!
//! A profile is the durable part of a player character: skill-bar layout
//! and per-skill upgrade levels. The service is injected into whatever owns
//! the character; there is no global save-game singleton.

mod file;
mod memory;
mod profile;

pub use file::FileProfileStore;
pub use memory::InMemoryProfileStore;
pub use profile::PlayerProfile;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(String),
}

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Storage for named player profiles.
pub trait PersistenceService: Send + Sync {
    fn save_profile(&self, profile: &PlayerProfile) -> PersistenceResult<()>;
    fn load_profile(&self, name: &str) -> PersistenceResult<Option<PlayerProfile>>;
    fn list_profiles(&self) -> PersistenceResult<Vec<String>>;
    fn delete_profile(&self, name: &str) -> PersistenceResult<()>;
}
