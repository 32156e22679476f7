//! Server-authoritative orchestration for the combat simulation.
//!
//! This crate wires the deterministic [`game_core`] world into a running
//! service: the replication bridge (authoritative session + client
//! replicas), a topic-based event bus, persistence for player profiles, an
//! AI action provider, and the tokio worker loop consumers drive through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`replication`] implements the client/server authority contract
//! - [`persistence`] stores player profiles
//! - [`oracle`] adapts content data for the core's oracle traits
pub mod api;
pub mod events;
pub mod oracle;
pub mod persistence;
pub mod providers;
pub mod replication;
pub mod runtime;

mod workers;

pub use api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, Topic};
pub use oracle::OracleManager;
pub use persistence::{
    FileProfileStore, InMemoryProfileStore, PersistenceError, PersistenceService, PlayerProfile,
};
pub use providers::WeightedAiProvider;
pub use replication::{
    AnimationDriver, ClientCommand, ClientReplica, CosmeticEvent, RecordingDriver, ServerSession,
    StatSync, StateSync, SyncMessage,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
