//! Event types carried by the bus.

use serde::{Deserialize, Serialize};

use game_core::GameplayEvent;

use crate::replication::{CosmeticEvent, SyncMessage};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Gameplay events: hits, skill lifecycle, crowd control, deaths.
    Combat,
    /// Reliable state/stat synchronization messages.
    Replication,
    /// One-shot cosmetic triggers. Fire instructions, never state:
    /// duplicate delivery must stay harmless.
    Cosmetic,
}

/// Event wrapper that carries the topic and typed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Combat(GameplayEvent),
    Replication(SyncMessage),
    Cosmetic(CosmeticEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(_) => Topic::Combat,
            Event::Replication(_) => Topic::Replication,
            Event::Cosmetic(_) => Topic::Cosmetic,
        }
    }
}
