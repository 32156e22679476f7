//! Wire-shaped replication messages.
//!
//! The transport itself is an external collaborator; these structs define
//! what it must carry. State and stat syncs are sent reliably and in order
//! per character. Cosmetic events are one-shot fire instructions, never a
//! source of truth, and safe to replay.

use serde::{Deserialize, Serialize};

use game_core::{ActionRequest, CameraShake, CharacterId, CharacterState, StatKind};

/// Reliable server→client state synchronization for one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSync {
    pub character: CharacterId,
    pub state: CharacterState,
    pub sub_state_index: u8,
    pub replication_index: u8,
}

/// Reliable server→client stat synchronization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSync {
    pub character: CharacterId,
    pub kind: StatKind,
    pub base: i32,
    pub max: i32,
    pub current: i32,
}

/// Reliable, per-character-ordered sync stream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SyncMessage {
    State(StateSync),
    Stat(StatSync),
}

impl SyncMessage {
    pub fn character(&self) -> CharacterId {
        match self {
            SyncMessage::State(sync) => sync.character,
            SyncMessage::Stat(sync) => sync.character,
        }
    }
}

/// Client→server action request. The server re-validates the relevant
/// eligibility predicate before applying; nothing the client claims is
/// trusted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientCommand {
    pub character: CharacterId,
    pub request: ActionRequest,
}

/// One-shot multicast cosmetic triggers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CosmeticEvent {
    HealthUpdated {
        character: CharacterId,
        base: i32,
        max: i32,
        current: i32,
    },
    ManaUpdated {
        character: CharacterId,
        base: i32,
        max: i32,
        current: i32,
    },
    AttackBlocked {
        character: CharacterId,
    },
    HitEffect {
        character: CharacterId,
        critical: bool,
    },
    CameraShake {
        character: CharacterId,
        intensity: CameraShake,
    },
}
