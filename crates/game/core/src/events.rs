//! Gameplay event notifications.
//!
//! Events are fire-and-forget: the world appends them while applying
//! mutations and the embedding runtime drains them after each operation.
//! Multiple independent listeners may observe them; none may return a
//! value or veto anything. They are never a source of truth for current
//! state.

use crate::combat::{AttackResponse, CameraShake};
use crate::state::{CharacterId, CharacterStateInfo, CrowdControlEffect, StatKind};

/// One gameplay notification emitted by the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameplayEvent {
    /// A state transition was committed on the authoritative side.
    StateCommitted {
        character: CharacterId,
        old: CharacterStateInfo,
        new: CharacterStateInfo,
    },
    /// A stat meter changed (replicated reliably and also mirrored as a
    /// one-shot cosmetic update).
    StatChanged {
        character: CharacterId,
        kind: StatKind,
        base: i32,
        max: i32,
        current: i32,
    },

    // --------------------------------------
    //  Combat outcomes
    // --------------------------------------
    ReceivedHit {
        character: CharacterId,
        attacker: CharacterId,
        response: AttackResponse,
    },
    DodgedAttack {
        character: CharacterId,
        attacker: CharacterId,
    },
    BlockedAttack {
        character: CharacterId,
        attacker: CharacterId,
    },
    SuccessfulHit {
        attacker: CharacterId,
        target: CharacterId,
        critical: bool,
    },
    UnsuccessfulHit {
        attacker: CharacterId,
        target: CharacterId,
    },
    KilledEnemy {
        attacker: CharacterId,
        victim: CharacterId,
    },
    Died {
        character: CharacterId,
    },

    // --------------------------------------
    //  Skill lifecycle
    // --------------------------------------
    SkillActivated {
        character: CharacterId,
        slot: u8,
        group: String,
    },
    SkillFinished {
        character: CharacterId,
        slot: u8,
        group: String,
    },
    SkillCancelled {
        character: CharacterId,
        slot: u8,
        group: String,
    },
    ChainWindowOpened {
        character: CharacterId,
        superseding_slot: u8,
    },
    ChainWindowClosed {
        character: CharacterId,
    },

    // --------------------------------------
    //  Crowd control
    // --------------------------------------
    CrowdControlApplied {
        character: CharacterId,
        effect: CrowdControlEffect,
        duration: f32,
    },
    CrowdControlReverted {
        character: CharacterId,
        effect: CrowdControlEffect,
    },

    // --------------------------------------
    //  Cosmetic triggers (fire instructions, not state)
    // --------------------------------------
    AttackBlockedCosmetic {
        character: CharacterId,
    },
    CameraShakeRequested {
        character: CharacterId,
        intensity: CameraShake,
    },
}
