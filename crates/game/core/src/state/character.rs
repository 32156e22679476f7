//! The replicated character state tuple.

use crate::config::CombatConfig;

/// Top-level activity of a character. Exactly one is active at any instant;
/// death is a separate flag layered on top, not a state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterState {
    #[default]
    IdleWalkRun,
    Jumping,
    Dodging,
    Blocking,
    Attacking,
    UsingActiveSkill,
    GotHit,
    Interacting,
    Looting,
    SwitchingWeapon,
    CastingSpell,
}

/// Replicated state tuple for a character.
///
/// `replication_index` must change on every committed transition so that
/// remote observers see a distinct tuple even when a character immediately
/// reverts to a previously observed state (defeats replication no-op
/// suppression).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStateInfo {
    pub state: CharacterState,
    pub sub_state_index: u8,
    pub replication_index: u8,
}

impl CharacterStateInfo {
    pub fn new(state: CharacterState, sub_state_index: u8) -> Self {
        Self {
            state,
            sub_state_index,
            replication_index: 0,
        }
    }

    /// Returns the successor tuple for a committed transition: the requested
    /// state and sub-index with the replication index advanced.
    #[must_use]
    pub fn advanced(self, state: CharacterState, sub_state_index: u8) -> Self {
        Self {
            state,
            sub_state_index,
            replication_index: self.replication_index.wrapping_add(1),
        }
    }

    /// Whether two tuples denote the same action, ignoring the replication
    /// index. Used for dispatch; dedup compares the full tuple instead.
    pub fn same_action(&self, other: &Self) -> bool {
        self.state == other.state && self.sub_state_index == other.sub_state_index
    }

    /// True for skill sub-indices denoting the release phase of a charged
    /// skill.
    pub fn is_skill_release(&self) -> bool {
        self.sub_state_index > CombatConfig::SKILL_RELEASE_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_changes_replication_index() {
        let a = CharacterStateInfo::default();
        let b = a.advanced(CharacterState::Dodging, 1);
        let c = b.advanced(CharacterState::IdleWalkRun, 0);

        assert_ne!(a.replication_index, b.replication_index);
        assert_ne!(b.replication_index, c.replication_index);
        // Reverting to the original action still yields a distinct tuple.
        assert!(a.same_action(&c));
        assert_ne!(a, c);
    }

    #[test]
    fn replication_index_wraps() {
        let mut info = CharacterStateInfo::default();
        info.replication_index = u8::MAX;
        let next = info.advanced(CharacterState::Attacking, 1);
        assert_eq!(next.replication_index, 0);
    }

    #[test]
    fn release_phase_threshold() {
        let trigger = CharacterStateInfo::new(CharacterState::UsingActiveSkill, 100);
        let release = CharacterStateInfo::new(CharacterState::UsingActiveSkill, 101);
        assert!(!trigger.is_skill_release());
        assert!(release.is_skill_release());
    }
}
