//! Client-side reaction dispatch for replicated state changes.
//!
//! Clients react to state replication purely from the observed tuple:
//! everything needed to drive the visuals is derivable from
//! `(state, sub_state_index)` plus locally known equipment, because the
//! tuple is the only thing guaranteed to arrive. This module computes the
//! reactions as data; the embedding client feeds them to its animation
//! driver.

use crate::config::CombatConfig;
use crate::state::{AttackSection, CharacterState, CharacterStateInfo, CrowdControlEffect};

/// One visual/audio reaction a client should perform in response to an
/// observed transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClientReaction {
    /// Return to the idle/walk/run blend and clear any lingering predicted
    /// substate.
    ResetState,
    StartDodge { dodge_index: u8 },
    StartBlocking,
    CancelNormalAttack,
    /// Begin the normal-attack montage at the given section.
    StartNormalAttack { section: AttackSection },
    /// Jump to a later section of an already-running attack montage.
    ChangeAttackSection { section: AttackSection },
    TriggerSkill { sub_state_index: u8 },
    ReleaseSkill { sub_state_index: u8 },
    PlayHitReaction { effect: Option<CrowdControlEffect> },
    StartJump,
    StartInteraction,
    StartLooting,
    StartWeaponSwitch,
    StartSpellCast,
}

fn hit_reaction_effect(sub_state_index: u8) -> Option<CrowdControlEffect> {
    [
        CrowdControlEffect::Flinch,
        CrowdControlEffect::Interrupt,
        CrowdControlEffect::Stun,
        CrowdControlEffect::Freeze,
        CrowdControlEffect::Knockdown,
        CrowdControlEffect::Knockback,
    ]
    .into_iter()
    .find(|e| e.sub_state_index() == sub_state_index)
}

/// Computes the reactions for an observed transition from `old` to `new`.
///
/// Re-observing an identical tuple yields no reactions, which makes
/// replayed replication (reconnects, duplicated multicasts) idempotent.
/// Distinct replication indices on an identical action still dispatch: the
/// server deliberately bumped the index to force a restart of the same
/// action.
pub fn reactions_for_transition(
    old: CharacterStateInfo,
    new: CharacterStateInfo,
) -> Vec<ClientReaction> {
    if old == new {
        return Vec::new();
    }

    match new.state {
        CharacterState::IdleWalkRun => {
            if old.state != CharacterState::IdleWalkRun {
                vec![ClientReaction::ResetState]
            } else {
                Vec::new()
            }
        }
        CharacterState::Dodging => vec![ClientReaction::StartDodge {
            dodge_index: new.sub_state_index,
        }],
        CharacterState::Blocking => {
            let mut reactions = Vec::new();
            if old.state == CharacterState::Attacking {
                reactions.push(ClientReaction::CancelNormalAttack);
            }
            reactions.push(ClientReaction::StartBlocking);
            reactions
        }
        CharacterState::Attacking => match AttackSection::from_attack_index(new.sub_state_index) {
            Some(section) if section.starts_combo() => {
                vec![ClientReaction::StartNormalAttack { section }]
            }
            Some(section) => vec![ClientReaction::ChangeAttackSection { section }],
            // Unknown swing index: nothing sensible to play.
            None => Vec::new(),
        },
        CharacterState::UsingActiveSkill => {
            if new.sub_state_index > CombatConfig::SKILL_RELEASE_OFFSET {
                vec![ClientReaction::ReleaseSkill {
                    sub_state_index: new.sub_state_index,
                }]
            } else {
                vec![ClientReaction::TriggerSkill {
                    sub_state_index: new.sub_state_index,
                }]
            }
        }
        CharacterState::GotHit => vec![ClientReaction::PlayHitReaction {
            effect: hit_reaction_effect(new.sub_state_index),
        }],
        CharacterState::Jumping => vec![ClientReaction::StartJump],
        CharacterState::Interacting => vec![ClientReaction::StartInteraction],
        CharacterState::Looting => vec![ClientReaction::StartLooting],
        CharacterState::SwitchingWeapon => vec![ClientReaction::StartWeaponSwitch],
        CharacterState::CastingSpell => vec![ClientReaction::StartSpellCast],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(state: CharacterState, sub: u8, rep: u8) -> CharacterStateInfo {
        CharacterStateInfo {
            state,
            sub_state_index: sub,
            replication_index: rep,
        }
    }

    #[test]
    fn identical_tuple_produces_no_reactions() {
        let tuple = info(CharacterState::Attacking, 2, 5);
        assert!(reactions_for_transition(tuple, tuple).is_empty());
    }

    #[test]
    fn bumped_replication_index_still_dispatches() {
        let old = info(CharacterState::Dodging, 1, 5);
        let new = info(CharacterState::Dodging, 1, 6);
        assert_eq!(
            reactions_for_transition(old, new),
            vec![ClientReaction::StartDodge { dodge_index: 1 }]
        );
    }

    #[test]
    fn first_and_special_swings_start_the_attack() {
        for sub in [1u8, 11, 12] {
            let reactions = reactions_for_transition(
                info(CharacterState::IdleWalkRun, 0, 0),
                info(CharacterState::Attacking, sub, 1),
            );
            assert!(matches!(
                reactions.as_slice(),
                [ClientReaction::StartNormalAttack { .. }]
            ));
        }
    }

    #[test]
    fn later_swings_change_section() {
        let reactions = reactions_for_transition(
            info(CharacterState::Attacking, 2, 3),
            info(CharacterState::Attacking, 3, 4),
        );
        assert_eq!(
            reactions,
            vec![ClientReaction::ChangeAttackSection {
                section: AttackSection::ThirdSwing
            }]
        );
    }

    #[test]
    fn blocking_from_attack_cancels_the_attack_first() {
        let reactions = reactions_for_transition(
            info(CharacterState::Attacking, 2, 3),
            info(CharacterState::Blocking, 0, 4),
        );
        assert_eq!(
            reactions,
            vec![
                ClientReaction::CancelNormalAttack,
                ClientReaction::StartBlocking
            ]
        );
    }

    #[test]
    fn skill_release_threshold_selects_phase() {
        let old = info(CharacterState::IdleWalkRun, 0, 0);
        assert_eq!(
            reactions_for_transition(old, info(CharacterState::UsingActiveSkill, 3, 1)),
            vec![ClientReaction::TriggerSkill { sub_state_index: 3 }]
        );
        assert_eq!(
            reactions_for_transition(old, info(CharacterState::UsingActiveSkill, 103, 1)),
            vec![ClientReaction::ReleaseSkill {
                sub_state_index: 103
            }]
        );
    }

    #[test]
    fn return_to_idle_resets_once() {
        let reactions = reactions_for_transition(
            info(CharacterState::Dodging, 1, 1),
            info(CharacterState::IdleWalkRun, 0, 2),
        );
        assert_eq!(reactions, vec![ClientReaction::ResetState]);
    }
}
