//! Crowd-control eligibility.

use crate::state::{CharacterRecord, CrowdControlEffect};

/// Whether `effect` may be applied to the character right now.
///
/// Eligibility is per effect but shares the baseline: dead characters and
/// characters already under a sustained crowd-control effect reject new
/// applications, as do immunities granted by the active skill.
pub fn can_apply_crowd_control(record: &CharacterRecord, effect: CrowdControlEffect) -> bool {
    if !record.alive {
        return false;
    }
    if record.crowd_control_immunities.grants_immunity_to(effect) {
        return false;
    }
    // A sustained effect owns the character until its revert fires; a fresh
    // apply of the same kind replaces the timer instead (handled by the
    // world), so it stays eligible.
    match record.active_crowd_control {
        Some(active) if active != effect => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CharacterId, CharacterKind, CrowdControlImmunities};

    fn record() -> CharacterRecord {
        CharacterRecord::new(CharacterId(1), CharacterKind::Ai, "dummy")
    }

    #[test]
    fn dead_characters_reject_all_effects() {
        let mut r = record();
        r.alive = false;
        assert!(!can_apply_crowd_control(&r, CrowdControlEffect::Stun));
        assert!(!can_apply_crowd_control(&r, CrowdControlEffect::Flinch));
    }

    #[test]
    fn active_effect_blocks_other_kinds_but_not_itself() {
        let mut r = record();
        r.active_crowd_control = Some(CrowdControlEffect::Stun);
        assert!(can_apply_crowd_control(&r, CrowdControlEffect::Stun));
        assert!(!can_apply_crowd_control(&r, CrowdControlEffect::Freeze));
    }

    #[test]
    fn immunities_are_honored() {
        let mut r = record();
        r.crowd_control_immunities = CrowdControlImmunities::KNOCKDOWN;
        assert!(!can_apply_crowd_control(&r, CrowdControlEffect::Knockdown));
        assert!(can_apply_crowd_control(&r, CrowdControlEffect::Stun));
    }
}
