//! Transition eligibility predicates.
//!
//! Each predicate is a pure function of the character record (state tuple,
//! loadout, capability flags). They are queried optimistically before a
//! request is forwarded and re-checked on the authoritative side before
//! commit, so a stale or dishonest client can never force a transition.

use crate::skill::SkillDefinition;
use crate::state::{CharacterKind, CharacterRecord};

pub fn can_move(record: &CharacterRecord) -> bool {
    record.alive
        && (record.is_idle_or_moving()
            || record.is_blocking()
            || record.is_switching_weapon()
            || record.state_allows_movement)
}

pub fn can_jump(record: &CharacterRecord) -> bool {
    record.alive && (record.is_idle_or_moving() || record.is_blocking())
}

/// Dodging needs the dodge animation for the current weapon set; a missing
/// animation is treated as absence of the capability.
pub fn can_dodge(record: &CharacterRecord) -> bool {
    let state_allows = record.is_idle_or_moving()
        || record.is_blocking()
        || record.is_casting_spell()
        || record.is_normal_attacking();
    record.alive && record.has_dodge_animation && state_allows
}

pub fn can_guard_against_attacks(record: &CharacterRecord) -> bool {
    record.alive
        && (record.is_idle_or_moving() || record.is_normal_attacking())
        && record.loadout.weapon_ready()
}

pub fn can_normal_attack(record: &CharacterRecord) -> bool {
    record.alive && record.is_idle_or_moving() && record.loadout.weapon_ready()
}

/// General skill eligibility, before per-skill checks. Fast/auto-run states
/// do not exist as distinct states here; movement within IdleWalkRun
/// qualifies.
pub fn can_use_any_skill(record: &CharacterRecord) -> bool {
    record.alive
        && record.loadout.weapon_ready()
        && (record.is_idle_or_moving() || record.is_blocking() || record.is_normal_attacking())
}

pub fn can_toggle_sheathe(record: &CharacterRecord) -> bool {
    record.alive && record.is_idle_or_moving() && record.loadout.has_weapon()
}

pub fn can_start_interaction(record: &CharacterRecord) -> bool {
    record.alive && record.is_idle_or_moving()
}

/// Per-skill trigger eligibility.
///
/// Requires, in order: a supported unsheathed weapon (players only; AI
/// characters have no sheathe mechanic), cooldown exactly elapsed, an
/// interruptible owner state, or an open chain window naming this slot
/// (which bypasses the state requirement entirely), plus all required tags.
pub fn can_trigger_skill(record: &CharacterRecord, slot: u8, def: &SkillDefinition) -> bool {
    if !record.alive {
        return false;
    }

    if record.kind == CharacterKind::Player
        && !(record.loadout.weapon_ready() && def.supported_weapons.supports(record.loadout.weapon))
    {
        return false;
    }

    let Some(slot_state) = record.skills.slot(slot) else {
        return false;
    };
    if slot_state.state.is_in_cooldown() {
        return false;
    }

    let chain_eligible = record.skills.can_use_chain_skill()
        && record.skills.superseding_chain_slot() == Some(slot);

    let state_eligible = record.is_idle_or_moving()
        || record.is_blocking()
        || record.is_normal_attacking()
        || chain_eligible;
    if !state_eligible {
        return false;
    }

    // Chain-only skills never start outside their window.
    if def.is_chain_only() && !chain_eligible {
        return false;
    }

    def.required_tags.iter().all(|tag| record.has_tag(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        CharacterId, CharacterKind, CharacterState, CharacterStateInfo, Loadout, WeaponType,
    };

    fn player() -> CharacterRecord {
        let mut record = CharacterRecord::new(CharacterId(1), CharacterKind::Player, "hero");
        record.loadout = Loadout::armed(WeaponType::LongSword);
        record
    }

    fn set_state(record: &mut CharacterRecord, state: CharacterState) {
        record.state_info = CharacterStateInfo::new(state, 0);
    }

    #[test]
    fn sheathed_weapon_blocks_attacks_and_skills() {
        let mut record = player();
        record.loadout.sheathed = true;
        assert!(!can_normal_attack(&record));
        assert!(!can_use_any_skill(&record));
        assert!(!can_guard_against_attacks(&record));
        // Movement and dodging do not need a drawn weapon.
        assert!(can_move(&record));
        assert!(can_dodge(&record));
    }

    #[test]
    fn dodge_requires_animation_resource() {
        let mut record = player();
        record.has_dodge_animation = false;
        assert!(!can_dodge(&record));
    }

    #[test]
    fn dodge_allowed_mid_attack() {
        let mut record = player();
        set_state(&mut record, CharacterState::Attacking);
        assert!(can_dodge(&record));
        set_state(&mut record, CharacterState::UsingActiveSkill);
        assert!(!can_dodge(&record));
    }

    #[test]
    fn dead_characters_can_do_nothing() {
        let mut record = player();
        record.alive = false;
        assert!(!can_move(&record));
        assert!(!can_jump(&record));
        assert!(!can_dodge(&record));
        assert!(!can_normal_attack(&record));
        assert!(!can_use_any_skill(&record));
    }

    #[test]
    fn skill_trigger_honors_cooldown_boundary() {
        let mut record = player();
        record.skills.equip(1, "Slash");
        let def = SkillDefinition::basic("Slash", "Slash");

        record.skills.slot_mut(1).unwrap().state.cooldown_remaining = 0.0001;
        assert!(!can_trigger_skill(&record, 1, &def));

        record.skills.slot_mut(1).unwrap().state.cooldown_remaining = 0.0;
        assert!(can_trigger_skill(&record, 1, &def));
    }

    #[test]
    fn chain_window_bypasses_state_requirement() {
        let mut record = player();
        record.skills.equip(1, "Slash");
        record.skills.equip(2, "FollowUp");
        let mut def = SkillDefinition::basic("FollowUp", "Follow Up");
        def.preceding_groups = vec!["Slash".into()];

        set_state(&mut record, CharacterState::UsingActiveSkill);
        assert!(!can_trigger_skill(&record, 2, &def));

        record.skills.open_chain_window(2, 2.0);
        assert!(can_trigger_skill(&record, 2, &def));

        // The window names slot 2; other slots stay ineligible.
        record.skills.equip(3, "FollowUp");
        assert!(!can_trigger_skill(&record, 3, &def));
    }

    #[test]
    fn required_tags_gate_triggering() {
        let mut record = player();
        record.skills.equip(1, "Empowered");
        let mut def = SkillDefinition::basic("Empowered", "Empowered");
        def.required_tags = vec!["Empowerment".into()];

        assert!(!can_trigger_skill(&record, 1, &def));
        record.tags.push("Empowerment".into());
        assert!(can_trigger_skill(&record, 1, &def));
    }

    #[test]
    fn ai_characters_skip_weapon_requirements() {
        let mut record = CharacterRecord::new(CharacterId(2), CharacterKind::Ai, "goblin");
        record.skills.equip(1, "Bite");
        let def = SkillDefinition::basic("Bite", "Bite");
        assert!(can_trigger_skill(&record, 1, &def));
    }
}
