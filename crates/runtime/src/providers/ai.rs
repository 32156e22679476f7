//! Weight-based AI action provider.

use async_trait::async_trait;

use game_core::fsm::predicates;
use game_core::{ActionRequest, AttackSection, CharacterRecord};

use crate::api::ActionProvider;
use crate::oracle::OracleManager;

/// Picks the most-weighted skill the character can trigger right now and
/// falls back to advancing the normal-attack combo.
///
/// Weighting is deterministic: skill damage scaled by upgrade level. No
/// randomness enters AI decisions, which keeps server replays stable.
#[derive(Debug, Clone, Default)]
pub struct WeightedAiProvider;

impl WeightedAiProvider {
    pub fn new() -> Self {
        Self
    }

    fn best_skill_slot(record: &CharacterRecord, oracles: &OracleManager) -> Option<u8> {
        let mut best: Option<(u8, f32)> = None;
        for (slot, equipped) in record.skills.iter() {
            let Some(def) = oracles.skills.skill(&equipped.group) else {
                tracing::warn!(
                    group = equipped.group,
                    "equipped skill group missing from catalog"
                );
                continue;
            };
            if !predicates::can_trigger_skill(record, slot, def) {
                continue;
            }
            let weight =
                def.damage_percent * (1.0 + 0.1 * equipped.state.current_upgrade as f32);
            if best.is_none_or(|(_, w)| weight > w) {
                best = Some((slot, weight));
            }
        }
        best.map(|(slot, _)| slot)
    }

    fn next_swing(record: &CharacterRecord, oracles: &OracleManager) -> Option<u8> {
        if predicates::can_normal_attack(record) {
            return Some(AttackSection::FIRST_INDEX);
        }
        if record.is_normal_attacking() {
            let profile = oracles.tables.weapon_profile(record.loadout.weapon)?;
            let current = AttackSection::from_attack_index(record.state_info.sub_state_index)?;
            return current
                .next_in_combo(profile.combo_length)
                .map(|s| s.attack_index());
        }
        None
    }
}

#[async_trait]
impl ActionProvider for WeightedAiProvider {
    async fn provide_request(
        &self,
        record: &CharacterRecord,
        oracles: &OracleManager,
    ) -> Option<ActionRequest> {
        if !record.alive {
            return None;
        }

        if let Some(slot) = Self::best_skill_slot(record, oracles) {
            tracing::debug!(character = record.id.0, slot, "AI triggering skill");
            return Some(ActionRequest::TriggerSkill { slot });
        }

        if let Some(attack_index) = Self::next_swing(record, oracles) {
            return Some(ActionRequest::NormalAttack { attack_index });
        }

        // Nothing worth doing; wait for the next decision round.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{CharacterId, CharacterKind, Loadout, WeaponType};

    fn ai_record() -> CharacterRecord {
        let mut record = CharacterRecord::new(CharacterId(5), CharacterKind::Ai, "ogre");
        record.loadout = Loadout::armed(WeaponType::GreatSword);
        record.skills.equip(1, "Bite");
        record.skills.equip(2, "Slam");
        record
    }

    #[tokio::test]
    async fn picks_the_heaviest_ready_skill() {
        let oracles = OracleManager::default_content();
        let provider = WeightedAiProvider::new();

        let record = ai_record();
        // Slam (200%) outweighs Bite (110%).
        assert_eq!(
            provider.provide_request(&record, &oracles).await,
            Some(ActionRequest::TriggerSkill { slot: 2 })
        );
    }

    #[tokio::test]
    async fn falls_back_to_normal_attacks_when_skills_cool_down() {
        let oracles = OracleManager::default_content();
        let provider = WeightedAiProvider::new();

        let mut record = ai_record();
        for slot in [1, 2] {
            record
                .skills
                .slot_mut(slot)
                .unwrap()
                .state
                .start_cooldown(10.0);
        }
        assert_eq!(
            provider.provide_request(&record, &oracles).await,
            Some(ActionRequest::NormalAttack { attack_index: 1 })
        );
    }

    #[tokio::test]
    async fn dead_characters_do_nothing() {
        let oracles = OracleManager::default_content();
        let provider = WeightedAiProvider::new();

        let mut record = ai_record();
        record.alive = false;
        assert_eq!(provider.provide_request(&record, &oracles).await, None);
    }
}
