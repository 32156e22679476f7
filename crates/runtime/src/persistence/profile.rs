//! The profile blob.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use game_core::CharacterRecord;

/// Durable per-player data: skill-bar layout and upgrade levels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    /// Skill-bar slot → equipped skill group.
    pub skill_bar: BTreeMap<u8, String>,
    /// Skill group → unlocked upgrade level.
    pub skill_upgrades: BTreeMap<String, u8>,
    pub saved_at: DateTime<Utc>,
}

impl PlayerProfile {
    /// Captures the persistable parts of a character record.
    pub fn from_record(record: &CharacterRecord) -> Self {
        let skill_upgrades = record
            .skills
            .iter()
            .filter(|(_, slot)| slot.state.current_upgrade > 0)
            .map(|(_, slot)| (slot.group.clone(), slot.state.current_upgrade))
            .collect();
        Self {
            name: record.name.clone(),
            skill_bar: record.skills.bar_layout(),
            skill_upgrades,
            saved_at: Utc::now(),
        }
    }

    /// Restores the profile onto a freshly constructed record. Unknown
    /// entries are equipped as-is; the oracle decides later whether a group
    /// still resolves (a stale group simply never triggers).
    pub fn apply_to(&self, record: &mut CharacterRecord) {
        for (slot, group) in &self.skill_bar {
            record.skills.equip(*slot, group.clone());
            if let Some(upgrade) = self.skill_upgrades.get(group)
                && let Some(equipped) = record.skills.slot_mut(*slot)
            {
                equipped.state.current_upgrade = *upgrade;
            }
        }
    }
}
