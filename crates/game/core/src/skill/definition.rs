//! Static skill data.
//!
//! Definitions are created from content files and are read-only at runtime;
//! per-instance state lives in [`crate::skill::SkillSlotState`].

use crate::combat::CameraShake;
use crate::state::{CrowdControlEffect, CrowdControlImmunities, DamageType, WeaponMask};

/// Static definition of one skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    /// Skill group identifier; chaining relationships reference groups.
    pub group: String,
    pub name: String,

    pub supported_weapons: WeaponMask,
    pub damage_type: DamageType,
    /// Damage as a percentage of the matching attack stat.
    pub damage_percent: f32,
    pub mana_cost: i32,
    pub stamina_cost: i32,
    pub cooldown: f32,
    /// Time from trigger (or release, for charged skills) until the skill
    /// finishes and the character returns to idle.
    pub skill_duration: f32,

    pub undodgable: bool,
    pub unblockable: bool,
    /// Charged skills hold after the trigger phase until released.
    pub charged: bool,
    pub camera_shake: CameraShake,

    pub crowd_control_effect: Option<CrowdControlEffect>,
    pub crowd_control_duration: f32,
    /// Immunities held while this skill is the active skill.
    pub crowd_control_immunities: CrowdControlImmunities,

    /// Group whose skill becomes chain-triggerable after this one finishes.
    pub superseding_group: Option<String>,
    /// Groups that must precede this skill; a non-empty list means the skill
    /// can only ever start as a chain skill.
    pub preceding_groups: Vec<String>,

    /// Gameplay tags the owner must carry to activate this skill.
    pub required_tags: Vec<String>,
    pub max_upgrades: u8,
}

impl SkillDefinition {
    /// A melee skill with sensible defaults; content files override the
    /// fields they care about.
    pub fn basic(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            supported_weapons: WeaponMask::any_weapon(),
            damage_type: DamageType::Physical,
            damage_percent: 100.0,
            mana_cost: 0,
            stamina_cost: 0,
            cooldown: 5.0,
            skill_duration: 1.0,
            undodgable: false,
            unblockable: false,
            charged: false,
            camera_shake: CameraShake::Weak,
            crowd_control_effect: None,
            crowd_control_duration: 0.0,
            crowd_control_immunities: CrowdControlImmunities::empty(),
            superseding_group: None,
            preceding_groups: Vec::new(),
            required_tags: Vec::new(),
            max_upgrades: 1,
        }
    }

    pub fn chains_into(&self) -> Option<&str> {
        self.superseding_group.as_deref()
    }

    /// Whether this skill can only start inside a chain window.
    pub fn is_chain_only(&self) -> bool {
        !self.preceding_groups.is_empty()
    }
}
