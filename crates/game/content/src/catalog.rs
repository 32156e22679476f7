//! Skill catalogs and balance tables.

use std::collections::BTreeMap;

use game_core::{
    CombatParams, CrowdControlEffect, CrowdControlImmunities, DamageType, SkillDefinition,
    WeaponAttackProfile, WeaponMask, WeaponType,
};

/// A set of skill definitions, typically loaded from one RON file.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

impl SkillCatalog {
    pub fn get(&self, group: &str) -> Option<&SkillDefinition> {
        self.skills.iter().find(|s| s.group == group)
    }
}

/// Balance parameters plus per-weapon attack profiles, typically loaded
/// from one TOML file. The file layer keys weapons by name (TOML keys are
/// strings); see [`crate::loaders::TablesLoader`].
#[derive(Clone, Debug)]
pub struct BalanceTables {
    pub combat: CombatParams,
    pub weapons: BTreeMap<WeaponType, WeaponAttackProfile>,
}

impl Default for BalanceTables {
    fn default() -> Self {
        default_balance()
    }
}

impl BalanceTables {
    pub fn weapon_profile(&self, weapon: WeaponType) -> Option<WeaponAttackProfile> {
        self.weapons.get(&weapon).copied()
    }
}

/// Built-in balance set used by tests and demos.
pub fn default_balance() -> BalanceTables {
    let mut weapons = BTreeMap::new();
    weapons.insert(
        WeaponType::GreatSword,
        WeaponAttackProfile {
            combo_length: 5,
            damage_percent: 75.0,
            special_damage_percent: 140.0,
            swing_duration: 0.8,
            crowd_control_effect: Some(CrowdControlEffect::Flinch),
            crowd_control_duration: 0.0,
        },
    );
    weapons.insert(
        WeaponType::WarHammer,
        WeaponAttackProfile {
            combo_length: 4,
            damage_percent: 90.0,
            special_damage_percent: 160.0,
            swing_duration: 0.9,
            crowd_control_effect: Some(CrowdControlEffect::Knockdown),
            crowd_control_duration: 1.0,
        },
    );
    weapons.insert(
        WeaponType::LongSword,
        WeaponAttackProfile {
            combo_length: 5,
            damage_percent: 60.0,
            special_damage_percent: 110.0,
            swing_duration: 0.6,
            crowd_control_effect: Some(CrowdControlEffect::Flinch),
            crowd_control_duration: 0.0,
        },
    );
    weapons.insert(
        WeaponType::Mace,
        WeaponAttackProfile {
            combo_length: 4,
            damage_percent: 70.0,
            special_damage_percent: 120.0,
            swing_duration: 0.7,
            crowd_control_effect: Some(CrowdControlEffect::Flinch),
            crowd_control_duration: 0.0,
        },
    );
    weapons.insert(
        WeaponType::Dagger,
        WeaponAttackProfile {
            combo_length: 5,
            damage_percent: 45.0,
            special_damage_percent: 85.0,
            swing_duration: 0.4,
            crowd_control_effect: None,
            crowd_control_duration: 0.0,
        },
    );
    weapons.insert(
        WeaponType::Staff,
        WeaponAttackProfile {
            combo_length: 3,
            damage_percent: 55.0,
            special_damage_percent: 100.0,
            swing_duration: 0.6,
            crowd_control_effect: None,
            crowd_control_duration: 0.0,
        },
    );

    BalanceTables {
        combat: CombatParams::default(),
        weapons,
    }
}

/// Built-in skill catalog used by tests and demos.
pub fn default_catalog() -> SkillCatalog {
    let mut cleave = SkillDefinition::basic("Cleave", "Cleave");
    cleave.supported_weapons = WeaponMask::GREAT_SWORD | WeaponMask::WAR_HAMMER;
    cleave.damage_percent = 180.0;
    cleave.stamina_cost = 15;
    cleave.cooldown = 6.0;
    cleave.skill_duration = 1.2;
    cleave.superseding_group = Some("Whirlwind".into());

    let mut whirlwind = SkillDefinition::basic("Whirlwind", "Whirlwind");
    whirlwind.supported_weapons = WeaponMask::GREAT_SWORD | WeaponMask::WAR_HAMMER;
    whirlwind.damage_percent = 240.0;
    whirlwind.stamina_cost = 20;
    whirlwind.cooldown = 10.0;
    whirlwind.skill_duration = 1.6;
    whirlwind.preceding_groups = vec!["Cleave".into()];
    whirlwind.crowd_control_effect = Some(CrowdControlEffect::Knockback);
    whirlwind.crowd_control_duration = 0.8;

    let mut piercing_strike = SkillDefinition::basic("PiercingStrike", "Piercing Strike");
    piercing_strike.supported_weapons = WeaponMask::LONG_SWORD | WeaponMask::DAGGER;
    piercing_strike.damage_percent = 150.0;
    piercing_strike.stamina_cost = 10;
    piercing_strike.cooldown = 4.0;
    piercing_strike.skill_duration = 0.9;
    piercing_strike.unblockable = true;
    piercing_strike.crowd_control_effect = Some(CrowdControlEffect::Interrupt);
    piercing_strike.crowd_control_duration = 0.5;

    let mut stunning_smash = SkillDefinition::basic("StunningSmash", "Stunning Smash");
    stunning_smash.supported_weapons = WeaponMask::MACE | WeaponMask::WAR_HAMMER;
    stunning_smash.damage_percent = 130.0;
    stunning_smash.stamina_cost = 12;
    stunning_smash.cooldown = 8.0;
    stunning_smash.skill_duration = 1.0;
    stunning_smash.crowd_control_effect = Some(CrowdControlEffect::Stun);
    stunning_smash.crowd_control_duration = 2.0;

    let mut frost_bolt = SkillDefinition::basic("FrostBolt", "Frost Bolt");
    frost_bolt.supported_weapons = WeaponMask::STAFF;
    frost_bolt.damage_type = DamageType::Magickal;
    frost_bolt.damage_percent = 170.0;
    frost_bolt.mana_cost = 25;
    frost_bolt.cooldown = 5.0;
    frost_bolt.skill_duration = 1.1;
    frost_bolt.crowd_control_effect = Some(CrowdControlEffect::Freeze);
    frost_bolt.crowd_control_duration = 1.5;

    let mut charged_blast = SkillDefinition::basic("ChargedBlast", "Charged Blast");
    charged_blast.supported_weapons = WeaponMask::STAFF;
    charged_blast.damage_type = DamageType::Magickal;
    charged_blast.damage_percent = 320.0;
    charged_blast.mana_cost = 40;
    charged_blast.cooldown = 14.0;
    charged_blast.skill_duration = 1.4;
    charged_blast.charged = true;
    charged_blast.undodgable = true;
    charged_blast.crowd_control_immunities =
        CrowdControlImmunities::FLINCH | CrowdControlImmunities::INTERRUPT;

    // AI-side skills: no weapon gating beyond the mask, heavier CC.
    let mut bite = SkillDefinition::basic("Bite", "Bite");
    bite.damage_percent = 110.0;
    bite.cooldown = 3.0;
    bite.skill_duration = 0.8;

    let mut slam = SkillDefinition::basic("Slam", "Slam");
    slam.damage_percent = 200.0;
    slam.cooldown = 9.0;
    slam.skill_duration = 1.5;
    slam.unblockable = true;
    slam.crowd_control_effect = Some(CrowdControlEffect::Knockdown);
    slam.crowd_control_duration = 1.2;

    SkillCatalog {
        skills: vec![
            cleave,
            whirlwind,
            piercing_strike,
            stunning_smash,
            frost_bolt,
            charged_blast,
            bite,
            slam,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_chain_pairs_are_consistent() {
        let catalog = default_catalog();
        for skill in &catalog.skills {
            if let Some(group) = &skill.superseding_group {
                let follow_up = catalog.get(group).expect("superseding group must exist");
                assert!(
                    follow_up.preceding_groups.contains(&skill.group),
                    "{} chains into {} but is not listed as preceding",
                    skill.group,
                    follow_up.group
                );
            }
        }
    }

    #[test]
    fn default_balance_covers_every_weapon() {
        let balance = default_balance();
        for weapon in [
            WeaponType::GreatSword,
            WeaponType::WarHammer,
            WeaponType::LongSword,
            WeaponType::Mace,
            WeaponType::Dagger,
            WeaponType::Staff,
        ] {
            let profile = balance.weapon_profile(weapon).expect("profile");
            assert!((1..=5).contains(&profile.combo_length));
            assert!(profile.swing_duration > 0.0);
        }
        assert!(balance.weapon_profile(WeaponType::None).is_none());
    }
}
