//! Balance tables loader.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use game_core::{CombatParams, WeaponAttackProfile, WeaponType};

use crate::catalog::BalanceTables;
use crate::loaders::{LoadResult, read_file};

/// File-layer structure: TOML keys are strings, so weapons are keyed by
/// name and converted on load.
#[derive(Debug, serde::Deserialize)]
struct BalanceFile {
    combat: CombatParams,
    weapons: BTreeMap<String, WeaponAttackProfile>,
}

/// Loader for balance tables from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load balance tables from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BalanceTables> {
        Self::parse(&read_file(path)?)
    }

    /// Parse balance tables from TOML text.
    pub fn parse(content: &str) -> LoadResult<BalanceTables> {
        let file: BalanceFile = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance tables TOML: {}", e))?;

        let mut weapons = BTreeMap::new();
        for (name, profile) in file.weapons {
            let weapon = WeaponType::from_str(&name)
                .map_err(|_| anyhow::anyhow!("Unknown weapon type '{}'", name))?;
            if weapon == WeaponType::None {
                anyhow::bail!("'None' cannot carry an attack profile");
            }
            if !(1..=5).contains(&profile.combo_length) {
                anyhow::bail!(
                    "Weapon '{}' has combo length {} (must be 1-5)",
                    name,
                    profile.combo_length
                );
            }
            weapons.insert(weapon, profile);
        }

        Ok(BalanceTables {
            combat: file.combat,
            weapons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../../data/balance.toml");

    #[test]
    fn shipped_balance_parses() {
        let tables = TablesLoader::parse(SAMPLE).expect("shipped data must parse");
        assert_eq!(tables.combat, CombatParams::default());
        assert!(tables.weapon_profile(WeaponType::GreatSword).is_some());
        assert!(tables.weapon_profile(WeaponType::None).is_none());
    }

    #[test]
    fn unknown_weapon_names_are_rejected() {
        let toml = r#"
            [combat]
            physical_crit_multiplier = 1.6
            magickal_crit_multiplier = 1.4
            minimum_damage = 0.0
            block_damage_reduction = 0.5
            block_arc_degrees = 60.0
            damage_block_trigger_delay = 0.2
            chain_skill_reset_delay = 2.0
            dodge_immunity_trigger_delay = 0.1
            dodge_immunity_duration = 0.4
            dodge_duration = 0.8
            weapon_switch_duration = 0.7

            [weapons.Halberd]
            combo_length = 3
            damage_percent = 60.0
            special_damage_percent = 110.0
            swing_duration = 0.6
            crowd_control_duration = 0.0
        "#;
        assert!(TablesLoader::parse(toml).is_err());
    }
}
