//! Attack construction and resolution math.

use crate::combat::{AttackInfo, AttackOutcome, AttackResponse, CameraShake};
use crate::env::{CombatParams, WeaponAttackProfile};
use crate::skill::SkillDefinition;
use crate::state::{AttackSection, CharacterRecord, DamageType, PrimaryStats};

/// Builds the attack description for a skill use.
///
/// # Formula
///
/// ```text
/// normal_damage = (damage_percent / 100) * attack_stat(damage_type)
/// crit_damage   = normal_damage * crit_multiplier(damage_type)
///                 + crit_bonus(damage_type)
/// ```
///
/// Deterministic given current stats; the crit roll happens at resolution.
pub fn attack_info_for_skill(
    def: &SkillDefinition,
    stats: &PrimaryStats,
    params: &CombatParams,
) -> AttackInfo {
    let normal_damage = (def.damage_percent / 100.0) * stats.attack(def.damage_type);
    let crit_damage = normal_damage * params.crit_multiplier(def.damage_type)
        + stats.crit_bonus(def.damage_type);

    AttackInfo {
        undodgable: def.undodgable,
        unblockable: def.unblockable,
        crit_rate: stats.crit_rate(def.damage_type),
        normal_damage,
        crit_damage,
        damage_type: def.damage_type,
        crowd_control_effect: def.crowd_control_effect,
        crowd_control_duration: def.crowd_control_duration,
        camera_shake: def.camera_shake,
    }
}

/// Builds the attack description for one normal-attack swing.
///
/// Normal attacks are always physical, dodgable and blockable; special
/// swings use the profile's special damage percentage and apply flinch.
pub fn attack_info_for_normal_attack(
    profile: &WeaponAttackProfile,
    section: AttackSection,
    stats: &PrimaryStats,
    params: &CombatParams,
) -> AttackInfo {
    let damage_percent = if section.starts_combo() && section != AttackSection::FirstSwing {
        profile.special_damage_percent
    } else {
        profile.damage_percent
    };
    let normal_damage = (damage_percent / 100.0) * stats.attack(DamageType::Physical);
    let crit_damage = normal_damage * params.crit_multiplier(DamageType::Physical)
        + stats.crit_bonus(DamageType::Physical);

    AttackInfo {
        undodgable: false,
        unblockable: false,
        crit_rate: stats.crit_rate(DamageType::Physical),
        normal_damage,
        crit_damage,
        damage_type: DamageType::Physical,
        crowd_control_effect: profile.crowd_control_effect,
        crowd_control_duration: profile.crowd_control_duration,
        camera_shake: CameraShake::Weak,
    }
}

/// Flat mitigation applied after outcome-specific reductions.
pub fn mitigate(damage: f32, resistance: f32, params: &CombatParams) -> f32 {
    (damage - resistance.max(0.0)).max(params.minimum_damage)
}

/// Full resolution of an attack, before it is applied to the defender.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub response: AttackResponse,
    /// Crowd control to apply, if the outcome permits any.
    pub crowd_control: Option<(crate::state::CrowdControlEffect, f32)>,
}

/// Decides the outcome of an attack against a defender.
///
/// Ordered checks:
/// 1. dodgable attack vs. active i-frames → `Dodged`, zero damage, no CC
/// 2. blockable attack vs. live damage blocking within the block arc →
///    `Blocked`, reduced damage, no CC
/// 3. otherwise `Hit`: crit iff `roll < crit_rate`, then flat mitigation
///    and the god-mode override
///
/// `bc_angle` is the absolute angle in degrees between the defender's
/// facing and the incoming attack direction. `roll` must be uniform in
/// `[0, 1)`.
pub fn resolve_attack(
    defender: &CharacterRecord,
    attack: &AttackInfo,
    bc_angle: f32,
    roll: f32,
    params: &CombatParams,
) -> Resolution {
    if !attack.undodgable && defender.iframes_active {
        return Resolution {
            response: AttackResponse::dodged(),
            crowd_control: None,
        };
    }

    let resistance = defender.primary.resistance(attack.damage_type);

    if !attack.unblockable && defender.blocking_damage && bc_angle <= params.block_arc_degrees {
        let reduced = attack.normal_damage * (1.0 - params.block_damage_reduction);
        let damage = if defender.god_mode {
            0.0
        } else {
            mitigate(reduced, resistance, params)
        };
        return Resolution {
            response: AttackResponse {
                outcome: AttackOutcome::Blocked,
                damage,
                critical: false,
            },
            crowd_control: None,
        };
    }

    let critical = roll < attack.crit_rate;
    let raw = if critical {
        attack.crit_damage
    } else {
        attack.normal_damage
    };
    let damage = if defender.god_mode {
        0.0
    } else {
        mitigate(raw, resistance, params)
    };

    let crowd_control = attack
        .crowd_control_effect
        .map(|effect| (effect, attack.crowd_control_duration));

    Resolution {
        response: AttackResponse {
            outcome: AttackOutcome::Hit,
            damage,
            critical,
        },
        crowd_control,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CharacterId, CharacterKind, CrowdControlEffect};

    fn defender() -> CharacterRecord {
        CharacterRecord::new(CharacterId(7), CharacterKind::Ai, "dummy")
    }

    fn plain_attack() -> AttackInfo {
        AttackInfo {
            undodgable: false,
            unblockable: false,
            crit_rate: 0.0,
            normal_damage: 40.0,
            crit_damage: 70.0,
            damage_type: DamageType::Physical,
            crowd_control_effect: Some(CrowdControlEffect::Stun),
            crowd_control_duration: 2.0,
            camera_shake: CameraShake::Weak,
        }
    }

    #[test]
    fn skill_damage_follows_attack_stat() {
        let params = CombatParams::default();
        let mut def = SkillDefinition::basic("Slash", "Slash");
        def.damage_percent = 150.0;
        def.damage_type = DamageType::Magickal;
        let stats = PrimaryStats {
            magickal_attack: 200.0,
            magickal_crit_bonus: 10.0,
            ..PrimaryStats::default()
        };

        let info = attack_info_for_skill(&def, &stats, &params);
        assert_eq!(info.normal_damage, 300.0);
        assert_eq!(
            info.crit_damage,
            300.0 * params.magickal_crit_multiplier + 10.0
        );
    }

    #[test]
    fn iframes_dodge_dodgable_attacks() {
        let params = CombatParams::default();
        let mut record = defender();
        record.iframes_active = true;

        let resolution = resolve_attack(&record, &plain_attack(), 0.0, 0.0, &params);
        assert_eq!(resolution.response.outcome, AttackOutcome::Dodged);
        assert_eq!(resolution.response.damage, 0.0);
        assert!(resolution.crowd_control.is_none());
    }

    #[test]
    fn iframes_do_not_stop_undodgable_attacks() {
        let params = CombatParams::default();
        let mut record = defender();
        record.iframes_active = true;
        let mut attack = plain_attack();
        attack.undodgable = true;

        let resolution = resolve_attack(&record, &attack, 0.0, 0.9, &params);
        assert_eq!(resolution.response.outcome, AttackOutcome::Hit);
    }

    #[test]
    fn block_reduces_damage_and_strips_crowd_control() {
        let params = CombatParams::default();
        let mut record = defender();
        record.blocking_damage = true;

        let resolution = resolve_attack(&record, &plain_attack(), 10.0, 0.0, &params);
        assert_eq!(resolution.response.outcome, AttackOutcome::Blocked);
        assert_eq!(
            resolution.response.damage,
            40.0 * (1.0 - params.block_damage_reduction)
        );
        assert!(resolution.crowd_control.is_none());
    }

    #[test]
    fn block_requires_facing_the_attack() {
        let params = CombatParams::default();
        let mut record = defender();
        record.blocking_damage = true;

        let from_behind = params.block_arc_degrees + 1.0;
        let resolution = resolve_attack(&record, &plain_attack(), from_behind, 0.9, &params);
        assert_eq!(resolution.response.outcome, AttackOutcome::Hit);
    }

    #[test]
    fn forced_crit_always_deals_crit_damage() {
        let params = CombatParams::default();
        let record = defender();
        let mut attack = plain_attack();
        attack.crit_rate = 1.0;

        // Any roll in [0, 1) must land a critical.
        for roll in [0.0, 0.5, 0.999_999] {
            let resolution = resolve_attack(&record, &attack, 0.0, roll, &params);
            assert!(resolution.response.critical);
            assert_eq!(resolution.response.damage, attack.crit_damage);
        }
    }

    #[test]
    fn zero_crit_rate_never_crits() {
        let params = CombatParams::default();
        let record = defender();
        let resolution = resolve_attack(&record, &plain_attack(), 0.0, 0.0, &params);
        assert!(!resolution.response.critical);
        assert_eq!(resolution.response.damage, 40.0);
    }

    #[test]
    fn god_mode_zeroes_damage() {
        let params = CombatParams::default();
        let mut record = defender();
        record.god_mode = true;
        let mut attack = plain_attack();
        attack.crit_rate = 1.0;

        let resolution = resolve_attack(&record, &attack, 0.0, 0.0, &params);
        assert_eq!(resolution.response.outcome, AttackOutcome::Hit);
        assert_eq!(resolution.response.damage, 0.0);
    }

    #[test]
    fn mitigation_floors_at_minimum_damage() {
        let params = CombatParams::default();
        assert_eq!(mitigate(10.0, 50.0, &params), params.minimum_damage);
    }
}
