//! Read-only environment oracles.
//!
//! Oracles supply static data (skill definitions, balance tables) and
//! deterministic randomness to the simulation. They are injected per call
//! via [`WorldEnv`] so the core stays free of global state.

mod rng;

pub use rng::{FixedRoll, PcgRng, RngOracle, compute_seed};

use crate::skill::SkillDefinition;
use crate::state::{CrowdControlEffect, DamageType, WeaponType};

/// Oracle providing skill definitions by group.
///
/// Definitions are read-only at runtime; implementations typically wrap a
/// catalog loaded from content files.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, group: &str) -> Option<&SkillDefinition>;
}

/// Oracle providing combat balance parameters and per-weapon attack data.
pub trait TablesOracle: Send + Sync {
    fn combat(&self) -> CombatParams;
    fn weapon_profile(&self, weapon: WeaponType) -> Option<WeaponAttackProfile>;
}

/// Balance parameters for attack resolution and state timing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatParams {
    pub physical_crit_multiplier: f32,
    pub magickal_crit_multiplier: f32,
    /// Floor applied after flat mitigation.
    pub minimum_damage: f32,
    /// Fraction of incoming damage absorbed by a successful block.
    pub block_damage_reduction: f32,
    /// Half-arc in degrees within which a block catches an attack.
    pub block_arc_degrees: f32,
    /// Delay after entering the Blocking state before damage blocking goes
    /// live.
    pub damage_block_trigger_delay: f32,
    /// Window after a chaining skill finishes during which its superseding
    /// skill may be triggered from a non-idle context.
    pub chain_skill_reset_delay: f32,
    /// Delay after initiating a dodge before i-frames activate.
    pub dodge_immunity_trigger_delay: f32,
    /// How long i-frames stay active during a dodge.
    pub dodge_immunity_duration: f32,
    pub dodge_duration: f32,
    pub weapon_switch_duration: f32,
}

impl Default for CombatParams {
    fn default() -> Self {
        Self {
            physical_crit_multiplier: 1.6,
            magickal_crit_multiplier: 1.4,
            minimum_damage: 0.0,
            block_damage_reduction: 0.5,
            block_arc_degrees: 60.0,
            damage_block_trigger_delay: 0.2,
            chain_skill_reset_delay: 2.0,
            dodge_immunity_trigger_delay: 0.1,
            dodge_immunity_duration: 0.4,
            dodge_duration: 0.8,
            weapon_switch_duration: 0.7,
        }
    }
}

impl CombatParams {
    pub fn crit_multiplier(&self, damage_type: DamageType) -> f32 {
        match damage_type {
            DamageType::Physical => self.physical_crit_multiplier,
            DamageType::Magickal => self.magickal_crit_multiplier,
        }
    }
}

/// Per-weapon normal-attack data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponAttackProfile {
    /// Number of swings in the regular combo (1–5).
    pub combo_length: u8,
    /// Damage of a regular swing as a percentage of physical attack.
    pub damage_percent: f32,
    /// Damage of the forward/backward special swings.
    pub special_damage_percent: f32,
    /// How long one swing takes before the attack finish timer fires.
    pub swing_duration: f32,
    pub crowd_control_effect: Option<CrowdControlEffect>,
    pub crowd_control_duration: f32,
}

impl Default for WeaponAttackProfile {
    fn default() -> Self {
        Self {
            combo_length: 3,
            damage_percent: 60.0,
            special_damage_percent: 110.0,
            swing_duration: 0.6,
            crowd_control_effect: Some(CrowdControlEffect::Flinch),
            crowd_control_duration: 0.0,
        }
    }
}

/// Borrowed oracle bundle passed into every world operation.
///
/// `seed` is the session seed mixed into every per-event rng seed.
#[derive(Clone, Copy)]
pub struct WorldEnv<'a> {
    pub skills: &'a dyn SkillOracle,
    pub tables: &'a dyn TablesOracle,
    pub rng: &'a dyn RngOracle,
    pub seed: u64,
}

impl<'a> WorldEnv<'a> {
    pub fn new(
        skills: &'a dyn SkillOracle,
        tables: &'a dyn TablesOracle,
        rng: &'a dyn RngOracle,
        seed: u64,
    ) -> Self {
        Self {
            skills,
            tables,
            rng,
            seed,
        }
    }
}
