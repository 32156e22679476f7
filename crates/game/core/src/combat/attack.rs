//! Attack value objects.

use crate::state::{CrowdControlEffect, DamageType};

/// Cosmetic camera shake strength carried with an attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CameraShake {
    #[default]
    Weak,
    Medium,
    Strong,
}

/// Immutable description of one attempted attack.
///
/// Created once per attempt by the instigator's side, passed by reference
/// to resolution, and discarded afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackInfo {
    pub undodgable: bool,
    pub unblockable: bool,
    /// Critical-hit chance in `[0, 1]`. The roll against it happens at
    /// resolution time, not here.
    pub crit_rate: f32,
    pub normal_damage: f32,
    pub crit_damage: f32,
    pub damage_type: DamageType,
    pub crowd_control_effect: Option<CrowdControlEffect>,
    pub crowd_control_duration: f32,
    pub camera_shake: CameraShake,
}

/// Qualitative result of resolving an attack against a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Hit,
    Dodged,
    Blocked,
    Deflected,
}

/// Resolved outcome of one attack. Ephemeral; a bounded history is kept on
/// the defender for cosmetic replay.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResponse {
    pub outcome: AttackOutcome,
    pub damage: f32,
    pub critical: bool,
}

impl AttackResponse {
    pub fn dodged() -> Self {
        Self {
            outcome: AttackOutcome::Dodged,
            damage: 0.0,
            critical: false,
        }
    }
}
