//! Crowd-control effect kinds and immunity masks.

use bitflags::bitflags;

/// Forced-state effects an attack can apply to its target. Each effect has
/// independent eligibility and revert timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrowdControlEffect {
    /// Brief hit reaction. Cosmetic only; never forces a state change.
    Flinch,
    /// Cancels the target's current action.
    Interrupt,
    Stun,
    Freeze,
    Knockdown,
    Knockback,
}

impl CrowdControlEffect {
    /// Sub-state index used when committing `GotHit` for this effect, so
    /// clients can pick the matching hit reaction from the tuple alone.
    pub fn sub_state_index(self) -> u8 {
        match self {
            Self::Flinch => 1,
            Self::Interrupt => 2,
            Self::Stun => 3,
            Self::Freeze => 4,
            Self::Knockdown => 5,
            Self::Knockback => 6,
        }
    }

    /// Effects that force a sustained state ended by a revert timer.
    /// Flinch is a one-shot reaction with nothing to undo.
    pub fn has_revert(self) -> bool {
        !matches!(self, Self::Flinch)
    }

    fn immunity_bit(self) -> CrowdControlImmunities {
        match self {
            Self::Flinch => CrowdControlImmunities::FLINCH,
            Self::Interrupt => CrowdControlImmunities::INTERRUPT,
            Self::Stun => CrowdControlImmunities::STUN,
            Self::Freeze => CrowdControlImmunities::FREEZE,
            Self::Knockdown => CrowdControlImmunities::KNOCKDOWN,
            Self::Knockback => CrowdControlImmunities::KNOCKBACK,
        }
    }
}

bitflags! {
    /// Immunities granted by active skills or character data.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CrowdControlImmunities: u8 {
        const FLINCH = 1 << 0;
        const INTERRUPT = 1 << 1;
        const STUN = 1 << 2;
        const FREEZE = 1 << 3;
        const KNOCKDOWN = 1 << 4;
        const KNOCKBACK = 1 << 5;
    }
}

impl CrowdControlImmunities {
    pub fn grants_immunity_to(&self, effect: CrowdControlEffect) -> bool {
        self.contains(effect.immunity_bit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_state_indices_are_distinct() {
        let effects = [
            CrowdControlEffect::Flinch,
            CrowdControlEffect::Interrupt,
            CrowdControlEffect::Stun,
            CrowdControlEffect::Freeze,
            CrowdControlEffect::Knockdown,
            CrowdControlEffect::Knockback,
        ];
        for (i, a) in effects.iter().enumerate() {
            for b in &effects[i + 1..] {
                assert_ne!(a.sub_state_index(), b.sub_state_index());
            }
        }
    }

    #[test]
    fn immunity_mask_matches_effect() {
        let immunities = CrowdControlImmunities::STUN | CrowdControlImmunities::FREEZE;
        assert!(immunities.grants_immunity_to(CrowdControlEffect::Stun));
        assert!(!immunities.grants_immunity_to(CrowdControlEffect::Knockdown));
    }
}
