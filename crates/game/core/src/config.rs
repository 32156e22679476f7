//! Compile-time simulation limits.

/// Fixed limits for bounded in-state collections.
///
/// These are deliberately constants rather than configuration: they size
/// replicated state, so every peer must agree on them.
#[derive(Clone, Copy, Debug, Default)]
pub struct CombatConfig;

impl CombatConfig {
    /// Number of skill-bar slots a character can equip skills into.
    pub const MAX_SKILL_SLOTS: u8 = 20;

    /// Bounded history of resolved attacks kept for cosmetic replay.
    pub const MAX_ATTACK_RESPONSES: usize = 8;

    /// Sub-state indices above this value denote the release phase of a
    /// charged skill; the trigger phase uses the raw slot index.
    pub const SKILL_RELEASE_OFFSET: u8 = 100;
}
