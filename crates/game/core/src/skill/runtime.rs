//! Per-character skill runtime: slots, cooldowns, and chain windows.

use std::collections::BTreeMap;

use crate::config::CombatConfig;

/// Mutable per-slot state. Only the owning character's skill runtime
/// mutates this.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSlotState {
    pub current_upgrade: u8,
    pub cooldown_remaining: f32,
    /// Set while this slot is the designated superseding skill of an open
    /// chain window.
    pub active_as_chain_skill: bool,
}

impl SkillSlotState {
    /// A cooldown is in progress for any positive remainder; exactly zero
    /// means ready.
    pub fn is_in_cooldown(&self) -> bool {
        self.cooldown_remaining > 0.0
    }

    pub fn start_cooldown(&mut self, duration: f32) {
        self.cooldown_remaining = duration.max(0.0);
    }

    pub fn update_cooldown(&mut self, dt: f32) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
    }

    pub fn finish_cooldown(&mut self) {
        self.cooldown_remaining = 0.0;
    }

    /// Instant reset for refund mechanics. Identical to finishing; exists
    /// so call sites express intent.
    pub fn cancel_cooldown(&mut self) {
        self.cooldown_remaining = 0.0;
    }
}

/// A skill-bar slot with an equipped skill group.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSlot {
    pub group: String,
    pub state: SkillSlotState,
}

/// The skill currently being used, if any.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSkill {
    pub slot: u8,
    pub group: String,
    /// Trigger sub-index, or trigger + release offset once released.
    pub sub_state_index: u8,
}

impl ActiveSkill {
    pub fn is_released(&self) -> bool {
        self.sub_state_index > CombatConfig::SKILL_RELEASE_OFFSET
    }
}

/// Open chain-skill opportunity. Expiry is a pure timeout; the opportunity
/// is lost silently.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainWindow {
    pub superseding_slot: u8,
    pub remaining: f32,
}

/// Skill-bar layout plus runtime state for one character.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillSet {
    slots: BTreeMap<u8, SkillSlot>,
    pub active: Option<ActiveSkill>,
    chain: Option<ChainWindow>,
}

impl SkillSet {
    /// Equips a skill group into a bar slot. Out-of-range slots are ignored.
    pub fn equip(&mut self, slot: u8, group: impl Into<String>) {
        if slot == 0 || slot > CombatConfig::MAX_SKILL_SLOTS {
            return;
        }
        self.slots.insert(
            slot,
            SkillSlot {
                group: group.into(),
                state: SkillSlotState::default(),
            },
        );
    }

    pub fn unequip(&mut self, slot: u8) {
        self.slots.remove(&slot);
    }

    pub fn slot(&self, slot: u8) -> Option<&SkillSlot> {
        self.slots.get(&slot)
    }

    pub fn slot_mut(&mut self, slot: u8) -> Option<&mut SkillSlot> {
        self.slots.get_mut(&slot)
    }

    /// Slot currently equipped with the given group, if any.
    pub fn slot_for_group(&self, group: &str) -> Option<u8> {
        self.slots
            .iter()
            .find(|(_, s)| s.group == group)
            .map(|(slot, _)| *slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &SkillSlot)> {
        self.slots.iter().map(|(slot, s)| (*slot, s))
    }

    /// Skill-bar layout as slot → group, for persistence.
    pub fn bar_layout(&self) -> BTreeMap<u8, String> {
        self.slots
            .iter()
            .map(|(slot, s)| (*slot, s.group.clone()))
            .collect()
    }

    // --------------------------------------
    //  Chain windows
    // --------------------------------------

    pub fn can_use_chain_skill(&self) -> bool {
        self.chain.is_some()
    }

    pub fn superseding_chain_slot(&self) -> Option<u8> {
        self.chain.as_ref().map(|c| c.superseding_slot)
    }

    /// Opens (or refreshes) the chain window for the given slot.
    pub fn open_chain_window(&mut self, superseding_slot: u8, delay: f32) {
        self.close_chain_window();
        if let Some(slot) = self.slots.get_mut(&superseding_slot) {
            slot.state.active_as_chain_skill = true;
        }
        self.chain = Some(ChainWindow {
            superseding_slot,
            remaining: delay,
        });
    }

    /// Closes the window if open. Safe to call when none is open.
    pub fn close_chain_window(&mut self) {
        if let Some(chain) = self.chain.take()
            && let Some(slot) = self.slots.get_mut(&chain.superseding_slot)
        {
            slot.state.active_as_chain_skill = false;
        }
    }

    /// Advances cooldowns and the chain window. Returns true if the chain
    /// window expired this tick.
    pub fn update(&mut self, dt: f32) -> bool {
        for slot in self.slots.values_mut() {
            slot.state.update_cooldown(dt);
        }

        if let Some(chain) = self.chain.as_mut() {
            chain.remaining -= dt;
            if chain.remaining <= 0.0 {
                self.close_chain_window();
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_boundary_is_exact() {
        let mut state = SkillSlotState::default();
        state.start_cooldown(0.0001);
        assert!(state.is_in_cooldown());

        state.finish_cooldown();
        assert!(!state.is_in_cooldown());
        assert_eq!(state.cooldown_remaining, 0.0);
    }

    #[test]
    fn cancel_cooldown_resets_instantly() {
        let mut state = SkillSlotState::default();
        state.start_cooldown(10.0);
        state.update_cooldown(1.0);
        assert!(state.is_in_cooldown());

        state.cancel_cooldown();
        assert_eq!(state.cooldown_remaining, 0.0);
        assert!(!state.is_in_cooldown());
    }

    #[test]
    fn cooldown_never_goes_negative() {
        let mut state = SkillSlotState::default();
        state.start_cooldown(0.5);
        state.update_cooldown(2.0);
        assert_eq!(state.cooldown_remaining, 0.0);
    }

    #[test]
    fn chain_window_expires_silently() {
        let mut skills = SkillSet::default();
        skills.equip(2, "FollowUp");
        skills.open_chain_window(2, 2.0);
        assert!(skills.can_use_chain_skill());
        assert!(skills.slot(2).unwrap().state.active_as_chain_skill);

        assert!(!skills.update(1.5));
        assert!(skills.can_use_chain_skill());

        assert!(skills.update(0.6));
        assert!(!skills.can_use_chain_skill());
        assert!(!skills.slot(2).unwrap().state.active_as_chain_skill);
    }

    #[test]
    fn reopening_chain_window_moves_the_mark() {
        let mut skills = SkillSet::default();
        skills.equip(1, "A");
        skills.equip(2, "B");
        skills.open_chain_window(1, 2.0);
        skills.open_chain_window(2, 2.0);
        assert!(!skills.slot(1).unwrap().state.active_as_chain_skill);
        assert!(skills.slot(2).unwrap().state.active_as_chain_skill);
        assert_eq!(skills.superseding_chain_slot(), Some(2));
    }

    #[test]
    fn out_of_range_slots_are_ignored() {
        let mut skills = SkillSet::default();
        skills.equip(0, "A");
        skills.equip(CombatConfig::MAX_SKILL_SLOTS + 1, "B");
        assert!(skills.slot(0).is_none());
        assert!(skills.slot(CombatConfig::MAX_SKILL_SLOTS + 1).is_none());
    }
}
