//! The authoritative per-character record.

use arrayvec::ArrayVec;

use crate::combat::AttackResponse;
use crate::config::CombatConfig;
use crate::skill::SkillSet;
use crate::state::{
    CharacterState, CharacterStateInfo, CharacterStat, CrowdControlEffect, CrowdControlImmunities,
    Loadout, PrimaryStats,
};
use crate::world::TimerHandle;

/// Stable identifier for a combat participant within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

/// Which eligibility variant a character uses. Player and AI characters
/// share the state machine and resolver; only skill eligibility differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    Player,
    Ai,
}

/// Named timer handles, one per deferred operation a character can have
/// outstanding. Re-scheduling through the same handle replaces the previous
/// entry, so competing transitions never leave stale callbacks behind.
#[derive(Clone, Debug, Default)]
pub struct CharacterTimers {
    pub finish_dodge: TimerHandle,
    pub finish_attack: TimerHandle,
    pub finish_skill: TimerHandle,
    pub finish_weapon_switch: TimerHandle,
    pub iframe_trigger: TimerHandle,
    pub iframe_expiry: TimerHandle,
    pub block_trigger: TimerHandle,
    pub crowd_control: TimerHandle,
}

impl CharacterTimers {
    /// All handles, for bulk cancellation on death or removal.
    pub fn all_mut(&mut self) -> [&mut TimerHandle; 8] {
        [
            &mut self.finish_dodge,
            &mut self.finish_attack,
            &mut self.finish_skill,
            &mut self.finish_weapon_switch,
            &mut self.iframe_trigger,
            &mut self.iframe_expiry,
            &mut self.block_trigger,
            &mut self.crowd_control,
        ]
    }
}

/// Authoritative record of one combat participant.
///
/// The record exclusively owns its state tuple, stat meters, skill slots and
/// crowd-control slot; everything else only reads it (clients keep a bounded
/// speculative copy of the tuple for prediction).
#[derive(Clone, Debug)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub kind: CharacterKind,
    pub name: String,

    pub state_info: CharacterStateInfo,
    pub health: CharacterStat,
    pub mana: CharacterStat,
    pub stamina: CharacterStat,
    pub primary: PrimaryStats,
    pub loadout: Loadout,
    pub skills: SkillSet,

    pub alive: bool,
    pub god_mode: bool,
    pub in_combat: bool,
    /// Invulnerability window during dodge. Immunity to damage, not to all
    /// crowd control.
    pub iframes_active: bool,
    /// Whether block damage absorption is live. Lags entering the Blocking
    /// state by the block trigger delay.
    pub blocking_damage: bool,
    pub state_allows_movement: bool,
    /// Absence of a dodge animation for the current weapon/gender combo is
    /// treated as absence of the dodge capability.
    pub has_dodge_animation: bool,
    pub facing_yaw: f32,

    pub tags: Vec<String>,
    pub active_crowd_control: Option<CrowdControlEffect>,
    pub crowd_control_immunities: CrowdControlImmunities,
    pub last_attack_responses: ArrayVec<AttackResponse, { CombatConfig::MAX_ATTACK_RESPONSES }>,

    pub timers: CharacterTimers,
}

impl CharacterRecord {
    pub fn new(id: CharacterId, kind: CharacterKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            state_info: CharacterStateInfo::default(),
            health: CharacterStat::full(100),
            mana: CharacterStat::full(100),
            stamina: CharacterStat::full(100),
            primary: PrimaryStats::default(),
            loadout: Loadout::default(),
            skills: SkillSet::default(),
            alive: true,
            god_mode: false,
            in_combat: false,
            iframes_active: false,
            blocking_damage: false,
            state_allows_movement: false,
            has_dodge_animation: true,
            facing_yaw: 0.0,
            tags: Vec::new(),
            active_crowd_control: None,
            crowd_control_immunities: CrowdControlImmunities::empty(),
            last_attack_responses: ArrayVec::new(),
            timers: CharacterTimers::default(),
        }
    }

    // --------------------------------------
    //  State queries
    // --------------------------------------

    pub fn state(&self) -> CharacterState {
        self.state_info.state
    }

    pub fn is_idle_or_moving(&self) -> bool {
        self.state() == CharacterState::IdleWalkRun
    }

    pub fn is_dodging(&self) -> bool {
        self.state() == CharacterState::Dodging
    }

    pub fn is_blocking(&self) -> bool {
        self.state() == CharacterState::Blocking
    }

    pub fn is_normal_attacking(&self) -> bool {
        self.state() == CharacterState::Attacking
    }

    pub fn is_using_any_skill(&self) -> bool {
        self.state() == CharacterState::UsingActiveSkill
    }

    pub fn is_casting_spell(&self) -> bool {
        self.state() == CharacterState::CastingSpell
    }

    pub fn is_switching_weapon(&self) -> bool {
        self.state() == CharacterState::SwitchingWeapon
    }

    pub fn has_been_hit(&self) -> bool {
        self.state() == CharacterState::GotHit
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Records a resolved attack for cosmetic replay, evicting the oldest
    /// entry once the bounded history is full.
    pub fn push_attack_response(&mut self, response: AttackResponse) {
        if self.last_attack_responses.is_full() {
            self.last_attack_responses.remove(0);
        }
        self.last_attack_responses.push(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackOutcome;

    #[test]
    fn attack_response_history_is_bounded() {
        let mut record = CharacterRecord::new(CharacterId(1), CharacterKind::Player, "test");
        for i in 0..CombatConfig::MAX_ATTACK_RESPONSES + 3 {
            record.push_attack_response(AttackResponse {
                outcome: AttackOutcome::Hit,
                damage: i as f32,
                critical: false,
            });
        }
        assert_eq!(
            record.last_attack_responses.len(),
            CombatConfig::MAX_ATTACK_RESPONSES
        );
        // Oldest entries were evicted first.
        assert_eq!(record.last_attack_responses[0].damage, 3.0);
    }
}
