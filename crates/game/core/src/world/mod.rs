//! The authoritative combat world.
//!
//! [`CombatWorld`] owns every character record and is the single writer for
//! all of them. Transition requests are re-validated here regardless of what
//! the requesting side already checked; invalid requests are silently
//! dropped (fail safe to the previous state; by policy, nothing in combat
//! surfaces an error to its caller). Requests are processed in arrival
//! order with no reordering or batching.

mod timer;

pub use timer::{TaskScheduler, TimerHandle, TimerTask};

use std::collections::BTreeMap;

use crate::combat::{
    self, AttackInfo, AttackOutcome, AttackResponse, attack_info_for_normal_attack,
    attack_info_for_skill,
};
use crate::config::CombatConfig;
use crate::env::WorldEnv;
use crate::events::GameplayEvent;
use crate::fsm::predicates;
use crate::state::{
    AttackSection, CharacterId, CharacterRecord, CharacterState, CrowdControlEffect,
    CrowdControlImmunities, StatKind,
};

/// A transition request, either issued locally on the authoritative side or
/// forwarded from a client. The relevant eligibility predicate is always
/// re-checked before commit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionRequest {
    Dodge { dodge_index: u8, yaw: f32 },
    NormalAttack { attack_index: u8 },
    StartBlocking,
    StopBlocking,
    Jump,
    ToggleSheathe,
    SetWeaponSheathed { sheathed: bool },
    TriggerSkill { slot: u8 },
    ReleaseSkill { slot: u8 },
    StartInteraction,
    StopInteraction,
    StartLooting,
    StopLooting,
}

/// Commits a transition and records it for replication.
fn commit(
    events: &mut Vec<GameplayEvent>,
    record: &mut CharacterRecord,
    state: CharacterState,
    sub_state_index: u8,
) {
    let old = record.state_info;
    record.state_info = old.advanced(state, sub_state_index);
    events.push(GameplayEvent::StateCommitted {
        character: record.id,
        old,
        new: record.state_info,
    });
}

fn stat_changed(events: &mut Vec<GameplayEvent>, record: &CharacterRecord, kind: StatKind) {
    let stat = match kind {
        StatKind::Health => record.health,
        StatKind::Mana => record.mana,
    };
    events.push(GameplayEvent::StatChanged {
        character: record.id,
        kind,
        base: stat.base,
        max: stat.max,
        current: stat.current,
    });
}

/// Tears down whatever deferred work the character's current action has
/// outstanding, leaving the record as if the action finished cleanly.
/// Called before committing a competing transition.
fn leave_current_action(
    record: &mut CharacterRecord,
    scheduler: &mut TaskScheduler,
    events: &mut Vec<GameplayEvent>,
) {
    match record.state() {
        CharacterState::Attacking => {
            scheduler.cancel(&mut record.timers.finish_attack);
        }
        CharacterState::UsingActiveSkill => {
            scheduler.cancel(&mut record.timers.finish_skill);
            record.crowd_control_immunities = CrowdControlImmunities::empty();
            if let Some(active) = record.skills.active.take() {
                events.push(GameplayEvent::SkillCancelled {
                    character: record.id,
                    slot: active.slot,
                    group: active.group,
                });
            }
        }
        CharacterState::Blocking => {
            record.blocking_damage = false;
            scheduler.cancel(&mut record.timers.block_trigger);
        }
        CharacterState::Dodging => {
            // i-frames are left to their expiry timer.
            scheduler.cancel(&mut record.timers.finish_dodge);
        }
        CharacterState::GotHit => {
            scheduler.cancel(&mut record.timers.crowd_control);
            record.active_crowd_control = None;
        }
        CharacterState::SwitchingWeapon => {
            scheduler.cancel(&mut record.timers.finish_weapon_switch);
        }
        _ => {}
    }
}

/// Authoritative simulation state: all character records plus the task
/// scheduler, stepped by a single cooperative tick.
#[derive(Default)]
pub struct CombatWorld {
    characters: BTreeMap<CharacterId, CharacterRecord>,
    scheduler: TaskScheduler,
    events: Vec<GameplayEvent>,
    /// Monotonic commit counter mixed into per-event rng seeds.
    commits: u64,
}

impl CombatWorld {
    pub fn new() -> Self {
        Self::default()
    }

    // --------------------------------------
    //  Character management
    // --------------------------------------

    pub fn spawn(&mut self, record: CharacterRecord) {
        self.characters.insert(record.id, record);
    }

    /// Removes a character, cancelling every timer it owns so no stale
    /// callback can mutate a since-repurposed id.
    pub fn remove(&mut self, id: CharacterId) -> Option<CharacterRecord> {
        let mut record = self.characters.remove(&id)?;
        for handle in record.timers.all_mut() {
            self.scheduler.cancel(handle);
        }
        Some(record)
    }

    pub fn character(&self, id: CharacterId) -> Option<&CharacterRecord> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut CharacterRecord> {
        self.characters.get_mut(&id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.characters.values()
    }

    /// Takes the events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameplayEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    // --------------------------------------
    //  Tick
    // --------------------------------------

    /// Advances the simulation one frame: skill cooldowns and chain windows
    /// first, then due timers in deterministic order.
    pub fn tick(&mut self, dt: f32, env: &WorldEnv<'_>) {
        let Self {
            characters, events, ..
        } = self;
        for record in characters.values_mut() {
            if record.skills.update(dt) {
                events.push(GameplayEvent::ChainWindowClosed {
                    character: record.id,
                });
            }
        }

        for task in self.scheduler.advance(dt) {
            self.apply_timer_task(task, env);
        }
    }

    // --------------------------------------
    //  Transition requests
    // --------------------------------------

    /// Validates and applies a transition request. Returns whether anything
    /// was committed; ineligible requests leave all state untouched.
    pub fn handle_request(
        &mut self,
        id: CharacterId,
        request: ActionRequest,
        env: &WorldEnv<'_>,
    ) -> bool {
        let params = env.tables.combat();
        let Self {
            characters,
            scheduler,
            events,
            ..
        } = self;
        let Some(record) = characters.get_mut(&id) else {
            return false;
        };

        match request {
            ActionRequest::Dodge { dodge_index, yaw } => {
                if !predicates::can_dodge(record) {
                    return false;
                }
                leave_current_action(record, scheduler, events);
                record.facing_yaw = yaw;
                commit(events, record, CharacterState::Dodging, dodge_index);
                scheduler.schedule(
                    &mut record.timers.iframe_trigger,
                    params.dodge_immunity_trigger_delay,
                    TimerTask::EnableIFrames {
                        character: id,
                        duration: params.dodge_immunity_duration,
                    },
                );
                scheduler.schedule(
                    &mut record.timers.finish_dodge,
                    params.dodge_duration,
                    TimerTask::FinishDodge(id),
                );
                true
            }

            ActionRequest::NormalAttack { attack_index } => {
                let Some(section) = AttackSection::from_attack_index(attack_index) else {
                    return false;
                };
                let Some(profile) = env.tables.weapon_profile(record.loadout.weapon) else {
                    return false;
                };

                if section.starts_combo() {
                    if !predicates::can_normal_attack(record) {
                        return false;
                    }
                } else {
                    // Continuation swings only advance an ongoing combo.
                    let current =
                        AttackSection::from_attack_index(record.state_info.sub_state_index);
                    let expected = current.and_then(|c| c.next_in_combo(profile.combo_length));
                    if !record.is_normal_attacking() || expected != Some(section) {
                        return false;
                    }
                }

                // A new swing supersedes the previous swing's finish timer.
                commit(events, record, CharacterState::Attacking, attack_index);
                scheduler.schedule(
                    &mut record.timers.finish_attack,
                    profile.swing_duration,
                    TimerTask::FinishNormalAttack(id),
                );
                true
            }

            ActionRequest::StartBlocking => {
                if !predicates::can_guard_against_attacks(record) {
                    return false;
                }
                leave_current_action(record, scheduler, events);
                commit(events, record, CharacterState::Blocking, 0);
                scheduler.schedule(
                    &mut record.timers.block_trigger,
                    params.damage_block_trigger_delay,
                    TimerTask::EnableDamageBlocking(id),
                );
                true
            }

            ActionRequest::StopBlocking => {
                if !record.is_blocking() {
                    return false;
                }
                record.blocking_damage = false;
                scheduler.cancel(&mut record.timers.block_trigger);
                commit(events, record, CharacterState::IdleWalkRun, 0);
                true
            }

            ActionRequest::Jump => {
                if !predicates::can_jump(record) {
                    return false;
                }
                leave_current_action(record, scheduler, events);
                commit(events, record, CharacterState::Jumping, 0);
                true
            }

            ActionRequest::ToggleSheathe => {
                if !predicates::can_toggle_sheathe(record) {
                    return false;
                }
                record.loadout.sheathed = !record.loadout.sheathed;
                commit(events, record, CharacterState::SwitchingWeapon, 0);
                scheduler.schedule(
                    &mut record.timers.finish_weapon_switch,
                    params.weapon_switch_duration,
                    TimerTask::FinishWeaponSwitch(id),
                );
                true
            }

            ActionRequest::SetWeaponSheathed { sheathed } => {
                if !record.alive {
                    return false;
                }
                record.loadout.sheathed = sheathed;
                true
            }

            ActionRequest::TriggerSkill { slot } => {
                Self::trigger_skill(record, scheduler, events, slot, env, &params)
            }

            ActionRequest::ReleaseSkill { slot } => {
                let Some(active) = record.skills.active.clone() else {
                    return false;
                };
                if active.slot != slot || active.is_released() || !record.is_using_any_skill() {
                    return false;
                }
                let Some(def) = env.skills.skill(&active.group) else {
                    return false;
                };
                if !def.charged {
                    return false;
                }

                let release_index = slot + CombatConfig::SKILL_RELEASE_OFFSET;
                if let Some(active) = record.skills.active.as_mut() {
                    active.sub_state_index = release_index;
                }
                commit(events, record, CharacterState::UsingActiveSkill, release_index);
                scheduler.schedule(
                    &mut record.timers.finish_skill,
                    def.skill_duration,
                    TimerTask::FinishSkill(id),
                );
                true
            }

            ActionRequest::StartInteraction => {
                if !predicates::can_start_interaction(record) {
                    return false;
                }
                commit(events, record, CharacterState::Interacting, 0);
                true
            }

            ActionRequest::StopInteraction => {
                if record.state() != CharacterState::Interacting {
                    return false;
                }
                commit(events, record, CharacterState::IdleWalkRun, 0);
                true
            }

            ActionRequest::StartLooting => {
                if !predicates::can_start_interaction(record) {
                    return false;
                }
                commit(events, record, CharacterState::Looting, 0);
                true
            }

            ActionRequest::StopLooting => {
                if record.state() != CharacterState::Looting {
                    return false;
                }
                commit(events, record, CharacterState::IdleWalkRun, 0);
                true
            }
        }
    }

    fn trigger_skill(
        record: &mut CharacterRecord,
        scheduler: &mut TaskScheduler,
        events: &mut Vec<GameplayEvent>,
        slot: u8,
        env: &WorldEnv<'_>,
        params: &crate::env::CombatParams,
    ) -> bool {
        let Some(group) = record.skills.slot(slot).map(|s| s.group.clone()) else {
            return false;
        };
        let Some(def) = env.skills.skill(&group) else {
            return false;
        };
        if !predicates::can_trigger_skill(record, slot, def) {
            return false;
        }
        if record.mana.current < def.mana_cost || record.stamina.current < def.stamina_cost {
            return false;
        }

        let via_chain = record.skills.can_use_chain_skill()
            && record.skills.superseding_chain_slot() == Some(slot);

        leave_current_action(record, scheduler, events);
        if via_chain {
            record.skills.close_chain_window();
            events.push(GameplayEvent::ChainWindowClosed {
                character: record.id,
            });
        }

        record.mana.reduce(def.mana_cost);
        record.stamina.reduce(def.stamina_cost);
        stat_changed(events, record, StatKind::Mana);

        if let Some(slot_state) = record.skills.slot_mut(slot) {
            slot_state.state.start_cooldown(def.cooldown);
        }
        record.crowd_control_immunities = def.crowd_control_immunities;
        record.skills.active = Some(crate::skill::ActiveSkill {
            slot,
            group: group.clone(),
            sub_state_index: slot,
        });

        commit(events, record, CharacterState::UsingActiveSkill, slot);
        events.push(GameplayEvent::SkillActivated {
            character: record.id,
            slot,
            group,
        });

        // Charged skills hold until released; everything else finishes on
        // its duration timer.
        if !def.charged {
            scheduler.schedule(
                &mut record.timers.finish_skill,
                def.skill_duration,
                TimerTask::FinishSkill(record.id),
            );
        }
        true
    }

    // --------------------------------------
    //  Attack resolution
    // --------------------------------------

    /// Builds the attack description for the attacker's current action:
    /// the active skill while using one, otherwise the current swing of a
    /// normal attack.
    pub fn attack_info_for_current_action(
        &self,
        id: CharacterId,
        env: &WorldEnv<'_>,
    ) -> Option<AttackInfo> {
        let record = self.characters.get(&id)?;
        let params = env.tables.combat();

        if record.is_using_any_skill() {
            let active = record.skills.active.as_ref()?;
            let def = env.skills.skill(&active.group)?;
            return Some(attack_info_for_skill(def, &record.primary, &params));
        }

        if record.is_normal_attacking() {
            let section = AttackSection::from_attack_index(record.state_info.sub_state_index)?;
            let profile = env.tables.weapon_profile(record.loadout.weapon)?;
            return Some(attack_info_for_normal_attack(
                &profile,
                section,
                &record.primary,
                &params,
            ));
        }

        None
    }

    /// Resolves the attacker's current action against a defender.
    /// Convenience wrapper around [`Self::receive_attack`].
    pub fn strike(
        &mut self,
        attacker: CharacterId,
        defender: CharacterId,
        bc_angle: f32,
        env: &WorldEnv<'_>,
    ) -> Option<AttackResponse> {
        let attack = self.attack_info_for_current_action(attacker, env)?;
        self.receive_attack(attacker, defender, &attack, bc_angle, env)
    }

    /// Authoritative attack resolution and application.
    ///
    /// `bc_angle` is the absolute angle in degrees between the defender's
    /// facing and the incoming attack direction.
    pub fn receive_attack(
        &mut self,
        attacker: CharacterId,
        defender: CharacterId,
        attack: &AttackInfo,
        bc_angle: f32,
        env: &WorldEnv<'_>,
    ) -> Option<AttackResponse> {
        let params = env.tables.combat();

        let record = self.characters.get(&defender)?;
        if !record.alive {
            return None;
        }

        let seed = crate::env::compute_seed(env.seed, self.commits, defender.0, 0);
        self.commits += 1;
        let roll = env.rng.roll_unit(seed);

        let resolution = combat::resolve_attack(record, attack, bc_angle, roll, &params);
        let response = resolution.response;

        {
            let record = self.characters.get_mut(&defender).expect("checked above");
            record.push_attack_response(response);
            record.in_combat = true;
        }
        if let Some(att) = self.characters.get_mut(&attacker) {
            att.in_combat = true;
        }

        match response.outcome {
            AttackOutcome::Dodged | AttackOutcome::Deflected => {
                self.events.push(GameplayEvent::DodgedAttack {
                    character: defender,
                    attacker,
                });
                self.events.push(GameplayEvent::UnsuccessfulHit {
                    attacker,
                    target: defender,
                });
            }
            AttackOutcome::Blocked => {
                self.apply_damage(attacker, defender, response.damage);
                self.events.push(GameplayEvent::BlockedAttack {
                    character: defender,
                    attacker,
                });
                self.events.push(GameplayEvent::AttackBlockedCosmetic {
                    character: defender,
                });
                self.events.push(GameplayEvent::UnsuccessfulHit {
                    attacker,
                    target: defender,
                });
            }
            AttackOutcome::Hit => {
                self.events.push(GameplayEvent::ReceivedHit {
                    character: defender,
                    attacker,
                    response,
                });
                self.events.push(GameplayEvent::SuccessfulHit {
                    attacker,
                    target: defender,
                    critical: response.critical,
                });
                self.events.push(GameplayEvent::CameraShakeRequested {
                    character: defender,
                    intensity: attack.camera_shake,
                });

                let died = self.apply_damage(attacker, defender, response.damage);
                if !died && let Some((effect, duration)) = resolution.crowd_control {
                    self.apply_crowd_control(defender, effect, duration);
                }
            }
        }

        Some(response)
    }

    /// Subtracts damage from the defender's health. Returns true if the
    /// defender died.
    fn apply_damage(&mut self, attacker: CharacterId, defender: CharacterId, damage: f32) -> bool {
        let died = {
            let Self {
                characters, events, ..
            } = self;
            let Some(record) = characters.get_mut(&defender) else {
                return false;
            };
            let amount = damage.round().max(0.0) as i32;
            if amount > 0 {
                record.health.reduce(amount);
                stat_changed(events, record, StatKind::Health);
            }

            // God mode never reaches zero here: its damage is forced to 0
            // before application.
            record.health.is_depleted() && record.alive
        };

        if died {
            self.kill(defender);
            self.events.push(GameplayEvent::KilledEnemy {
                attacker,
                victim: defender,
            });
        }
        died
    }

    // --------------------------------------
    //  Crowd control
    // --------------------------------------

    /// Applies a crowd-control effect, honoring per-effect eligibility.
    ///
    /// Every successful apply of a sustained effect schedules exactly one
    /// revert; re-applying replaces the outstanding timer so a refreshed
    /// duration can never be cut short by the earlier revert.
    pub fn apply_crowd_control(
        &mut self,
        id: CharacterId,
        effect: CrowdControlEffect,
        duration: f32,
    ) -> bool {
        let Self {
            characters,
            scheduler,
            events,
            ..
        } = self;
        let Some(record) = characters.get_mut(&id) else {
            return false;
        };
        if !combat::can_apply_crowd_control(record, effect) {
            return false;
        }

        events.push(GameplayEvent::CrowdControlApplied {
            character: id,
            effect,
            duration,
        });

        if !effect.has_revert() {
            // Flinch: cosmetic hit reaction, no forced state.
            return true;
        }

        leave_current_action(record, scheduler, events);
        record.active_crowd_control = Some(effect);
        commit(events, record, CharacterState::GotHit, effect.sub_state_index());
        scheduler.schedule(
            &mut record.timers.crowd_control,
            duration,
            TimerTask::RevertCrowdControl {
                character: id,
                effect,
            },
        );
        true
    }

    /// Marks a character dead. Death is layered on top of the state
    /// machine and can happen from any state; every outstanding timer is
    /// cancelled so no revert or finish fires afterwards.
    pub fn kill(&mut self, id: CharacterId) {
        let Self {
            characters,
            scheduler,
            events,
            ..
        } = self;
        let Some(record) = characters.get_mut(&id) else {
            return;
        };
        if !record.alive {
            return;
        }
        record.alive = false;
        record.iframes_active = false;
        record.blocking_damage = false;
        record.active_crowd_control = None;
        record.crowd_control_immunities = CrowdControlImmunities::empty();
        record.skills.active = None;
        record.skills.close_chain_window();
        for handle in record.timers.all_mut() {
            scheduler.cancel(handle);
        }
        events.push(GameplayEvent::Died { character: id });
    }

    // --------------------------------------
    //  Animation collaborator notifications
    // --------------------------------------

    /// Called when the movement collaborator reports a landing.
    pub fn notify_landed(&mut self, id: CharacterId) {
        let Self {
            characters, events, ..
        } = self;
        if let Some(record) = characters.get_mut(&id)
            && record.state() == CharacterState::Jumping
        {
            commit(events, record, CharacterState::IdleWalkRun, 0);
        }
    }

    // --------------------------------------
    //  Timer task application
    // --------------------------------------

    /// Applies one due timer task. Every branch re-checks its precondition:
    /// timers are not coordinated with anything else that may have touched
    /// the character since they were scheduled.
    fn apply_timer_task(&mut self, task: TimerTask, env: &WorldEnv<'_>) {
        let params = env.tables.combat();
        let Self {
            characters,
            scheduler,
            events,
            ..
        } = self;

        match task {
            TimerTask::FinishDodge(id) => {
                if let Some(record) = characters.get_mut(&id) {
                    record.timers.finish_dodge = TimerHandle::default();
                    if record.alive && record.is_dodging() {
                        commit(events, record, CharacterState::IdleWalkRun, 0);
                    }
                }
            }
            TimerTask::EnableIFrames {
                character,
                duration,
            } => {
                if let Some(record) = characters.get_mut(&character) {
                    record.timers.iframe_trigger = TimerHandle::default();
                    if record.alive {
                        record.iframes_active = true;
                        scheduler.schedule(
                            &mut record.timers.iframe_expiry,
                            duration,
                            TimerTask::DisableIFrames(character),
                        );
                    }
                }
            }
            TimerTask::DisableIFrames(id) => {
                if let Some(record) = characters.get_mut(&id) {
                    record.timers.iframe_expiry = TimerHandle::default();
                    record.iframes_active = false;
                }
            }
            TimerTask::EnableDamageBlocking(id) => {
                if let Some(record) = characters.get_mut(&id) {
                    record.timers.block_trigger = TimerHandle::default();
                    if record.alive && record.is_blocking() {
                        record.blocking_damage = true;
                    }
                }
            }
            TimerTask::FinishNormalAttack(id) => {
                if let Some(record) = characters.get_mut(&id) {
                    record.timers.finish_attack = TimerHandle::default();
                    if record.alive && record.is_normal_attacking() {
                        commit(events, record, CharacterState::IdleWalkRun, 0);
                    }
                }
            }
            TimerTask::FinishSkill(id) => {
                if let Some(record) = characters.get_mut(&id) {
                    record.timers.finish_skill = TimerHandle::default();
                    let Some(active) = record.skills.active.take() else {
                        return;
                    };
                    record.crowd_control_immunities = CrowdControlImmunities::empty();
                    events.push(GameplayEvent::SkillFinished {
                        character: id,
                        slot: active.slot,
                        group: active.group.clone(),
                    });
                    if record.alive && record.is_using_any_skill() {
                        commit(events, record, CharacterState::IdleWalkRun, 0);
                    }

                    // A finished skill with a superseding group opens the
                    // chain window for that group's equipped slot.
                    if let Some(def) = env.skills.skill(&active.group)
                        && let Some(group) = def.chains_into()
                        && let Some(slot) = record.skills.slot_for_group(group)
                    {
                        record
                            .skills
                            .open_chain_window(slot, params.chain_skill_reset_delay);
                        events.push(GameplayEvent::ChainWindowOpened {
                            character: id,
                            superseding_slot: slot,
                        });
                    }
                }
            }
            TimerTask::FinishWeaponSwitch(id) => {
                if let Some(record) = characters.get_mut(&id) {
                    record.timers.finish_weapon_switch = TimerHandle::default();
                    if record.alive && record.is_switching_weapon() {
                        commit(events, record, CharacterState::IdleWalkRun, 0);
                    }
                }
            }
            TimerTask::RevertCrowdControl { character, effect } => {
                if let Some(record) = characters.get_mut(&character) {
                    record.timers.crowd_control = TimerHandle::default();
                    // The effect may have been superseded or the character
                    // may have died since this was scheduled.
                    if record.alive && record.active_crowd_control == Some(effect) {
                        record.active_crowd_control = None;
                        events.push(GameplayEvent::CrowdControlReverted {
                            character,
                            effect,
                        });
                        if record.has_been_hit() {
                            commit(events, record, CharacterState::IdleWalkRun, 0);
                        }
                    }
                }
            }
        }
    }
}
