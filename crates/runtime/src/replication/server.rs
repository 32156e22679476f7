//! Authoritative server session.

use game_core::{
    AttackInfo, AttackResponse, CharacterId, CharacterRecord, CombatWorld, GameplayEvent, StatKind,
};

use crate::oracle::OracleManager;
use crate::replication::{ClientCommand, CosmeticEvent, StatSync, StateSync, SyncMessage};

/// The authoritative side of the replication bridge.
///
/// Owns the [`CombatWorld`] and is its only writer. Every committed
/// mutation is translated into per-character-ordered sync messages;
/// gameplay events are retained for the event bus. Forwarded requests are
/// re-validated by the world regardless of what the client already
/// checked; nothing a client claims is trusted.
pub struct ServerSession {
    world: CombatWorld,
    oracles: OracleManager,
    seed: u64,
    sync_outbox: Vec<SyncMessage>,
    cosmetic_outbox: Vec<CosmeticEvent>,
    gameplay_outbox: Vec<GameplayEvent>,
}

impl ServerSession {
    pub fn new(oracles: OracleManager, seed: u64) -> Self {
        Self {
            world: CombatWorld::new(),
            oracles,
            seed,
            sync_outbox: Vec::new(),
            cosmetic_outbox: Vec::new(),
            gameplay_outbox: Vec::new(),
        }
    }

    pub fn world(&self) -> &CombatWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut CombatWorld {
        &mut self.world
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn spawn(&mut self, record: CharacterRecord) {
        // Announce the spawn state so late joiners converge immediately.
        let info = record.state_info;
        let id = record.id;
        self.world.spawn(record);
        self.sync_outbox.push(SyncMessage::State(StateSync {
            character: id,
            state: info.state,
            sub_state_index: info.sub_state_index,
            replication_index: info.replication_index,
        }));
    }

    /// Applies one forwarded action request in arrival order. Returns
    /// whether the server committed it; rejected requests change nothing
    /// and reply nothing further (the client's provisional guess is
    /// corrected by the next replicated tuple).
    pub fn submit(&mut self, command: ClientCommand) -> bool {
        let env = self.oracles.env(self.seed);
        let committed = self
            .world
            .handle_request(command.character, command.request.clone(), &env);
        if !committed {
            tracing::debug!(
                character = command.character.0,
                request = ?command.request,
                "dropped ineligible action request"
            );
            // Re-announce the authoritative tuple so an optimistic client
            // reverts its local guess.
            if let Some(record) = self.world.character(command.character) {
                let info = record.state_info;
                self.sync_outbox.push(SyncMessage::State(StateSync {
                    character: command.character,
                    state: info.state,
                    sub_state_index: info.sub_state_index,
                    replication_index: info.replication_index,
                }));
            }
        }
        self.pump_events();
        committed
    }

    /// Advances the simulation one frame.
    pub fn tick(&mut self, dt: f32) {
        let env = self.oracles.env(self.seed);
        self.world.tick(dt, &env);
        self.pump_events();
    }

    /// Resolves the attacker's current action against a defender.
    pub fn strike(
        &mut self,
        attacker: CharacterId,
        defender: CharacterId,
        bc_angle: f32,
    ) -> Option<AttackResponse> {
        let env = self.oracles.env(self.seed);
        let response = self.world.strike(attacker, defender, bc_angle, &env);
        self.pump_events();
        response
    }

    /// Resolves an explicit attack description against a defender.
    pub fn receive_attack(
        &mut self,
        attacker: CharacterId,
        defender: CharacterId,
        attack: &AttackInfo,
        bc_angle: f32,
    ) -> Option<AttackResponse> {
        let env = self.oracles.env(self.seed);
        let response = self
            .world
            .receive_attack(attacker, defender, attack, bc_angle, &env);
        self.pump_events();
        response
    }

    /// Translates drained world events into sync messages and cosmetics.
    fn pump_events(&mut self) {
        for event in self.world.drain_events() {
            match &event {
                GameplayEvent::StateCommitted { character, new, .. } => {
                    self.sync_outbox.push(SyncMessage::State(StateSync {
                        character: *character,
                        state: new.state,
                        sub_state_index: new.sub_state_index,
                        replication_index: new.replication_index,
                    }));
                }
                GameplayEvent::StatChanged {
                    character,
                    kind,
                    base,
                    max,
                    current,
                } => {
                    self.sync_outbox.push(SyncMessage::Stat(StatSync {
                        character: *character,
                        kind: *kind,
                        base: *base,
                        max: *max,
                        current: *current,
                    }));
                    // Mirrored as a purely-cosmetic one-shot update.
                    self.cosmetic_outbox.push(match kind {
                        StatKind::Health => CosmeticEvent::HealthUpdated {
                            character: *character,
                            base: *base,
                            max: *max,
                            current: *current,
                        },
                        StatKind::Mana => CosmeticEvent::ManaUpdated {
                            character: *character,
                            base: *base,
                            max: *max,
                            current: *current,
                        },
                    });
                }
                GameplayEvent::AttackBlockedCosmetic { character } => {
                    self.cosmetic_outbox.push(CosmeticEvent::AttackBlocked {
                        character: *character,
                    });
                }
                GameplayEvent::CameraShakeRequested {
                    character,
                    intensity,
                } => {
                    self.cosmetic_outbox.push(CosmeticEvent::CameraShake {
                        character: *character,
                        intensity: *intensity,
                    });
                }
                GameplayEvent::ReceivedHit {
                    character,
                    response,
                    ..
                } => {
                    self.cosmetic_outbox.push(CosmeticEvent::HitEffect {
                        character: *character,
                        critical: response.critical,
                    });
                }
                _ => {}
            }
            self.gameplay_outbox.push(event);
        }
    }

    /// Takes the reliable sync stream accumulated since the last drain.
    /// Per character, messages are in the order the server applied them.
    pub fn drain_sync(&mut self) -> Vec<SyncMessage> {
        std::mem::take(&mut self.sync_outbox)
    }

    /// Takes pending one-shot cosmetic events.
    pub fn drain_cosmetics(&mut self) -> Vec<CosmeticEvent> {
        std::mem::take(&mut self.cosmetic_outbox)
    }

    /// Takes pending gameplay events for the event bus.
    pub fn drain_gameplay(&mut self) -> Vec<GameplayEvent> {
        std::mem::take(&mut self.gameplay_outbox)
    }
}
