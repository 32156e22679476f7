//! Client-side replica with local prediction.

use game_core::{
    ActionRequest, CharacterId, CharacterState, CharacterStateInfo, ClientReaction, CombatConfig,
    reactions_for_transition,
};

use crate::replication::{ClientCommand, StatSync, StateSync};

/// Sink for the visual reactions derived from replicated state. In a real
/// client this drives montage playback; the contract back is blend-out/end
/// notifications, which re-enter the simulation as action requests.
pub trait AnimationDriver {
    fn react(&mut self, character: CharacterId, reaction: ClientReaction);
}

/// [`AnimationDriver`] that records reactions, for tests and headless
/// clients.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub reactions: Vec<(CharacterId, ClientReaction)>,
}

impl AnimationDriver for RecordingDriver {
    fn react(&mut self, character: CharacterId, reaction: ClientReaction) {
        self.reactions.push((character, reaction));
    }
}

/// Replicated view of one character on a client.
///
/// The replica applies a provisional local guess for its own requests
/// (immediate responsiveness) and forwards them to the server. Whatever
/// the server replicates back overwrites the guess, matching it if the
/// prediction was right, correcting it otherwise. Applying the same
/// replicated tuple twice is a no-op.
#[derive(Debug)]
pub struct ClientReplica {
    character: CharacterId,
    observed: CharacterStateInfo,
    predicted: Option<CharacterStateInfo>,
    health: Option<StatSync>,
    mana: Option<StatSync>,
}

impl ClientReplica {
    pub fn new(character: CharacterId) -> Self {
        Self {
            character,
            observed: CharacterStateInfo::default(),
            predicted: None,
            health: None,
            mana: None,
        }
    }

    pub fn character(&self) -> CharacterId {
        self.character
    }

    /// The last tuple the server replicated.
    pub fn observed(&self) -> CharacterStateInfo {
        self.observed
    }

    /// The tuple the client should render right now: the provisional local
    /// guess if one is outstanding, otherwise the authoritative state.
    pub fn effective(&self) -> CharacterStateInfo {
        self.predicted.unwrap_or(self.observed)
    }

    pub fn health(&self) -> Option<StatSync> {
        self.health
    }

    pub fn mana(&self) -> Option<StatSync> {
        self.mana
    }

    /// Builds the forwarded command for an action request, applying the
    /// local guess for requests whose visual outcome is predictable.
    pub fn predict_request(&mut self, request: ActionRequest) -> ClientCommand {
        if let Some((state, sub)) = predicted_tuple(&request) {
            // Keep the observed replication index: the guess is provisional
            // and will be overwritten by the next authoritative tuple.
            self.predicted = Some(CharacterStateInfo {
                state,
                sub_state_index: sub,
                replication_index: self.observed.replication_index,
            });
        }
        ClientCommand {
            character: self.character,
            request,
        }
    }

    /// Applies a replicated state tuple. Returns true if it dispatched
    /// (false for duplicates, which have no further side effects).
    pub fn apply_state_sync(
        &mut self,
        sync: &StateSync,
        driver: &mut dyn AnimationDriver,
    ) -> bool {
        debug_assert_eq!(sync.character, self.character);
        let new = CharacterStateInfo {
            state: sync.state,
            sub_state_index: sync.sub_state_index,
            replication_index: sync.replication_index,
        };

        // Authority overwrites any lingering local guess, even when the
        // authoritative tuple did not move (a rejected request).
        self.predicted = None;

        if new == self.observed {
            // Duplicate delivery (reconnect, redundant announce): replaying
            // it must not double-apply.
            return false;
        }

        let old = self.observed;
        self.observed = new;

        for reaction in reactions_for_transition(old, new) {
            driver.react(self.character, reaction);
        }
        true
    }

    pub fn apply_stat_sync(&mut self, sync: &StatSync) {
        debug_assert_eq!(sync.character, self.character);
        match sync.kind {
            game_core::StatKind::Health => self.health = Some(*sync),
            game_core::StatKind::Mana => self.mana = Some(*sync),
        }
    }
}

/// Local guess for the tuple a request would commit, for requests whose
/// visual outcome is predictable without server data.
fn predicted_tuple(request: &ActionRequest) -> Option<(CharacterState, u8)> {
    match request {
        ActionRequest::Dodge { dodge_index, .. } => Some((CharacterState::Dodging, *dodge_index)),
        ActionRequest::NormalAttack { attack_index } => {
            Some((CharacterState::Attacking, *attack_index))
        }
        ActionRequest::StartBlocking => Some((CharacterState::Blocking, 0)),
        ActionRequest::StopBlocking => Some((CharacterState::IdleWalkRun, 0)),
        ActionRequest::Jump => Some((CharacterState::Jumping, 0)),
        ActionRequest::TriggerSkill { slot } => Some((CharacterState::UsingActiveSkill, *slot)),
        ActionRequest::ReleaseSkill { slot } => Some((
            CharacterState::UsingActiveSkill,
            slot + CombatConfig::SKILL_RELEASE_OFFSET,
        )),
        // Sheathing, interaction and looting wait for the server.
        _ => None,
    }
}
