//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting action requests, stepping the simulation, and streaming
//! events from specific topics.

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{AttackResponse, CharacterId, CharacterRecord};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::replication::ClientCommand;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Adds a character to the authoritative world.
    pub async fn spawn(&self, record: CharacterRecord) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Spawn {
                record: Box::new(record),
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        Ok(reply_rx.await?)
    }

    /// Submits a forwarded action request for authoritative validation.
    /// Returns whether the server committed it.
    pub async fn submit(&self, command: ClientCommand) -> Result<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Submit {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        Ok(reply_rx.await?)
    }

    /// Resolves the attacker's current action against a defender.
    pub async fn strike(
        &self,
        attacker: CharacterId,
        defender: CharacterId,
        bc_angle: f32,
    ) -> Result<Option<AttackResponse>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Strike {
                attacker,
                defender,
                bc_angle,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        Ok(reply_rx.await?)
    }

    /// Advances the simulation by `dt` seconds.
    pub async fn tick(&self, dt: f32) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Tick { dt, reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        Ok(reply_rx.await?)
    }

    /// Reads a snapshot of one character record.
    pub async fn query_character(&self, id: CharacterId) -> Result<CharacterRecord> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::QueryCharacter { id, reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx
            .await?
            .map(|boxed| *boxed)
            .ok_or(RuntimeError::CharacterNotFound(id))
    }

    /// Subscribe to events from a specific topic.
    ///
    /// # Topics
    ///
    /// - [`Topic::Combat`] - gameplay events (hits, skills, crowd control)
    /// - [`Topic::Replication`] - reliable state/stat sync messages
    /// - [`Topic::Cosmetic`] - one-shot cosmetic triggers
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
