//! Simulation worker that owns the authoritative [`ServerSession`].
//!
//! Receives commands from [`crate::api::RuntimeHandle`], applies them in
//! arrival order, and publishes the resulting sync messages, cosmetics and
//! gameplay events on the bus.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use game_core::{AttackResponse, CharacterId, CharacterKind, CharacterRecord};

use crate::api::ActionProvider;
use crate::events::{Event, EventBus};
use crate::replication::{ClientCommand, ServerSession};

/// Commands that can be sent to the simulation worker.
pub enum Command {
    Spawn {
        record: Box<CharacterRecord>,
        reply: oneshot::Sender<()>,
    },
    Submit {
        command: ClientCommand,
        reply: oneshot::Sender<bool>,
    },
    Strike {
        attacker: CharacterId,
        defender: CharacterId,
        bc_angle: f32,
        reply: oneshot::Sender<Option<AttackResponse>>,
    },
    Tick {
        dt: f32,
        reply: oneshot::Sender<()>,
    },
    QueryCharacter {
        id: CharacterId,
        reply: oneshot::Sender<Option<Box<CharacterRecord>>>,
    },
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    session: ServerSession,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    ai_provider: Option<Box<dyn ActionProvider>>,
}

impl SimulationWorker {
    pub fn new(
        session: ServerSession,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        ai_provider: Option<Box<dyn ActionProvider>>,
    ) -> Self {
        Self {
            session,
            command_rx,
            event_bus,
            ai_provider,
        }
    }

    /// Main worker loop. Ends when every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        debug!("simulation worker shutting down");
    }

    // Replies are sent only after pending events are published, so a caller
    // that awaited a command sees everything it caused on the bus.
    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Spawn { record, reply } => {
                self.session.spawn(*record);
                self.publish_pending();
                let _ = reply.send(());
            }
            Command::Submit { command, reply } => {
                let committed = self.session.submit(command);
                self.publish_pending();
                let _ = reply.send(committed);
            }
            Command::Strike {
                attacker,
                defender,
                bc_angle,
                reply,
            } => {
                let response = self.session.strike(attacker, defender, bc_angle);
                self.publish_pending();
                let _ = reply.send(response);
            }
            Command::Tick { dt, reply } => {
                self.session.tick(dt);
                self.drive_ai().await;
                self.publish_pending();
                let _ = reply.send(());
            }
            Command::QueryCharacter { id, reply } => {
                let snapshot = self.session.world().character(id).cloned().map(Box::new);
                let _ = reply.send(snapshot);
            }
        }
    }

    /// Lets the AI provider issue one request per AI character per tick.
    /// AI requests go through the same validation path as forwarded client
    /// requests.
    async fn drive_ai(&mut self) {
        let Some(provider) = self.ai_provider.as_ref() else {
            return;
        };

        let ai_records: Vec<CharacterRecord> = self
            .session
            .world()
            .characters()
            .filter(|r| r.kind == CharacterKind::Ai && r.alive)
            .cloned()
            .collect();

        for record in ai_records {
            let request = provider
                .provide_request(&record, self.session.oracles())
                .await;
            if let Some(request) = request {
                self.session.submit(ClientCommand {
                    character: record.id,
                    request,
                });
            }
        }
    }

    fn publish_pending(&mut self) {
        for event in self.session.drain_gameplay() {
            self.event_bus.publish(Event::Combat(event));
        }
        for message in self.session.drain_sync() {
            self.event_bus.publish(Event::Replication(message));
        }
        for cosmetic in self.session.drain_cosmetics() {
            self.event_bus.publish(Event::Cosmetic(cosmetic));
        }
    }
}
