//! The client/server authority contract.
//!
//! The server session owns the authoritative world; clients keep replicas
//! that predict locally, forward requests, and converge on whatever the
//! server replicates back.

mod client;
mod messages;
mod server;

pub use client::{AnimationDriver, ClientReplica, RecordingDriver};
pub use messages::{ClientCommand, CosmeticEvent, StatSync, StateSync, SyncMessage};
pub use server::ServerSession;
