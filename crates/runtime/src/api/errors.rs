//! Runtime error types.
//!
//! These cover the orchestration layer only. Combat logic itself never
//! surfaces errors: ineligible requests are silent no-ops by design.

use game_core::CharacterId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("command channel closed; runtime has shut down")]
    CommandChannelClosed,

    #[error("reply channel closed: {0}")]
    ReplyChannelClosed(#[from] tokio::sync::oneshot::error::RecvError),

    #[error("worker task failed to join: {0}")]
    WorkerJoin(#[from] tokio::task::JoinError),

    #[error("unknown character {0:?}")]
    CharacterNotFound(CharacterId),
}
