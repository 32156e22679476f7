//! Action provider abstraction.

use async_trait::async_trait;

use game_core::{ActionRequest, CharacterRecord};

use crate::oracle::OracleManager;

/// A source of transition requests for a character.
///
/// Player providers wrap client input; AI providers decide from the current
/// record. Returning `None` means the character waits this round; there is
/// no error path, matching the silent-drop policy of the simulation.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn provide_request(
        &self,
        record: &CharacterRecord,
        oracles: &OracleManager,
    ) -> Option<ActionRequest>;
}
