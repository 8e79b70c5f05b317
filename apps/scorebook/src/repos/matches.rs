//! Match persistence contract.
//!
//! Implementations are external collaborators reached over request/response
//! calls. The engines never call a store; only `ScoringService` does, and it
//! never waits on a save before returning new state to its caller.

use async_trait::async_trait;

use crate::domain::model::MatchId;
use crate::domain::snapshot::MatchRecord;
use crate::errors::StoreError;

#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Latest stored record for `id`, or `None` if the store has never seen it.
    async fn fetch_match_state(&self, id: MatchId) -> Result<Option<MatchRecord>, StoreError>;

    /// Persist `record` as the state of `id`.
    ///
    /// A record whose `version` is older than the stored one may be ignored.
    async fn save_match_state(&self, id: MatchId, record: &MatchRecord) -> Result<(), StoreError>;
}
