//! Scoring sessions: the caller-side layer around the pure engines.
//!
//! Each match gets one session guarded by its own `tokio::sync::Mutex`, so
//! mutations of a given match are applied one at a time while different
//! matches proceed independently. After every accepted transition the new
//! record is handed to a background save; the caller gets the new state
//! immediately and a failed save never rolls it back.

use std::sync::Arc;

use dashmap::DashMap;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::scoring::ScoringConfig;
use crate::domain::badminton::{BadmintonMatch, BadmintonSetup};
use crate::domain::command::ScoringCommand;
use crate::domain::cricket::{CricketMatch, CricketSetup};
use crate::domain::model::{MatchId, Side, Team};
use crate::domain::snapshot::{MatchRecord, MatchState};
use crate::domain::transition::{derive_match_transitions, MatchTransition};
use crate::error::AppError;
use crate::errors::StoreError;
use crate::repos::matches::MatchStore;

/// Result of an accepted command.
#[derive(Debug, Clone)]
pub struct ScoringOutcome {
    pub record: MatchRecord,
    pub transitions: Vec<MatchTransition>,
}

type Session = Arc<Mutex<Option<MatchRecord>>>;

pub struct ScoringService {
    store: Arc<dyn MatchStore>,
    config: ScoringConfig,
    sessions: DashMap<MatchId, Session>,
}

impl ScoringService {
    pub fn new(store: Arc<dyn MatchStore>, config: ScoringConfig) -> Self {
        Self {
            store,
            config,
            sessions: DashMap::new(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Start a badminton match. `best_of` falls back to the configured default.
    pub async fn create_badminton(
        &self,
        teams: [Team; 2],
        best_of: Option<u8>,
        first_server: Side,
    ) -> Result<MatchRecord, AppError> {
        let engine = BadmintonMatch::new(BadmintonSetup {
            teams,
            best_of: best_of.unwrap_or(self.config.default_best_of),
            first_server,
        })?;
        self.create(engine.into()).await
    }

    /// Start a cricket match. `overs` falls back to the configured default.
    pub async fn create_cricket(
        &self,
        teams: [Team; 2],
        overs: Option<u8>,
        batting_first: Side,
    ) -> Result<MatchRecord, AppError> {
        let engine = CricketMatch::new(CricketSetup {
            teams,
            overs_per_innings: overs.unwrap_or(self.config.default_overs),
            batting_first,
        })?;
        self.create(engine.into()).await
    }

    /// Current record for `id`: the local session if present, else the store
    /// (replayed and reconciled before use).
    pub async fn load(&self, id: MatchId) -> Result<MatchRecord, AppError> {
        let session = self.session(id);
        let mut slot = session.lock().await;
        let record = self.ensure_loaded(id, &session, &mut slot).await?;
        Ok(record.clone())
    }

    /// Apply `command` to match `id`.
    ///
    /// A rejected command leaves the session untouched and returns the
    /// engine's error.
    pub async fn apply(
        &self,
        id: MatchId,
        command: ScoringCommand,
    ) -> Result<ScoringOutcome, AppError> {
        let session = self.session(id);
        let mut slot = session.lock().await;
        let record = self.ensure_loaded(id, &session, &mut slot).await?;

        let next = match record.state.apply(&command) {
            Ok(next) => next,
            Err(err) => {
                info!(
                    match_id = %id,
                    command = command.name(),
                    code = %err.code(),
                    detail = err.detail(),
                    "command rejected"
                );
                return Err(err.into());
            }
        };

        let transitions = derive_match_transitions(&record.state, &next);
        record.advance(next, OffsetDateTime::now_utc());

        debug!(
            match_id = %id,
            command = command.name(),
            undo = command.is_undo(),
            version = record.version,
            events = record.state.event_count(),
            "command applied"
        );
        for transition in &transitions {
            info!(
                match_id = %id,
                version = record.version,
                transition = ?transition,
                "match transition"
            );
        }

        let outcome = ScoringOutcome {
            record: record.clone(),
            transitions,
        };
        self.spawn_save(outcome.record.clone());
        Ok(outcome)
    }

    /// Drop the local session for `id`; the next access reloads from the store.
    pub fn evict(&self, id: MatchId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    async fn create(&self, state: MatchState) -> Result<MatchRecord, AppError> {
        let id = MatchId::new();
        let record = MatchRecord::new(id, state, OffsetDateTime::now_utc());
        info!(match_id = %id, sport = %record.state.sport(), "match created");

        self.sessions
            .insert(id, Arc::new(Mutex::new(Some(record.clone()))));
        self.spawn_save(record.clone());
        Ok(record)
    }

    fn session(&self, id: MatchId) -> Session {
        self.sessions
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }

    /// Fill an empty session from the store. A failed fetch releases the
    /// session so unknown ids do not accumulate.
    async fn ensure_loaded<'a>(
        &self,
        id: MatchId,
        session: &Session,
        slot: &'a mut Option<MatchRecord>,
    ) -> Result<&'a mut MatchRecord, AppError> {
        if slot.is_none() {
            match self.fetch(id).await {
                Ok(fetched) => *slot = Some(fetched),
                Err(err) => {
                    self.sessions.remove_if(&id, |_, s| Arc::ptr_eq(s, session));
                    return Err(err);
                }
            }
        }
        slot.as_mut()
            .ok_or_else(|| AppError::internal(format!("session for {id} not initialised")))
    }

    async fn fetch(&self, id: MatchId) -> Result<MatchRecord, AppError> {
        let fetch = self.store.fetch_match_state(id);
        let mut record = match tokio::time::timeout(self.config.save_timeout, fetch).await {
            Ok(result) => result?.ok_or_else(|| AppError::not_found(id))?,
            Err(_) => {
                return Err(StoreError::Timeout {
                    after_ms: self.config.save_timeout.as_millis() as u64,
                }
                .into())
            }
        };

        let (replayed, drifted) = record.state.reconcile()?;
        if drifted {
            warn!(
                match_id = %id,
                version = record.version,
                "stored state drifted from its event log, using replayed state"
            );
            record.state = replayed;
        }
        debug!(match_id = %id, version = record.version, "match loaded from store");
        Ok(record)
    }

    /// Fire-and-forget save bounded by the configured timeout.
    fn spawn_save(&self, record: MatchRecord) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let timeout = self.config.save_timeout;
        tokio::spawn(async move {
            let id = record.id;
            let version = record.version;
            let result = match tokio::time::timeout(timeout, store.save_match_state(id, &record))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(StoreError::Timeout {
                    after_ms: timeout.as_millis() as u64,
                }),
            };
            match result {
                Ok(()) => debug!(match_id = %id, version, "match state saved"),
                Err(err) => warn!(
                    match_id = %id,
                    version,
                    code = %err.code(),
                    error = %err,
                    "match state save failed; local state kept"
                ),
            }
        })
    }
}
