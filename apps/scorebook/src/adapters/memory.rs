//! In-process `MatchStore` keeping each match as a JSON document.
//!
//! Documents round-trip through the same serialization a remote store would
//! receive, so corrupt or hand-edited payloads surface the same way.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::model::MatchId;
use crate::domain::snapshot::MatchRecord;
use crate::errors::StoreError;
use crate::repos::matches::MatchStore;

#[derive(Debug, Clone)]
struct StoredDoc {
    version: u64,
    json: String,
}

#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    docs: DashMap<MatchId, StoredDoc>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self {
            docs: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Stored version for `id`, if any.
    pub fn version(&self, id: MatchId) -> Option<u64> {
        self.docs.get(&id).map(|doc| doc.version)
    }

    /// Raw JSON document for `id`.
    pub fn raw(&self, id: MatchId) -> Option<String> {
        self.docs.get(&id).map(|doc| doc.json.clone())
    }

    /// Overwrite the document for `id` without validation (imports, fixtures).
    pub fn put_raw(&self, id: MatchId, version: u64, json: impl Into<String>) {
        self.docs.insert(
            id,
            StoredDoc {
                version,
                json: json.into(),
            },
        );
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn fetch_match_state(&self, id: MatchId) -> Result<Option<MatchRecord>, StoreError> {
        let Some(json) = self.raw(id) else {
            return Ok(None);
        };
        let record = MatchRecord::from_json(&json)?;
        Ok(Some(record))
    }

    async fn save_match_state(&self, id: MatchId, record: &MatchRecord) -> Result<(), StoreError> {
        let json = record.to_json()?;
        let mut entry = self.docs.entry(id).or_insert_with(|| StoredDoc {
            version: 0,
            json: String::new(),
        });
        if entry.version > record.version {
            debug!(
                match_id = %id,
                stored = entry.version,
                incoming = record.version,
                "ignoring stale save"
            );
            return Ok(());
        }
        *entry = StoredDoc {
            version: record.version,
            json,
        };
        debug!(match_id = %id, version = record.version, "match document stored");
        Ok(())
    }
}
