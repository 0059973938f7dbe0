//! In-memory match store.
//!
//! Stores each record as the serialized JSON blob a database row would
//! hold, so the persistence path exercises the same serde round-trip as a
//! real backend.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use super::{MatchStore, StoreError, Versioned};
use crate::engine::{MatchId, MatchRecord};

/// In-memory [`MatchStore`] keyed by match id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<FxHashMap<MatchId, (u64, String)>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn encode(record: &MatchRecord) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(|e| StoreError::Backend(e.to_string()))
}

fn decode(blob: &str) -> Result<MatchRecord, StoreError> {
    serde_json::from_str(blob).map_err(|e| StoreError::Backend(e.to_string()))
}

impl MatchStore for MemoryStore {
    fn load(&self, id: MatchId) -> Result<Option<Versioned<MatchRecord>>, StoreError> {
        let rows = self.rows.lock().unwrap();
        match rows.get(&id) {
            Some((version, blob)) => Ok(Some(Versioned {
                version: *version,
                record: decode(blob)?,
            })),
            None => Ok(None),
        }
    }

    fn insert(&self, record: &MatchRecord) -> Result<(), StoreError> {
        let blob = encode(record)?;
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&record.id) {
            return Err(StoreError::Backend(format!(
                "match {} already exists",
                record.id
            )));
        }
        rows.insert(record.id, (1, blob));
        Ok(())
    }

    fn persist(&self, record: &MatchRecord, expected_version: u64) -> Result<(), StoreError> {
        let blob = encode(record)?;
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&record.id) {
            Some((version, stored)) => {
                if *version != expected_version {
                    return Err(StoreError::Conflict(record.id));
                }
                *version += 1;
                *stored = blob;
                Ok(())
            }
            None => Err(StoreError::Backend(format!(
                "match {} has no stored row",
                record.id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decks::{DeckId, UserId};
    use crate::engine::{MatchPhase, Seat};

    fn lobby_record() -> MatchRecord {
        MatchRecord {
            id: MatchId::new(),
            phase: MatchPhase::Lobby {
                p1: Seat {
                    user_id: UserId(1),
                    deck_id: DeckId(1),
                },
            },
        }
    }

    #[test]
    fn test_insert_and_load() {
        let store = MemoryStore::new();
        let record = lobby_record();

        store.insert(&record).unwrap();
        let loaded = store.load(record.id).unwrap().unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.record, record);
    }

    #[test]
    fn test_load_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.load(MatchId::new()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let store = MemoryStore::new();
        let record = lobby_record();

        store.insert(&record).unwrap();
        assert!(matches!(
            store.insert(&record),
            Err(StoreError::Backend(_))
        ));
    }

    #[test]
    fn test_persist_bumps_version() {
        let store = MemoryStore::new();
        let record = lobby_record();
        store.insert(&record).unwrap();

        store.persist(&record, 1).unwrap();
        assert_eq!(store.load(record.id).unwrap().unwrap().version, 2);
    }

    #[test]
    fn test_persist_detects_lost_update() {
        let store = MemoryStore::new();
        let record = lobby_record();
        store.insert(&record).unwrap();

        store.persist(&record, 1).unwrap();
        // A second writer still holding version 1 must not clobber.
        assert_eq!(
            store.persist(&record, 1),
            Err(StoreError::Conflict(record.id))
        );
    }

    #[test]
    fn test_persist_without_row_fails() {
        let store = MemoryStore::new();
        let record = lobby_record();
        assert!(matches!(
            store.persist(&record, 1),
            Err(StoreError::Backend(_))
        ));
    }
}
