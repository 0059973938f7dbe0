//! Per-match mutual exclusion.
//!
//! At most one transition may be in flight per match id: the engine holds
//! that match's lock across the entire load → validate → mutate → persist
//! sequence. Locks are allocated lazily on first touch and are never
//! dropped from the table (a match id entry is a single `Arc<Mutex>`).

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::engine::MatchId;

/// Lock table with one mutex per match id.
#[derive(Debug, Default)]
pub struct MatchLocks {
    table: Mutex<FxHashMap<MatchId, Arc<Mutex<()>>>>,
}

impl MatchLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the lock for a match, creating it on first touch.
    ///
    /// The caller locks the returned handle and holds the guard for the
    /// duration of the transition.
    #[must_use]
    pub fn acquire(&self, id: MatchId) -> Arc<Mutex<()>> {
        let mut table = self.table.lock().unwrap();
        Arc::clone(table.entry(id).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_match_same_lock() {
        let locks = MatchLocks::new();
        let id = MatchId::new();

        let a = locks.acquire(id);
        let b = locks.acquire(id);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_different_matches_different_locks() {
        let locks = MatchLocks::new();
        let a = locks.acquire(MatchId::new());
        let b = locks.acquire(MatchId::new());
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_lock_excludes_second_holder() {
        let locks = MatchLocks::new();
        let id = MatchId::new();

        let handle = locks.acquire(id);
        let guard = handle.lock().unwrap();
        assert!(locks.acquire(id).try_lock().is_err());
        drop(guard);
        assert!(locks.acquire(id).try_lock().is_ok());
    }
}
