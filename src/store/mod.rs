//! Snapshot persistence for match records.
//!
//! The persisted snapshot is the only shared mutable resource in the
//! engine: each action reloads it fresh, mutates a working copy, and
//! persists on success. Two mechanisms keep concurrent actions against the
//! same match from clobbering each other:
//!
//! - [`MatchLocks`]: a per-match mutex held across the whole
//!   load → validate → mutate → persist sequence (the primary mechanism).
//! - Optimistic versioning in [`MatchStore::persist`]: every stored record
//!   carries a version, persisting is compare-and-swap on it, and a lost
//!   race fails with [`StoreError::Conflict`] instead of silently dropping
//!   an update.
//!
//! Storage failures are never swallowed; they propagate to the caller
//! unchanged and never leave a half-written snapshot behind.

pub mod locks;
pub mod memory;

pub use locks::MatchLocks;
pub use memory::MemoryStore;

use crate::engine::{MatchId, MatchRecord};

/// Failure in the storage collaborator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend failed (connection drop, corrupt blob, ...). Fatal to
    /// the request; the caller may retry the whole action.
    #[error("storage failure: {0}")]
    Backend(String),

    /// A compare-and-swap persist lost a race. Should not happen while the
    /// per-match lock is held.
    #[error("concurrent update conflict for match {0}")]
    Conflict(MatchId),
}

/// A stored record together with the version it was read at.
#[derive(Clone, Debug)]
pub struct Versioned<T> {
    /// Version to pass back on persist.
    pub version: u64,
    pub record: T,
}

/// Atomic load/store of match records keyed by match id.
///
/// Implementations persist the record as a JSON blob; the in-memory
/// [`MemoryStore`] backs tests and demos, a production embedding would
/// wrap its database here.
pub trait MatchStore: Send + Sync {
    /// Load the current snapshot, or `None` if the match does not exist.
    fn load(&self, id: MatchId) -> Result<Option<Versioned<MatchRecord>>, StoreError>;

    /// Insert a brand-new record at version 1. Fails if the id is taken.
    fn insert(&self, record: &MatchRecord) -> Result<(), StoreError>;

    /// Replace the snapshot, compare-and-swap on `expected_version`.
    ///
    /// Fails with [`StoreError::Conflict`] if the stored version moved
    /// since the load.
    fn persist(&self, record: &MatchRecord, expected_version: u64) -> Result<(), StoreError>;
}
