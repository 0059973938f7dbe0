//! Player slots and per-slot data storage.
//!
//! ## Slot
//!
//! A match always has exactly two seats, identified by the fixed tokens
//! `p1` and `p2`. Slots are match-local: they are distinct from the user
//! account that happens to occupy them.
//!
//! ## SlotMap
//!
//! Per-slot data storage with O(1) access and `Index` support, the
//! two-seat analogue of a per-player vector.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two fixed player identifiers within a match.
///
/// Serializes as `"p1"` / `"p2"`, which is also the form used in log
/// entries and the persisted snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "p1")]
    P1,
    #[serde(rename = "p2")]
    P2,
}

impl Slot {
    /// The other slot.
    #[must_use]
    pub const fn opponent(self) -> Slot {
        match self {
            Slot::P1 => Slot::P2,
            Slot::P2 => Slot::P1,
        }
    }

    /// Slot token as used in logs and snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Slot::P1 => "p1",
            Slot::P2 => "p2",
        }
    }

    /// Both slots, p1 first.
    #[must_use]
    pub const fn both() -> [Slot; 2] {
        [Slot::P1, Slot::P2]
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-slot data storage.
///
/// ## Example
///
/// ```
/// use duelcore::core::{Slot, SlotMap};
///
/// let mut mana = SlotMap::new(1, 0);
/// assert_eq!(mana[Slot::P1], 1);
///
/// mana[Slot::P2] = 5;
/// assert_eq!(mana[Slot::P2], 5);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotMap<T> {
    pub p1: T,
    pub p2: T,
}

impl<T> SlotMap<T> {
    /// Create a map from explicit per-slot values.
    #[must_use]
    pub fn new(p1: T, p2: T) -> Self {
        Self { p1, p2 }
    }

    /// Create a map with both slots set to the same value.
    #[must_use]
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            p1: value.clone(),
            p2: value,
        }
    }

    /// Get a reference to a slot's data.
    #[must_use]
    pub fn get(&self, slot: Slot) -> &T {
        match slot {
            Slot::P1 => &self.p1,
            Slot::P2 => &self.p2,
        }
    }

    /// Get a mutable reference to a slot's data.
    pub fn get_mut(&mut self, slot: Slot) -> &mut T {
        match slot {
            Slot::P1 => &mut self.p1,
            Slot::P2 => &mut self.p2,
        }
    }

    /// Mutable references to a slot's data and its opponent's, in that order.
    ///
    /// Needed when one transition touches both sides at once (mutual
    /// combat damage).
    pub fn pair_mut(&mut self, slot: Slot) -> (&mut T, &mut T) {
        match slot {
            Slot::P1 => (&mut self.p1, &mut self.p2),
            Slot::P2 => (&mut self.p2, &mut self.p1),
        }
    }

    /// Iterate over (Slot, &T) pairs, p1 first.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        [(Slot::P1, &self.p1), (Slot::P2, &self.p2)].into_iter()
    }
}

impl<T> Index<Slot> for SlotMap<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &Self::Output {
        self.get(slot)
    }
}

impl<T> IndexMut<Slot> for SlotMap<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
        self.get_mut(slot)
    }
}
