//! Card definitions and catalog lookup.
//!
//! Card data is immutable and externally supplied; the engine only reads
//! it. See [`definition`] for the card shapes and [`registry`] for the
//! lookup seam and the stock catalog.

pub mod definition;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardKind, SpellEffect};
pub use registry::{starter_set, CardRegistry, CardSource};
