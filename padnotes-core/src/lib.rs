//! Core library for Padnotes — a local-first sticky-note pad.
//!
//! The primary entry point is [`NoteStore`], which owns the in-memory note
//! list and persists it through an injected [`PersistenceGateway`]. All note
//! mutations go through `NoteStore` methods; front ends render from its
//! read accessors and call [`NoteStore::sync_external_changes`] to pick up
//! writes made by other running instances.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    error::{PadnotesError, Result},
    gateway::{MemoryGateway, PersistenceGateway},
    note::Note,
    storage::{SqliteGateway, DEFAULT_DATASET_KEY},
    store::NoteStore,
};
