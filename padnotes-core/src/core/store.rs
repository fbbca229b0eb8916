//! In-memory note list management over an injected persistence port.

use crate::core::gateway::PersistenceGateway;
use crate::core::note::{self, Note};
use crate::{PadnotesError, Result};

/// Sole authority over the current note list and its derived views.
///
/// The store owns its `Vec<Note>` exclusively: callers get slices or clones,
/// never a handle they could mutate behind the store's back. Every mutating
/// operation persists the full list through the gateway exactly once;
/// reload paths never write back.
///
/// Concurrent instances over the same storage follow last-write-wins: two
/// of them can load the same snapshot, each mutate and save, and the second
/// save clobbers the first with no conflict detection. That is intentional;
/// reconciliation is a wholesale reload of the other writer's snapshot, not
/// a merge.
pub struct NoteStore<G: PersistenceGateway> {
    gateway: G,
    notes: Vec<Note>,
}

impl<G: PersistenceGateway> NoteStore<G> {
    /// Creates a store over `gateway`, initializing the list from whatever
    /// the gateway currently holds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PadnotesError::Database`] if the stored state cannot
    /// be read. A malformed stored blob is not an error: the gateway
    /// recovers it as an empty list.
    pub fn new(mut gateway: G) -> Result<Self> {
        let notes = gateway.load()?;
        Ok(Self { gateway, notes })
    }

    /// The current list in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes in the list.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Creates a note, appends it to the list, and persists the full list.
    ///
    /// Only the empty string is rejected; whitespace-only input is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PadnotesError::ValidationFailed`] if `name` or
    /// `text` is empty; the list is left unchanged. Persistence failures
    /// surface as [`crate::PadnotesError::Database`].
    pub fn create(&mut self, name: &str, text: &str) -> Result<Note> {
        if name.is_empty() {
            return Err(PadnotesError::ValidationFailed(
                "note name must not be empty".to_string(),
            ));
        }
        if text.is_empty() {
            return Err(PadnotesError::ValidationFailed(
                "note text must not be empty".to_string(),
            ));
        }

        let created = Note {
            id: note::generate_id(),
            name: name.to_string(),
            text: text.to_string(),
        };
        self.notes.push(created.clone());
        self.gateway.save(&self.notes)?;
        Ok(created)
    }

    /// Replaces the note matching `id` with a new note carrying the same id
    /// and the updated fields, then persists the full list.
    ///
    /// Edit inputs are applied as given, empty or not; emptiness is not
    /// re-validated here.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PadnotesError::NoteNotFound`] if no note matches.
    pub fn edit(&mut self, id: &str, name: &str, text: &str) -> Result<Note> {
        let slot = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| PadnotesError::NoteNotFound(id.to_string()))?;
        *slot = Note {
            id: id.to_string(),
            name: name.to_string(),
            text: text.to_string(),
        };
        let updated = slot.clone();
        self.gateway.save(&self.notes)?;
        Ok(updated)
    }

    /// Removes the note matching `id` and persists the full list (an empty
    /// list is written as `[]`; the key is only removed by
    /// [`NoteStore::clear_all`]).
    ///
    /// # Errors
    ///
    /// Returns [`crate::PadnotesError::NoteNotFound`] if no note matches;
    /// the list is left unchanged.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| PadnotesError::NoteNotFound(id.to_string()))?;
        self.notes.remove(index);
        self.gateway.save(&self.notes)?;
        Ok(())
    }

    /// Returns the notes whose name or text contains `query`,
    /// case-insensitively, in list order.
    ///
    /// An empty query matches every note. Read-only: never mutates state.
    pub fn find(&self, query: &str) -> Vec<Note> {
        let needle = query.to_lowercase();
        self.notes
            .iter()
            .filter(|n| {
                n.name.to_lowercase().contains(&needle) || n.text.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Discards the in-memory list and replaces it wholesale with whatever
    /// the gateway currently holds. Never writes back.
    pub fn reload_from_persistence(&mut self) -> Result<()> {
        self.notes = self.gateway.load()?;
        Ok(())
    }

    /// Empties the list and removes the persisted entry entirely.
    pub fn clear_all(&mut self) -> Result<()> {
        self.notes.clear();
        self.gateway.remove()?;
        Ok(())
    }

    /// Reconciles with writes made by other execution contexts.
    ///
    /// When the gateway reports an external change, performs a full
    /// [`NoteStore::reload_from_persistence`] and returns `true` so the
    /// front end knows to re-render. Idempotent: with no new external
    /// writes, repeated calls return `false` and touch nothing.
    pub fn sync_external_changes(&mut self) -> Result<bool> {
        if !self.gateway.has_external_change()? {
            return Ok(false);
        }
        self.reload_from_persistence()?;
        Ok(true)
    }
}
