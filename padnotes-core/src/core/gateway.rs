//! The persistence port for one note dataset, plus an in-process
//! implementation used by tests and embedders.

use crate::{Note, Result};
use log::warn;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Durable key-value storage for one logical note dataset, plus detection of
/// changes made by other execution contexts.
///
/// The whole note list is one value under one fixed dataset key; there is no
/// per-note storage. `load` and `has_external_change` take `&mut self`
/// because observing the stored state updates the gateway's record of the
/// last revision it has seen.
pub trait PersistenceGateway {
    /// Serializes the full list and stores it under the dataset key,
    /// overwriting any prior value.
    fn save(&mut self, notes: &[Note]) -> Result<()>;

    /// Deserializes the stored value under the dataset key.
    ///
    /// Returns an empty list when nothing is stored, and also when the
    /// stored value is malformed: corrupt data is logged and recovered,
    /// never surfaced to the caller.
    fn load(&mut self) -> Result<Vec<Note>>;

    /// Deletes the stored value for the dataset key entirely.
    fn remove(&mut self) -> Result<()>;

    /// Returns `true` when a different execution context has modified the
    /// dataset key since this gateway last wrote or loaded it.
    ///
    /// Never reports this gateway's own writes, and never reports changes
    /// to unrelated keys sharing the same storage area.
    fn has_external_change(&mut self) -> Result<bool>;
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    revision: i64,
}

/// One in-process storage area shared by every sibling handle.
#[derive(Debug, Default)]
struct MemoryArea {
    entries: HashMap<String, MemoryEntry>,
    // Monotonic across the whole area so a remove-then-save sequence can
    // never be mistaken for an unchanged revision.
    seq: i64,
}

/// In-memory [`PersistenceGateway`] over a shared storage area.
///
/// Sibling handles created with [`MemoryGateway::sibling`] share the same
/// backing area while tracking their own last-seen revision, so a write
/// through one handle is an external change from another handle's point of
/// view. This stands in for two browser tabs sharing one origin's storage
/// and lets the store logic be exercised with no filesystem at all.
pub struct MemoryGateway {
    area: Rc<RefCell<MemoryArea>>,
    dataset_key: String,
    last_revision: i64,
}

impl MemoryGateway {
    /// Creates a gateway over a fresh, empty storage area.
    pub fn new(dataset_key: &str) -> Self {
        Self {
            area: Rc::new(RefCell::new(MemoryArea::default())),
            dataset_key: dataset_key.to_string(),
            last_revision: 0,
        }
    }

    /// Returns a new handle over the same storage area, representing a
    /// separate execution context that has not yet observed any state.
    pub fn sibling(&self) -> Self {
        self.sibling_for_key(&self.dataset_key)
    }

    /// Like [`MemoryGateway::sibling`], but bound to a different dataset key
    /// within the same storage area.
    pub fn sibling_for_key(&self, dataset_key: &str) -> Self {
        Self {
            area: Rc::clone(&self.area),
            dataset_key: dataset_key.to_string(),
            last_revision: 0,
        }
    }

    /// The dataset key this gateway reads and writes.
    pub fn dataset_key(&self) -> &str {
        &self.dataset_key
    }

    fn stored_revision(&self) -> i64 {
        self.area
            .borrow()
            .entries
            .get(&self.dataset_key)
            .map_or(0, |entry| entry.revision)
    }
}

impl PersistenceGateway for MemoryGateway {
    fn save(&mut self, notes: &[Note]) -> Result<()> {
        let value = serde_json::to_string(notes)?;
        let mut area = self.area.borrow_mut();
        area.seq += 1;
        let revision = area.seq;
        area.entries
            .insert(self.dataset_key.clone(), MemoryEntry { value, revision });
        self.last_revision = revision;
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<Note>> {
        let entry = self.area.borrow().entries.get(&self.dataset_key).cloned();
        let Some(entry) = entry else {
            self.last_revision = 0;
            return Ok(Vec::new());
        };
        self.last_revision = entry.revision;
        match serde_json::from_str(&entry.value) {
            Ok(notes) => Ok(notes),
            Err(e) => {
                warn!(
                    "stored data under '{}' is not a valid note list, starting empty: {e}",
                    self.dataset_key
                );
                Ok(Vec::new())
            }
        }
    }

    fn remove(&mut self) -> Result<()> {
        self.area.borrow_mut().entries.remove(&self.dataset_key);
        self.last_revision = 0;
        Ok(())
    }

    fn has_external_change(&mut self) -> Result<bool> {
        Ok(self.stored_revision() != self.last_revision)
    }
}
