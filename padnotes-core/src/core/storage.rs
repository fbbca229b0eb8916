//! SQLite-backed persistence for the note dataset.
//!
//! One database file holds a `datasets` key/value table; the entire note
//! list lives as a single JSON blob under one key, next to a per-key write
//! counter. Several running instances may open the same file, each through
//! its own connection; that is the cross-context sharing the store builds
//! its synchronization on.

use crate::core::gateway::PersistenceGateway;
use crate::{Note, Result};
use log::warn;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Dataset key used when the embedder does not choose its own.
pub const DEFAULT_DATASET_KEY: &str = "note-item";

/// [`PersistenceGateway`] over a SQLite key/value table.
///
/// External-change detection works in two steps: SQLite's `data_version`
/// pragma moves only when a *different* connection commits to the file, so
/// an unchanged value rules out any external write cheaply. When it has
/// moved, the key's stored revision is compared against the revision this
/// gateway last wrote or loaded, which filters out commits that only
/// touched unrelated keys.
pub struct SqliteGateway {
    conn: Connection,
    dataset_key: String,
    last_revision: i64,
    data_version: i64,
}

impl SqliteGateway {
    /// Opens (or creates) the database file at `path` and binds this gateway
    /// to `dataset_key`, creating parent directories and the `datasets`
    /// table as needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PadnotesError::Io`] if the parent directory cannot
    /// be created, or [`crate::PadnotesError::Database`] for any SQLite
    /// failure.
    pub fn open<P: AsRef<Path>>(path: P, dataset_key: &str) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS datasets (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                revision INTEGER NOT NULL
            )",
        )?;

        let mut gateway = Self {
            conn,
            dataset_key: dataset_key.to_string(),
            last_revision: 0,
            data_version: 0,
        };
        gateway.last_revision = gateway.stored_revision()?;
        gateway.data_version = gateway.read_data_version()?;
        Ok(gateway)
    }

    /// The dataset key this gateway reads and writes.
    pub fn dataset_key(&self) -> &str {
        &self.dataset_key
    }

    fn stored_revision(&self) -> Result<i64> {
        let revision = self
            .conn
            .query_row(
                "SELECT revision FROM datasets WHERE key = ?1",
                [self.dataset_key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(revision.unwrap_or(0))
    }

    fn read_data_version(&self) -> Result<i64> {
        let version = self
            .conn
            .query_row("PRAGMA data_version", [], |row| row.get(0))?;
        Ok(version)
    }
}

impl PersistenceGateway for SqliteGateway {
    fn save(&mut self, notes: &[Note]) -> Result<()> {
        let blob = serde_json::to_string(notes)?;
        let revision: i64 = self.conn.query_row(
            "INSERT INTO datasets (key, value, revision) VALUES (?1, ?2, 1)
             ON CONFLICT(key) DO UPDATE
                SET value = excluded.value, revision = datasets.revision + 1
             RETURNING revision",
            rusqlite::params![self.dataset_key, blob],
            |row| row.get(0),
        )?;
        self.last_revision = revision;
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<Note>> {
        let row = self
            .conn
            .query_row(
                "SELECT value, revision FROM datasets WHERE key = ?1",
                [self.dataset_key.as_str()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;

        let Some((blob, revision)) = row else {
            self.last_revision = 0;
            return Ok(Vec::new());
        };
        self.last_revision = revision;

        match serde_json::from_str(&blob) {
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
        self.conn.execute(
            "DELETE FROM datasets WHERE key = ?1",
            [self.dataset_key.as_str()],
        )?;
        self.last_revision = 0;
        Ok(())
    }

    fn has_external_change(&mut self) -> Result<bool> {
        // data_version is stable across this connection's own commits, so an
        // unchanged value means nobody else has touched the file.
        let version = self.read_data_version()?;
        if version == self.data_version {
            return Ok(false);
        }
        self.data_version = version;
        Ok(self.stored_revision()? != self.last_revision)
    }
}
