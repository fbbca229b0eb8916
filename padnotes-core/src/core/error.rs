//! Error types for the Padnotes core library.

use thiserror::Error;

/// All errors that can occur within the Padnotes core library.
#[derive(Debug, Error)]
pub enum PadnotesError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A required field was empty when trying to create a note.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A note ID was requested that does not exist in the list.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The note list could not be serialized to JSON for storage.
    ///
    /// Deserialization failures on load are never routed here; the gateway
    /// recovers them internally by falling back to an empty list.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`PadnotesError`].
pub type Result<T> = std::result::Result<T, PadnotesError>;

impl PadnotesError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_passed_through() {
        let e = PadnotesError::ValidationFailed("note name must not be empty".to_string());
        assert_eq!(e.user_message(), "note name must not be empty");
    }

    #[test]
    fn test_not_found_hides_the_raw_id() {
        let e = PadnotesError::NoteNotFound("k3x9q2m1p".to_string());
        assert!(!e.user_message().contains("k3x9q2m1p"));
        assert!(e.to_string().contains("k3x9q2m1p"));
    }
}
