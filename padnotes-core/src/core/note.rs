//! The note record and id-token generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of a generated note id token.
const ID_LENGTH: usize = 9;

/// Base-36 alphabet used for note id tokens.
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A single user-created note.
///
/// The three fields are exactly the persisted JSON layout: the whole note
/// list is stored as one JSON array of these objects, with no schema
/// version field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Opaque unique token, generated at creation, immutable afterwards.
    pub id: String,
    /// Display title.
    pub name: String,
    /// Body text.
    pub text: String,
}

/// Generates a fresh note id: a random base-36 token of fixed length.
///
/// Uniqueness is not checked against existing notes; with 36^9 possible
/// tokens a collision within one pad is vanishingly unlikely.
pub(crate) fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_shape() {
        let id = generate_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generated_ids_do_not_repeat() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            assert!(seen.insert(generate_id()));
        }
    }

    #[test]
    fn test_note_serializes_to_flat_object() {
        let note = Note {
            id: "abc123xyz".to_string(),
            name: "Groceries".to_string(),
            text: "milk, eggs".to_string(),
        };

        let value = serde_json::to_value(&note).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["id"], "abc123xyz");
        assert_eq!(object["name"], "Groceries");
        assert_eq!(object["text"], "milk, eggs");
    }

    #[test]
    fn test_note_roundtrips_through_json() {
        let note = Note {
            id: "abc123xyz".to_string(),
            name: "Groceries".to_string(),
            text: "milk, eggs".to_string(),
        };

        let json = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
