//! Internal domain modules for the Padnotes core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod error;
pub mod gateway;
pub mod note;
pub mod storage;
pub mod store;

#[doc(inline)]
pub use error::{PadnotesError, Result};
#[doc(inline)]
pub use gateway::{MemoryGateway, PersistenceGateway};
#[doc(inline)]
pub use note::Note;
#[doc(inline)]
pub use storage::{SqliteGateway, DEFAULT_DATASET_KEY};
#[doc(inline)]
pub use store::NoteStore;
