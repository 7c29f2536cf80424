//! Application layer - orchestration of the editing workflow.
//!
//! - `ProfileLibrary` - load, create, save, star and delete with local fallback
//! - `EditingContext` - one open profile with debounced persistence
//! - `DebouncedWriter` - the coalescing write task behind a context

mod debounce;
mod library;
mod workspace;

pub use debounce::{DebounceConfig, DebouncedWriter, SaveStatus};
pub use library::{
    LibraryError, ProfileLibrary, SaveOutcome, LEGACY_PROFILE_ID, LEGACY_PROFILE_NAME,
};
pub use workspace::EditingContext;
