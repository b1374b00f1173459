//! # Symref - Symbol cross-reference resolver
//!
//! A read-only query engine over a persisted code index. Given a source
//! location it resolves the canonical identity (USR) of the symbol at
//! that location; given a USR it enumerates every declaration and
//! reference site of that symbol across the project.
//!
//! Symref provides:
//! - Sidecar string tables interning filenames, directories and
//!   resolution identifiers
//! - A read-only SQLite query engine over the `file` / `group_` /
//!   `symbol` / `reference` relations
//! - A kind catalog mapping kind codes to display names
//!
//! Symref never writes the index and never parses source code. It
//! decides *where* a rename must touch, not how the text is rewritten.

pub mod config;
pub mod entity;
pub mod index;
pub mod location;
pub mod strings;

// Re-exports for convenient access
pub use entity::Entity;
pub use index::IndexDb;
pub use location::Location;
pub use strings::StringTable;

/// Result type alias for Symref operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Symref operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not open index store: {0}")]
    StoreUnavailable(String),

    #[error("could not load kind catalog: {0}")]
    CatalogLoadFailed(String),

    #[error("could not load string table {path}: {source}")]
    StringTable {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
