//! Query engine over the relational cross-reference index
//!
//! The index is an embedded SQLite database consumed strictly
//! read-only, with relations:
//! - file(id, filename, lowercaseFilename, directory)
//! - group_(id, file) - a per-file grouping unit
//! - symbol(group_, lineNumber, column, kind, resolution) - declarations
//! - reference(group_, lineNumber, column, kind, resolution) - uses
//! - kind(id, identifier)
//!
//! All ids are 64-bit integers resolved back to strings through the
//! sidecar tables in [`crate::strings`].

pub mod db;
pub(crate) mod sql;

pub use db::{IndexDb, RowDecoder};
