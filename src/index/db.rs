//! Read-only query engine over the cross-reference index
//!
//! [`IndexDb`] owns one read-only SQLite connection plus the three
//! sidecar string tables and the kind catalog. It answers two
//! questions: which symbol occupies a source location
//! ([`IndexDb::usr_at_location`]), and where are all the declaration
//! and reference sites of a symbol ([`IndexDb::entities_for_usr`]).
//!
//! Every operation runs to completion on the calling thread; there is
//! no background work and no retry. The connection is `!Sync`, so
//! statement state can never be shared unsynchronized across threads -
//! use one engine per thread if concurrent reads are needed.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Row};

use super::sql;
use crate::entity::Entity;
use crate::location::Location;
use crate::strings::StringTable;
use crate::{Error, Result};

/// Decodes one result row into an item, or skips it.
///
/// Returning `Ok(None)` drops the row without aborting the drain,
/// which is how sentinel rows and unresolvable ids are tolerated.
/// Implemented for any `FnMut(&Row) -> rusqlite::Result<Option<T>>`
/// closure.
pub trait RowDecoder {
    type Item;

    fn decode(&mut self, row: &Row<'_>) -> rusqlite::Result<Option<Self::Item>>;
}

impl<T, F> RowDecoder for F
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<Option<T>>,
{
    type Item = T;

    fn decode(&mut self, row: &Row<'_>) -> rusqlite::Result<Option<T>> {
        self(row)
    }
}

/// Read-only query engine over a persisted cross-reference index.
#[derive(Debug)]
pub struct IndexDb {
    conn: Connection,
    filenames: StringTable,
    directories: StringTable,
    resolutions: StringTable,
    kinds: HashMap<i64, String>,
}

impl IndexDb {
    /// Open the index at `index_path` together with its sidecar string
    /// tables.
    ///
    /// The store is opened strictly read-only and the kind catalog is
    /// loaded up front. Any failure aborts construction; a partially
    /// usable engine is never returned. The connection is released
    /// when the engine is dropped.
    pub fn open(index_path: &Path) -> Result<Self> {
        let filenames = StringTable::load(&sidecar(index_path, "strings-file"))?;
        let directories = StringTable::load(&sidecar(index_path, "strings-dir"))?;
        let resolutions = StringTable::load(&sidecar(index_path, "strings-res"))?;

        let conn = Connection::open_with_flags(
            index_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| Error::StoreUnavailable(format!("{}: {}", index_path.display(), e)))?;

        let mut db = Self {
            conn,
            filenames,
            directories,
            resolutions,
            kinds: HashMap::new(),
        };
        db.load_kinds()?;
        Ok(db)
    }

    /// Load the kind catalog. Every later row decode depends on it, so
    /// a failure here is fatal to construction.
    fn load_kinds(&mut self) -> Result<()> {
        let mut pairs = Vec::new();
        self.run_query(
            "select id, identifier from kind",
            &[],
            &mut |row: &Row<'_>| -> rusqlite::Result<Option<(i64, String)>> {
                Ok(Some((row.get(0)?, row.get(1)?)))
            },
            &mut pairs,
        )
        .map_err(|e| Error::CatalogLoadFailed(e.to_string()))?;
        self.kinds = pairs.into_iter().collect();
        Ok(())
    }

    /// The kind catalog, as loaded at open time.
    pub fn kinds(&self) -> &HashMap<i64, String> {
        &self.kinds
    }

    /// Run one bound query, appending every decoded row to `out`.
    ///
    /// Parameters bind positionally, 1-based. The statement is
    /// released by scope on every exit path. Items decoded before a
    /// failure stay in `out`, which is what lets expansion return
    /// partial results.
    fn run_query<D: RowDecoder>(
        &self,
        sql: &str,
        params: &[i64],
        decoder: &mut D,
        out: &mut Vec<D::Item>,
    ) -> Result<()> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
        while let Some(row) = rows.next()? {
            if let Some(item) = decoder.decode(row)? {
                out.push(item);
            }
        }
        Ok(())
    }

    /// Find the canonical resolution identifier (USR) of the symbol at
    /// a source location.
    ///
    /// Returns `None` both when the location is simply not covered by
    /// the index and when the query itself fails; the latter is
    /// reported through the diagnostic channel. When several
    /// resolution strings match the location the shortest one wins,
    /// measured in UTF-16 code units, first seen winning ties.
    pub fn usr_at_location(&self, file_path: &str, line: u32, column: u32) -> Option<String> {
        let Some(loc) = Location::from_path(file_path, line, column) else {
            tracing::error!("could not split file path: {}", file_path);
            return None;
        };

        // All three keys must be interned for the location to exist in
        // this index at all.
        let lowercase_id = self.filenames.id(&loc.lowercase_filename)?;
        let file_id = self.filenames.id(&loc.filename)?;
        let dir_id = self.directories.id(&loc.directory)?;

        let keys = [
            lowercase_id,
            file_id,
            dir_id,
            i64::from(line),
            i64::from(column),
        ];
        let mut params = Vec::with_capacity(keys.len() * 2);
        params.extend_from_slice(&keys);
        params.extend_from_slice(&keys);

        let mut ids = Vec::new();
        if let Err(e) = self.run_query(
            &sql::usr_at_location_sql(),
            &params,
            &mut |row: &Row<'_>| -> rusqlite::Result<Option<i64>> { Ok(Some(row.get(0)?)) },
            &mut ids,
        ) {
            tracing::error!("resolution query failed: {}", e);
            return None;
        }

        let mut usr: Option<&str> = None;
        for id in ids {
            let Some(candidate) = self.resolutions.string(id) else {
                continue;
            };
            if usr.is_none_or(|best| utf16_len(candidate) < utf16_len(best)) {
                usr = Some(candidate);
            }
            tracing::info!("found resolution #{} -- {:?}", id, usr);
        }
        usr.map(str::to_string)
    }

    /// Enumerate every declaration and reference site of a symbol.
    ///
    /// `old_value` is caller-side context (the identifier text at the
    /// originating site) and does not affect the query. An unknown
    /// identifier yields an empty vec. Rows with the `line == 0`
    /// synthetic-location sentinel are skipped, as are rows whose file
    /// or directory id no longer resolves. A query failure mid-drain
    /// returns whatever was decoded before it.
    pub fn entities_for_usr(&self, usr: &str, old_value: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let Some(res_id) = self.resolutions.id(usr) else {
            return entities;
        };
        tracing::debug!("expanding {:?} (old value {:?})", usr, old_value);

        let result = self.run_query(
            &sql::entities_for_usr_sql(),
            &[res_id, res_id],
            &mut |row: &Row<'_>| -> rusqlite::Result<Option<Entity>> {
                let file_id: i64 = row.get(0)?;
                let dir_id: i64 = row.get(1)?;
                let line: u32 = row.get(2)?;
                let column: u32 = row.get(3)?;
                let kind_id: i64 = row.get(4)?;
                let is_declaration = row.get::<_, i64>(5)? != 0;

                // line 0 marks a synthetic location with no source site
                if line == 0 {
                    return Ok(None);
                }
                let (Some(file), Some(dir)) = (
                    self.filenames.string(file_id),
                    self.directories.string(dir_id),
                ) else {
                    tracing::warn!(
                        "could not look up fileID {} or dirID {}",
                        file_id,
                        dir_id
                    );
                    return Ok(None);
                };
                Ok(Some(Entity {
                    file: format!("{}/{}", dir, file),
                    line,
                    column,
                    kind: self.kinds.get(&kind_id).cloned(),
                    is_declaration,
                }))
            },
            &mut entities,
        );
        if let Err(e) = result {
            tracing::error!("entities query failed: {}", e);
        }
        entities
    }
}

/// Companion path for one sidecar string table, e.g.
/// `idx.db` → `idx.db.strings-file`.
fn sidecar(index_path: &Path, suffix: &str) -> PathBuf {
    let mut name = index_path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Length in UTF-16 code units, the unit the tie-break is defined in.
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
