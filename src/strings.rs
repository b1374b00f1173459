//! Sidecar string tables - interned strings for the index
//!
//! The index producer writes one sidecar per domain next to the index
//! database: `<index>.strings-file` (filenames), `<index>.strings-dir`
//! (directories) and `<index>.strings-res` (resolution identifiers).
//! Each line holds one entry as `<id>\t<string>`.
//!
//! Tables are loaded once and never mutated, so they may be shared
//! read-only across threads. An id is only meaningful within the table
//! that produced it - never compare ids across tables.

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// A read-only bidirectional mapping between strings and interned ids.
#[derive(Debug, Default)]
pub struct StringTable {
    by_string: HashMap<String, i64>,
    by_id: HashMap<i64, String>,
}

impl StringTable {
    /// Load a table from a sidecar file.
    ///
    /// Blank lines are skipped; malformed lines are skipped with a
    /// debug diagnostic. A missing or unreadable sidecar is an error -
    /// the engine cannot answer queries without its string tables.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| Error::StringTable {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::parse(&contents))
    }

    fn parse(contents: &str) -> Self {
        let mut table = Self::default();
        for line in contents.lines() {
            if line.is_empty() {
                continue;
            }
            let entry = line
                .split_once('\t')
                .and_then(|(id, s)| Some((id.parse::<i64>().ok()?, s)));
            match entry {
                Some((id, s)) => {
                    table.by_string.insert(s.to_string(), id);
                    table.by_id.insert(id, s.to_string());
                }
                None => tracing::debug!("skipping malformed string table line: {:?}", line),
            }
        }
        table
    }

    /// Look up the interned id for a string.
    ///
    /// `None` means the string was never interned, i.e. it does not
    /// occur anywhere in this index.
    pub fn id(&self, s: &str) -> Option<i64> {
        self.by_string.get(s).copied()
    }

    /// Look up the string for an interned id.
    pub fn string(&self, id: i64) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Number of interned entries.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        let table = StringTable::parse("1\tFoo.swift\n2\tfoo.swift\n17\ts:bar\n");

        assert_eq!(table.len(), 3);
        assert_eq!(table.id("Foo.swift"), Some(1));
        assert_eq!(table.id("s:bar"), Some(17));
        assert_eq!(table.string(2), Some("foo.swift"));
        assert_eq!(table.id("missing"), None);
        assert_eq!(table.string(99), None);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let table = StringTable::parse("1\tgood\n\nnot-a-line\nx\talso bad\n2\tfine\n");

        assert_eq!(table.len(), 2);
        assert_eq!(table.id("good"), Some(1));
        assert_eq!(table.id("fine"), Some(2));
    }

    #[test]
    fn test_strings_may_contain_separator_lookalikes() {
        // Only the first tab separates id from string.
        let table = StringTable::parse("5\ta\tb\n");
        assert_eq!(table.string(5), Some("a\tb"));
    }

    #[test]
    fn test_load_missing_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let err = StringTable::load(&dir.path().join("idx.strings-file")).unwrap_err();
        assert!(matches!(err, Error::StringTable { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idx.strings-dir");
        std::fs::write(&path, "3\t/proj\n").unwrap();

        let table = StringTable::load(&path).unwrap();
        assert_eq!(table.id("/proj"), Some(3));
    }
}
