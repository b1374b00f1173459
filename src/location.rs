//! Source location splitting for index lookups

use std::path::Path;

/// A source location normalized into its index lookup keys.
///
/// The index keys files by directory, exact filename and lowercased
/// filename, so all three are derived once up front. Line and column
/// are 1-based and caller-supplied; out-of-range values simply match
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Directory portion of the path, without trailing separator
    pub directory: String,
    /// Last path component, case preserved
    pub filename: String,
    /// Last path component, lowercased
    pub lowercase_filename: String,
    /// 1-based line number
    pub line: u32,
    /// 1-based column number
    pub column: u32,
}

impl Location {
    /// Split a file path into its index lookup keys.
    ///
    /// Returns `None` when the path has no usable directory and
    /// filename components (the index stores absolute paths, so a bare
    /// filename can never match).
    pub fn from_path(file_path: &str, line: u32, column: u32) -> Option<Self> {
        let path = Path::new(file_path);
        let directory = path.parent()?.to_str()?;
        let filename = path.file_name()?.to_str()?;
        if directory.is_empty() {
            return None;
        }
        Some(Self {
            directory: directory.to_string(),
            filename: filename.to_string(),
            lowercase_filename: filename.to_lowercase(),
            line,
            column,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_absolute_path() {
        let loc = Location::from_path("/proj/Foo.swift", 10, 5).unwrap();
        assert_eq!(loc.directory, "/proj");
        assert_eq!(loc.filename, "Foo.swift");
        assert_eq!(loc.lowercase_filename, "foo.swift");
        assert_eq!(loc.line, 10);
        assert_eq!(loc.column, 5);
    }

    #[test]
    fn test_nested_directory() {
        let loc = Location::from_path("/proj/Sources/App/Main.swift", 1, 1).unwrap();
        assert_eq!(loc.directory, "/proj/Sources/App");
        assert_eq!(loc.filename, "Main.swift");
    }

    #[test]
    fn test_unsplittable_paths() {
        assert_eq!(Location::from_path("", 1, 1), None);
        assert_eq!(Location::from_path("/", 1, 1), None);
        assert_eq!(Location::from_path("Foo.swift", 1, 1), None);
    }

    #[test]
    fn test_root_directory_file() {
        let loc = Location::from_path("/Foo.swift", 1, 1).unwrap();
        assert_eq!(loc.directory, "/");
        assert_eq!(loc.filename, "Foo.swift");
    }
}
