//! Resolved cross-reference sites

use serde::{Deserialize, Serialize};

/// One concrete declaration or reference site of a resolved symbol.
///
/// Produced only by [`IndexDb::entities_for_usr`]; a plain value type
/// with no identity beyond its fields. Rows carrying the synthetic
/// `line == 0` sentinel are filtered out before an Entity is built.
///
/// [`IndexDb::entities_for_usr`]: crate::IndexDb::entities_for_usr
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Full path: directory and filename joined with "/"
    pub file: String,
    /// 1-based line number
    pub line: u32,
    /// 1-based column number
    pub column: u32,
    /// Human-readable kind name, when the kind catalog knows the code
    pub kind: Option<String>,
    /// True for declaration sites, false for reference sites
    pub is_declaration: bool,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)?;
        if let Some(kind) = &self.kind {
            write!(f, " ({})", kind)?;
        }
        if self.is_declaration {
            write!(f, " [declaration]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entity {
        Entity {
            file: "/proj/Foo.swift".to_string(),
            line: 10,
            column: 5,
            kind: Some("function".to_string()),
            is_declaration: true,
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "/proj/Foo.swift:10:5 (function) [declaration]"
        );

        let reference = Entity {
            kind: None,
            is_declaration: false,
            ..sample()
        };
        assert_eq!(reference.to_string(), "/proj/Foo.swift:10:5");
    }

    #[test]
    fn test_serialize_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["file"], "/proj/Foo.swift");
        assert_eq!(json["line"], 10);
        assert_eq!(json["column"], 5);
        assert_eq!(json["kind"], "function");
        assert_eq!(json["is_declaration"], true);
    }
}
