//! Optional CLI configuration
//!
//! A `symref.toml` next to the working directory can carry the default
//! index path so it does not have to be passed on every invocation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SymrefConfig {
    /// Path to the index database (sidecars are derived from it)
    pub index: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("symref.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<SymrefConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: SymrefConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("symref.toml"))).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symref.toml");
        std::fs::write(&path, "index = \"/proj/.idx/db.sqlite\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.index.as_deref(), Some("/proj/.idx/db.sqlite"));
    }
}
