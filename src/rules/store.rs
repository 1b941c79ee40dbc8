//! JSON persistence for the rule list

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::Rule;

/// Default rule file name
pub const DEFAULT_RULES_FILE: &str = "tasks.json";

/// Errors reading or writing the rule file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid rule file: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize rules: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads and overwrites the rule file as a whole
#[derive(Debug, Clone)]
pub struct RuleStore {
    path: PathBuf,
}

impl RuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all rules. A missing file is an empty rule list.
    pub fn load(&self) -> Result<Vec<Rule>, StoreError> {
        if !self.path.exists() {
            debug!("No rule file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let rules: Vec<Rule> =
            serde_json::from_str(&content).map_err(|source| StoreError::Decode {
                path: self.path.clone(),
                source,
            })?;

        info!("Loaded {} rules from {}", rules.len(), self.path.display());
        Ok(rules)
    }

    /// Overwrite the rule file with `rules`.
    ///
    /// Output is indented with four spaces and keeps non-ASCII text as is.
    pub fn save(&self, rules: &[Rule]) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        rules.serialize(&mut ser).map_err(StoreError::Encode)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        std::fs::write(&self.path, buf).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved {} rules to {}", rules.len(), self.path.display());
        Ok(())
    }
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new(DEFAULT_RULES_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rules() -> Vec<Rule> {
        vec![
            Rule::new(vec!["invoice".into(), "fatura".into()], "~/Documents/Invoices"),
            Rule::new(vec!["Café menü".into()], "/tmp/menus"),
        ]
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RuleStore::new(dir.path().join("tasks.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RuleStore::new(dir.path().join("tasks.json"));
        let rules = sample_rules();

        store.save(&rules).unwrap();
        assert_eq!(store.load().unwrap(), rules);

        // Saving what was loaded leaves the file unchanged
        let first = std::fs::read_to_string(store.path()).unwrap();
        store.save(&store.load().unwrap()).unwrap();
        let second = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = RuleStore::new(dir.path().join("tasks.json"));
        store.save(&sample_rules()).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("Café menü"));
        assert!(!content.contains("\\u"));
        assert!(content.contains("\n    {\n        \"keywords\": ["));
    }

    #[test]
    fn test_reads_external_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"keywords": ["invoice"], "destination": "C:\\Users\\me\\Invoices"}]"#,
        )
        .unwrap();

        let rules = RuleStore::new(&path).load().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].keywords, vec!["invoice"]);
        assert_eq!(rules[0].destination, PathBuf::from("C:\\Users\\me\\Invoices"));
    }

    #[test]
    fn test_malformed_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "[{\"keywords\": [\"x\"]").unwrap();

        let err = RuleStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
        // The broken file is left alone
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"keywords\": [\"x\"]");
    }
}
