//! Keyword rules and their JSON store

mod store;

pub use store::{DEFAULT_RULES_FILE, RuleStore, StoreError};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A keyword set paired with the folder that matching files are moved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Keywords as entered by the user (matched after normalization)
    pub keywords: Vec<String>,

    /// Destination folder, may start with `~`
    pub destination: PathBuf,
}

impl Rule {
    /// Create a new rule
    pub fn new(keywords: Vec<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            keywords,
            destination: destination.into(),
        }
    }

    /// Build a rule from the add-rule dialog fields.
    ///
    /// Keywords are comma separated and trimmed; empty fragments are dropped.
    /// Returns `None` unless there is at least one keyword and a destination.
    pub fn from_input(keywords: &str, destination: &str) -> Option<Self> {
        let keywords = split_keywords(keywords);
        let destination = destination.trim();
        if keywords.is_empty() || destination.is_empty() {
            return None;
        }
        Some(Self::new(keywords, destination))
    }

    /// Keywords joined for display
    pub fn keywords_display(&self) -> String {
        self.keywords.join(", ")
    }

    /// Destination with `~` expanded
    pub fn expanded_destination(&self) -> PathBuf {
        crate::expand_path(&self.destination)
    }
}

/// Split a comma separated keyword list
pub fn split_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
