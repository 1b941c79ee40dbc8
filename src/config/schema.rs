//! Configuration schema

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::i18n::{DEFAULT_TRANSLATIONS_FILE, Language};
use crate::rules::DEFAULT_RULES_FILE;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Data file locations
    #[serde(default)]
    pub files: FilesConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Language the UI starts in
    #[serde(default)]
    pub language: Language,

    /// Theme name
    #[serde(default)]
    pub theme: Option<String>,
}

/// Where the rule and translation files live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilesConfig {
    /// Rule file (relative paths resolve against the working directory)
    #[serde(default = "default_rules_file")]
    pub rules: PathBuf,

    /// Translation file
    #[serde(default = "default_translations_file")]
    pub translations: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            rules: default_rules_file(),
            translations: default_translations_file(),
        }
    }
}

fn default_rules_file() -> PathBuf {
    PathBuf::from(DEFAULT_RULES_FILE)
}

fn default_translations_file() -> PathBuf {
    PathBuf::from(DEFAULT_TRANSLATIONS_FILE)
}
