//! UI translations loaded from a JSON table
//!
//! The table maps a translation key to a map of language code -> text.
//! Lookups fall back to English, then to the key itself, so a missing or
//! partial file never breaks rendering.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tracing::{info, warn};

/// Default translation file name
pub const DEFAULT_TRANSLATIONS_FILE: &str = "translations.json";

/// Language used when nothing else is configured, and the lookup fallback
pub const FALLBACK_LANGUAGE: &str = "en";

/// Supported UI languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Tr,
    Fr,
    Es,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Tr, Language::Fr, Language::Es]
    }

    /// Two-letter code used as the key in the translation table
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
            Language::Fr => "fr",
            Language::Es => "es",
        }
    }

    /// Name shown in the language picker
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Tr => "Türkçe",
            Language::Fr => "Français",
            Language::Es => "Español",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|l| l.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s).with_context(|| {
            let codes: Vec<_> = Self::all().iter().map(|l| l.code()).collect();
            format!("unknown language '{}' (expected one of {})", s, codes.join(", "))
        })
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Stable identifiers for every piece of UI text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Title,
    Welcome,
    Language,
    ManageFolders,
    AddFolder,
    RemoveFolder,
    SelectFolder,
    FolderNotFound,
    FolderExists,
    NoFolderSelected,
    ManageRules,
    AddRule,
    RemoveRule,
    EnterKeywords,
    SelectDestination,
    RuleFieldsRequired,
    ConfirmRemoval,
    Confirmation,
    NoRulesSelected,
    RulesUnavailable,
    StartOrganizing,
    AddScanFolder,
    AddOrgRule,
    FilesMoved,
    NoMatchingFiles,
    MoveError,
    Error,
    Info,
    Exit,
    Theme,
    Help,
    Yes,
    No,
    NoFolders,
    NoRules,
    Keywords,
    Destination,
    HintSwitchPane,
    HintNavigate,
    HintSave,
    HintCancel,
    HintClose,
}

impl TextKey {
    /// Key as written in the translation file
    pub fn as_str(self) -> &'static str {
        match self {
            TextKey::Title => "title",
            TextKey::Welcome => "welcome",
            TextKey::Language => "language",
            TextKey::ManageFolders => "manage_folders",
            TextKey::AddFolder => "add_folder",
            TextKey::RemoveFolder => "remove_folder",
            TextKey::SelectFolder => "select_folder",
            TextKey::FolderNotFound => "folder_not_found",
            TextKey::FolderExists => "folder_exists",
            TextKey::NoFolderSelected => "no_folder_selected",
            TextKey::ManageRules => "manage_rules",
            TextKey::AddRule => "add_rule",
            TextKey::RemoveRule => "remove_rule",
            TextKey::EnterKeywords => "enter_keywords",
            TextKey::SelectDestination => "select_destination",
            TextKey::RuleFieldsRequired => "rule_fields_required",
            TextKey::ConfirmRemoval => "confirm_removal",
            TextKey::Confirmation => "confirmation",
            TextKey::NoRulesSelected => "no_rules_selected",
            TextKey::RulesUnavailable => "rules_unavailable",
            TextKey::StartOrganizing => "start_organizing",
            TextKey::AddScanFolder => "add_scan_folder",
            TextKey::AddOrgRule => "add_org_rule",
            TextKey::FilesMoved => "files_moved",
            TextKey::NoMatchingFiles => "no_matching_files",
            TextKey::MoveError => "move_error",
            TextKey::Error => "error",
            TextKey::Info => "info",
            TextKey::Exit => "exit",
            TextKey::Theme => "theme",
            TextKey::Help => "help",
            TextKey::Yes => "yes",
            TextKey::No => "no",
            TextKey::NoFolders => "no_folders",
            TextKey::NoRules => "no_rules",
            TextKey::Keywords => "keywords",
            TextKey::Destination => "destination",
            TextKey::HintSwitchPane => "hint_switch_pane",
            TextKey::HintNavigate => "hint_navigate",
            TextKey::HintSave => "hint_save",
            TextKey::HintCancel => "hint_cancel",
            TextKey::HintClose => "hint_close",
        }
    }
}

/// Translation table: key -> language code -> text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations {
    table: HashMap<String, HashMap<String, String>>,
}

impl Translations {
    /// Load the table from a JSON file. A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("No translation file at {}, showing raw keys", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read translations from {}", path.display()))?;
        let translations: Translations = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse translations from {}", path.display()))?;

        info!(
            "Loaded {} translation keys from {}",
            translations.table.len(),
            path.display()
        );
        Ok(translations)
    }

    /// Look up a UI string
    pub fn get(&self, key: TextKey, lang: Language) -> String {
        resolve(key.as_str(), lang.code(), self)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Keys from `TextKey` that have no entry for `lang`
    pub fn missing_for(&self, lang: Language) -> Vec<&'static str> {
        ALL_KEYS
            .iter()
            .map(|k| k.as_str())
            .filter(|k| {
                !self
                    .table
                    .get(*k)
                    .is_some_and(|langs| langs.contains_key(lang.code()))
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, key: &str, lang: &str, text: &str) {
        self.table
            .entry(key.to_string())
            .or_default()
            .insert(lang.to_string(), text.to_string());
    }
}

/// Resolve `key` for `lang`: the exact entry, else English, else the key.
pub fn resolve(key: &str, lang: &str, translations: &Translations) -> String {
    let entry = translations.table.get(key);

    if let Some(text) = entry.and_then(|langs| langs.get(lang)) {
        return text.clone();
    }

    if first_miss(key, lang) {
        warn!("Missing translation for '{}' in '{}'", key, lang);
    }
    entry
        .and_then(|langs| langs.get(FALLBACK_LANGUAGE))
        .cloned()
        .unwrap_or_else(|| key.to_string())
}

/// True the first time a (key, language) miss is seen in this process.
/// Lookups run on every frame, so each miss is logged once.
fn first_miss(key: &str, lang: &str) -> bool {
    static SEEN: OnceLock<Mutex<HashSet<(String, String)>>> = OnceLock::new();
    let mut seen = SEEN
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    seen.insert((key.to_string(), lang.to_string()))
}

const ALL_KEYS: &[TextKey] = &[
    TextKey::Title,
    TextKey::Welcome,
    TextKey::Language,
    TextKey::ManageFolders,
    TextKey::AddFolder,
    TextKey::RemoveFolder,
    TextKey::SelectFolder,
    TextKey::FolderNotFound,
    TextKey::FolderExists,
    TextKey::NoFolderSelected,
    TextKey::ManageRules,
    TextKey::AddRule,
    TextKey::RemoveRule,
    TextKey::EnterKeywords,
    TextKey::SelectDestination,
    TextKey::RuleFieldsRequired,
    TextKey::ConfirmRemoval,
    TextKey::Confirmation,
    TextKey::NoRulesSelected,
    TextKey::RulesUnavailable,
    TextKey::StartOrganizing,
    TextKey::AddScanFolder,
    TextKey::AddOrgRule,
    TextKey::FilesMoved,
    TextKey::NoMatchingFiles,
    TextKey::MoveError,
    TextKey::Error,
    TextKey::Info,
    TextKey::Exit,
    TextKey::Theme,
    TextKey::Help,
    TextKey::Yes,
    TextKey::No,
    TextKey::NoFolders,
    TextKey::NoRules,
    TextKey::Keywords,
    TextKey::Destination,
    TextKey::HintSwitchPane,
    TextKey::HintNavigate,
    TextKey::HintSave,
    TextKey::HintCancel,
    TextKey::HintClose,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_chain() {
        let mut t = Translations::default();
        t.insert("exit", "en", "Exit");
        t.insert("exit", "tr", "Çıkış");

        assert_eq!(resolve("exit", "tr", &t), "Çıkış");
        // No French entry: English
        assert_eq!(resolve("exit", "fr", &t), "Exit");

        let mut only_tr = Translations::default();
        only_tr.insert("exit", "tr", "Çıkış");
        // No French, no English: the key itself
        assert_eq!(resolve("exit", "fr", &only_tr), "exit");
        // Unknown key
        assert_eq!(resolve("nope", "en", &Translations::default()), "nope");
    }

    #[test]
    fn test_each_miss_is_reported_once() {
        assert!(first_miss("only_reported_once", "fr"));
        assert!(!first_miss("only_reported_once", "fr"));
        assert!(first_miss("only_reported_once", "es"));

        // Repeated lookups still resolve after the first report
        let t = Translations::default();
        for _ in 0..3 {
            assert_eq!(resolve("repeat_lookup", "tr", &t), "repeat_lookup");
        }
        assert!(!first_miss("repeat_lookup", "tr"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let t = Translations::load(&dir.path().join("translations.json")).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.get(TextKey::Welcome, Language::Fr), "welcome");
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");
        std::fs::write(
            &path,
            r#"{"welcome": {"en": "Welcome", "es": "Bienvenido"}}"#,
        )
        .unwrap();

        let t = Translations::load(&path).unwrap();
        assert_eq!(t.get(TextKey::Welcome, Language::Es), "Bienvenido");
        assert_eq!(t.get(TextKey::Welcome, Language::Tr), "Welcome");
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(Translations::load(&path).is_err());
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("TR"), Some(Language::Tr));
        assert_eq!(Language::from_code("de"), None);
        assert_eq!("es".parse::<Language>().unwrap(), Language::Es);
        assert!("xx".parse::<Language>().is_err());
        for lang in Language::all() {
            assert_eq!(Language::from_code(lang.code()), Some(*lang));
        }
    }

    #[test]
    fn test_bundled_table_is_complete() {
        let bundled = include_str!("../translations.json");
        let t: Translations = serde_json::from_str(bundled).unwrap();
        for lang in Language::all() {
            assert!(t.missing_for(*lang).is_empty(), "{:?}", t.missing_for(*lang));
        }
    }
}
