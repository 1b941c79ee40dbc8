//! Application state management

use crossterm::event::KeyCode;
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::i18n::{Language, TextKey, Translations};
use crate::mover::Mover;
use crate::rules::{Rule, RuleStore, StoreError};
use crate::theme::Theme;

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Idle: lists are shown and actions can be triggered
    #[default]
    Normal,
    /// Typing a folder path to scan
    AddFolder,
    /// Add-rule dialog
    AddRule,
    /// Language selector
    LanguagePicker,
    /// Theme picker dialog
    ThemePicker,
    /// Help dialog
    Help,
    /// Yes/no prompt before a rule is deleted
    ConfirmRemoval,
}

/// The two lists on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Folders,
    Rules,
}

impl Pane {
    pub fn toggle(self) -> Self {
        match self {
            Pane::Folders => Pane::Rules,
            Pane::Rules => Pane::Folders,
        }
    }
}

/// User-triggered operations.
///
/// Key handling maps keys to these identifiers; nothing is dispatched on
/// displayed (translated) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddFolder,
    RemoveFolder,
    AddRule,
    RemoveRule,
    StartOrganizing,
    ChangeLanguage,
    ChangeTheme,
    Help,
    Exit,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[
            Action::AddFolder,
            Action::RemoveFolder,
            Action::AddRule,
            Action::RemoveRule,
            Action::StartOrganizing,
            Action::ChangeLanguage,
            Action::ChangeTheme,
            Action::Help,
            Action::Exit,
        ]
    }

    /// Key bound to the action in normal mode
    pub fn key(self) -> char {
        match self {
            Action::AddFolder => 'a',
            Action::RemoveFolder => 'x',
            Action::AddRule => 'n',
            Action::RemoveRule => 'd',
            Action::StartOrganizing => 's',
            Action::ChangeLanguage => 'l',
            Action::ChangeTheme => 't',
            Action::Help => '?',
            Action::Exit => 'q',
        }
    }

    pub fn from_key(code: KeyCode) -> Option<Action> {
        match code {
            KeyCode::Char(c) => Self::all().iter().copied().find(|a| a.key() == c),
            KeyCode::Delete => Some(Action::RemoveRule),
            KeyCode::F(1) => Some(Action::Help),
            _ => None,
        }
    }

    /// Translation key of the action's label
    pub fn label(self) -> TextKey {
        match self {
            Action::AddFolder => TextKey::AddFolder,
            Action::RemoveFolder => TextKey::RemoveFolder,
            Action::AddRule => TextKey::AddRule,
            Action::RemoveRule => TextKey::RemoveRule,
            Action::StartOrganizing => TextKey::StartOrganizing,
            Action::ChangeLanguage => TextKey::Language,
            Action::ChangeTheme => TextKey::Theme,
            Action::Help => TextKey::Help,
            Action::Exit => TextKey::Exit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKind {
    Info,
    Error,
}

/// A message box. Texts are resolved when the popup is queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub kind: PopupKind,
    pub title: String,
    pub message: String,
    pub lines: Vec<String>,
}

/// Fields in the add-rule dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleDialogField {
    #[default]
    Keywords,
    Destination,
}

impl RuleDialogField {
    pub fn next(self) -> Self {
        match self {
            Self::Keywords => Self::Destination,
            Self::Destination => Self::Keywords,
        }
    }
}

/// State for the add-rule dialog
#[derive(Debug, Clone, Default)]
pub struct RuleDialog {
    pub field: RuleDialogField,
    pub keywords: String,
    pub destination: String,
    pub cursor_keywords: usize,
    pub cursor_destination: usize,
}

impl RuleDialog {
    pub fn to_rule(&self) -> Option<Rule> {
        Rule::from_input(&self.keywords, &self.destination)
    }
}

/// Everything that stays fixed across rebuilds
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    /// Explicit config file, `None` for the default location
    pub config_path: Option<PathBuf>,
    pub rules_path: PathBuf,
    pub translations_path: PathBuf,
}

impl AppContext {
    pub fn new(config: Config, config_path: Option<PathBuf>) -> Self {
        let rules_path = config.rules_path();
        let translations_path = config.translations_path();
        Self {
            config,
            config_path,
            rules_path,
            translations_path,
        }
    }

    /// Use other rule or translation files for this run only.
    /// `config.files` keeps its values, so saving the config never
    /// records these.
    pub fn with_overrides(mut self, rules: Option<PathBuf>, translations: Option<PathBuf>) -> Self {
        if let Some(rules) = rules {
            self.rules_path = crate::expand_path(&rules);
        }
        if let Some(translations) = translations {
            self.translations_path = crate::expand_path(&translations);
        }
        self
    }
}

/// What a rebuild carries over from the previous state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub language: Language,
    pub search_paths: Vec<PathBuf>,
}

impl Session {
    /// Fresh session with the default search folders
    pub fn new(language: Language) -> Self {
        Self {
            language,
            search_paths: crate::default_search_paths(),
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub ctx: AppContext,

    /// Current input mode
    pub mode: Mode,

    pub theme: Theme,
    pub language: Language,
    pub translations: Translations,

    /// Rules as loaded from the rule file
    pub rules: Vec<Rule>,

    /// False when the rule file exists but could not be read; it is then
    /// never overwritten during this session.
    pub rules_writable: bool,

    pub rule_store: RuleStore,
    pub mover: Mover,

    /// Folders scanned by "start organizing" (session only)
    pub search_paths: Vec<PathBuf>,

    pub focus: Pane,
    pub selected_folder: Option<usize>,
    pub selected_rule: Option<usize>,

    /// Add-folder input line
    pub folder_input: String,
    pub folder_cursor: usize,

    pub rule_dialog: Option<RuleDialog>,

    /// Message boxes, shown front first above any mode
    pub popups: VecDeque<Popup>,

    /// Set when the state must be rebuilt from disk
    pub restart: Option<Session>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    pub language_picker_index: usize,
    pub theme_picker_index: usize,

    /// Theme saved when entering the theme picker
    pub original_theme: Option<Theme>,
}

impl AppState {
    /// Build the state: rules and translations are read from disk here.
    pub fn new(ctx: AppContext, session: Session, theme: Theme) -> Self {
        let rule_store = RuleStore::new(&ctx.rules_path);

        let translations = match Translations::load(&ctx.translations_path) {
            Ok(t) => t,
            Err(e) => {
                error!("{:#}", e);
                Translations::default()
            }
        };

        let mut state = Self {
            mode: Mode::default(),
            theme,
            language: session.language,
            translations,
            rules: Vec::new(),
            rules_writable: true,
            rule_store,
            mover: Mover::new(),
            selected_folder: (!session.search_paths.is_empty()).then_some(0),
            search_paths: session.search_paths,
            focus: Pane::default(),
            selected_rule: None,
            folder_input: String::new(),
            folder_cursor: 0,
            rule_dialog: None,
            popups: VecDeque::new(),
            restart: None,
            should_quit: false,
            status_message: None,
            language_picker_index: 0,
            theme_picker_index: theme.index(),
            original_theme: None,
            ctx,
        };

        match state.rule_store.load() {
            Ok(rules) => {
                state.selected_rule = (!rules.is_empty()).then_some(0);
                state.rules = rules;
            }
            Err(e) => {
                error!("{}", e);
                state.rules_writable = false;
                state.error_popup_with(TextKey::RulesUnavailable, vec![e.to_string()]);
            }
        }

        info!(
            "Session ready: {} rules, {} search folders, language {}",
            state.rules.len(),
            state.search_paths.len(),
            state.language
        );

        state
    }

    /// Translated UI text
    pub fn t(&self, key: TextKey) -> String {
        self.translations.get(key, self.language)
    }

    /// Session to carry into a rebuild after a rule change
    pub fn session(&self) -> Session {
        Session {
            language: self.language,
            search_paths: self.search_paths.clone(),
        }
    }

    pub fn current_rule(&self) -> Option<&Rule> {
        self.selected_rule.and_then(|i| self.rules.get(i))
    }

    pub fn current_folder(&self) -> Option<&PathBuf> {
        self.selected_folder.and_then(|i| self.search_paths.get(i))
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popups.front()
    }

    fn push_popup(&mut self, kind: PopupKind, key: TextKey, lines: Vec<String>) {
        let title = match kind {
            PopupKind::Info => self.t(TextKey::Info),
            PopupKind::Error => self.t(TextKey::Error),
        };
        let message = self.t(key);
        if kind == PopupKind::Error {
            warn!("{}", message);
        }
        self.popups.push_back(Popup {
            kind,
            title,
            message,
            lines,
        });
    }

    pub fn error_popup(&mut self, key: TextKey) {
        self.push_popup(PopupKind::Error, key, Vec::new());
    }

    pub fn error_popup_with(&mut self, key: TextKey, lines: Vec<String>) {
        self.push_popup(PopupKind::Error, key, lines);
    }

    pub fn info_popup(&mut self, key: TextKey, lines: Vec<String>) {
        self.push_popup(PopupKind::Info, key, lines);
    }

    /// Drop the front popup
    pub fn dismiss_popup(&mut self) {
        self.popups.pop_front();
    }

    /// Set a temporary status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Write the rule list and schedule a rebuild.
    ///
    /// On failure nothing is rebuilt and the error is shown.
    pub fn persist_rules(&mut self, rules: &[Rule]) -> bool {
        match self.rule_store.save(rules) {
            Ok(()) => {
                self.restart = Some(self.session());
                true
            }
            Err(e) => {
                self.report_store_error(&e);
                false
            }
        }
    }

    fn report_store_error(&mut self, e: &StoreError) {
        error!("{}", e);
        self.error_popup_with(TextKey::Error, vec![e.to_string()]);
    }

    /// Move a list selection by `delta` within `len` items
    pub fn step_selection(selected: Option<usize>, len: usize, delta: isize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let current = selected.unwrap_or(0) as isize;
        Some((current + delta).clamp(0, len as isize - 1) as usize)
    }
}

/// Shorten text to at most `width` characters.
///
/// Whitespace runs collapse to one space. Whole words are kept and "..." is
/// appended; when not even one word fits the text is cut mid-word.
pub fn shorten_text(text: &str, width: usize) -> String {
    const PLACEHOLDER: &str = "...";

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(PLACEHOLDER.len());
    let mut kept = String::new();
    for word in collapsed.split(' ') {
        let extra = if kept.is_empty() { 0 } else { 1 };
        if kept.chars().count() + extra + word.chars().count() > budget {
            break;
        }
        if extra == 1 {
            kept.push(' ');
        }
        kept.push_str(word);
    }

    if kept.is_empty() {
        kept = collapsed.chars().take(budget).collect();
    }
    kept.push_str(PLACEHOLDER);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_keeps_short_text() {
        assert_eq!(shorten_text("invoice.pdf", 30), "invoice.pdf");
        assert_eq!(shorten_text("a   b", 30), "a b");
    }

    #[test]
    fn test_shorten_whole_words() {
        let s = shorten_text("annual report for the finance team.pdf", 20);
        assert_eq!(s, "annual report for...");
        assert!(s.chars().count() <= 20);
    }

    #[test]
    fn test_shorten_single_long_word() {
        let s = shorten_text("a_really_long_file_name_without_spaces.pdf", 12);
        assert_eq!(s, "a_really_...");
        assert_eq!(s.chars().count(), 12);
    }

    #[test]
    fn test_action_keys_are_unique() {
        for a in Action::all() {
            assert_eq!(Action::from_key(KeyCode::Char(a.key())), Some(*a));
        }
    }

    #[test]
    fn test_step_selection() {
        assert_eq!(AppState::step_selection(None, 0, 1), None);
        assert_eq!(AppState::step_selection(None, 3, 1), Some(1));
        assert_eq!(AppState::step_selection(Some(2), 3, 1), Some(2));
        assert_eq!(AppState::step_selection(Some(0), 3, -1), Some(0));
    }
}
