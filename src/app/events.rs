//! Event handling for the TUI

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::state::{Action, AppState, Mode, Pane, RuleDialog, RuleDialogField, Session, shorten_text};
use crate::config::Config;
use crate::i18n::{Language, TextKey};
use crate::theme::Theme;

/// Handle a key event and update state
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // Popups sit above every mode
    if !state.popups.is_empty() {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
        ) {
            state.dismiss_popup();
        }
        return;
    }

    match state.mode {
        Mode::AddFolder => handle_folder_input_key(state, key),
        Mode::AddRule => handle_rule_dialog_key(state, key),
        Mode::ConfirmRemoval => handle_confirm_removal_key(state, key),
        Mode::LanguagePicker => handle_language_picker_key(state, key),
        Mode::ThemePicker => handle_theme_picker_key(state, key),
        Mode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                state.mode = Mode::Normal;
            }
        }
        Mode::Normal => handle_normal_key(state, key),
    }
}

fn handle_normal_key(state: &mut AppState, key: KeyEvent) {
    state.clear_status();

    match key.code {
        KeyCode::Esc => {
            dispatch(state, Action::Exit);
            return;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            state.focus = state.focus.toggle();
            return;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            move_selection(state, -1);
            return;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_selection(state, 1);
            return;
        }
        KeyCode::Home | KeyCode::Char('g') => {
            move_selection(state, isize::MIN / 2);
            return;
        }
        KeyCode::End | KeyCode::Char('G') => {
            move_selection(state, isize::MAX / 2);
            return;
        }
        _ => {}
    }

    if let Some(action) = Action::from_key(key.code) {
        dispatch(state, action);
    }
}

fn move_selection(state: &mut AppState, delta: isize) {
    match state.focus {
        Pane::Folders => {
            state.selected_folder =
                AppState::step_selection(state.selected_folder, state.search_paths.len(), delta);
        }
        Pane::Rules => {
            state.selected_rule =
                AppState::step_selection(state.selected_rule, state.rules.len(), delta);
        }
    }
}

/// Run a user action
pub fn dispatch(state: &mut AppState, action: Action) {
    debug!("Action: {:?}", action);

    match action {
        Action::AddFolder => {
            state.folder_input.clear();
            state.folder_cursor = 0;
            state.mode = Mode::AddFolder;
        }
        Action::RemoveFolder => remove_folder(state),
        Action::AddRule => {
            if !state.rules_writable {
                state.error_popup(TextKey::RulesUnavailable);
                return;
            }
            state.rule_dialog = Some(RuleDialog::default());
            state.mode = Mode::AddRule;
        }
        Action::RemoveRule => {
            if !state.rules_writable {
                state.error_popup(TextKey::RulesUnavailable);
                return;
            }
            if state.current_rule().is_none() {
                state.error_popup(TextKey::NoRulesSelected);
                return;
            }
            state.mode = Mode::ConfirmRemoval;
        }
        Action::StartOrganizing => start_organizing(state),
        Action::ChangeLanguage => {
            state.language_picker_index = Language::all()
                .iter()
                .position(|l| *l == state.language)
                .unwrap_or(0);
            state.mode = Mode::LanguagePicker;
        }
        Action::ChangeTheme => {
            state.theme_picker_index = state.theme.index();
            state.original_theme = Some(state.theme);
            state.mode = Mode::ThemePicker;
        }
        Action::Help => state.mode = Mode::Help,
        Action::Exit => state.should_quit = true,
    }
}

fn remove_folder(state: &mut AppState) {
    let Some(idx) = state.selected_folder.filter(|i| *i < state.search_paths.len()) else {
        state.error_popup(TextKey::NoFolderSelected);
        return;
    };

    let removed = state.search_paths.remove(idx);
    info!("Removed search folder {}", removed.display());

    state.selected_folder = if state.search_paths.is_empty() {
        None
    } else {
        Some(idx.min(state.search_paths.len() - 1))
    };
    state.set_status(format!("- {}", crate::contract_home(&removed)));
}

fn handle_folder_input_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.folder_input.clear();
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => submit_folder(state),
        _ => handle_text_input(&mut state.folder_input, &mut state.folder_cursor, key),
    }
}

fn submit_folder(state: &mut AppState) {
    let input = state.folder_input.trim();
    if input.is_empty() {
        // Same as cancelling the folder chooser
        state.mode = Mode::Normal;
        return;
    }

    let folder = crate::expand_path(&PathBuf::from(input));
    if !folder.is_dir() {
        state.error_popup_with(TextKey::FolderNotFound, vec![folder.display().to_string()]);
        return;
    }
    if state.search_paths.contains(&folder) {
        state.error_popup_with(TextKey::FolderExists, vec![folder.display().to_string()]);
        return;
    }

    info!("Added search folder {}", folder.display());
    state.set_status(format!("+ {}", crate::contract_home(&folder)));
    state.search_paths.push(folder);
    state.selected_folder = Some(state.search_paths.len() - 1);
    state.focus = Pane::Folders;
    state.folder_input.clear();
    state.mode = Mode::Normal;
}

fn handle_rule_dialog_key(state: &mut AppState, key: KeyEvent) {
    let Some(ref mut dialog) = state.rule_dialog else {
        state.mode = Mode::Normal;
        return;
    };

    match key.code {
        KeyCode::Esc => {
            state.rule_dialog = None;
            state.mode = Mode::Normal;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            dialog.field = dialog.field.next();
        }
        KeyCode::Enter => {
            // Enter on the keywords line moves on to the destination
            if dialog.field == RuleDialogField::Keywords && dialog.destination.trim().is_empty() {
                dialog.field = RuleDialogField::Destination;
                return;
            }
            submit_rule(state);
        }
        _ => match dialog.field {
            RuleDialogField::Keywords => {
                handle_text_input(&mut dialog.keywords, &mut dialog.cursor_keywords, key)
            }
            RuleDialogField::Destination => {
                handle_text_input(&mut dialog.destination, &mut dialog.cursor_destination, key)
            }
        },
    }
}

fn submit_rule(state: &mut AppState) {
    let Some(rule) = state.rule_dialog.as_ref().and_then(RuleDialog::to_rule) else {
        state.error_popup(TextKey::RuleFieldsRequired);
        return;
    };

    let mut rules = state.rules.clone();
    info!(
        "Adding rule [{}] -> {}",
        rule.keywords_display(),
        rule.destination.display()
    );
    rules.push(rule);

    if state.persist_rules(&rules) {
        state.rule_dialog = None;
        state.mode = Mode::Normal;
    }
}

fn handle_confirm_removal_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            state.mode = Mode::Normal;
            let Some(idx) = state.selected_rule.filter(|i| *i < state.rules.len()) else {
                state.error_popup(TextKey::NoRulesSelected);
                return;
            };

            let mut rules = state.rules.clone();
            let removed = rules.remove(idx);
            info!(
                "Removing rule [{}] -> {}",
                removed.keywords_display(),
                removed.destination.display()
            );
            state.persist_rules(&rules);
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
        }
        _ => {}
    }
}

fn handle_language_picker_key(state: &mut AppState, key: KeyEvent) {
    let languages = Language::all();
    let len = languages.len();

    match key.code {
        KeyCode::Esc => state.mode = Mode::Normal,
        KeyCode::Enter => {
            let selected = languages[state.language_picker_index];
            state.mode = Mode::Normal;
            if selected != state.language {
                info!("Switching language to {}", selected);
                // Search folders go back to the defaults
                state.restart = Some(Session::new(selected));
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.language_picker_index = (state.language_picker_index + 1) % len;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.language_picker_index =
                state.language_picker_index.checked_sub(1).unwrap_or(len - 1);
        }
        _ => {}
    }
}

fn handle_theme_picker_key(state: &mut AppState, key: KeyEvent) {
    let themes = Theme::all();
    let len = themes.len();

    match key.code {
        KeyCode::Esc => {
            // Cancel - restore original theme
            if let Some(original) = state.original_theme.take() {
                state.theme = original;
            }
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let selected_theme = Theme::from(themes[state.theme_picker_index]);
            state.theme = selected_theme;
            state.original_theme = None;

            let slug = selected_theme.slug().to_string();
            state.ctx.config.general.theme = Some(slug.clone());
            match save_theme(state.ctx.config_path.as_deref(), slug) {
                Ok(()) => state.set_status(selected_theme.name()),
                Err(e) => state.set_status(format!("{:#}", e)),
            }

            state.mode = Mode::Normal;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.theme_picker_index = (state.theme_picker_index + 1) % len;
            // Preview theme
            state.theme = Theme::from(themes[state.theme_picker_index]);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.theme_picker_index = state.theme_picker_index.checked_sub(1).unwrap_or(len - 1);
            state.theme = Theme::from(themes[state.theme_picker_index]);
        }
        _ => {}
    }
}

/// Store the theme choice, leaving every other setting as it is on disk
fn save_theme(config_path: Option<&Path>, slug: String) -> anyhow::Result<()> {
    let mut on_disk = Config::load(config_path)?;
    on_disk.general.theme = Some(slug);
    on_disk.save(config_path)
}

/// Run every rule over every search folder, then report.
///
/// Per-file failures are queued first, the summary last.
fn start_organizing(state: &mut AppState) {
    if state.search_paths.is_empty() {
        state.error_popup(TextKey::AddScanFolder);
        return;
    }
    if state.rules.is_empty() {
        state.error_popup(TextKey::AddOrgRule);
        return;
    }

    let mut moved = Vec::new();
    let mut failures = Vec::new();
    for rule in &state.rules {
        match state
            .mover
            .apply_rule(rule, &state.search_paths, |f| failures.push(f.to_string()))
        {
            Ok(files) => moved.extend(files),
            Err(e) => failures.push(e.to_string()),
        }
    }

    info!("Organizing finished: {} moved, {} failed", moved.len(), failures.len());

    for failure in failures {
        state.error_popup_with(TextKey::MoveError, vec![failure]);
    }

    if moved.is_empty() {
        state.info_popup(TextKey::NoMatchingFiles, Vec::new());
        return;
    }

    let summary = moved
        .iter()
        .map(|m| {
            let name = m
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!(
                "\"{}\" -> \"{}\"",
                shorten_text(&name, 30),
                shorten_text(&crate::contract_home(&m.destination), 50)
            )
        })
        .collect();
    state.info_popup(TextKey::FilesMoved, summary);
}

fn handle_text_input(input: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => {
            let byte_pos = input
                .char_indices()
                .nth(*cursor)
                .map(|(i, _)| i)
                .unwrap_or(input.len());
            input.insert(byte_pos, c);
            *cursor += 1;
        }
        KeyCode::Backspace => {
            if *cursor > 0 {
                *cursor -= 1;
                let byte_pos = input
                    .char_indices()
                    .nth(*cursor)
                    .map(|(i, _)| i)
                    .unwrap_or(input.len());
                input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            if *cursor < input.chars().count() {
                let byte_pos = input
                    .char_indices()
                    .nth(*cursor)
                    .map(|(i, _)| i)
                    .unwrap_or(input.len());
                input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            if *cursor < input.chars().count() {
                *cursor += 1;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = input.chars().count(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{AppContext, PopupKind};
    use crate::config::Config;
    use crate::rules::{Rule, RuleStore};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn setup(dir: &Path, rules: &[Rule], search_paths: Vec<PathBuf>) -> AppState {
        let mut config = Config::default();
        config.files.rules = dir.join("tasks.json");
        config.files.translations = dir.join("translations.json");
        fs::write(
            dir.join("translations.json"),
            include_str!("../../translations.json"),
        )
        .unwrap();
        if !rules.is_empty() {
            RuleStore::new(dir.join("tasks.json")).save(rules).unwrap();
        }

        let ctx = AppContext::new(config, Some(dir.join("config.toml")));
        AppState::new(
            ctx,
            Session {
                language: Language::En,
                search_paths,
            },
            Theme::default(),
        )
    }

    /// Apply a pending rebuild the way the run loop does
    fn rebuild(state: AppState) -> AppState {
        match state.restart.clone() {
            Some(session) => AppState::new(state.ctx.clone(), session, state.theme),
            None => state,
        }
    }

    #[test]
    fn test_add_folder() {
        let tmp = TempDir::new().unwrap();
        let extra = tmp.path().join("extra");
        fs::create_dir(&extra).unwrap();
        let mut state = setup(tmp.path(), &[], Vec::new());

        press(&mut state, KeyCode::Char('a'));
        assert_eq!(state.mode, Mode::AddFolder);
        type_str(&mut state, &extra.display().to_string());
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.search_paths, vec![extra.clone()]);

        // Adding it again is refused and the dialog stays open
        press(&mut state, KeyCode::Char('a'));
        type_str(&mut state, &extra.display().to_string());
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.popup().unwrap().message, state.t(TextKey::FolderExists));
        assert_eq!(state.search_paths.len(), 1);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.mode, Mode::AddFolder);
        press(&mut state, KeyCode::Esc);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn test_add_missing_folder_is_refused() {
        let tmp = TempDir::new().unwrap();
        let mut state = setup(tmp.path(), &[], Vec::new());

        press(&mut state, KeyCode::Char('a'));
        type_str(&mut state, &tmp.path().join("nope").display().to_string());
        press(&mut state, KeyCode::Enter);

        assert_eq!(state.popup().unwrap().kind, PopupKind::Error);
        assert!(state.search_paths.is_empty());
    }

    #[test]
    fn test_remove_folder() {
        let tmp = TempDir::new().unwrap();
        let mut state = setup(
            tmp.path(),
            &[],
            vec![tmp.path().join("a"), tmp.path().join("b")],
        );

        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Char('x'));
        assert_eq!(state.search_paths, vec![tmp.path().join("a")]);
        assert_eq!(state.selected_folder, Some(0));

        press(&mut state, KeyCode::Char('x'));
        assert!(state.search_paths.is_empty());
        press(&mut state, KeyCode::Char('x'));
        assert_eq!(
            state.popup().unwrap().message,
            state.t(TextKey::NoFolderSelected)
        );
    }

    #[test]
    fn test_add_rule_persists_and_keeps_session() {
        let tmp = TempDir::new().unwrap();
        let folders = vec![tmp.path().join("scan")];
        let mut state = setup(tmp.path(), &[], folders.clone());
        state.language = Language::Fr;

        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.mode, Mode::AddRule);
        type_str(&mut state, "invoice, fatura");
        press(&mut state, KeyCode::Enter);
        type_str(&mut state, "~/Documents/Invoices");
        press(&mut state, KeyCode::Enter);

        let stored = RuleStore::new(tmp.path().join("tasks.json")).load().unwrap();
        assert_eq!(
            stored,
            vec![Rule::new(
                vec!["invoice".into(), "fatura".into()],
                "~/Documents/Invoices"
            )]
        );

        let state = rebuild(state);
        assert_eq!(state.rules, stored);
        assert_eq!(state.language, Language::Fr);
        assert_eq!(state.search_paths, folders);
    }

    #[test]
    fn test_add_rule_requires_both_fields() {
        let tmp = TempDir::new().unwrap();
        let mut state = setup(tmp.path(), &[], Vec::new());

        press(&mut state, KeyCode::Char('n'));
        press(&mut state, KeyCode::Tab);
        type_str(&mut state, "/tmp/dest");
        press(&mut state, KeyCode::Enter);

        assert_eq!(
            state.popup().unwrap().message,
            state.t(TextKey::RuleFieldsRequired)
        );
        assert!(state.restart.is_none());
        assert!(!tmp.path().join("tasks.json").exists());
    }

    #[test]
    fn test_remove_rule_confirmation() {
        let tmp = TempDir::new().unwrap();
        let rules = vec![
            Rule::new(vec!["a".into()], "/tmp/a"),
            Rule::new(vec!["b".into()], "/tmp/b"),
        ];
        let mut state = setup(tmp.path(), &rules, Vec::new());
        state.focus = Pane::Rules;

        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.mode, Mode::ConfirmRemoval);
        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.restart.is_none());

        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Char('d'));
        press(&mut state, KeyCode::Char('y'));
        let state = rebuild(state);
        assert_eq!(state.rules, vec![rules[0].clone()]);
    }

    #[test]
    fn test_remove_rule_without_selection() {
        let tmp = TempDir::new().unwrap();
        let mut state = setup(tmp.path(), &[], Vec::new());

        press(&mut state, KeyCode::Char('d'));
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(
            state.popup().unwrap().message,
            state.t(TextKey::NoRulesSelected)
        );
    }

    #[test]
    fn test_malformed_rule_file_is_read_only() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.json");
        let mut state = setup(tmp.path(), &[], Vec::new());
        fs::write(&path, "[{broken").unwrap();
        state = AppState::new(state.ctx.clone(), state.session(), state.theme);

        assert!(!state.rules_writable);
        assert_eq!(state.popup().unwrap().kind, PopupKind::Error);
        press(&mut state, KeyCode::Enter);

        press(&mut state, KeyCode::Char('n'));
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[{broken");
    }

    #[test]
    fn test_start_organizing_needs_folders_and_rules() {
        let tmp = TempDir::new().unwrap();
        let mut state = setup(tmp.path(), &[], Vec::new());

        press(&mut state, KeyCode::Char('s'));
        assert_eq!(state.popup().unwrap().message, state.t(TextKey::AddScanFolder));
        press(&mut state, KeyCode::Enter);

        state.search_paths.push(tmp.path().to_path_buf());
        press(&mut state, KeyCode::Char('s'));
        assert_eq!(state.popup().unwrap().message, state.t(TextKey::AddOrgRule));
    }

    #[test]
    fn test_start_organizing_moves_and_summarizes() {
        let tmp = TempDir::new().unwrap();
        let downloads = tmp.path().join("Downloads");
        let dest = tmp.path().join("Invoices");
        fs::create_dir_all(&downloads).unwrap();
        fs::write(downloads.join("Fatura_Mart.pdf"), "x").unwrap();
        fs::write(downloads.join("notes.txt"), "x").unwrap();

        let rules = vec![Rule::new(vec!["fatura".into()], &dest)];
        let mut state = setup(tmp.path(), &rules, vec![downloads.clone()]);

        press(&mut state, KeyCode::Char('s'));

        assert!(dest.join("Fatura_Mart.pdf").is_file());
        assert!(downloads.join("notes.txt").is_file());
        let popup = state.popup().unwrap();
        assert_eq!(popup.kind, PopupKind::Info);
        assert_eq!(popup.message, state.t(TextKey::FilesMoved));
        assert_eq!(popup.lines.len(), 1);
        assert!(popup.lines[0].starts_with("\"Fatura_Mart.pdf\" -> \""));

        // Second run finds nothing left to move
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Char('s'));
        assert_eq!(
            state.popup().unwrap().message,
            state.t(TextKey::NoMatchingFiles)
        );
    }

    #[test]
    fn test_move_errors_come_before_summary() {
        let tmp = TempDir::new().unwrap();
        let scan = tmp.path().join("scan");
        let dest = tmp.path().join("out");
        fs::create_dir_all(scan.join("a")).unwrap();
        fs::create_dir_all(&dest).unwrap();
        fs::write(scan.join("a/invoice.pdf"), "x").unwrap();
        fs::write(scan.join("invoice-2.pdf"), "x").unwrap();
        fs::write(dest.join("invoice.pdf"), "taken").unwrap();

        let rules = vec![Rule::new(vec!["invoice".into()], &dest)];
        let mut state = setup(tmp.path(), &rules, vec![scan]);
        press(&mut state, KeyCode::Char('s'));

        assert_eq!(state.popups.len(), 2);
        assert_eq!(state.popups[0].kind, PopupKind::Error);
        assert_eq!(state.popups[1].message, state.t(TextKey::FilesMoved));
    }

    #[test]
    fn test_theme_save_keeps_file_overrides_out_of_config() {
        let tmp = TempDir::new().unwrap();
        let override_rules = tmp.path().join("cli-override.json");
        RuleStore::new(&override_rules)
            .save(&[Rule::new(vec!["invoice".into()], "/srv/Invoices")])
            .unwrap();

        let config_path = tmp.path().join("config.toml");
        let ctx = AppContext::new(Config::default(), Some(config_path.clone()))
            .with_overrides(Some(override_rules.clone()), None);
        let mut state = AppState::new(ctx, Session::new(Language::En), Theme::default());
        assert_eq!(state.rules.len(), 1);

        press(&mut state, KeyCode::Char('t'));
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);

        let saved = Config::load(Some(config_path.as_path())).unwrap();
        assert_eq!(saved.general.theme.as_deref(), Some(state.theme.slug()));
        assert_eq!(saved.files.rules, PathBuf::from("tasks.json"));
        assert_eq!(saved.files.translations, PathBuf::from("translations.json"));
        assert_eq!(state.ctx.rules_path, override_rules);
    }

    #[test]
    fn test_language_switch_resets_search_paths() {
        let tmp = TempDir::new().unwrap();
        let mut state = setup(tmp.path(), &[], vec![tmp.path().to_path_buf()]);

        press(&mut state, KeyCode::Char('l'));
        assert_eq!(state.mode, Mode::LanguagePicker);
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter);

        let state = rebuild(state);
        assert_eq!(state.language, Language::Tr);
        assert_eq!(state.search_paths, crate::default_search_paths());
        assert_eq!(state.t(TextKey::Exit), "Çıkış");
    }

    #[test]
    fn test_exit_keys() {
        let tmp = TempDir::new().unwrap();
        let mut state = setup(tmp.path(), &[], Vec::new());
        press(&mut state, KeyCode::Esc);
        assert!(state.should_quit);

        let mut state = setup(tmp.path(), &[], Vec::new());
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn test_text_input_cursor() {
        let mut input = String::new();
        let mut cursor = 0;
        for code in [
            KeyCode::Char('ş'),
            KeyCode::Char('b'),
            KeyCode::Left,
            KeyCode::Char('a'),
            KeyCode::End,
            KeyCode::Backspace,
        ] {
            handle_text_input(&mut input, &mut cursor, KeyEvent::new(code, KeyModifiers::NONE));
        }
        assert_eq!(input, "şa");
        assert_eq!(cursor, 2);
    }
}
