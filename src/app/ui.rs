//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{Action, AppState, Mode, Pane, PopupKind, RuleDialogField};
use crate::i18n::{Language, TextKey};
use crate::theme::Theme;

const ICON: &str = "📂";

/// Render the entire UI
pub fn render(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();

    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Lists
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, state, chunks[0]);
    render_lists(frame, state, chunks[1]);
    render_status_bar(frame, state, chunks[2]);

    match state.mode {
        Mode::AddFolder => render_folder_input(frame, state),
        Mode::AddRule => render_rule_dialog(frame, state),
        Mode::ConfirmRemoval => render_confirm_removal(frame, state),
        Mode::LanguagePicker => render_language_picker(frame, state),
        Mode::ThemePicker => render_theme_picker(frame, state),
        Mode::Help => render_help_popup(frame, state),
        Mode::Normal => {}
    }

    // Popups go above everything else
    if state.popup().is_some() {
        render_popup(frame, state);
    }
}

fn render_header(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let lines = vec![
        Line::styled(state.t(TextKey::Welcome), colors.text()),
        Line::from(vec![
            Span::styled(format!("{}: ", state.t(TextKey::Language)), colors.text_muted()),
            Span::styled(state.language.display_name(), colors.text_secondary()),
            Span::styled("  [", colors.text_muted()),
            Span::styled(Action::ChangeLanguage.key().to_string(), colors.key_hint()),
            Span::styled("]", colors.text_muted()),
        ]),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block())
            .title(format!(
                " {} {} v{} ",
                ICON,
                state.t(TextKey::Title),
                crate::VERSION
            ))
            .title_style(colors.title()),
    );

    frame.render_widget(header, area);
}

fn render_lists(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_folders(frame, state, chunks[0]);
    render_rules(frame, state, chunks[1]);
}

fn pane_block(state: &AppState, pane: Pane, title: String) -> Block<'static> {
    let colors = state.theme.colors();
    Block::default()
        .borders(Borders::ALL)
        .border_style(if state.focus == pane {
            colors.block_focus()
        } else {
            colors.block()
        })
        .title(title)
        .title_style(colors.text_primary())
}

fn render_folders(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let title = format!(
        " {} ({}) ",
        state.t(TextKey::ManageFolders),
        state.search_paths.len()
    );

    if state.search_paths.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled(format!("  {}", state.t(TextKey::NoFolders)), colors.text_muted()),
            Line::from(""),
            Line::from(vec![
                Span::styled("  [", colors.text_muted()),
                Span::styled(Action::AddFolder.key().to_string(), colors.key_hint()),
                Span::styled(format!("] {}", state.t(TextKey::AddFolder)), colors.text_muted()),
            ]),
        ])
        .block(pane_block(state, Pane::Folders, title));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .search_paths
        .iter()
        .map(|path| {
            let style = if path.is_dir() {
                colors.text()
            } else {
                colors.text_warning()
            };
            ListItem::new(Line::styled(format!(" {}", crate::contract_home(path)), style))
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(state, Pane::Folders, title))
        .highlight_style(colors.selected());

    let mut list_state = ListState::default().with_selected(state.selected_folder);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_rules(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let title = format!(" {} ({}) ", state.t(TextKey::ManageRules), state.rules.len());

    if state.rules.is_empty() {
        let mut lines = vec![
            Line::from(""),
            Line::styled(format!("  {}", state.t(TextKey::NoRules)), colors.text_muted()),
            Line::from(""),
        ];
        if state.rules_writable {
            lines.push(Line::from(vec![
                Span::styled("  [", colors.text_muted()),
                Span::styled(Action::AddRule.key().to_string(), colors.key_hint()),
                Span::styled(format!("] {}", state.t(TextKey::AddRule)), colors.text_muted()),
            ]));
        } else {
            lines.push(Line::styled(
                format!("  {}", state.t(TextKey::RulesUnavailable)),
                colors.text_error(),
            ));
        }

        let empty = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(pane_block(state, Pane::Rules, title));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .rules
        .iter()
        .map(|rule| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(" → ", colors.text_secondary()),
                    Span::styled(
                        crate::contract_home(&rule.expanded_destination()),
                        colors.text().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::styled(format!("   {}", rule.keywords_display()), colors.text_muted()),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(state, Pane::Rules, title))
        .highlight_style(colors.selected());

    let mut list_state = ListState::default().with_selected(state.selected_rule);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let content = if let Some(ref msg) = state.status_message {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(msg.as_str(), colors.text_secondary()),
        ]
    } else {
        let mut spans = vec![
            Span::styled(" Tab", colors.key_hint()),
            Span::styled(format!(": {}  ", state.t(TextKey::HintSwitchPane)), colors.text_muted()),
        ];
        for action in [
            Action::AddFolder,
            Action::RemoveFolder,
            Action::AddRule,
            Action::RemoveRule,
            Action::StartOrganizing,
            Action::Help,
            Action::Exit,
        ] {
            spans.push(Span::styled(action.key().to_string(), colors.key_hint()));
            spans.push(Span::styled(
                format!(": {}  ", state.t(action.label())),
                colors.text_muted(),
            ));
        }
        spans
    };

    let status =
        Paragraph::new(Line::from(content)).style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(status, area);
}

/// Helper to create a centered rect of a fixed size
fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width.saturating_sub(2));
    let height = height.min(r.height.saturating_sub(2));
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

fn dialog_block(title: String, border: Style, bg: Style) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(bg)
        .title(title)
}

fn hint_line(state: &AppState, hints: &[(&str, TextKey)]) -> Line<'static> {
    let text = hints
        .iter()
        .map(|(key, label)| format!("{} {}", key, state.t(*label)))
        .collect::<Vec<_>>()
        .join(" │ ");
    Line::from(format!(" {} ", text)).centered()
}

fn render_folder_input(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_fixed(70, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let input = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" ▸ ", colors.text_primary()),
            Span::styled(state.folder_input.as_str(), colors.text()),
        ]),
    ])
    .block(
        dialog_block(
            format!(" {} ", state.t(TextKey::SelectFolder)),
            colors.block_focus(),
            Style::default().bg(colors.bg),
        )
        .title_style(colors.text_primary())
        .title_bottom(hint_line(
            state,
            &[("↵", TextKey::HintSave), ("Esc", TextKey::HintCancel)],
        )),
    );
    frame.render_widget(input, popup_area);

    // Cursor after the "▸" marker
    frame.set_cursor_position((
        popup_area.x + 4 + state.folder_cursor as u16,
        popup_area.y + 2,
    ));
}

fn render_rule_dialog(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let Some(ref dialog) = state.rule_dialog else {
        return;
    };

    let popup_area = centered_fixed(70, 9, frame.area());
    frame.render_widget(Clear, popup_area);

    let field_line = |field: RuleDialogField, label: String, value: &str| {
        let active = dialog.field == field;
        Line::from(vec![
            Span::styled(
                if active { " ▸ " } else { "   " },
                colors.text_primary(),
            ),
            Span::styled(
                label,
                if active {
                    colors.text_primary()
                } else {
                    colors.text_muted()
                },
            ),
            Span::styled(value.to_string(), colors.text()),
        ])
    };

    let keywords_label = format!("{}: ", state.t(TextKey::EnterKeywords));
    let destination_label = format!("{}: ", state.t(TextKey::SelectDestination));
    let label_width = keywords_label
        .chars()
        .count()
        .max(destination_label.chars().count());
    let pad = |s: String| format!("{:<width$}", s, width = label_width);

    let content = vec![
        Line::from(""),
        field_line(RuleDialogField::Keywords, pad(keywords_label), &dialog.keywords),
        Line::from(""),
        field_line(
            RuleDialogField::Destination,
            pad(destination_label),
            &dialog.destination,
        ),
    ];

    let paragraph = Paragraph::new(content).block(
        dialog_block(
            format!(" ✚ {} ", state.t(TextKey::AddRule)),
            colors.block_focus(),
            Style::default().bg(colors.bg),
        )
        .title_style(colors.text_primary())
        .title_bottom(hint_line(
            state,
            &[
                ("Tab", TextKey::HintSwitchPane),
                ("↵", TextKey::HintSave),
                ("Esc", TextKey::HintCancel),
            ],
        )),
    );
    frame.render_widget(paragraph, popup_area);

    let (row, cursor) = match dialog.field {
        RuleDialogField::Keywords => (2, dialog.cursor_keywords),
        RuleDialogField::Destination => (4, dialog.cursor_destination),
    };
    frame.set_cursor_position((
        popup_area.x + 4 + (label_width + cursor) as u16,
        popup_area.y + row,
    ));
}

fn render_confirm_removal(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_fixed(56, 9, frame.area());
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(""),
        Line::styled(state.t(TextKey::ConfirmRemoval), colors.text()),
    ];
    if let Some(rule) = state.current_rule() {
        lines.push(Line::styled(
            format!(
                "{} → {}",
                rule.keywords_display(),
                crate::contract_home(&rule.expanded_destination())
            ),
            colors.text_muted(),
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            " [Y] ",
            Style::default()
                .fg(colors.success)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(state.t(TextKey::Yes)),
        Span::raw("    "),
        Span::styled(" [N/Esc] ", colors.text_muted()),
        Span::raw(state.t(TextKey::No)),
    ]));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        dialog_block(
            format!(" {} ", state.t(TextKey::Confirmation)),
            Style::default().fg(colors.warning),
            Style::default().bg(colors.bg),
        )
        .title_style(
            Style::default()
                .fg(colors.warning)
                .add_modifier(Modifier::BOLD),
        ),
    );

    frame.render_widget(paragraph, popup_area);
}

fn render_language_picker(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let languages = Language::all();
    let popup_area = centered_fixed(36, languages.len() as u16 + 4, frame.area());
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = languages
        .iter()
        .enumerate()
        .map(|(i, lang)| {
            let selected = i == state.language_picker_index;
            let current = *lang == state.language;
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("  {} {}", if selected { "▸" } else { " " }, lang.display_name()),
                    if selected {
                        colors.selected()
                    } else {
                        colors.text()
                    },
                ),
                Span::styled(if current { "  ✓" } else { "" }, colors.text_success()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        dialog_block(
            format!(" 🌐 {} ", state.t(TextKey::Language)),
            Style::default().fg(colors.primary),
            Style::default().bg(colors.bg),
        )
        .title_bottom(hint_line(
            state,
            &[("↑↓", TextKey::HintNavigate), ("Esc", TextKey::HintCancel)],
        )),
    );

    frame.render_widget(list, popup_area);
}

fn render_theme_picker(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let area = frame.area();
    let popup_area = centered_fixed(44, area.height * 7 / 10, area);
    frame.render_widget(Clear, popup_area);

    let themes = Theme::all();
    let items: Vec<ListItem> = themes
        .iter()
        .enumerate()
        .map(|(i, theme_name)| {
            let palette = theme_name.palette();
            let selected = i == state.theme_picker_index;

            let preview = format!(
                "  {} {} ",
                if selected { "▸" } else { " " },
                theme_name.display_name()
            );

            let style = if selected {
                Style::default()
                    .fg(palette.accent)
                    .bg(palette.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.fg)
            };

            ListItem::new(Line::from(vec![
                Span::styled(preview, style),
                Span::styled("█", Style::default().fg(palette.accent)),
                Span::styled("█", Style::default().fg(palette.secondary)),
                Span::styled("█", Style::default().fg(palette.success)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        dialog_block(
            format!(
                " 🎨 {} ({}/{}) ",
                state.t(TextKey::Theme),
                state.theme_picker_index + 1,
                themes.len()
            ),
            Style::default().fg(colors.primary),
            Style::default().bg(colors.bg),
        )
        .title_bottom(hint_line(
            state,
            &[
                ("↑↓", TextKey::HintNavigate),
                ("↵", TextKey::HintSave),
                ("Esc", TextKey::HintCancel),
            ],
        )),
    );

    let mut list_state = ListState::default().with_selected(Some(state.theme_picker_index));
    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

fn render_help_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let popup_area = centered_fixed(56, Action::all().len() as u16 + 9, frame.area());
    frame.render_widget(Clear, popup_area);

    let key_line = |key: String, label: String| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", key), colors.key_hint()),
            Span::styled(label, colors.text()),
        ])
    };

    let mut help_content = vec![
        Line::from(""),
        key_line("Tab / ←→".to_string(), state.t(TextKey::HintSwitchPane)),
        key_line("j/k ↑/↓ g/G".to_string(), state.t(TextKey::HintNavigate)),
        Line::from(""),
    ];
    for action in Action::all() {
        help_content.push(key_line(action.key().to_string(), state.t(action.label())));
    }
    help_content.push(key_line("Esc / Ctrl+c".to_string(), state.t(TextKey::Exit)));

    let help = Paragraph::new(help_content)
        .block(
            dialog_block(
                format!(" ⌨ {} ", state.t(TextKey::Help)),
                colors.block_focus(),
                Style::default().bg(colors.bg_secondary),
            )
            .title_style(colors.text_primary())
            .title_bottom(hint_line(state, &[("Esc", TextKey::HintClose)])),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, popup_area);
}

fn render_popup(frame: &mut Frame, state: &AppState) {
    let colors = state.theme.colors();
    let Some(popup) = state.popup() else {
        return;
    };

    let accent = match popup.kind {
        PopupKind::Info => colors.primary,
        PopupKind::Error => colors.error,
    };

    let area = frame.area();
    let height = (popup.lines.len() as u16 + 6).min(area.height.saturating_sub(2));
    let popup_area = centered_fixed(76, height, area);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(""),
        Line::styled(
            popup.message.as_str(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
    ];
    if !popup.lines.is_empty() {
        lines.push(Line::from(""));
        lines.extend(
            popup
                .lines
                .iter()
                .map(|l| Line::styled(l.as_str(), colors.text())),
        );
    }

    let mut title = format!(" {} ", popup.title);
    if state.popups.len() > 1 {
        title = format!(" {} (1/{}) ", popup.title, state.popups.len());
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            dialog_block(
                title,
                Style::default().fg(accent),
                Style::default().bg(colors.bg),
            )
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .title_bottom(hint_line(state, &[("↵", TextKey::HintClose)])),
        );

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{AppContext, Session};
    use crate::config::Config;
    use crate::rules::{Rule, RuleStore};
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn state_in(dir: &std::path::Path, language: Language) -> AppState {
        std::fs::write(
            dir.join("translations.json"),
            include_str!("../../translations.json"),
        )
        .unwrap();
        RuleStore::new(dir.join("tasks.json"))
            .save(&[Rule::new(vec!["fatura".into()], "/srv/Invoices")])
            .unwrap();

        let mut config = Config::default();
        config.files.rules = dir.join("tasks.json");
        config.files.translations = dir.join("translations.json");
        AppState::new(
            AppContext::new(config, None),
            Session {
                language,
                search_paths: vec![dir.to_path_buf()],
            },
            Theme::default(),
        )
    }

    #[test]
    fn test_render_main_screen() {
        let tmp = tempfile::tempdir().unwrap();
        let state = state_in(tmp.path(), Language::Es);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains(&state.t(TextKey::ManageRules)));
        assert!(text.contains(&format!("v{}", crate::VERSION)));
        assert!(text.contains("/srv/Invoices"));
        assert!(text.contains("fatura"));
    }

    #[test]
    fn test_render_popup_on_top() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path(), Language::En);
        state.error_popup(TextKey::AddOrgRule);

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| render(frame, &state)).unwrap();

        assert!(buffer_text(&terminal).contains(&state.t(TextKey::Error)));
    }

    #[test]
    fn test_render_every_dialog_on_small_terminal() {
        let tmp = tempfile::tempdir().unwrap();
        let mut state = state_in(tmp.path(), Language::Tr);
        state.rule_dialog = Some(Default::default());

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        for mode in [
            Mode::AddFolder,
            Mode::AddRule,
            Mode::ConfirmRemoval,
            Mode::LanguagePicker,
            Mode::ThemePicker,
            Mode::Help,
        ] {
            state.mode = mode;
            terminal.draw(|frame| render(frame, &state)).unwrap();
        }
    }
}
