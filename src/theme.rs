//! Theme selection and UI colors.
//!
//! Palettes come from the `ratatui-themes` crate; `ThemeColors` maps a
//! palette onto the handful of styles the organizer screens use.

use ratatui::style::{Color, Modifier, Style};
use ratatui_themes::{ThemeName, ThemePalette};
use serde::{Deserialize, Serialize};

/// Theme wrapper around `ThemeName` from ratatui-themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(pub ThemeName);

impl Theme {
    /// All available theme names, in picker order.
    #[must_use]
    pub fn all() -> &'static [ThemeName] {
        ThemeName::all()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.display_name()
    }

    /// Theme named in the config, or the default one
    pub fn load(config: &crate::config::Config) -> Theme {
        config
            .general
            .theme
            .as_ref()
            .and_then(|name| name.parse::<ThemeName>().ok())
            .map(Theme::from)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn colors(&self) -> ThemeColors {
        ThemeColors::from_palette(self.0.palette())
    }

    /// Position in `Theme::all()`
    #[must_use]
    pub fn index(&self) -> usize {
        Self::all().iter().position(|t| *t == self.0).unwrap_or(0)
    }

    /// Kebab-case name stored in the config file
    #[must_use]
    pub fn slug(&self) -> &'static str {
        self.0.slug()
    }
}

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        Theme(name)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Colors and styles derived from a theme palette
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub bg: Color,
    pub bg_secondary: Color,
    pub fg: Color,
    pub muted: Color,

    pub primary: Color,
    pub secondary: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub border: Color,
    pub border_focus: Color,
    pub selection: Color,
}

impl ThemeColors {
    #[must_use]
    pub fn from_palette(p: ThemePalette) -> Self {
        Self {
            bg: p.bg,
            bg_secondary: lighten(p.bg, 10),
            fg: p.fg,
            muted: p.muted,

            primary: p.accent,
            secondary: p.secondary,

            success: p.success,
            warning: p.warning,
            error: p.error,

            border: p.muted,
            border_focus: p.accent,
            selection: p.selection,
        }
    }

    #[must_use]
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    #[must_use]
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    #[must_use]
    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.primary)
    }

    #[must_use]
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    #[must_use]
    pub fn text_success(&self) -> Style {
        Style::default().fg(self.success)
    }

    #[must_use]
    pub fn text_warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn text_error(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Block border style
    #[must_use]
    pub fn block(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Border of the focused pane
    #[must_use]
    pub fn block_focus(&self) -> Style {
        Style::default().fg(self.border_focus)
    }

    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .fg(self.fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint style (for shortcuts)
    #[must_use]
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }
}

/// Brighten an RGB color; other color kinds are returned unchanged.
fn lighten(color: Color, amount: u8) -> Color {
    if let Color::Rgb(r, g, b) = color {
        Color::Rgb(
            r.saturating_add(amount),
            g.saturating_add(amount),
            b.saturating_add(amount),
        )
    } else {
        color
    }
}
