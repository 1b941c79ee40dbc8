//! Keysort - keyword-driven file organizer
//!
//! Scans search folders, matches file names against keyword rules and moves
//! the matches into per-rule destination folders. Driven by a TUI.

pub mod app;
pub mod config;
pub mod i18n;
pub mod mover;
pub mod normalize;
pub mod rules;
pub mod theme;

pub use config::Config;
pub use i18n::{Language, Translations};
pub use mover::{MoveFailure, MovedFile, Mover};
pub use normalize::normalize;
pub use rules::{Rule, RuleStore};
pub use theme::Theme;

use std::path::{Path, PathBuf};

/// Current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Expand a leading `~` to the user's home directory.
///
/// Both `~/` and `~\` are accepted so rule files written on Windows keep
/// working elsewhere.
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    let rest = if path_str == "~" {
        Some("")
    } else {
        path_str
            .strip_prefix("~/")
            .or_else(|| path_str.strip_prefix("~\\"))
    };

    match (rest, dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Replace the home directory prefix of a path with `~` for display.
pub fn contract_home(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", std::path::MAIN_SEPARATOR, rest.display());
    }
    path.display().to_string()
}

/// Folders scanned when the session starts: Downloads, Desktop, Documents.
pub fn default_search_paths() -> Vec<PathBuf> {
    let home = dirs::home_dir();
    let pick = |found: Option<PathBuf>, name: &str| {
        found.or_else(|| home.as_ref().map(|h| h.join(name)))
    };

    [
        pick(dirs::download_dir(), "Downloads"),
        pick(dirs::desktop_dir(), "Desktop"),
        pick(dirs::document_dir(), "Documents"),
    ]
    .into_iter()
    .flatten()
    .collect()
}
