//! File mover - walks search folders and moves keyword matches
//!
//! Each call handles one rule: every file under the search roots whose
//! normalized name contains one of the rule's keywords is moved into the
//! rule's destination. Failures are reported per file and never stop the
//! batch. Moves that already happened are not rolled back.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::normalize::{contains_any, normalize};
use crate::rules::Rule;

/// Folder name fragments that are never scanned
pub const EXCLUDED_FOLDERS: &[&str] = &[
    "Windows",
    "Program Files",
    "Program Files (x86)",
    "System32",
    "AppData",
    "$Recycle.Bin",
];

/// A file that was moved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// A file that matched but could not be moved
#[derive(Debug)]
pub struct MoveFailure {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub error: MoveError,
}

impl std::fmt::Display for MoveFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error moving {}: {}", self.source.display(), self.error)
    }
}

#[derive(Debug, Error)]
pub enum MoveError {
    #[error("failed to create destination {path}: {source}")]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Moves files matching keyword rules
#[derive(Debug, Clone)]
pub struct Mover {
    excluded: Vec<String>,
}

impl Default for Mover {
    fn default() -> Self {
        Self {
            excluded: EXCLUDED_FOLDERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Mover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move every file under `roots` whose name matches one of `keywords`
    /// into `destination`.
    ///
    /// `destination` may start with `~` and is created if missing. Each
    /// failed move is handed to `on_error` and the batch continues.
    pub fn move_matching<F>(
        &self,
        keywords: &[String],
        destination: &Path,
        roots: &[PathBuf],
        mut on_error: F,
    ) -> Result<Vec<MovedFile>, MoveError>
    where
        F: FnMut(MoveFailure),
    {
        let destination = crate::expand_path(destination);
        std::fs::create_dir_all(&destination).map_err(|source| {
            MoveError::CreateDestination {
                path: destination.clone(),
                source,
            }
        })?;

        let mut moved = Vec::new();
        for planned in self.plan(keywords, &destination, roots) {
            match move_file(&planned.source, &planned.destination) {
                Ok(()) => {
                    info!(
                        "Moved {} -> {}",
                        planned.source.display(),
                        planned.destination.display()
                    );
                    moved.push(planned);
                }
                Err(error) => {
                    warn!("Failed to move {}: {}", planned.source.display(), error);
                    on_error(MoveFailure {
                        source: planned.source,
                        destination: planned.destination,
                        error,
                    });
                }
            }
        }

        Ok(moved)
    }

    /// Run one rule
    pub fn apply_rule<F>(
        &self,
        rule: &Rule,
        roots: &[PathBuf],
        on_error: F,
    ) -> Result<Vec<MovedFile>, MoveError>
    where
        F: FnMut(MoveFailure),
    {
        self.move_matching(&rule.keywords, &rule.destination, roots, on_error)
    }

    /// Compute the moves `move_matching` would attempt, without touching the
    /// filesystem. Same-location pairs are already left out.
    pub fn plan(&self, keywords: &[String], destination: &Path, roots: &[PathBuf]) -> Vec<MovedFile> {
        let keywords: Vec<String> = keywords.iter().map(|k| normalize(k)).collect();
        let destination = crate::expand_path(destination);
        let mut planned = Vec::new();
        // Roots may overlap (a folder and one of its subfolders)
        let mut seen = HashSet::new();

        for root in roots {
            for source in self.candidate_files(root) {
                let Some(file_name) = source.file_name() else {
                    continue;
                };
                if !contains_any(&normalize(&file_name.to_string_lossy()), &keywords) {
                    continue;
                }

                let target = destination.join(file_name);
                if same_location(&source, &target) {
                    debug!("Already in place: {}", source.display());
                    continue;
                }

                let key = source.canonicalize().unwrap_or_else(|_| source.clone());
                if !seen.insert(key) {
                    continue;
                }

                planned.push(MovedFile {
                    source,
                    destination: target,
                });
            }
        }

        planned
    }

    /// Plan several rules in order without moving anything.
    ///
    /// A file claimed by an earlier rule is not offered to later ones, which
    /// mirrors what a real run does.
    pub fn plan_rules(&self, rules: &[Rule], roots: &[PathBuf]) -> Vec<(usize, MovedFile)> {
        let mut claimed = HashSet::new();
        let mut result = Vec::new();

        for (i, rule) in rules.iter().enumerate() {
            for planned in self.plan(&rule.keywords, &rule.destination, roots) {
                if claimed.insert(planned.source.clone()) {
                    result.push((i, planned));
                }
            }
        }

        result
    }

    /// All regular files below `root`, skipping excluded folders
    fn candidate_files(&self, root: &Path) -> Vec<PathBuf> {
        let root = crate::expand_path(root);

        WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if entry.file_type().is_dir() && self.is_excluded(entry.path()) {
                    debug!("Skipping excluded folder: {}", entry.path().display());
                    return false;
                }
                true
            })
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    warn!("Walk error under {}: {}", root.display(), e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        let dir = dir.to_string_lossy();
        self.excluded.iter().any(|fragment| dir.contains(fragment.as_str()))
    }
}

/// Check whether two paths point at the same place
fn same_location(a: &Path, b: &Path) -> bool {
    if let (Ok(a), Ok(b)) = (std::path::absolute(a), std::path::absolute(b))
        && a == b
    {
        return true;
    }

    // Resolves symlinks and `..`; only possible when both exist
    matches!(
        (a.canonicalize(), b.canonicalize()),
        (Ok(a), Ok(b)) if a == b
    )
}

/// Move one file without ever replacing an existing file at `dest`.
///
/// The target is created with a hard link, which fails if `dest` already
/// exists, and the source link is removed afterwards. Where hard links are
/// unavailable (other filesystem, FAT, network shares) the file is copied
/// into a newly created target instead.
fn move_file(source: &Path, dest: &Path) -> Result<(), MoveError> {
    match std::fs::hard_link(source, dest) {
        Ok(()) => {
            if let Err(e) = std::fs::remove_file(source) {
                let _ = std::fs::remove_file(dest);
                return Err(e.into());
            }
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(MoveError::DestinationExists(dest.to_path_buf()))
        }
        Err(e) => {
            debug!("No hard link ({}), copying {}", e, source.display());
            copy_then_remove(source, dest)
        }
    }
}

fn copy_then_remove(source: &Path, dest: &Path) -> Result<(), MoveError> {
    let mut input = File::open(source)?;
    let mut output = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => MoveError::DestinationExists(dest.to_path_buf()),
            _ => MoveError::Io(e),
        })?;

    let copied = std::io::copy(&mut input, &mut output)
        .and_then(|_| output.set_permissions(input.metadata()?.permissions()))
        .and_then(|()| output.sync_all());
    drop(output);
    if let Err(e) = copied {
        let _ = std::fs::remove_file(dest);
        return Err(e.into());
    }

    std::fs::remove_file(source)?;
    Ok(())
}
