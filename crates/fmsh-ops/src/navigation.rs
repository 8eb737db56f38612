//! Navigation handlers: parent traversal, directory change, listing.
//!
//! These are the only operations whose success feeds back into the session's
//! working directory, so they return the new path instead of mutating
//! anything themselves.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use fmsh_types::{FmError, Result};

use crate::path::resolve_path;

// ---------------------------------------------------------------------------
// up
// ---------------------------------------------------------------------------

/// Compute the parent of `cwd`.
///
/// At the filesystem root this is a no-op returning `cwd` unchanged. An
/// existing parent that cannot be stat'ed fails with `Cannot go up`.
pub fn go_up(cwd: &Path) -> Result<PathBuf> {
    let Some(parent) = cwd.parent() else {
        return Ok(cwd.to_path_buf());
    };

    match fs::metadata(parent) {
        Ok(_) => Ok(parent.to_path_buf()),
        Err(err) => {
            log::debug!("up: stat {} failed: {err}", parent.display());
            Err(FmError::operation("Cannot go up"))
        }
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

/// Resolve `target` against `cwd` and verify it is a directory.
pub fn change_dir(cwd: &Path, target: &str) -> Result<PathBuf> {
    let resolved = resolve_path(cwd, target);
    match fs::metadata(&resolved) {
        Ok(meta) if meta.is_dir() => Ok(resolved),
        Ok(_) => Err(FmError::operation("Not a directory")),
        Err(err) => {
            log::debug!("cd: stat {} failed: {err}", resolved.display());
            Err(FmError::operation("Directory not found"))
        }
    }
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

/// Classification of a directory child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// The child could not be stat'ed (e.g. a dangling symlink).
    Unknown,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::File => write!(f, "file"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One row of a directory listing.
#[derive(Debug, Clone)]
pub struct ListingEntry {
    /// Display index, re-numbered after sorting.
    pub index: usize,
    pub name: String,
    pub kind: EntryKind,
}

/// Enumerate and sort the immediate children of `cwd`.
///
/// Directories sort before everything else; within each group the order is
/// case-aware lexicographic (lowercase key, original name as tie-break).
/// A child that cannot be stat'ed is kept with kind `unknown` rather than
/// failing the whole listing.
pub fn read_entries(cwd: &Path) -> Result<Vec<ListingEntry>> {
    let dir = fs::read_dir(cwd).map_err(|err| {
        log::debug!("ls: read_dir {} failed: {err}", cwd.display());
        FmError::operation("Cannot read directory")
    })?;

    let mut entries = Vec::new();
    for child in dir {
        let child = child.map_err(|err| {
            log::debug!("ls: enumerating {} failed: {err}", cwd.display());
            FmError::operation("Cannot read directory")
        })?;
        let name = child.file_name().to_string_lossy().into_owned();
        let kind = match fs::metadata(child.path()) {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(_) => EntryKind::File,
            Err(_) => EntryKind::Unknown,
        };
        entries.push(ListingEntry {
            index: 0,
            name,
            kind,
        });
    }

    entries.sort_by(|a, b| {
        let a_dir = a.kind == EntryKind::Directory;
        let b_dir = b.kind == EntryKind::Directory;
        b_dir
            .cmp(&a_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.index = index;
    }

    Ok(entries)
}

/// Render a listing as a fixed-width table with surrounding blank lines.
pub fn render_listing(entries: &[ListingEntry]) -> String {
    let mut lines = vec![String::new()];
    lines.push(format!("{:<10}{:<30}{}", "(index)", "Name", "Type"));
    for entry in entries {
        let name = format!("'{}'", entry.name);
        let kind = format!("'{}'", entry.kind);
        lines.push(format!("{:<10}{name:<30}{kind}", entry.index));
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Produce the full `ls` output for `cwd`.
pub fn list_dir(cwd: &Path) -> Result<String> {
    let entries = read_entries(cwd)?;
    Ok(render_listing(&entries))
}
