//! Path resolution against the working directory.

use std::path::{Component, Path, PathBuf};

/// Resolve a possibly-relative path against the current working directory.
///
/// Absolute inputs stand alone; relative inputs are joined to `cwd`. `.` and
/// `..` components are normalised lexically, so the result never carries
/// dot components (`..` at the root is a no-op). Symlinks are not resolved.
pub fn resolve_path(cwd: &Path, input: &str) -> PathBuf {
    let raw = if Path::new(input).is_absolute() {
        PathBuf::from(input)
    } else {
        cwd.join(input)
    };

    let mut resolved = PathBuf::new();
    for component in raw.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never pop past the root.
                if resolved.parent().is_some() {
                    resolved.pop();
                }
            }
            other => resolved.push(other),
        }
    }
    resolved
}
