//! File operations: add, mkdir, rn, rm.
//!
//! Every operation validates its argument count before touching the
//! filesystem, then performs exactly one `std::fs` action. Underlying
//! failures are collapsed into one fixed message per operation; the original
//! cause is only logged.

use std::fs::{self, OpenOptions};
use std::path::Path;

use fmsh_types::{FmError, Result};

use crate::check_args;
use crate::path::resolve_path;

/// Execute one file operation verb.
pub fn run(verb: &str, args: &[String], cwd: &Path) -> Result<()> {
    match verb {
        "add" => create_file(args, cwd),
        "mkdir" => create_dir(args, cwd),
        "rn" => rename_entry(args, cwd),
        "rm" => delete_file(args, cwd),
        _ => Err(FmError::input("Unknown file operation")),
    }
}

/// `add <name>` — create an empty file.
///
/// Uses exclusive-create semantics: a pre-existing file is a failure, never
/// a truncation.
fn create_file(args: &[String], cwd: &Path) -> Result<()> {
    check_args(args, 1, "add")?;
    let path = resolve_path(cwd, &args[0]);

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|err| {
            log::debug!("add: create {} failed: {err}", path.display());
            FmError::operation("Cannot create file")
        })?;
    Ok(())
}

/// `mkdir <name>` — create one directory, non-recursive.
fn create_dir(args: &[String], cwd: &Path) -> Result<()> {
    check_args(args, 1, "mkdir")?;
    let path = resolve_path(cwd, &args[0]);

    fs::create_dir(&path).map_err(|err| {
        log::debug!("mkdir: create {} failed: {err}", path.display());
        FmError::operation("Cannot create directory")
    })
}

/// `rn <old> <new>` — rename within the same tree.
fn rename_entry(args: &[String], cwd: &Path) -> Result<()> {
    check_args(args, 2, "rn")?;
    let old_path = resolve_path(cwd, &args[0]);
    let new_path = resolve_path(cwd, &args[1]);

    fs::rename(&old_path, &new_path).map_err(|err| {
        log::debug!(
            "rn: {} -> {} failed: {err}",
            old_path.display(),
            new_path.display()
        );
        FmError::operation("Cannot rename")
    })
}

/// `rm <name>` — delete a regular file.
fn delete_file(args: &[String], cwd: &Path) -> Result<()> {
    check_args(args, 1, "rm")?;
    let path = resolve_path(cwd, &args[0]);

    let meta = fs::metadata(&path).map_err(|err| {
        log::debug!("rm: stat {} failed: {err}", path.display());
        FmError::operation("Cannot delete file")
    })?;
    if !meta.is_file() {
        return Err(FmError::operation("Not a file"));
    }

    fs::remove_file(&path).map_err(|err| {
        log::debug!("rm: unlink {} failed: {err}", path.display());
        FmError::operation("Cannot delete file")
    })
}
