//! Verb routing.
//!
//! The verb sets are fixed and disjoint; dispatch is a pure lookup with no
//! side effects of its own. Handler errors propagate unchanged so the
//! session can map their kind to user-facing text. Navigation verbs
//! (`up`/`cd`/`ls`) never arrive here — the session handles them inline.

use std::io::Write;
use std::path::Path;

use fmsh_types::{FmError, Result};

use crate::{file_ops, stream_ops, system_info};

/// Verbs owned by the stream-operation handler.
pub const STREAM_OPS: &[&str] = &["cat", "cp", "mv", "hash", "compress", "decompress"];
/// Verbs owned by the file-operation handler.
pub const FILE_OPS: &[&str] = &["add", "mkdir", "rn", "rm"];
/// Verbs owned by the system-info handler.
pub const SYSTEM_OPS: &[&str] = &["os"];

/// Route `verb` to its handler family.
pub fn dispatch(verb: &str, args: &[String], cwd: &Path, out: &mut dyn Write) -> Result<()> {
    if STREAM_OPS.contains(&verb) {
        stream_ops::run(verb, args, cwd, out)
    } else if FILE_OPS.contains(&verb) {
        file_ops::run(verb, args, cwd)
    } else if SYSTEM_OPS.contains(&verb) {
        system_info::run(args, out)
    } else {
        Err(FmError::input(format!("Unknown command: {verb}")))
    }
}
