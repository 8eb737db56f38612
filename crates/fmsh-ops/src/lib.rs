//! Operation handlers for fmsh.
//!
//! Each module implements one operation family against the real filesystem:
//! navigation (`up`/`cd`/`ls`), file operations (`add`/`mkdir`/`rn`/`rm`),
//! stream operations (`cat`/`cp`/`mv`/`hash`/`compress`/`decompress`), and
//! system-info queries (`os`). The `dispatch` module maps a verb to the
//! owning family; navigation is intentionally not routed through it, since
//! only the session may mutate the working directory.
//!
//! Handlers return typed errors and never print diagnostics themselves;
//! command output goes to an injected `Write` sink.

pub mod dispatch;
pub mod file_ops;
pub mod navigation;
pub mod path;
pub mod stream_ops;
pub mod system_info;

/// Route a verb to its handler family.
pub use dispatch::dispatch;
/// Resolve a possibly-relative path against the working directory.
pub use path::resolve_path;

use fmsh_types::{FmError, Result};

/// Validate an exact argument count before any filesystem access.
pub(crate) fn check_args(args: &[String], needed: usize, cmd: &str) -> Result<()> {
    if args.len() != needed {
        return Err(FmError::input(format!("{cmd} needs {needed} arguments")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_args_accepts_exact_count() {
        let args = vec!["a.txt".to_string()];
        assert!(check_args(&args, 1, "add").is_ok());
    }

    #[test]
    fn check_args_rejects_wrong_count() {
        let err = check_args(&[], 1, "add").unwrap_err();
        assert!(err.is_input());
        assert!(format!("{err}").contains("add needs 1 arguments"));
    }
}
