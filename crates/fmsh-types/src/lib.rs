//! Foundation types for fmsh.
//!
//! This crate holds the error taxonomy shared by every handler crate. It is
//! deliberately tiny: two error kinds and a `Result` alias.

pub mod error;

pub use error::{FmError, Result};
