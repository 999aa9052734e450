//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `IndexError`, so functions can simply return
//! `Result<T>`.
use crate::error::IndexError;

/// Workspace-wide `Result` alias with `IndexError` as the default error.
pub type Result<T, E = IndexError> = std::result::Result<T, E>;
