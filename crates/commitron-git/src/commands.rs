//! Git command execution wrappers.
//!
//! Provides a thin wrapper around `git` subprocess invocation so that the
//! rest of the codebase does not need to deal with `std::process::Command`
//! directly. Error output can be scrubbed of credentials before it leaves
//! this module.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Placeholder substituted for redacted values in git output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when running git commands.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be found or spawned.
    #[error("failed to execute git: {0}")]
    SpawnError(#[from] std::io::Error),

    /// The git command exited with a non-zero status.
    #[error("git command failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The content of stderr, with credentials redacted.
        stderr: String,
    },

    /// The working directory could not be cleared or created.
    #[error("failed to prepare working directory {}: {source}", path.display())]
    WorkDir {
        /// The working directory path.
        path: PathBuf,
        /// The underlying filesystem error.
        source: std::io::Error,
    },
}

/// A specialized `Result` type for git operations.
pub type Result<T> = std::result::Result<T, GitError>;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Execute a `git` command with the given arguments and working directory.
///
/// Returns the trimmed contents of stdout on success.
///
/// # Errors
///
/// Returns [`GitError::SpawnError`] if `git` cannot be found, or
/// [`GitError::CommandFailed`] if the command exits with a non-zero status.
///
/// # Examples
///
/// ```no_run
/// use commitron_git::commands::git_command;
/// use std::path::Path;
///
/// let branch = git_command(&["rev-parse", "--abbrev-ref", "HEAD"], Path::new(".")).unwrap();
/// println!("Current branch: {branch}");
/// ```
pub fn git_command(args: &[&str], cwd: &Path) -> Result<String> {
    git_command_redacted(args, cwd, &[])
}

/// Execute a `git` command, replacing every occurrence of the given
/// sensitive values in its error output with [`REDACTED_PLACEHOLDER`].
///
/// Interactive credential prompts are disabled, so a rejected credential
/// fails the command instead of blocking on stdin.
///
/// # Errors
///
/// Same as [`git_command`].
pub fn git_command_redacted(args: &[&str], cwd: &Path, sensitive: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed {
            code: output.status.code(),
            stderr: redact(stderr.trim(), sensitive),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(stdout)
}

/// Replace every non-empty sensitive value in `text` with
/// [`REDACTED_PLACEHOLDER`].
///
/// Longer values are replaced first so that a URL embedding a token is
/// scrubbed as a whole.
pub fn redact(text: &str, sensitive: &[&str]) -> String {
    let mut values: Vec<&str> = sensitive.iter().copied().filter(|s| !s.is_empty()).collect();
    values.sort_by_key(|s| std::cmp::Reverse(s.len()));

    let mut out = text.to_string();
    for value in values {
        out = out.replace(value, REDACTED_PLACEHOLDER);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
