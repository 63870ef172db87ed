//! The source-control capability used by the job.
//!
//! Consumers depend on [`SourceControl`] rather than on [`GitCli`] so that
//! tests can substitute recording or failure-injecting fakes.

use std::path::Path;

use crate::commands::{Result, git_command, git_command_redacted};
use crate::remote::{RemoteUrl, sensitive_parts};

/// The five git operations the counter job performs.
pub trait SourceControl {
    /// Clone only `branch` of `remote` into `dest`.
    fn clone_branch(&self, remote: &RemoteUrl, branch: &str, dest: &Path) -> Result<()>;

    /// Write `key = value` into the repository-local configuration.
    fn set_local_config(&self, repo: &Path, key: &str, value: &str) -> Result<()>;

    /// Stage a single file.
    fn stage(&self, repo: &Path, file: &Path) -> Result<()>;

    /// Commit the staged changes with `message`.
    fn commit(&self, repo: &Path, message: &str) -> Result<()>;

    /// Push the current branch to the named remote's configured target.
    fn push(&self, repo: &Path, remote: &str) -> Result<()>;
}

/// [`SourceControl`] backed by the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    /// Create a new client. `git` must be on `PATH`.
    pub fn new() -> Self {
        Self
    }
}

impl SourceControl for GitCli {
    fn clone_branch(&self, remote: &RemoteUrl, branch: &str, dest: &Path) -> Result<()> {
        let url = remote.expose();
        let dest = dest.to_string_lossy();
        git_command_redacted(
            &[
                "clone",
                "--quiet",
                "--branch",
                branch,
                "--single-branch",
                url,
                &dest,
            ],
            Path::new("."),
            &remote.sensitive(),
        )?;
        Ok(())
    }

    fn set_local_config(&self, repo: &Path, key: &str, value: &str) -> Result<()> {
        git_command(&["config", "--local", key, value], repo)?;
        Ok(())
    }

    fn stage(&self, repo: &Path, file: &Path) -> Result<()> {
        let file = file.to_string_lossy();
        git_command(&["add", "--", &file], repo)?;
        Ok(())
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<()> {
        git_command(&["commit", "--quiet", "-m", message], repo)?;
        Ok(())
    }

    fn push(&self, repo: &Path, remote: &str) -> Result<()> {
        // The clone URL (and with it the token) is stored in the remote's
        // config, and push errors echo it back.
        let url = git_command(&["remote", "get-url", remote], repo)?;
        git_command_redacted(&["push", "--quiet", remote], repo, &sensitive_parts(&url))?;
        Ok(())
    }
}
