//! Fresh-clone provisioning of the working directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::client::SourceControl;
use crate::commands::{GitError, Result};
use crate::remote::RemoteUrl;

/// Commit author name used for automated commits.
pub const BOT_NAME: &str = "Commitron Bot";

/// Commit author email used for automated commits.
pub const BOT_EMAIL: &str = "bot@commitron.com";

/// A commit identity written into the repository-local configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// The fixed bot identity.
    pub fn bot() -> Self {
        Self {
            name: BOT_NAME.to_string(),
            email: BOT_EMAIL.to_string(),
        }
    }
}

/// A local clone ready for modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    root: PathBuf,
}

impl Checkout {
    /// Wrap an existing clone rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of the clone.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a repository-relative path inside the clone.
    pub fn path_of(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}

/// Clone `branch` of `remote` into `work_dir`, replacing whatever was there,
/// and configure `identity` as the local commit author.
///
/// A partially cloned directory is left in place on failure; the next call
/// removes it.
///
/// # Errors
///
/// Returns [`GitError::WorkDir`] if the directory cannot be cleared or its
/// parent created, or the underlying git error from clone or config.
pub fn provision<S: SourceControl + ?Sized>(
    git: &S,
    remote: &RemoteUrl,
    branch: &str,
    work_dir: &Path,
    identity: &Identity,
) -> Result<Checkout> {
    let result = provision_inner(git, remote, branch, work_dir, identity);
    if let Err(e) = &result {
        error!("Failed to set up repository: {e}");
    }
    result
}

fn provision_inner<S: SourceControl + ?Sized>(
    git: &S,
    remote: &RemoteUrl,
    branch: &str,
    work_dir: &Path,
    identity: &Identity,
) -> Result<Checkout> {
    clear_work_dir(work_dir)?;

    if let Some(parent) = work_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| GitError::WorkDir {
            path: work_dir.to_path_buf(),
            source,
        })?;
    }

    // The URL carries the token; only the branch is safe to log.
    info!(branch, "Cloning repository");
    git.clone_branch(remote, branch, work_dir)?;

    git.set_local_config(work_dir, "user.name", &identity.name)?;
    git.set_local_config(work_dir, "user.email", &identity.email)?;

    Ok(Checkout::new(work_dir))
}

/// Remove `path` recursively if it exists, whatever kind of entry it is.
fn clear_work_dir(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(GitError::WorkDir {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    info!("Cleaning up existing repo directory");
    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|source| GitError::WorkDir {
        path: path.to_path_buf(),
        source,
    })
}
