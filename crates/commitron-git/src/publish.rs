//! Stage, commit and push the updated counter file.

use std::fmt::Display;
use std::path::Path;

use tracing::{error, info};

use crate::client::SourceControl;
use crate::commands::Result;
use crate::provision::Checkout;

/// The remote every push goes to.
pub const ORIGIN: &str = "origin";

/// The commit message for a counter update.
pub fn commit_message(counter: impl Display) -> String {
    format!("Automated commit: Increment counter to {counter}")
}

/// Stage `file`, commit it with [`commit_message`] and push to [`ORIGIN`].
///
/// A rejected push (for example a non-fast-forward) leaves the local commit
/// in place; nothing is rolled back.
///
/// # Errors
///
/// Returns the first git error from staging, committing or pushing.
pub fn publish<S: SourceControl + ?Sized>(
    git: &S,
    checkout: &Checkout,
    file: &Path,
    counter: impl Display,
) -> Result<()> {
    let repo = checkout.root();

    git.stage(repo, file)?;
    git.commit(repo, &commit_message(counter))?;
    info!("Created commit");

    if let Err(e) = git.push(repo, ORIGIN) {
        error!("Failed to push changes: {e}");
        return Err(e);
    }
    info!("Successfully pushed changes to remote repository");
    Ok(())
}
