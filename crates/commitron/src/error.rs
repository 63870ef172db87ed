//! Job error types.

use commitron_config::ConfigError;
use commitron_core::counter::CounterError;
use commitron_git::GitError;
use commitron_secrets::SecretError;

/// A failure in one of the job's stages.
///
/// The description shown to callers is the underlying error's own message;
/// the stage only shows up in logs.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// Required settings are missing or invalid. Nothing has run yet.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The token could not be fetched. Nothing has touched the filesystem.
    #[error(transparent)]
    Secret(#[from] SecretError),

    /// Clearing, cloning or configuring the working directory failed.
    #[error(transparent)]
    Provision(GitError),

    /// Reading or writing the counter file failed.
    #[error(transparent)]
    Counter(#[from] CounterError),

    /// Staging, committing or pushing failed. A local commit may remain.
    #[error(transparent)]
    Publish(GitError),
}

impl JobError {
    /// Short stage name for log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Secret(_) => "secret",
            Self::Provision(_) => "provision",
            Self::Counter(_) => "counter",
            Self::Publish(_) => "publish",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn message_is_the_underlying_error() {
        let err = JobError::from(ConfigError::MissingSettings(vec!["BRANCH"]));
        assert_eq!(err.to_string(), "Missing required environment variables: BRANCH");
        assert_eq!(err.stage(), "config");
    }

    #[test]
    fn git_errors_keep_their_stage() {
        let push = JobError::Publish(GitError::CommandFailed {
            code: Some(1),
            stderr: "rejected".to_string(),
        });
        assert_eq!(push.stage(), "publish");
        assert_eq!(push.to_string(), "git command failed (exit code Some(1)): rejected");
    }
}
