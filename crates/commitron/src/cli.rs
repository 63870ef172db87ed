//! Clap CLI definitions for the `commitron` command.
//!
//! Every setting is a long flag with an environment-variable fallback, so
//! the job can be configured purely through its environment.

use clap::Parser;
use commitron_config::RawSettings;

/// commitron -- bump a counter file in a git repository and push it.
///
/// Fetches a git token from the secret store, clones the branch into a
/// fresh working directory, increments the counter file, commits and pushes.
/// Prints a JSON status envelope on stdout.
#[derive(Parser, Debug)]
#[command(
    name = "commitron",
    about = "Increment a counter file in a git repository and push it",
    version
)]
pub struct Cli {
    /// Repository identifier in owner/name form.
    #[arg(long, env = "GITHUB_REPO")]
    pub repo: Option<String>,

    /// Counter file path relative to the repository root.
    #[arg(long, env = "FILE_PATH")]
    pub file_path: Option<String>,

    /// Branch to clone, commit to and push.
    #[arg(long, env = "BRANCH")]
    pub branch: Option<String>,

    /// Identifier of the git token in the secret store.
    #[arg(long, env = "AWS_SECRET_ID")]
    pub secret_id: Option<String>,

    /// Ephemeral clone location, wiped on every run (default: /tmp/repo).
    #[arg(long, env = "COMMITRON_WORK_DIR")]
    pub work_dir: Option<String>,

    /// Remote URL with {repo} and {token} placeholders
    /// (default: https://{token}@github.com/{repo}.git).
    #[arg(long, env = "COMMITRON_REMOTE_URL_TEMPLATE")]
    pub remote_url_template: Option<String>,

    /// Secret backend: aws or env (default: aws).
    #[arg(long, env = "COMMITRON_SECRET_BACKEND")]
    pub secret_backend: Option<String>,

    /// Log level (TRACE, DEBUG, INFO, WARNING, ERROR, CRITICAL).
    #[arg(long, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,
}

impl Cli {
    /// The unvalidated job settings.
    pub fn settings(&self) -> RawSettings {
        RawSettings {
            repository: self.repo.clone(),
            file_path: self.file_path.clone(),
            branch: self.branch.clone(),
            secret_id: self.secret_id.clone(),
            work_dir: self.work_dir.clone(),
            remote_url_template: self.remote_url_template.clone(),
            secret_backend: self.secret_backend.clone(),
        }
    }
}

/// One-line description of a parse failure, without clap's usage block.
pub fn describe_error(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let first = rendered.lines().next().unwrap_or_default();
    let message = first.strip_prefix("error: ").unwrap_or(first).trim();
    format!("Invalid arguments: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_to_settings() {
        let cli = Cli::try_parse_from([
            "commitron",
            "--repo",
            "octo/counter",
            "--file-path",
            "counter.txt",
            "--branch",
            "main",
            "--secret-id",
            "github-token",
            "--secret-backend",
            "env",
        ])
        .unwrap();

        let settings = cli.settings();
        assert_eq!(settings.repository.as_deref(), Some("octo/counter"));
        assert_eq!(settings.file_path.as_deref(), Some("counter.txt"));
        assert_eq!(settings.branch.as_deref(), Some("main"));
        assert_eq!(settings.secret_id.as_deref(), Some("github-token"));
        assert_eq!(settings.secret_backend.as_deref(), Some("env"));
    }

    #[test]
    fn parse_errors_are_one_line() {
        let err = Cli::try_parse_from(["commitron", "--no-such-flag"]).unwrap_err();
        let message = describe_error(&err);
        assert!(message.starts_with("Invalid arguments: unexpected argument '--no-such-flag'"), "{message}");
        assert!(!message.contains('\n'));
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = Cli::try_parse_from(["commitron", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }
}
