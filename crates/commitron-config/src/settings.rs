//! Settings types and validation.
//!
//! The main entry point is [`RawSettings::validate`], which checks that every
//! required setting is present and that the optional ones are well formed.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Names and defaults
// ---------------------------------------------------------------------------

/// Environment variable holding the `owner/name` repository identifier.
pub const GITHUB_REPO: &str = "GITHUB_REPO";
/// Environment variable holding the counter file path.
pub const FILE_PATH: &str = "FILE_PATH";
/// Environment variable holding the branch name.
pub const BRANCH: &str = "BRANCH";
/// Environment variable holding the secret identifier.
pub const AWS_SECRET_ID: &str = "AWS_SECRET_ID";

/// Environment variable overriding the working directory.
pub const WORK_DIR: &str = "COMMITRON_WORK_DIR";
/// Environment variable overriding the remote URL template.
pub const REMOTE_URL_TEMPLATE: &str = "COMMITRON_REMOTE_URL_TEMPLATE";
/// Environment variable selecting the secret backend.
pub const SECRET_BACKEND: &str = "COMMITRON_SECRET_BACKEND";

/// Required settings, in the order they are reported when missing.
pub const REQUIRED: [&str; 4] = [GITHUB_REPO, FILE_PATH, BRANCH, AWS_SECRET_ID];

/// Default ephemeral clone location.
pub const DEFAULT_WORK_DIR: &str = "/tmp/repo";

/// Default remote; `{token}` and `{repo}` are substituted at run time.
pub const DEFAULT_REMOTE_URL_TEMPLATE: &str = "https://{token}@github.com/{repo}.git";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while validating settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required settings are absent or empty.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingSettings(Vec<&'static str>),

    /// A setting was present but unusable.
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue {
        /// The setting that had an invalid value.
        key: &'static str,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Secret backend
// ---------------------------------------------------------------------------

/// Where the git token is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretBackend {
    /// AWS Secrets Manager (default).
    #[default]
    Aws,
    /// An environment variable named by the secret identifier.
    Env,
}

impl SecretBackend {
    /// The configuration spelling of this backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Env => "env",
        }
    }
}

impl fmt::Display for SecretBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecretBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(Self::Aws),
            "env" => Ok(Self::Env),
            other => Err(ConfigError::InvalidValue {
                key: SECRET_BACKEND,
                reason: format!("unknown secret backend '{other}' (expected 'aws' or 'env')"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Unvalidated settings as read from flags and the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSettings {
    pub repository: Option<String>,
    pub file_path: Option<String>,
    pub branch: Option<String>,
    pub secret_id: Option<String>,
    pub work_dir: Option<String>,
    pub remote_url_template: Option<String>,
    pub secret_backend: Option<String>,
}

/// Validated settings for one job run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Repository identifier in `owner/name` form.
    pub repository: String,
    /// Counter file path relative to the repository root.
    pub file_path: PathBuf,
    /// Branch to clone and push.
    pub branch: String,
    /// Identifier of the git token in the secret store.
    pub secret_id: String,
    /// Where the repository is cloned; wiped on every run.
    pub work_dir: PathBuf,
    /// Remote URL with `{repo}` and optional `{token}` placeholders.
    pub remote_url_template: String,
    /// Backend used to resolve `secret_id`.
    pub secret_backend: SecretBackend,
}

impl RawSettings {
    /// Validate into [`Settings`].
    ///
    /// All missing required settings are reported together, in the order of
    /// [`REQUIRED`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSettings`] if any required setting is
    /// absent or empty, and [`ConfigError::InvalidValue`] for a malformed
    /// optional setting or an unsafe file path.
    pub fn validate(self) -> Result<Settings> {
        let values = [
            non_empty(self.repository),
            non_empty(self.file_path),
            non_empty(self.branch),
            non_empty(self.secret_id),
        ];
        let missing: Vec<&'static str> = REQUIRED
            .iter()
            .zip(&values)
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingSettings(missing));
        }

        let [repository, file_path, branch, secret_id] = values.map(Option::unwrap_or_default);

        let file_path = PathBuf::from(file_path);
        check_relative(&file_path)?;

        let remote_url_template = non_empty(self.remote_url_template)
            .unwrap_or_else(|| DEFAULT_REMOTE_URL_TEMPLATE.to_string());
        if !remote_url_template.contains("{repo}") {
            return Err(ConfigError::InvalidValue {
                key: REMOTE_URL_TEMPLATE,
                reason: "template must contain '{repo}'".to_string(),
            });
        }

        let work_dir = non_empty(self.work_dir)
            .map_or_else(|| PathBuf::from(DEFAULT_WORK_DIR), PathBuf::from);
        check_work_dir(&work_dir)?;

        let secret_backend = match non_empty(self.secret_backend) {
            Some(s) => s.parse()?,
            None => SecretBackend::default(),
        };

        Ok(Settings {
            repository,
            file_path,
            branch,
            secret_id,
            work_dir,
            remote_url_template,
            secret_backend,
        })
    }
}

impl Settings {
    /// Absolute location of the counter file inside the working directory.
    pub fn counter_path(&self) -> PathBuf {
        self.work_dir.join(&self.file_path)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// The counter file must stay inside the clone.
fn check_relative(path: &Path) -> Result<()> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ConfigError::InvalidValue {
            key: FILE_PATH,
            reason: format!(
                "'{}' must be a path relative to the repository root without '..'",
                path.display()
            ),
        });
    }
    Ok(())
}

/// The working directory is wiped on every run, so it must be an absolute
/// path below the root with no `..`.
fn check_work_dir(path: &Path) -> Result<()> {
    let mut below_root = false;
    for component in path.components() {
        match component {
            Component::ParentDir => return Err(invalid_work_dir(path, "must not contain '..'")),
            Component::Normal(_) => below_root = true,
            _ => {}
        }
    }
    if !path.is_absolute() {
        return Err(invalid_work_dir(path, "must be an absolute path"));
    }
    if !below_root {
        return Err(invalid_work_dir(path, "must not be the filesystem root"));
    }
    Ok(())
}

fn invalid_work_dir(path: &Path, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: WORK_DIR,
        reason: format!("'{}' {reason}", path.display()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> RawSettings {
        RawSettings {
            repository: Some("octo/counter".to_string()),
            file_path: Some("counter.txt".to_string()),
            branch: Some("main".to_string()),
            secret_id: Some("github-token".to_string()),
            ..RawSettings::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let settings = complete().validate().unwrap();
        assert_eq!(settings.work_dir, PathBuf::from("/tmp/repo"));
        assert_eq!(settings.remote_url_template, DEFAULT_REMOTE_URL_TEMPLATE);
        assert_eq!(settings.secret_backend, SecretBackend::Aws);
        assert_eq!(settings.counter_path(), PathBuf::from("/tmp/repo/counter.txt"));
    }

    #[test]
    fn test_all_missing_listed_in_order() {
        let err = RawSettings::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: GITHUB_REPO, FILE_PATH, BRANCH, AWS_SECRET_ID"
        );
    }

    #[test]
    fn test_empty_counts_as_missing() {
        let raw = RawSettings {
            branch: Some(String::new()),
            secret_id: None,
            ..complete()
        };
        assert_eq!(
            raw.validate().unwrap_err(),
            ConfigError::MissingSettings(vec![BRANCH, AWS_SECRET_ID])
        );
    }

    #[test]
    fn test_overrides() {
        let raw = RawSettings {
            work_dir: Some("/var/tmp/clone".to_string()),
            remote_url_template: Some("file:///srv/{repo}.git".to_string()),
            secret_backend: Some("ENV".to_string()),
            ..complete()
        };
        let settings = raw.validate().unwrap();
        assert_eq!(settings.work_dir, PathBuf::from("/var/tmp/clone"));
        assert_eq!(settings.remote_url_template, "file:///srv/{repo}.git");
        assert_eq!(settings.secret_backend, SecretBackend::Env);
    }

    #[test]
    fn test_nested_file_path_allowed() {
        let raw = RawSettings {
            file_path: Some("./data/counter.txt".to_string()),
            ..complete()
        };
        assert!(raw.validate().is_ok());
    }

    #[test]
    fn test_escaping_file_path_rejected() {
        for path in ["/etc/passwd", "../outside", "data/../../x"] {
            let raw = RawSettings {
                file_path: Some(path.to_string()),
                ..complete()
            };
            let err = raw.validate().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { key: FILE_PATH, .. }),
                "{path}: {err:?}"
            );
        }
    }

    fn work_dir_error(work_dir: &str) -> String {
        let raw = RawSettings {
            work_dir: Some(work_dir.to_string()),
            ..complete()
        };
        match raw.validate() {
            Err(ConfigError::InvalidValue { key: WORK_DIR, reason }) => reason,
            other => panic!("{work_dir}: expected work dir error, got {other:?}"),
        }
    }

    #[test]
    fn test_relative_work_dir_rejected() {
        assert_eq!(work_dir_error("."), "'.' must be an absolute path");
        assert_eq!(work_dir_error("repo"), "'repo' must be an absolute path");
    }

    #[test]
    fn test_root_work_dir_rejected() {
        assert_eq!(work_dir_error("/"), "'/' must not be the filesystem root");
        assert_eq!(work_dir_error("/./"), "'/./' must not be the filesystem root");
    }

    #[test]
    fn test_parent_dir_in_work_dir_rejected() {
        assert_eq!(work_dir_error("/tmp/../repo"), "'/tmp/../repo' must not contain '..'");
        assert_eq!(work_dir_error("../repo"), "'../repo' must not contain '..'");
    }

    #[test]
    fn test_nested_absolute_work_dir_accepted() {
        let raw = RawSettings {
            work_dir: Some("/var/tmp/commitron/repo".to_string()),
            ..complete()
        };
        assert_eq!(raw.validate().unwrap().work_dir, PathBuf::from("/var/tmp/commitron/repo"));
    }

    #[test]
    fn test_template_requires_repo_placeholder() {
        let raw = RawSettings {
            remote_url_template: Some("https://github.com/fixed.git".to_string()),
            ..complete()
        };
        assert!(matches!(
            raw.validate(),
            Err(ConfigError::InvalidValue { key: REMOTE_URL_TEMPLATE, .. })
        ));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = "vault".parse::<SecretBackend>().unwrap_err();
        assert!(err.to_string().contains("unknown secret backend 'vault'"));
    }

    #[test]
    fn test_backend_display_roundtrip() {
        for backend in [SecretBackend::Aws, SecretBackend::Env] {
            assert_eq!(backend.to_string().parse::<SecretBackend>().unwrap(), backend);
        }
    }
}
