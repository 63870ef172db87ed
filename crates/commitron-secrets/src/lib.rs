//! Secret resolution for commitron.
//!
//! A [`SecretResolver`] turns an opaque identifier into a secret value. The
//! job only ever asks for one secret (the git token), so the trait is a
//! single synchronous method; backends that are async internally drive their
//! own runtime.

mod aws;
mod env;

pub use aws::AwsSecretsManagerResolver;
pub use env::EnvSecretResolver;
pub use secrecy::{ExposeSecret, SecretString};

use thiserror::Error;
use tracing::error;

/// Error types for secret resolution.
#[derive(Debug, Error)]
pub enum SecretError {
    /// No secret exists under the identifier.
    #[error("Secret '{id}' not found")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The backend rejected or failed the request.
    #[error("Failed to retrieve secret '{id}': {message}")]
    ResolutionFailed {
        /// The identifier that was looked up.
        id: String,
        /// Backend-provided description.
        message: String,
    },

    /// The async runtime for an SDK call could not be started.
    #[error("Failed to start secrets runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Convenience alias used throughout the secrets crate.
pub type Result<T> = std::result::Result<T, SecretError>;

/// Resolves a secret value by identifier.
pub trait SecretResolver {
    /// Fetch the current value of the secret `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`SecretError`] on any access failure. Implementations do
    /// not retry.
    fn resolve(&self, id: &str) -> Result<SecretString>;
}

impl<T: SecretResolver + ?Sized> SecretResolver for &T {
    fn resolve(&self, id: &str) -> Result<SecretString> {
        (**self).resolve(id)
    }
}

impl<T: SecretResolver + ?Sized> SecretResolver for Box<T> {
    fn resolve(&self, id: &str) -> Result<SecretString> {
        (**self).resolve(id)
    }
}

/// Resolve `id` through `resolver`, logging failures.
///
/// Only the error is logged, never the value.
///
/// # Errors
///
/// Propagates the resolver's error unchanged.
pub fn resolve_secret<R: SecretResolver + ?Sized>(resolver: &R, id: &str) -> Result<SecretString> {
    resolver.resolve(id).inspect_err(|e| {
        error!("Failed to retrieve secret: {e}");
    })
}
