//! Environment-variable secret resolver.

use std::env::{self, VarError};

use secrecy::SecretString;

use crate::{Result, SecretError, SecretResolver};

/// Resolves a secret from the environment variable named by the identifier.
///
/// Meant for local runs and tests where no secret store is reachable. An
/// empty variable counts as missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretResolver;

impl EnvSecretResolver {
    /// Create a new environment resolver.
    pub fn new() -> Self {
        Self
    }
}

impl SecretResolver for EnvSecretResolver {
    fn resolve(&self, id: &str) -> Result<SecretString> {
        match env::var(id) {
            Ok(value) if !value.is_empty() => Ok(SecretString::from(value)),
            Ok(_) | Err(VarError::NotPresent) => Err(SecretError::NotFound { id: id.to_string() }),
            Err(VarError::NotUnicode(_)) => Err(SecretError::ResolutionFailed {
                id: id.to_string(),
                message: "value is not valid unicode".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    #[test]
    fn resolves_present_variable() {
        // PATH is set in every test environment we run in.
        let expected = env::var("PATH").unwrap();
        let value = EnvSecretResolver::new().resolve("PATH").unwrap();
        assert_eq!(value.expose_secret(), expected);
    }

    #[test]
    fn missing_variable_is_not_found() {
        let err = EnvSecretResolver::new()
            .resolve("COMMITRON_TEST_SURELY_UNSET_7f3a")
            .unwrap_err();
        assert!(matches!(err, SecretError::NotFound { ref id } if id == "COMMITRON_TEST_SURELY_UNSET_7f3a"));
    }
}
