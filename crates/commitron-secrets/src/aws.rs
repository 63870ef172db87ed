//! AWS Secrets Manager resolver.

use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use secrecy::SecretString;

use crate::{Result, SecretError, SecretResolver};

/// Resolves secrets with `GetSecretValue`, returning the `SecretString`.
///
/// Credentials and region come from the standard AWS provider chain
/// (environment such as `AWS_REGION`, profile, container or instance
/// metadata).
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsSecretsManagerResolver;

impl AwsSecretsManagerResolver {
    /// Create a resolver using the default provider chain.
    pub fn new() -> Self {
        Self
    }

    async fn fetch(&self, id: &str) -> Result<SecretString> {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let client = Client::new(&config);

        let response = client
            .get_secret_value()
            .secret_id(id)
            .send()
            .await
            .map_err(|e| SecretError::ResolutionFailed {
                id: id.to_string(),
                message: format!("AWS Secrets Manager error: {}", DisplayErrorContext(&e)),
            })?;

        let value = response
            .secret_string()
            .ok_or_else(|| SecretError::ResolutionFailed {
                id: id.to_string(),
                message: "Secret has no string value (may be binary)".to_string(),
            })?;

        Ok(SecretString::from(value.to_string()))
    }
}

impl SecretResolver for AwsSecretsManagerResolver {
    fn resolve(&self, id: &str) -> Result<SecretString> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.fetch(id))
    }
}
