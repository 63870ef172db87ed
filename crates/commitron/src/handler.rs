//! Job orchestration.
//!
//! [`handle`] is the whole invocation: validate settings, then resolve the
//! token, provision the clone, bump the counter and publish, strictly in that
//! order. Any failure becomes a 500 [`Response`].

use commitron_config::{RawSettings, SecretBackend, Settings};
use commitron_core::counter::{BigUint, update_counter};
use commitron_core::response::Response;
use commitron_git::{Identity, RemoteUrl, SourceControl, provision, publish};
use commitron_secrets::{
    AwsSecretsManagerResolver, EnvSecretResolver, SecretResolver, resolve_secret,
};
use tracing::{error, info};

use crate::error::JobError;

/// Validate `raw` and run the job, returning the result envelope.
///
/// `secrets_for` is only called once the settings are valid, so a
/// configuration error never constructs a resolver, let alone calls one.
pub fn handle<G, R, F>(raw: RawSettings, git: &G, secrets_for: F) -> Response
where
    G: SourceControl + ?Sized,
    R: SecretResolver,
    F: FnOnce(SecretBackend) -> R,
{
    let outcome = raw.validate().map_err(JobError::from).and_then(|settings| {
        let secrets = secrets_for(settings.secret_backend);
        run(&settings, &secrets, git).map(|counter| (settings, counter))
    });

    match outcome {
        Ok((settings, counter)) => Response::success(counter, &settings.repository, &settings.branch),
        Err(e) => {
            error!(stage = e.stage(), "Job execution failed: {e}");
            Response::failure(e.to_string())
        }
    }
}

/// Run the four job steps against validated settings and return the new
/// counter value.
///
/// # Errors
///
/// Returns the first failing step's error, tagged with its stage.
pub fn run<G, R>(settings: &Settings, secrets: &R, git: &G) -> Result<BigUint, JobError>
where
    G: SourceControl + ?Sized,
    R: SecretResolver + ?Sized,
{
    let token = resolve_secret(secrets, &settings.secret_id)?;
    let remote = RemoteUrl::from_template(
        &settings.remote_url_template,
        &settings.repository,
        &token,
    );

    let checkout = provision(
        git,
        &remote,
        &settings.branch,
        &settings.work_dir,
        &Identity::bot(),
    )
    .map_err(JobError::Provision)?;

    let counter_path = checkout.path_of(&settings.file_path);
    let counter = update_counter(&counter_path)?;
    info!(%counter, "Counter file updated");

    publish(git, &checkout, &counter_path, &counter).map_err(JobError::Publish)?;
    Ok(counter)
}

/// The production resolver for a backend.
pub fn secrets_for(backend: SecretBackend) -> Box<dyn SecretResolver> {
    match backend {
        SecretBackend::Aws => Box::new(AwsSecretsManagerResolver::new()),
        SecretBackend::Env => Box::new(EnvSecretResolver::new()),
    }
}
