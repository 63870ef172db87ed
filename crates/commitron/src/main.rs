//! `commitron` -- counter-bump job entry point.
//!
//! Parses settings from flags and the environment, runs the job inside a
//! scoped logging dispatch, prints the result envelope and exits non-zero on
//! failure.

mod cli;
mod output;

use std::process::ExitCode;

use clap::Parser;
use commitron::{handler, logging};
use commitron_core::response::Response;
use commitron_git::GitCli;
use tracing::{error, warn};

use cli::Cli;

fn main() -> ExitCode {
    let response = match Cli::try_parse() {
        Ok(cli) => run(&cli),
        // --help and --version print and exit 0 as usual.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let dispatch = logging::dispatch(logging::DEFAULT_LEVEL);
            let message = cli::describe_error(&e);
            tracing::dispatcher::with_default(&dispatch, || {
                error!("Job execution failed: {message}");
            });
            Response::failure(message)
        }
    };

    output::output_response(&response);

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(cli: &Cli) -> Response {
    let level = logging::level_from_name(&cli.log_level);
    let dispatch = logging::dispatch(level.unwrap_or(logging::DEFAULT_LEVEL));

    tracing::dispatcher::with_default(&dispatch, || {
        if level.is_none() {
            warn!(log_level = %cli.log_level, "Unknown log level, using INFO");
        }
        handler::handle(cli.settings(), &GitCli::new(), handler::secrets_for)
    })
}
