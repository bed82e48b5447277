//! OpenRPC release plugin host harness.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse configuration** — load the plugin config and release context
//!    from JSON files, then apply flag overrides.
//! 2. **Wire observability** — configure `tracing-subscriber` (text or JSON on
//!    stderr). Every span and event from the `plugin` and `document-store`
//!    crates flows through it, under one `release_attempt` span per run.
//! 3. **Construct infrastructure** — build an `FsDocumentStore` and inject it
//!    into `DocumentVersionSync`.
//! 4. **Dispatch the step** — `verify-conditions` or `prepare`.
//!
//! On success `true` is printed to stdout. Release errors print a one-line
//! `[CODE] message` notice and exit with status 1; any other failure prints
//! the full cause chain and exits with status 2.

mod args;
mod inputs;
mod telemetry;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use document_store::FsDocumentStore;
use plugin::{DocumentVersionSync, PluginError, ReleaseAttemptId, Verifier, Writer};
use tracing::{error, info_span, Instrument};

use crate::args::{Cli, Command};

const EXIT_RELEASE_ERROR: u8 = 1;
const EXIT_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.log_format, cli.log_level);

    let attempt = ReleaseAttemptId::new_random();
    let span = info_span!("release_attempt", %attempt, step = cli.command.name());

    match run(cli).instrument(span).await {
        Ok(success) => {
            println!("{success}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::from(exit_status(&err))
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let process_cwd =
        std::env::current_dir().context("failed to determine the working directory")?;
    let step = cli.command.step();
    let config = inputs::load_config(step)?;
    let next_version = match &cli.command {
        Command::Prepare { next_version, .. } => next_version.as_deref(),
        Command::VerifyConditions(_) => None,
    };
    let context = inputs::load_context(step, next_version, &process_cwd)?;

    let mut store = FsDocumentStore::new();
    if let Some(ms) = cli.io_timeout_ms {
        store = store.with_timeout(Duration::from_millis(ms));
    }
    let sync = DocumentVersionSync::new(store);

    let outcome = match &cli.command {
        Command::VerifyConditions(_) => sync.verify_conditions(&config, &context).await,
        Command::Prepare { .. } => sync.prepare(&config, &context).await,
    };
    outcome.map_err(|err| {
        error!(error = %err, release_error = err.is_release_error(), "step failed");
        err.into()
    })
}

fn release_error(err: &anyhow::Error) -> Option<&PluginError> {
    err.downcast_ref::<PluginError>()
        .filter(|plugin_error| plugin_error.is_release_error())
}

fn render_error(err: &anyhow::Error) -> String {
    match release_error(err).and_then(|e| e.code().map(|code| (code, e))) {
        Some((code, e)) => format!("[{code}] {e}"),
        None => format!("Error: {err:?}"),
    }
}

fn exit_status(err: &anyhow::Error) -> u8 {
    if release_error(err).is_some() {
        EXIT_RELEASE_ERROR
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use plugin::IoOperation;

    use super::*;

    // A real missing-document signal, produced through the public step API.
    fn missing_document() -> anyhow::Error {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = runtime.block_on(async {
            DocumentVersionSync::new(FsDocumentStore::new())
                .verify_conditions(
                    &plugin::PluginConfig::for_location("openrpc.json"),
                    &plugin::ReleaseContext::in_directory(dir.path()),
                )
                .await
                .unwrap_err()
        });
        err.into()
    }

    #[test]
    fn release_errors_render_as_short_notice() {
        let err = missing_document();

        let rendered = render_error(&err);

        assert!(rendered.starts_with("[EMISSINGDOCUMENT] Missing `openrpc.json`"), "{rendered}");
        assert_eq!(exit_status(&err), EXIT_RELEASE_ERROR);
    }

    #[test]
    fn other_errors_render_with_cause_chain() {
        let err: anyhow::Error = PluginError::Io {
            operation: IoOperation::Write,
            path: PathBuf::from("openrpc.json"),
            source: std::io::Error::other("disk full"),
        }
        .into();

        let rendered = render_error(&err);

        assert!(rendered.contains("Failed to write document `openrpc.json`"), "{rendered}");
        assert!(rendered.contains("disk full"), "{rendered}");
        assert_eq!(exit_status(&err), EXIT_FAILURE);
    }

    #[test]
    fn input_errors_are_general_failures() {
        let err = anyhow::anyhow!("config missing").context("loading plugin configuration");
        assert_eq!(exit_status(&err), EXIT_FAILURE);
    }
}
