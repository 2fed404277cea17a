mod cli;
mod error;
mod output;
mod report;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use uniscan_api::{CancellationToken, Controller};

use crate::cli::Cli;
use crate::error::CliError;
use crate::report::Selection;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = uniscan_config::load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let host = config.host()?.to_owned();
    let api_key = config.resolve_api_key()?;

    // Ctrl-C aborts whatever request is in flight.
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let controller = Controller::from_api_key(&host, &api_key, &config.transport_config())
        .map_err(|e| CliError::from_api(e, &host))?
        .with_paginator(config.paginator())
        .with_cancellation(cancel);

    let selection = Selection {
        devices: cli.devices,
        device_details: cli.device_details,
        clients: cli.clients,
    };
    tracing::debug!(?selection, "collecting inventory");

    let report = report::collect(&controller, selection)
        .await
        .map_err(|e| CliError::from_api(e, &host))?;

    let out = output::render(&cli.output, &report)?;
    output::print_output(&out);
    Ok(())
}
