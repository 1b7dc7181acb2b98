//! Pivnet CLI binary.
//!
//! A command-line interface for interacting with the Pivnet API.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use pivnet::cli::{commands, setup_hint, Cli};
use pivnet::{PivnetClient, Printer};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let client = match cli.client_config().and_then(PivnetClient::new) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = setup_hint(&e) {
                eprintln!("Hint: {hint}");
            }
            return ExitCode::FAILURE;
        }
    };

    let mut printer = Printer::new(io::stdout().lock(), cli.format);
    match commands::run(&client, cli.command, &mut printer).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
