//! Command-line client for the Mollie payments API.
//!
//! # Usage
//!
//! ```bash
//! # List the payment methods enabled on the profile
//! MOLLIE_API_KEY=test_... cargo run -p mollie-cli -- methods list
//!
//! # Create an iDEAL payment
//! cargo run -p mollie-cli -- payments create --amount 10.00 \
//!     --description "Order #12345" --redirect-url https://example.org/return --method ideal
//!
//! # Configure logging level
//! RUST_LOG=debug cargo run -p mollie-cli -- payments get tr_7UhSN1zuXS
//! ```
//!
//! # Environment Variables
//!
//! A `.env` file in the working directory is loaded first.
//!
//! - `MOLLIE_API_KEY` — API key (required unless `--api-key` is given)
//! - `MOLLIE_BASE_URL` — Override the endpoint (default: `https://api.mollie.nl`)
//! - `MOLLIE_TIMEOUT_SECS` — Request timeout in seconds
//! - `RUST_LOG` — Log level filter (default: `info`)
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod cli;

use clap::Parser;
use mollie_http::{MollieClient, MollieError};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, IssuersCommand, MethodsCommand, PaymentsCommand, RefundsCommand};

/// Failures that end the process.
#[derive(Debug, thiserror::Error)]
enum CliError {
    /// A client operation failed.
    #[error(transparent)]
    Client(#[from] MollieError),

    /// The result could not be written out.
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this failure.
    const fn exit_code(&self) -> i32 {
        match self {
            Self::Client(MollieError::Configuration(_)) => 2,
            _ => 1,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing with RUST_LOG env filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.client.config().map_err(MollieError::from)?;
    tracing::debug!(
        base_url = %config.base_url(),
        timeout = ?config.timeout(),
        test_mode = config.api_key().is_test(),
        "Loaded configuration"
    );
    let client = MollieClient::from_config(config)?;

    match cli.command {
        Command::Payments(command) => match command {
            PaymentsCommand::Create(args) => {
                print(&client.create_payment(&args.request()).await?)
            }
            PaymentsCommand::Get { id } => print(&client.get_payment(&id).await?),
            PaymentsCommand::List(page) => print(&client.list_payments(page.into()).await?),
        },
        Command::Methods(command) => match command {
            MethodsCommand::List(page) => {
                print(&client.list_payment_methods(page.into()).await?)
            }
            MethodsCommand::Get { method } => print(&client.get_payment_method(method).await?),
        },
        Command::Issuers(command) => match command {
            IssuersCommand::List(page) => print(&client.list_issuers(page.into()).await?),
            IssuersCommand::Get { id } => print(&client.get_issuer(&id).await?),
        },
        Command::Refunds(command) => match command {
            RefundsCommand::Create { payment_id, amount } => {
                print(&client.create_refund(&payment_id, amount).await?)
            }
            RefundsCommand::List { payment_id, page } => {
                print(&client.list_refunds(&payment_id, page.into()).await?)
            }
            RefundsCommand::Get {
                payment_id,
                refund_id,
            } => print(&client.get_refund(&payment_id, &refund_id).await?),
            RefundsCommand::Cancel {
                payment_id,
                refund_id,
            } => {
                client.cancel_refund(&payment_id, &refund_id).await?;
                tracing::info!(payment_id = %payment_id, refund_id = %refund_id, "Refund cancelled");
                Ok(())
            }
        },
    }
}

/// Writes `value` to stdout as pretty-printed JSON.
fn print<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
