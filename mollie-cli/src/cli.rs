//! Command-line arguments.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use mollie_http::{ClientConfig, ConfigError, Pagination};
use mollie_proto::{PaymentMethod, PaymentRequest};
use rust_decimal::Decimal;
use serde_json::Value;

/// Command-line client for the Mollie payments API.
#[derive(Debug, Parser)]
#[command(name = "mollie", version, about)]
pub struct Cli {
    /// Connection settings.
    #[command(flatten)]
    pub client: ClientArgs,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings, each with an environment fallback.
#[derive(Debug, Args)]
pub struct ClientArgs {
    /// API key (`test_...` or `live_...`).
    #[arg(long, env = "MOLLIE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// API endpoint without the version segment.
    #[arg(long, env = "MOLLIE_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "MOLLIE_TIMEOUT_SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,
}

impl ClientArgs {
    /// Builds the client configuration.
    pub fn config(&self) -> Result<ClientConfig, ConfigError> {
        let mut config = ClientConfig::new(self.api_key.as_str())?;
        if let Some(endpoint) = &self.base_url {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

/// Resource groups.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, inspect and list payments.
    #[command(subcommand)]
    Payments(PaymentsCommand),

    /// Inspect the payment methods enabled on the profile.
    #[command(subcommand)]
    Methods(MethodsCommand),

    /// Inspect iDEAL and gift card issuers.
    #[command(subcommand)]
    Issuers(IssuersCommand),

    /// Create, inspect and cancel refunds.
    #[command(subcommand)]
    Refunds(RefundsCommand),
}

/// `offset`/`count` paging flags.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Number of items to skip.
    #[arg(long)]
    pub offset: Option<u32>,

    /// Maximum number of items to return.
    #[arg(long)]
    pub count: Option<u32>,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Self::new(args.offset, args.count)
    }
}

#[derive(Debug, Subcommand)]
pub enum PaymentsCommand {
    /// Create a payment.
    Create(CreatePaymentArgs),
    /// Retrieve a payment.
    Get {
        /// Payment id (`tr_...`).
        id: String,
    },
    /// List payments.
    List(PageArgs),
}

/// Flags for `payments create`.
#[derive(Debug, Args)]
pub struct CreatePaymentArgs {
    /// Amount in euro, e.g. `10.00`.
    #[arg(long)]
    pub amount: Decimal,

    /// Description shown on the bank statement.
    #[arg(long)]
    pub description: String,

    /// Where the customer is sent after the payment.
    #[arg(long)]
    pub redirect_url: String,

    /// Webhook called on status changes.
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Preselected payment method.
    #[arg(long)]
    pub method: Option<PaymentMethod>,

    /// iDEAL issuer id.
    #[arg(long)]
    pub issuer: Option<String>,

    /// Checkout locale, e.g. `nl_NL`.
    #[arg(long)]
    pub locale: Option<String>,

    /// Bank transfer: address that receives the instructions.
    #[arg(long)]
    pub billing_email: Option<String>,

    /// Metadata as a JSON document.
    #[arg(long)]
    pub metadata: Option<Value>,
}

impl CreatePaymentArgs {
    /// Builds the request body.
    pub fn request(&self) -> PaymentRequest {
        let mut request = PaymentRequest::new(
            self.amount,
            self.description.as_str(),
            self.redirect_url.as_str(),
        );
        if let Some(url) = &self.webhook_url {
            request = request.with_webhook_url(url.as_str());
        }
        if let Some(method) = self.method {
            request = request.with_method(method);
        }
        if let Some(issuer) = &self.issuer {
            request = request.with_issuer(issuer.as_str());
        }
        if let Some(locale) = &self.locale {
            request = request.with_locale(locale.as_str());
        }
        if let Some(email) = &self.billing_email {
            request = request.with_billing_email(email.as_str());
        }
        if let Some(metadata) = &self.metadata {
            request = request.with_metadata(metadata.clone());
        }
        request
    }
}

#[derive(Debug, Subcommand)]
pub enum MethodsCommand {
    /// List enabled payment methods.
    List(PageArgs),
    /// Retrieve one payment method.
    Get {
        /// Method name, e.g. `ideal`.
        method: PaymentMethod,
    },
}

#[derive(Debug, Subcommand)]
pub enum IssuersCommand {
    /// List issuers.
    List(PageArgs),
    /// Retrieve an issuer.
    Get {
        /// Issuer id, e.g. `ideal_ABNANL2A`.
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum RefundsCommand {
    /// Refund a payment in full, or partially with `--amount`.
    Create {
        /// Payment id (`tr_...`).
        payment_id: String,
        /// Partial amount to refund.
        #[arg(long)]
        amount: Option<Decimal>,
    },
    /// List the refunds of a payment.
    List {
        /// Payment id (`tr_...`).
        payment_id: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Retrieve a refund.
    Get {
        /// Payment id (`tr_...`).
        payment_id: String,
        /// Refund id (`re_...`).
        refund_id: String,
    },
    /// Cancel a pending refund.
    Cancel {
        /// Payment id (`tr_...`).
        payment_id: String,
        /// Refund id (`re_...`).
        refund_id: String,
    },
}
