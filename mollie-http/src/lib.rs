#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Authenticated HTTP client for the Mollie payments API.
//!
//! [`MollieClient`] composes one round trip per operation: a
//! [`RequestDescriptor`] is built, executed by a [`Transport`], the status is
//! classified, and the body is either decoded into a typed response or mapped
//! to a structured [`ErrorInfo`].
//!
//! ```no_run
//! use mollie_http::{MollieClient, Pagination};
//!
//! # async fn run() -> Result<(), mollie_http::MollieError> {
//! let client = MollieClient::new("test_dHar4XY7LxsDOtmnkVtjNVWXLSlXsM")?;
//! let page = client.list_payments(Pagination::default().with_count(10)).await?;
//! for payment in &page.data {
//!     println!("{} {}", payment.common.id, payment.method());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] — Credential and client configuration
//! - [`constants`] — Default endpoint, environment variable names
//! - [`request`] — Request descriptors and pagination
//! - [`status`] — Status code classification
//! - [`error`] — Error mapping and the [`MollieError`] taxonomy
//! - [`transport`] — The [`Transport`] seam and its reqwest implementation
//! - [`client`] — The [`MollieClient`] façade
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of client operations

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod request;
pub mod status;
pub mod transport;

pub use client::MollieClient;
pub use config::{ApiKey, ClientConfig, ConfigError};
pub use error::{ErrorInfo, ErrorKind, MollieError, TransportError, map_error};
pub use request::{Pagination, RequestDescriptor, RequestError};
pub use status::{Classification, classify};
pub use transport::{RawResponse, ReqwestTransport, Transport};

pub use mollie_proto as proto;
