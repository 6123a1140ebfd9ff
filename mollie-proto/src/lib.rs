//! Wire format types for the Mollie payments API.
//!
//! This crate defines the serialization-level data structures exchanged with
//! the Mollie `v1` REST API, together with the decoder that turns a payment
//! body into the right method-specific representation. It has minimal
//! dependencies (serde, `rust_decimal` and chrono) and is shared by the HTTP
//! client and the command-line tool.
//!
//! # Modules
//!
//! - [`method`] — The closed [`PaymentMethod`] enumeration
//! - [`payment`] — [`PaymentResponse`] and its method-specific [`PaymentDetails`]
//! - [`codec`] — Body decoding, including the discriminator-driven payment path
//! - [`list`] — Paged [`ListResponse`] envelopes
//! - [`refund`] — Refund requests and responses
//! - [`issuer`] — iDEAL and gift card issuers
//! - [`methods`] — Payment method descriptions returned by `/methods`
//! - [`request`] — Request bodies for write operations

pub mod codec;
pub mod issuer;
pub mod list;
pub mod method;
pub mod methods;
pub mod payment;
pub mod refund;
pub mod request;

pub use codec::{decode, decode_payment};
pub use issuer::IssuerResponse;
pub use list::{ListLinks, ListResponse};
pub use method::{PaymentMethod, UnknownPaymentMethod};
pub use methods::{AmountRange, MethodImage, PaymentMethodResponse};
pub use payment::{
    PaymentCommon, PaymentDetails, PaymentLinks, PaymentMode, PaymentResponse, PaymentStatus,
    RecurringType,
};
pub use refund::{RefundRequest, RefundResponse, RefundStatus};
pub use request::PaymentRequest;

/// API version segment appended to the base address.
pub const API_VERSION: &str = "v1";

/// Errors that can occur when decoding a response body.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The body is not valid JSON or does not match the target type.
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    /// A payment body was valid JSON but not an object.
    #[error("payment body is not a JSON object")]
    NotAnObject,

    /// The `method` discriminator is absent or `null`.
    #[error("missing payment method discriminator")]
    MissingMethod,

    /// The `method` discriminator is outside the known set.
    #[error("unrecognized payment method: {0}")]
    UnknownMethod(String),

    /// The `details` object does not fit the shape bound to `method`.
    #[error("invalid {method} details: {source}")]
    Details {
        /// The discriminator the details were decoded against.
        method: PaymentMethod,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}
