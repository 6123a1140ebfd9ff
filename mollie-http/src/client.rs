//! The [`MollieClient`] façade.
//!
//! Every operation is one round trip: build a [`RequestDescriptor`], execute
//! it through the [`Transport`], classify the status, then decode the body or
//! map the failure. There is no retry and no pagination walking.
//!
//! ## Error Handling
//!
//! All failures surface as [`MollieError`]; see [`crate::error`] for which
//! kinds are worth retrying.

use std::fmt::Display;

use mollie_proto::{
    IssuerResponse, ListResponse, PaymentMethod, PaymentMethodResponse, PaymentRequest,
    PaymentResponse, RefundRequest, RefundResponse, decode, decode_payment,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ApiKey, ClientConfig};
use crate::error::{MollieError, map_error};
use crate::request::{Pagination, RequestDescriptor, segment};
use crate::status::{Classification, classify};
use crate::transport::{RawResponse, ReqwestTransport, Transport};

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

/// A client for the Mollie payments API.
///
/// Holds the immutable configuration and a transport handle; it is cheap to
/// clone when the transport is, and safe to share across tasks.
#[derive(Clone, Debug)]
pub struct MollieClient<T = ReqwestTransport> {
    /// Versioned base address (e.g. `https://api.mollie.nl/v1/`)
    base_url: Url,
    /// Bearer credential
    api_key: ApiKey,
    /// Executes the requests
    transport: T,
}

impl MollieClient<ReqwestTransport> {
    /// Creates a client for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`MollieError::Configuration`] if `api_key` is empty; no
    /// request is attempted.
    pub fn new(api_key: impl Into<String>) -> Result<Self, MollieError> {
        Self::from_config(ClientConfig::new(api_key)?)
    }

    /// Creates a client from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MollieError::Configuration`] if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, MollieError> {
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client from `MOLLIE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`MollieError::Configuration`] if the environment is incomplete.
    pub fn from_env() -> Result<Self, MollieError> {
        Self::from_config(ClientConfig::from_env()?)
    }
}

impl<T: Transport> MollieClient<T> {
    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url().clone(),
            api_key: config.api_key().clone(),
            transport,
        }
    }

    /// Returns the versioned base address.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates a payment (`POST payments`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.create_payment", skip_all, err)
    )]
    pub async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentResponse, MollieError> {
        let request = RequestDescriptor::post("payments", request)?;
        self.fetch_payment(&request).await
    }

    /// Retrieves a payment (`GET payments/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.get_payment", skip_all, fields(payment_id = %payment_id), err)
    )]
    pub async fn get_payment(&self, payment_id: &str) -> Result<PaymentResponse, MollieError> {
        let payment_id = segment("payment id", payment_id)?;
        let request = RequestDescriptor::get(format!("payments/{payment_id}"), &[])?;
        self.fetch_payment(&request).await
    }

    /// Lists payments, one page per call (`GET payments`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.list_payments", skip_all, fields(?page), err)
    )]
    pub async fn list_payments(
        &self,
        page: Pagination,
    ) -> Result<ListResponse<PaymentResponse>, MollieError> {
        let request = RequestDescriptor::get("payments", &page.query())?;
        self.fetch(&request).await
    }

    /// Lists the payment methods enabled on the profile (`GET methods`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.list_payment_methods", skip_all, fields(?page), err)
    )]
    pub async fn list_payment_methods(
        &self,
        page: Pagination,
    ) -> Result<ListResponse<PaymentMethodResponse>, MollieError> {
        let request = RequestDescriptor::get("methods", &page.query())?;
        self.fetch(&request).await
    }

    /// Retrieves one payment method (`GET methods/{method}`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.get_payment_method", skip_all, fields(%method), err)
    )]
    pub async fn get_payment_method(
        &self,
        method: PaymentMethod,
    ) -> Result<PaymentMethodResponse, MollieError> {
        let request = RequestDescriptor::get(format!("methods/{method}"), &[])?;
        self.fetch(&request).await
    }

    /// Lists issuers (`GET issuers`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.list_issuers", skip_all, fields(?page), err)
    )]
    pub async fn list_issuers(
        &self,
        page: Pagination,
    ) -> Result<ListResponse<IssuerResponse>, MollieError> {
        let request = RequestDescriptor::get("issuers", &page.query())?;
        self.fetch(&request).await
    }

    /// Retrieves an issuer (`GET issuers/{id}`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.get_issuer", skip_all, fields(issuer_id = %issuer_id), err)
    )]
    pub async fn get_issuer(&self, issuer_id: &str) -> Result<IssuerResponse, MollieError> {
        let issuer_id = segment("issuer id", issuer_id)?;
        let request = RequestDescriptor::get(format!("issuers/{issuer_id}"), &[])?;
        self.fetch(&request).await
    }

    /// Refunds a payment, in full or for `amount` (`POST payments/{id}/refunds`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.create_refund", skip_all, fields(payment_id = %payment_id), err)
    )]
    pub async fn create_refund(
        &self,
        payment_id: &str,
        amount: Option<Decimal>,
    ) -> Result<RefundResponse, MollieError> {
        let payment_id = segment("payment id", payment_id)?;
        let body = RefundRequest { amount };
        let request = RequestDescriptor::post(format!("payments/{payment_id}/refunds"), &body)?;
        self.fetch(&request).await
    }

    /// Lists the refunds of a payment (`GET payments/{id}/refunds`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.list_refunds", skip_all, fields(payment_id = %payment_id, ?page), err)
    )]
    pub async fn list_refunds(
        &self,
        payment_id: &str,
        page: Pagination,
    ) -> Result<ListResponse<RefundResponse>, MollieError> {
        let payment_id = segment("payment id", payment_id)?;
        let request =
            RequestDescriptor::get(format!("payments/{payment_id}/refunds"), &page.query())?;
        self.fetch(&request).await
    }

    /// Retrieves a refund (`GET payments/{id}/refunds/{refund_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails or the response cannot be decoded.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.get_refund", skip_all, fields(payment_id = %payment_id, refund_id = %refund_id), err)
    )]
    pub async fn get_refund(
        &self,
        payment_id: &str,
        refund_id: &str,
    ) -> Result<RefundResponse, MollieError> {
        let request = refund_request(payment_id, refund_id, false)?;
        self.fetch(&request).await
    }

    /// Cancels a pending refund (`DELETE payments/{id}/refunds/{refund_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`MollieError`] if the request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "mollie.client.cancel_refund", skip_all, fields(payment_id = %payment_id, refund_id = %refund_id), err)
    )]
    pub async fn cancel_refund(&self, payment_id: &str, refund_id: &str) -> Result<(), MollieError> {
        let request = refund_request(payment_id, refund_id, true)?;
        self.execute(&request).await.map(drop)
    }

    /// Executes a request and decodes the body as a payment.
    async fn fetch_payment(
        &self,
        request: &RequestDescriptor,
    ) -> Result<PaymentResponse, MollieError> {
        let response = self.execute(request).await?;
        Ok(decode_payment(&response.body)?)
    }

    /// Executes a request and decodes the body structurally.
    async fn fetch<R>(&self, request: &RequestDescriptor) -> Result<R, MollieError>
    where
        R: DeserializeOwned,
    {
        let response = self.execute(request).await?;
        Ok(decode(&response.body)?)
    }

    /// Executes a request and keeps only successful responses.
    async fn execute(&self, request: &RequestDescriptor) -> Result<RawResponse, MollieError> {
        #[cfg(feature = "telemetry")]
        tracing::debug!(method = %request.method, path = %request.path, "Sending request");

        let result = match self
            .transport
            .execute(&self.base_url, &self.api_key, request)
            .await
        {
            Ok(response) => match classify(response.status) {
                Classification::Success => Ok(response),
                Classification::ApiFailure | Classification::TransportFailure => {
                    Err(map_error(response.status, response.body).into())
                }
            },
            Err(err) => Err(err.into()),
        };

        record_result_on_span(&result);

        result
    }
}

fn refund_request(
    payment_id: &str,
    refund_id: &str,
    cancel: bool,
) -> Result<RequestDescriptor, MollieError> {
    let payment_id = segment("payment id", payment_id)?;
    let refund_id = segment("refund id", refund_id)?;
    let path = format!("payments/{payment_id}/refunds/{refund_id}");
    let request = if cancel {
        RequestDescriptor::delete(path)?
    } else {
        RequestDescriptor::get(path, &[])?
    };
    Ok(request)
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::WARN, error = %err, "Mollie request failed");
        }
    }
}

/// Records the outcome of a request on the current span.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
