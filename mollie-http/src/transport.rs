//! The transport seam.
//!
//! A [`Transport`] executes one [`RequestDescriptor`] against the versioned
//! base address with the bearer credential and hands back the raw status,
//! headers and body. It does no classification or decoding.
//!
//! [`ReqwestTransport`] is the default implementation. Implement the trait to
//! plug in another HTTP stack, or a fake in tests.

use std::time::Duration;

use async_trait::async_trait;
use http::header::{ACCEPT, USER_AGENT};
use http::{HeaderMap, StatusCode};
use reqwest::Client;
use url::Url;

use crate::config::{ApiKey, ClientConfig, ConfigError};
use crate::constants::{DEFAULT_USER_AGENT, JSON_CONTENT_TYPE};
use crate::error::TransportError;
use crate::request::RequestDescriptor;

/// A response as received, before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as text; empty when there is none.
    pub body: String,
}

/// Executes requests on behalf of [`MollieClient`](crate::MollieClient).
///
/// Implementations are shared by concurrent calls and must not hold
/// per-call state. Timeouts and cancellation surface as [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` to `base_url`, authenticated with `api_key`.
    async fn execute(
        &self,
        base_url: &Url,
        api_key: &ApiKey,
        request: &RequestDescriptor,
    ) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    /// Shared Reqwest HTTP client
    client: Client,
    /// Optional per-request timeout
    timeout: Option<Duration>,
    /// `User-Agent` sent with each request
    user_agent: String,
}

impl ReqwestTransport {
    /// Wraps an existing client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Builds a client with the timeout and `User-Agent` from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .build()
            .map_err(ConfigError::HttpClient)?;
        Ok(Self {
            client,
            timeout: config.timeout(),
            user_agent: config.user_agent().to_owned(),
        })
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        base_url: &Url,
        api_key: &ApiKey,
        request: &RequestDescriptor,
    ) -> Result<RawResponse, TransportError> {
        let url = base_url.join(&request.path)?;
        let mut req = self
            .client
            .request(request.method.clone(), url)
            .bearer_auth(api_key.expose())
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .header(USER_AGENT, &self.user_agent);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
