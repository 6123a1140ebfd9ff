//! Client configuration.
//!
//! A [`ClientConfig`] is an immutable value fixed at construction: the
//! credential, the versioned base address, an optional per-request timeout
//! and the `User-Agent`. It can be built in code or read from the
//! environment.
//!
//! # Environment Variables
//!
//! - `MOLLIE_API_KEY` — API key (required)
//! - `MOLLIE_BASE_URL` — Override the endpoint (default: `https://api.mollie.nl`)
//! - `MOLLIE_TIMEOUT_SECS` — Request timeout in seconds

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use http::HeaderValue;
use mollie_proto::API_VERSION;
use url::Url;

use crate::constants::{
    API_KEY_ENV, BASE_URL_ENV, DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, TIMEOUT_SECS_ENV,
};

/// Errors raised while configuring a client, before any request is sent.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The API key is empty or whitespace.
    #[error("API key must not be empty")]
    EmptyApiKey,

    /// The API key cannot be sent in an `Authorization` header.
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    /// The base address could not be parsed.
    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        /// The rejected address.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The base address cannot have relative paths joined onto it.
    #[error("base URL {0} cannot be used as a base")]
    UnsupportedBaseUrl(String),

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// An environment variable has an unusable value.
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// The bearer credential.
///
/// The key is only readable through [`ApiKey::expose`]; its `Debug` output
/// is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validates and wraps an API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] for an empty or blank key and
    /// [`ConfigError::InvalidApiKey`] if it cannot be sent as a header.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| ConfigError::InvalidApiKey)?;
        Ok(Self(key))
    }

    /// Returns the raw key for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` for a test-mode key (`test_` prefix).
    #[must_use]
    pub fn is_test(&self) -> bool {
        self.0.starts_with("test_")
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Builds the versioned base address from an endpoint.
///
/// `https://api.mollie.nl` and `https://api.mollie.nl/` both become
/// `https://api.mollie.nl/v1/`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the result is not a usable base URL.
pub fn compose_base_url(endpoint: &str, version: &str) -> Result<Url, ConfigError> {
    let mut normalized = endpoint.trim_end_matches('/').to_owned();
    normalized.push('/');
    normalized.push_str(version);
    normalized.push('/');
    let url = Url::parse(&normalized).map_err(|source| ConfigError::InvalidBaseUrl {
        url: endpoint.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::UnsupportedBaseUrl(endpoint.to_owned()));
    }
    Ok(url)
}

/// Immutable client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_key: ApiKey,
    base_url: Url,
    timeout: Option<Duration>,
    user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration for the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            base_url: compose_base_url(DEFAULT_ENDPOINT, API_VERSION)?,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    /// Reads the configuration from `MOLLIE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `MOLLIE_API_KEY` is missing or any value
    /// is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_ENV).ok_or(ConfigError::MissingEnv(API_KEY_ENV))?;
        let mut config = Self::new(api_key)?;
        if let Some(endpoint) = lookup(BASE_URL_ENV) {
            config = config.with_endpoint(&endpoint)?;
        }
        if let Some(raw) = lookup(TIMEOUT_SECS_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidEnv {
                    name: TIMEOUT_SECS_ENV,
                    value: raw,
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Points the client at another endpoint; the version segment is appended.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the endpoint is not a usable base URL.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.base_url = compose_base_url(endpoint, API_VERSION)?;
        Ok(self)
    }

    /// Sets a timeout applied to every request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the `User-Agent`.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the credential.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the versioned base address.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the `User-Agent`.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
