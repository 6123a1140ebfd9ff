//! HTTP-specific constants for the Mollie API.

/// Default API endpoint, without the version segment.
pub const DEFAULT_ENDPOINT: &str = "https://api.mollie.nl";

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("mollie-http/", env!("CARGO_PKG_VERSION"));

/// Media type of request and response bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "MOLLIE_API_KEY";

/// Environment variable overriding [`DEFAULT_ENDPOINT`].
pub const BASE_URL_ENV: &str = "MOLLIE_BASE_URL";

/// Environment variable holding a request timeout in seconds.
pub const TIMEOUT_SECS_ENV: &str = "MOLLIE_TIMEOUT_SECS";
