//! Request descriptors.
//!
//! A [`RequestDescriptor`] is the transport-independent description of one
//! API call: method, path relative to the versioned base address, query
//! pairs and an optional JSON body. Building one is pure.

use http::Method;
use serde::Serialize;
use serde_json::Value;

/// Errors raised while building a request, before any I/O.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RequestError {
    /// The relative path is empty.
    #[error("request path must not be empty")]
    EmptyPath,

    /// A path identifier is empty.
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    /// A path identifier is a dot segment or contains a URL delimiter.
    #[error("{name} is not a valid path segment: {value:?}")]
    InvalidIdentifier {
        /// Which identifier.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One API call, ready to hand to a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the versioned base address, without a leading slash.
    pub path: String,
    /// Query pairs, in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<Value>,
}

impl RequestDescriptor {
    /// Builds a descriptor.
    ///
    /// Query entries whose value is `None` are dropped. `body` is encoded
    /// with its serde representation, so unset optional fields are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyPath`] for an empty path and
    /// [`RequestError::Encode`] if the body cannot be encoded.
    pub fn build<B>(
        method: Method,
        path: impl Into<String>,
        query: &[(&str, Option<String>)],
        body: Option<&B>,
    ) -> Result<Self, RequestError>
    where
        B: Serialize + ?Sized,
    {
        let path: String = path.into();
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return Err(RequestError::EmptyPath);
        }
        let query = query
            .iter()
            .filter_map(|(name, value)| {
                value
                    .as_ref()
                    .map(|value| ((*name).to_owned(), value.clone()))
            })
            .collect();
        let body = body.map(serde_json::to_value).transpose()?;
        Ok(Self {
            method,
            path: path.to_owned(),
            query,
            body,
        })
    }

    /// Builds a `GET` descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyPath`] for an empty path.
    pub fn get(
        path: impl Into<String>,
        query: &[(&str, Option<String>)],
    ) -> Result<Self, RequestError> {
        Self::build(Method::GET, path, query, None::<&Value>)
    }

    /// Builds a `POST` descriptor with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] for an empty path or an unencodable body.
    pub fn post<B>(path: impl Into<String>, body: &B) -> Result<Self, RequestError>
    where
        B: Serialize + ?Sized,
    {
        Self::build(Method::POST, path, &[], Some(body))
    }

    /// Builds a `DELETE` descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::EmptyPath`] for an empty path.
    pub fn delete(path: impl Into<String>) -> Result<Self, RequestError> {
        Self::build(Method::DELETE, path, &[], None::<&Value>)
    }
}

/// Paging parameters for list operations.
///
/// Unset values are not sent, leaving the server defaults in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Number of items to skip.
    pub offset: Option<u32>,
    /// Maximum number of items to return.
    pub count: Option<u32>,
}

impl Pagination {
    /// Creates paging parameters.
    #[must_use]
    pub const fn new(offset: Option<u32>, count: Option<u32>) -> Self {
        Self { offset, count }
    }

    /// Sets the offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Returns the `offset`/`count` query entries.
    #[must_use]
    pub fn query(&self) -> [(&'static str, Option<String>); 2] {
        [
            ("offset", self.offset.map(|offset| offset.to_string())),
            ("count", self.count.map(|count| count.to_string())),
        ]
    }
}

/// Checks that an identifier can be used as a single path segment.
///
/// Dot segments are rejected as well: joining them onto the base address
/// would resolve to a parent resource.
pub(crate) fn segment<'a>(name: &'static str, value: &'a str) -> Result<&'a str, RequestError> {
    if value.is_empty() {
        return Err(RequestError::EmptyIdentifier(name));
    }
    if value == "." || value == ".." || value.contains(['/', '\\', '?', '#']) {
        return Err(RequestError::InvalidIdentifier {
            name,
            value: value.to_owned(),
        });
    }
    Ok(value)
}
