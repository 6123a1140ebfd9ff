//! Response status classification.
//!
//! The API reports rejected requests with a fixed set of client-error
//! statuses. Anything else outside 2xx says nothing about the request
//! itself and is treated as a transport-level failure.

use http::StatusCode;

/// Statuses the API uses to reject a request.
pub const DOMAIN_FAILURE_STATUSES: [u16; 7] = [400, 401, 403, 404, 405, 415, 422];

/// Outcome class of a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Any 2xx status.
    Success,
    /// The request was rejected; resending it unchanged fails again.
    ApiFailure,
    /// Server error or a status outside the documented set; possibly transient.
    TransportFailure,
}

/// Classifies a response status.
#[must_use]
pub fn classify(status: StatusCode) -> Classification {
    if status.is_success() {
        Classification::Success
    } else if DOMAIN_FAILURE_STATUSES.contains(&status.as_u16()) {
        Classification::ApiFailure
    } else {
        Classification::TransportFailure
    }
}
