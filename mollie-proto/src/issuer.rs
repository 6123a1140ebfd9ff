//! Issuers (banks, gift card brands) selectable for a payment method.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::PaymentMethod;

/// An issuer, as returned by `GET /issuers` and `GET /issuers/{id}`.
///
/// Pass [`id`](Self::id) as [`PaymentRequest::issuer`](crate::PaymentRequest::issuer)
/// to skip the bank selection screen.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerResponse {
    /// Resource type, always `"issuer"`.
    pub resource: Option<String>,
    /// Issuer identifier (e.g. `ideal_ABNANL2A`).
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Payment method the issuer belongs to.
    pub method: Option<PaymentMethod>,
}
