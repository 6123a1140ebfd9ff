//! Refund requests and responses.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::PaymentResponse;

/// Body of `POST /payments/{id}/refunds`.
///
/// Without an amount the payment is refunded in full.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    /// Partial amount to refund.
    pub amount: Option<Decimal>,
}

/// Processing status of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
    /// Queued; can still be cancelled.
    Pending,
    /// Being processed; can no longer be cancelled.
    Processing,
    /// Paid out to the customer.
    Refunded,
}

/// A refund, as returned by the refund endpoints of a payment.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResponse {
    /// Resource type, always `"refund"`.
    pub resource: Option<String>,
    /// Refund identifier (e.g. `re_4qqhO89gsT`).
    pub id: String,
    /// The refunded payment, decoded by its own method.
    pub payment: Option<PaymentResponse>,
    /// Amount refunded by this refund.
    pub amount_refunded: Option<Decimal>,
    /// Amount of the payment that can still be refunded.
    pub amount_remaining: Option<Decimal>,
    /// Processing status.
    pub status: Option<RefundStatus>,
    /// When the refund was created.
    pub refunded_datetime: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_refund_encodes_empty_object() {
        let body = serde_json::to_value(RefundRequest::default()).unwrap();
        assert_eq!(body, serde_json::json!({}));
    }

    #[test]
    fn test_zero_amount_is_kept() {
        let body = serde_json::to_value(RefundRequest {
            amount: Some(Decimal::ZERO),
        })
        .unwrap();
        assert!(body.get("amount").is_some());
    }
}
