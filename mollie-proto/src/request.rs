//! Request bodies for write operations.
//!
//! Optional fields are left out of the encoded body when unset; a field set
//! to a falsy value (zero, empty string) is still sent.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::{PaymentMethod, RecurringType};

/// Body of `POST /payments`.
///
/// # Example
///
/// ```rust
/// use mollie_proto::{PaymentMethod, PaymentRequest};
/// use rust_decimal::Decimal;
///
/// let request = PaymentRequest::new(
///     Decimal::new(1000, 2),
///     "Order #12345",
///     "https://webshop.example.org/order/12345/",
/// )
/// .with_method(PaymentMethod::Ideal)
/// .with_issuer("ideal_INGBNL2A");
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount in EUR.
    pub amount: Decimal,
    /// Description shown to the customer and on their statement.
    pub description: String,
    /// Where the customer returns after checkout.
    pub redirect_url: String,
    /// Webhook called on status changes.
    pub webhook_url: Option<String>,
    /// Skip method selection and go straight to this method.
    pub method: Option<PaymentMethod>,
    /// Arbitrary metadata returned with the payment.
    pub metadata: Option<Value>,
    /// Checkout locale (e.g. `nl_NL`).
    pub locale: Option<String>,
    /// Recurring role of the payment.
    pub recurring_type: Option<RecurringType>,
    /// Customer to attach the payment to.
    pub customer_id: Option<String>,
    /// Mandate to charge for a recurring payment.
    pub mandate_id: Option<String>,
    /// iDEAL issuer to preselect.
    pub issuer: Option<String>,
    /// Bank transfer: address to mail the transfer instructions to.
    pub billing_email: Option<String>,
    /// Bank transfer: date the payment should expire.
    pub due_date: Option<NaiveDate>,
}

impl PaymentRequest {
    /// Creates a request with the three required fields.
    #[must_use]
    pub fn new(
        amount: Decimal,
        description: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            redirect_url: redirect_url.into(),
            webhook_url: None,
            method: None,
            metadata: None,
            locale: None,
            recurring_type: None,
            customer_id: None,
            mandate_id: None,
            issuer: None,
            billing_email: None,
            due_date: None,
        }
    }

    /// Sets the webhook URL.
    #[must_use]
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Preselects the payment method.
    #[must_use]
    pub const fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Attaches metadata; `Value::Null` clears it.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = (!metadata.is_null()).then_some(metadata);
        self
    }

    /// Sets the checkout locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Preselects the iDEAL issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Marks the payment as part of a recurring sequence for `customer_id`.
    #[must_use]
    pub fn with_recurring(mut self, kind: RecurringType, customer_id: impl Into<String>) -> Self {
        self.recurring_type = Some(kind);
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Charges an existing mandate.
    #[must_use]
    pub fn with_mandate(mut self, mandate_id: impl Into<String>) -> Self {
        self.mandate_id = Some(mandate_id.into());
        self
    }

    /// Bank transfer: mails the instructions to `email`.
    #[must_use]
    pub fn with_billing_email(mut self, email: impl Into<String>) -> Self {
        self.billing_email = Some(email.into());
        self
    }

    /// Bank transfer: sets the expiry date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_omitted() {
        let request = PaymentRequest::new(Decimal::new(1000, 2), "Order #1", "https://example.org/");
        let body = serde_json::to_value(&request).unwrap();
        let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        for key in ["amount", "description", "redirectUrl"] {
            assert!(body.get(key).is_some(), "missing {key}");
        }
        assert!(!body.to_string().contains("null"));
    }

    #[test]
    fn test_falsy_values_are_kept() {
        let request = PaymentRequest::new(Decimal::ZERO, "", "https://example.org/").with_locale("");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["description"], "");
        assert_eq!(body["locale"], "");
        assert!(body.get("amount").is_some());
    }

    #[test]
    fn test_keys_are_camel_case() {
        let request = PaymentRequest::new(Decimal::new(2500, 2), "Order #2", "https://example.org/")
            .with_webhook_url("https://example.org/webhook")
            .with_method(PaymentMethod::BankTransfer)
            .with_billing_email("customer@example.org")
            .with_due_date(NaiveDate::from_ymd_opt(2018, 4, 1).unwrap())
            .with_recurring(RecurringType::First, "cst_8wmqcHMN4U");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["webhookUrl"], "https://example.org/webhook");
        assert_eq!(body["method"], "banktransfer");
        assert_eq!(body["billingEmail"], "customer@example.org");
        assert_eq!(body["dueDate"], "2018-04-01");
        assert_eq!(body["recurringType"], "first");
        assert_eq!(body["customerId"], "cst_8wmqcHMN4U");
        assert!(body.get("mandateId").is_none());
    }

    #[test]
    fn test_metadata_is_passed_through() {
        let request = PaymentRequest::new(Decimal::ONE, "Order #3", "https://example.org/")
            .with_metadata(json!({ "order_id": 3 }));
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["metadata"], json!({ "order_id": 3 }));
    }

    #[test]
    fn test_null_metadata_is_not_sent() {
        let request = PaymentRequest::new(Decimal::new(1000, 2), "Order #1", "https://example.org/")
            .with_metadata(json!({ "order_id": "1" }))
            .with_metadata(Value::Null);
        assert_eq!(request.metadata, None);
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("metadata").is_none());
    }
}
