//! Payment method descriptions returned by `/methods`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::PaymentMethod;

/// Amount limits accepted by a payment method.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    /// Smallest accepted amount.
    pub minimum: Option<Decimal>,
    /// Largest accepted amount.
    pub maximum: Option<Decimal>,
}

impl AmountRange {
    /// Returns `true` if `amount` lies within the known bounds.
    ///
    /// A missing bound does not restrict the amount.
    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        self.minimum.is_none_or(|min| amount >= min) && self.maximum.is_none_or(|max| amount <= max)
    }
}

/// Logo URLs for a payment method.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodImage {
    /// 55x37 pixel logo.
    pub normal: Option<String>,
    /// 110x74 pixel logo.
    pub bigger: Option<String>,
}

/// A payment method enabled on the website profile.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodResponse {
    /// Resource type, always `"method"`.
    pub resource: Option<String>,
    /// The payment method.
    pub id: PaymentMethod,
    /// Display name.
    pub description: Option<String>,
    /// Accepted amount range.
    pub amount: Option<AmountRange>,
    /// Logos.
    pub image: Option<MethodImage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_method() {
        let body = json!({
            "resource": "method",
            "id": "creditcard",
            "description": "Creditcard",
            "amount": { "minimum": "0.31", "maximum": "10000.00" },
            "image": {
                "normal": "https://www.mollie.com/images/payscreen/methods/creditcard.png",
                "bigger": "https://www.mollie.com/images/payscreen/methods/creditcard%402x.png"
            }
        });
        let method: PaymentMethodResponse = serde_json::from_value(body).unwrap();
        assert_eq!(method.id, PaymentMethod::CreditCard);
        let range = method.amount.unwrap();
        assert!(range.contains(Decimal::new(5000, 2)));
        assert!(!range.contains(Decimal::new(30, 2)));
    }

    #[test]
    fn test_open_range_accepts_anything() {
        let range = AmountRange::default();
        assert!(range.contains(Decimal::MAX));
        assert!(range.contains(Decimal::ZERO));
    }
}
