//! Response body decoding.
//!
//! Every response type except [`PaymentResponse`] is a plain structural
//! mapping from JSON. Payments go through [`decode_payment`], which reads the
//! `method` discriminator before choosing the shape of `details`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{DecodeError, PaymentMethod, PaymentResponse};

/// Extracts the `method` discriminator from a payment body.
///
/// # Errors
///
/// Returns [`DecodeError::NotAnObject`] if `data` is not an object,
/// [`DecodeError::MissingMethod`] if the field is absent or `null`, and
/// [`DecodeError::UnknownMethod`] for any value outside [`PaymentMethod::ALL`].
pub fn detect_method(data: &Value) -> Result<PaymentMethod, DecodeError> {
    let object = data.as_object().ok_or(DecodeError::NotAnObject)?;
    match object.get("method") {
        None | Some(Value::Null) => Err(DecodeError::MissingMethod),
        Some(Value::String(name)) => name
            .parse()
            .map_err(|_| DecodeError::UnknownMethod(name.clone())),
        Some(other) => Err(DecodeError::UnknownMethod(other.to_string())),
    }
}

/// Decodes a payment body into the variant bound to its `method`.
///
/// # Errors
///
/// Returns [`DecodeError`] on malformed JSON or a missing, unknown or
/// inconsistent discriminator.
pub fn decode_payment(body: &str) -> Result<PaymentResponse, DecodeError> {
    let parsed: Value = serde_json::from_str(body)?;
    PaymentResponse::from_value(parsed)
}

/// Decodes any response body into `T`.
///
/// Payments nested inside `T` (lists, refunds) still go through the
/// discriminator path because [`PaymentResponse`] deserializes through it.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] if the body does not match `T`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::{ConsumerDetails, CreditCardDetails, PayPalDetails};
    use crate::{ListResponse, PaymentDetails, PaymentMode, PaymentStatus, RefundResponse};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn minimal(method: &str) -> String {
        json!({ "id": "tr_test", "method": method }).to_string()
    }

    #[test]
    fn test_every_method_decodes_to_its_own_variant() {
        for method in PaymentMethod::ALL {
            let payment = decode_payment(&minimal(method.as_str())).unwrap();
            assert_eq!(payment.method(), method);
            assert_eq!(payment.details.method(), method);
            assert_eq!(payment.common.id, "tr_test");
        }
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let err = decode_payment(&minimal("applepay")).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownMethod(name) if name == "applepay"));
    }

    #[test]
    fn test_non_string_method_is_rejected() {
        let body = json!({ "id": "tr_test", "method": 7 }).to_string();
        let err = decode_payment(&body).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownMethod(name) if name == "7"));
    }

    #[test]
    fn test_missing_method_is_rejected() {
        let body = json!({ "id": "tr_test", "amount": "10.00" }).to_string();
        assert!(matches!(
            decode_payment(&body).unwrap_err(),
            DecodeError::MissingMethod
        ));
    }

    #[test]
    fn test_null_method_is_rejected() {
        let body = json!({ "id": "tr_test", "method": null }).to_string();
        assert!(matches!(
            decode_payment(&body).unwrap_err(),
            DecodeError::MissingMethod
        ));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            decode_payment("{\"id\": ").unwrap_err(),
            DecodeError::Json(_)
        ));
    }

    #[test]
    fn test_array_body_is_rejected() {
        assert!(matches!(
            decode_payment("[]").unwrap_err(),
            DecodeError::NotAnObject
        ));
    }

    #[test]
    fn test_fields_of_other_variants_do_not_leak() {
        let body = json!({
            "id": "tr_test",
            "method": "ideal",
            "details": {
                "consumerName": "T. TEST",
                "cardNumber": "6787",
                "bankAccount": "NL53ABNA0627535577",
                "paypalReference": "9AL35361CF606152E"
            }
        })
        .to_string();
        let payment = decode_payment(&body).unwrap();
        assert_eq!(
            payment.details,
            PaymentDetails::Ideal(ConsumerDetails {
                consumer_name: Some("T. TEST".into()),
                consumer_account: None,
                consumer_bic: None,
            })
        );
        let reserialized = serde_json::to_value(&payment).unwrap();
        assert_eq!(reserialized["details"], json!({ "consumerName": "T. TEST" }));
    }

    /// Expected `details` keys after decoding a body carrying every key of
    /// [`mixed_details`].
    fn own_keys(method: PaymentMethod) -> &'static [&'static str] {
        match method {
            PaymentMethod::Ideal
            | PaymentMethod::Sofort
            | PaymentMethod::Belfius
            | PaymentMethod::Kbc => &["consumerAccount", "consumerName"],
            PaymentMethod::CreditCard => &["cardHolder", "cardNumber"],
            PaymentMethod::MisterCash => &["cardNumber"],
            PaymentMethod::BankTransfer => &[
                "bankName",
                "consumerAccount",
                "consumerName",
                "transferReference",
            ],
            PaymentMethod::DirectDebit => &[
                "consumerAccount",
                "consumerName",
                "creditorIdentifier",
                "transferReference",
            ],
            PaymentMethod::PayPal => &["consumerAccount", "consumerName", "paypalReference"],
            PaymentMethod::Bitcoin => &["bitcoinAddress"],
            PaymentMethod::PodiumCadeaukaart => &[],
            PaymentMethod::PaySafeCard => &["customerReference"],
        }
    }

    fn mixed_details() -> serde_json::Value {
        json!({
            "consumerName": "T. TEST",
            "consumerAccount": "NL53ABNA0627535577",
            "cardHolder": "T. TEST",
            "cardNumber": "6787",
            "bankName": "Stichting Mollie Payments",
            "transferReference": "RF12-3456-7890-1234",
            "creditorIdentifier": "NL08ZZZ502057730000",
            "paypalReference": "9AL35361CF606152E",
            "bitcoinAddress": "3FJvP9zR3DJd5ZqKkBgQvXsLhPmvJVNB5Q",
            "customerReference": "cst_8wmqcHMN4U"
        })
    }

    #[test]
    fn test_every_variant_keeps_only_its_own_details() {
        for method in PaymentMethod::ALL {
            let body = json!({
                "id": "tr_test",
                "method": method.as_str(),
                "details": mixed_details()
            })
            .to_string();
            let payment = decode_payment(&body).unwrap();
            assert_eq!(payment.method(), method);

            let encoded = serde_json::to_value(&payment.details).unwrap();
            assert_eq!(encoded["method"], method.as_str());
            let mut keys: Vec<&str> = encoded
                .get("details")
                .and_then(serde_json::Value::as_object)
                .map(|details| details.keys().map(String::as_str).collect())
                .unwrap_or_default();
            keys.sort_unstable();
            assert_eq!(keys, own_keys(method), "{method}");
        }
    }

    #[test]
    fn test_nulls_stay_absent() {
        let body = json!({
            "id": "tr_test",
            "method": "paypal",
            "amount": null,
            "description": null,
            "details": { "consumerName": null, "paypalReference": "9AL35361CF606152E" }
        })
        .to_string();
        let payment = decode_payment(&body).unwrap();
        assert_eq!(payment.common.amount, None);
        assert_eq!(payment.common.description, None);
        assert_eq!(
            payment.details,
            PaymentDetails::PayPal(PayPalDetails {
                consumer_name: None,
                consumer_account: None,
                paypal_reference: Some("9AL35361CF606152E".into()),
            })
        );
    }

    #[test]
    fn test_explicit_zero_is_kept() {
        let body = json!({
            "id": "tr_test",
            "method": "creditcard",
            "amountRefunded": "0.00"
        })
        .to_string();
        let payment = decode_payment(&body).unwrap();
        assert_eq!(payment.common.amount_refunded, Some(Decimal::ZERO));
        assert_eq!(payment.common.amount_remaining, None);
    }

    #[test]
    fn test_full_payment_body() {
        let body = json!({
            "resource": "payment",
            "id": "tr_7UhSN1zuXS",
            "mode": "test",
            "createdDatetime": "2018-03-20T09:13:37.0Z",
            "status": "paid",
            "paidDatetime": "2018-03-20T09:14:37.0Z",
            "amount": "10.00",
            "amountRefunded": "0.00",
            "amountRemaining": "35.00",
            "description": "Order #12345",
            "method": "creditcard",
            "metadata": { "order_id": "12345" },
            "locale": "nl_NL",
            "profileId": "pfl_QkEhN94Ba",
            "details": {
                "cardHolder": "T. TEST",
                "cardNumber": "6787",
                "cardAudience": "consumer",
                "cardLabel": "Mastercard",
                "cardCountryCode": "NL",
                "cardSecurity": "3dsecure",
                "feeRegion": "intra-eu"
            },
            "links": {
                "webhookUrl": "https://webshop.example.org/payments/webhook/",
                "redirectUrl": "https://webshop.example.org/order/12345/"
            }
        })
        .to_string();

        let payment = decode_payment(&body).unwrap();
        assert_eq!(payment.common.id, "tr_7UhSN1zuXS");
        assert_eq!(payment.common.mode, Some(PaymentMode::Test));
        assert_eq!(payment.common.status, Some(PaymentStatus::Paid));
        assert_eq!(payment.common.amount, Some(Decimal::new(1000, 2)));
        assert_eq!(payment.common.description.as_deref(), Some("Order #12345"));
        assert_eq!(payment.common.metadata, Some(json!({ "order_id": "12345" })));
        assert!(payment.common.created_datetime.is_some());
        assert!(payment.common.paid_datetime.is_some());
        assert_eq!(payment.payment_url(), None);

        let PaymentDetails::CreditCard(card) = &payment.details else {
            panic!("expected credit card details, got {:?}", payment.details);
        };
        assert_eq!(
            card,
            &CreditCardDetails {
                card_holder: Some("T. TEST".into()),
                card_number: Some("6787".into()),
                card_fingerprint: None,
                card_audience: Some(crate::payment::CardAudience::Consumer),
                card_label: Some("Mastercard".into()),
                card_country_code: Some("NL".into()),
                card_security: Some(crate::payment::CardSecurity::ThreeDSecure),
                fee_region: Some("intra-eu".into()),
                failure_reason: None,
            }
        );
    }

    #[test]
    fn test_missing_id_is_a_decode_error() {
        let body = json!({ "method": "ideal" }).to_string();
        assert!(matches!(
            decode_payment(&body).unwrap_err(),
            DecodeError::Json(_)
        ));
    }

    #[test]
    fn test_list_of_payments_uses_discriminator() {
        let body = json!({
            "totalCount": 2,
            "offset": 0,
            "count": 2,
            "data": [
                { "id": "tr_1", "method": "ideal" },
                { "id": "tr_2", "method": "bitcoin", "details": { "bitcoinAmount": "0.00123" } }
            ]
        })
        .to_string();
        let list: ListResponse<PaymentResponse> = decode(&body).unwrap();
        let methods: Vec<_> = list.data.iter().map(PaymentResponse::method).collect();
        assert_eq!(methods, [PaymentMethod::Ideal, PaymentMethod::Bitcoin]);
    }

    #[test]
    fn test_list_with_unknown_method_fails() {
        let body = json!({
            "totalCount": 1,
            "offset": 0,
            "count": 1,
            "data": [{ "id": "tr_1", "method": "applepay" }]
        })
        .to_string();
        let err = decode::<ListResponse<PaymentResponse>>(&body).unwrap_err();
        assert!(err.to_string().contains("applepay"));
    }

    #[test]
    fn test_refund_embeds_typed_payment() {
        let body = json!({
            "resource": "refund",
            "id": "re_4qqhO89gsT",
            "payment": { "id": "tr_WDqYK6vllg", "method": "sofort", "status": "refunded" },
            "amountRefunded": "5.95",
            "status": "pending"
        })
        .to_string();
        let refund: RefundResponse = decode(&body).unwrap();
        let payment = refund.payment.unwrap();
        assert_eq!(payment.method(), PaymentMethod::Sofort);
        assert_eq!(payment.common.status, Some(PaymentStatus::Refunded));
    }
}
