//! Payment responses and their method-specific details.
//!
//! A payment body carries a set of fields shared by every payment plus a
//! `details` object whose shape depends on the `method` discriminator. The
//! shared fields live in [`PaymentCommon`]; the method-specific part is the
//! closed [`PaymentDetails`] enum, with one variant per [`PaymentMethod`].
//!
//! ```json
//! {
//!   "id": "tr_WDqYK6vllg",
//!   "status": "paid",
//!   "amount": "35.07",
//!   "method": "ideal",
//!   "details": { "consumerName": "T. TEST", "consumerAccount": "NL17RABO0213698412" }
//! }
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::codec::detect_method;
use crate::{DecodeError, PaymentMethod};

/// Whether a payment was created with a live or a test API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Live payment.
    Live,
    /// Test payment.
    Test,
}

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, the customer has not completed it yet.
    Open,
    /// Cancelled by the customer.
    Cancelled,
    /// Expired before the customer completed it.
    Expired,
    /// Could not be completed.
    Failed,
    /// Started, the final result is not yet known.
    Pending,
    /// Paid successfully.
    Paid,
    /// Paid and transferred to the merchant.
    #[serde(rename = "paidout")]
    PaidOut,
    /// Refunded in full or in part.
    Refunded,
    /// Reversed by the customer.
    ChargedBack,
}

/// Role of a payment within a recurring sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringType {
    /// First payment, establishes a mandate.
    First,
    /// Charge on an existing mandate.
    Recurring,
}

/// Navigation links attached to a payment.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinks {
    /// Checkout URL the customer should be redirected to.
    pub payment_url: Option<String>,
    /// Webhook called on status changes.
    pub webhook_url: Option<String>,
    /// Where the customer returns after checkout.
    pub redirect_url: Option<String>,
    /// Settlement the payment was paid out in.
    pub settlement: Option<String>,
    /// Refunds of this payment.
    pub refunds: Option<String>,
    /// Chargebacks of this payment.
    pub chargebacks: Option<String>,
}

/// Fields shared by every payment regardless of its method.
///
/// Absent and `null` fields both decode to `None`, never to a zero value.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCommon {
    /// Resource type, always `"payment"`.
    pub resource: Option<String>,
    /// Payment identifier (e.g. `tr_WDqYK6vllg`).
    pub id: String,
    /// Live or test mode.
    pub mode: Option<PaymentMode>,
    /// When the payment was created.
    pub created_datetime: Option<DateTime<Utc>>,
    /// Current status.
    pub status: Option<PaymentStatus>,
    /// When the payment was paid.
    pub paid_datetime: Option<DateTime<Utc>>,
    /// When the payment was cancelled.
    pub cancelled_datetime: Option<DateTime<Utc>>,
    /// When the payment expired.
    pub expired_datetime: Option<DateTime<Utc>>,
    /// ISO 8601 duration after which an open payment expires.
    pub expiry_period: Option<String>,
    /// Amount in EUR.
    pub amount: Option<Decimal>,
    /// Amount refunded so far.
    pub amount_refunded: Option<Decimal>,
    /// Amount that can still be refunded.
    pub amount_remaining: Option<Decimal>,
    /// Description shown to the customer.
    pub description: Option<String>,
    /// Merchant-supplied metadata, returned verbatim.
    pub metadata: Option<Value>,
    /// Locale of the checkout.
    pub locale: Option<String>,
    /// Website profile the payment belongs to.
    pub profile_id: Option<String>,
    /// Customer the payment belongs to.
    pub customer_id: Option<String>,
    /// Recurring role, if any.
    pub recurring_type: Option<RecurringType>,
    /// Mandate used for a recurring charge.
    pub mandate_id: Option<String>,
    /// Settlement the payment was paid out in.
    pub settlement_id: Option<String>,
    /// Related links.
    pub links: Option<PaymentLinks>,
}

/// Account holder details returned for iDEAL, SOFORT, Belfius and KBC.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerDetails {
    /// Account holder name.
    pub consumer_name: Option<String>,
    /// Account holder IBAN.
    pub consumer_account: Option<String>,
    /// Account holder BIC.
    pub consumer_bic: Option<String>,
}

/// Whether a card is a consumer or a business card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardAudience {
    /// Consumer card.
    Consumer,
    /// Business card.
    Business,
}

/// Authentication applied to a card payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSecurity {
    /// No 3-D Secure.
    #[serde(rename = "normal")]
    Normal,
    /// 3-D Secure authenticated.
    #[serde(rename = "3dsecure")]
    ThreeDSecure,
}

/// Credit card details.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardDetails {
    /// Card holder name.
    pub card_holder: Option<String>,
    /// Last four digits of the card number.
    pub card_number: Option<String>,
    /// Unique fingerprint of the card.
    pub card_fingerprint: Option<String>,
    /// Consumer or business card.
    pub card_audience: Option<CardAudience>,
    /// Card brand (e.g. `Mastercard`).
    pub card_label: Option<String>,
    /// ISO 3166-1 alpha-2 country of the issuer.
    pub card_country_code: Option<String>,
    /// Authentication applied.
    pub card_security: Option<CardSecurity>,
    /// Fee region (e.g. `intra-eu`).
    pub fee_region: Option<String>,
    /// Reason a failed payment was declined.
    pub failure_reason: Option<String>,
}

/// Bancontact/Mister Cash details.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MisterCashDetails {
    /// Last four digits of the card number.
    pub card_number: Option<String>,
    /// Unique fingerprint of the card.
    pub card_fingerprint: Option<String>,
}

/// Bank transfer details.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransferDetails {
    /// Name of the receiving bank.
    pub bank_name: Option<String>,
    /// IBAN the customer should transfer to.
    pub bank_account: Option<String>,
    /// BIC of the receiving bank.
    pub bank_bic: Option<String>,
    /// Reference the customer must include.
    pub transfer_reference: Option<String>,
    /// Payer name, once paid.
    pub consumer_name: Option<String>,
    /// Payer IBAN, once paid.
    pub consumer_account: Option<String>,
    /// Payer BIC, once paid.
    pub consumer_bic: Option<String>,
    /// Address the transfer instructions were sent to.
    pub billing_email: Option<String>,
}

/// SEPA direct debit details.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectDebitDetails {
    /// Reference shown on the debtor's statement.
    pub transfer_reference: Option<String>,
    /// Creditor identifier.
    pub creditor_identifier: Option<String>,
    /// Debtor name.
    pub consumer_name: Option<String>,
    /// Debtor IBAN.
    pub consumer_account: Option<String>,
    /// Debtor BIC.
    pub consumer_bic: Option<String>,
    /// Date the debit is executed.
    pub due_date: Option<NaiveDate>,
    /// Date the mandate was signed.
    pub signature_date: Option<NaiveDate>,
    /// Bank reason code for a failed debit.
    pub bank_reason_code: Option<String>,
    /// Bank reason for a failed debit.
    pub bank_reason: Option<String>,
}

/// `PayPal` details.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayPalDetails {
    /// Payer name.
    pub consumer_name: Option<String>,
    /// Payer email address.
    pub consumer_account: Option<String>,
    /// `PayPal` transaction reference.
    pub paypal_reference: Option<String>,
}

/// Bitcoin details.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BitcoinDetails {
    /// Address the bitcoins should be sent to.
    pub bitcoin_address: Option<String>,
    /// Amount in BTC.
    pub bitcoin_amount: Option<Decimal>,
    /// `bitcoin:` URI for wallets.
    pub bitcoin_uri: Option<String>,
    /// EUR per BTC at creation.
    pub bitcoin_rate: Option<Decimal>,
}

/// paysafecard details.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaySafeCardDetails {
    /// Merchant-supplied customer reference.
    pub customer_reference: Option<String>,
}

/// Method-specific payment details, one variant per [`PaymentMethod`].
///
/// Serializes as the adjacent `method`/`details` pair used on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", content = "details", rename_all = "lowercase")]
pub enum PaymentDetails {
    /// iDEAL.
    Ideal(ConsumerDetails),
    /// Credit card.
    CreditCard(CreditCardDetails),
    /// Bancontact/Mister Cash.
    MisterCash(MisterCashDetails),
    /// SOFORT Banking.
    Sofort(ConsumerDetails),
    /// Bank transfer.
    BankTransfer(BankTransferDetails),
    /// SEPA direct debit.
    DirectDebit(DirectDebitDetails),
    /// Belfius Direct Net.
    Belfius(ConsumerDetails),
    /// KBC/CBC payment button.
    Kbc(ConsumerDetails),
    /// `PayPal`.
    PayPal(PayPalDetails),
    /// Bitcoin.
    Bitcoin(BitcoinDetails),
    /// Podium Cadeaukaart; carries no method-specific details.
    PodiumCadeaukaart,
    /// paysafecard.
    PaySafeCard(PaySafeCardDetails),
}

impl PaymentDetails {
    /// Decodes the `details` object for `method`.
    ///
    /// This is the closed dispatch table from discriminator to variant. An
    /// absent or `null` object yields the variant with every field unset.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Details`] if `details` is not an object or one of
    /// its fields has the wrong type for the variant.
    pub fn decode(method: PaymentMethod, details: Option<Value>) -> Result<Self, DecodeError> {
        let details = match details {
            None | Some(Value::Null) => Value::Object(serde_json::Map::new()),
            Some(value @ Value::Object(_)) => value,
            Some(_) => {
                return Err(DecodeError::Details {
                    method,
                    source: serde::de::Error::custom("details must be a JSON object"),
                });
            }
        };

        let decoded = match method {
            PaymentMethod::Ideal => Self::Ideal(variant(method, details)?),
            PaymentMethod::CreditCard => Self::CreditCard(variant(method, details)?),
            PaymentMethod::MisterCash => Self::MisterCash(variant(method, details)?),
            PaymentMethod::Sofort => Self::Sofort(variant(method, details)?),
            PaymentMethod::BankTransfer => Self::BankTransfer(variant(method, details)?),
            PaymentMethod::DirectDebit => Self::DirectDebit(variant(method, details)?),
            PaymentMethod::Belfius => Self::Belfius(variant(method, details)?),
            PaymentMethod::Kbc => Self::Kbc(variant(method, details)?),
            PaymentMethod::PayPal => Self::PayPal(variant(method, details)?),
            PaymentMethod::Bitcoin => Self::Bitcoin(variant(method, details)?),
            PaymentMethod::PodiumCadeaukaart => Self::PodiumCadeaukaart,
            PaymentMethod::PaySafeCard => Self::PaySafeCard(variant(method, details)?),
        };
        Ok(decoded)
    }

    /// Returns the discriminator bound to this variant.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::Ideal(_) => PaymentMethod::Ideal,
            Self::CreditCard(_) => PaymentMethod::CreditCard,
            Self::MisterCash(_) => PaymentMethod::MisterCash,
            Self::Sofort(_) => PaymentMethod::Sofort,
            Self::BankTransfer(_) => PaymentMethod::BankTransfer,
            Self::DirectDebit(_) => PaymentMethod::DirectDebit,
            Self::Belfius(_) => PaymentMethod::Belfius,
            Self::Kbc(_) => PaymentMethod::Kbc,
            Self::PayPal(_) => PaymentMethod::PayPal,
            Self::Bitcoin(_) => PaymentMethod::Bitcoin,
            Self::PodiumCadeaukaart => PaymentMethod::PodiumCadeaukaart,
            Self::PaySafeCard(_) => PaymentMethod::PaySafeCard,
        }
    }
}

fn variant<T: DeserializeOwned>(method: PaymentMethod, details: Value) -> Result<T, DecodeError> {
    serde_json::from_value(details).map_err(|source| DecodeError::Details { method, source })
}

/// A payment as returned by `GET /payments/{id}` and `POST /payments`.
///
/// The discriminator is derived from [`details`](Self::details), so the
/// method and the method-specific fields cannot disagree. Match on
/// `details` to reach the fields of a particular method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentResponse {
    /// Fields shared by every payment.
    #[serde(flatten)]
    pub common: PaymentCommon,
    /// Method-specific details.
    #[serde(flatten)]
    pub details: PaymentDetails,
}

impl PaymentResponse {
    /// Decodes a payment from a parsed JSON value.
    ///
    /// Reads the `method` discriminator first, then decodes the shared
    /// fields and the `details` object bound to that method.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the value is not an object, the
    /// discriminator is missing or unknown, or any field has the wrong shape.
    pub fn from_value(mut value: Value) -> Result<Self, DecodeError> {
        let method = detect_method(&value)?;
        let details = value
            .as_object_mut()
            .ok_or(DecodeError::NotAnObject)?
            .remove("details");
        let common: PaymentCommon = serde_json::from_value(value)?;
        let details = PaymentDetails::decode(method, details)?;
        Ok(Self { common, details })
    }

    /// Returns the payment method discriminator.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        self.details.method()
    }

    /// Returns the checkout URL, if the payment still has one.
    #[must_use]
    pub fn payment_url(&self) -> Option<&str> {
        self.common.links.as_ref()?.payment_url.as_deref()
    }
}

impl<'de> Deserialize<'de> for PaymentResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
