//! The closed set of payment channels.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A payment channel supported by the API.
///
/// The wire form is the lowercased name (`"creditcard"`, `"banktransfer"`).
/// The set is closed: every value has exactly one
/// [`PaymentDetails`](crate::PaymentDetails) variant bound to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// iDEAL (Dutch online banking).
    Ideal,
    /// Credit card.
    CreditCard,
    /// Bancontact/Mister Cash.
    MisterCash,
    /// SOFORT Banking.
    Sofort,
    /// Manual bank transfer.
    BankTransfer,
    /// SEPA direct debit.
    DirectDebit,
    /// Belfius Direct Net.
    Belfius,
    /// KBC/CBC payment button.
    Kbc,
    /// `PayPal`.
    PayPal,
    /// Bitcoin.
    Bitcoin,
    /// Podium Cadeaukaart gift card.
    PodiumCadeaukaart,
    /// paysafecard.
    PaySafeCard,
}

impl PaymentMethod {
    /// Every payment method, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Ideal,
        Self::CreditCard,
        Self::MisterCash,
        Self::Sofort,
        Self::BankTransfer,
        Self::DirectDebit,
        Self::Belfius,
        Self::Kbc,
        Self::PayPal,
        Self::Bitcoin,
        Self::PodiumCadeaukaart,
        Self::PaySafeCard,
    ];

    /// Returns the wire name, which is also the `/methods/{id}` path segment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ideal => "ideal",
            Self::CreditCard => "creditcard",
            Self::MisterCash => "mistercash",
            Self::Sofort => "sofort",
            Self::BankTransfer => "banktransfer",
            Self::DirectDebit => "directdebit",
            Self::Belfius => "belfius",
            Self::Kbc => "kbc",
            Self::PayPal => "paypal",
            Self::Bitcoin => "bitcoin",
            Self::PodiumCadeaukaart => "podiumcadeaukaart",
            Self::PaySafeCard => "paysafecard",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not the wire name of any [`PaymentMethod`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| UnknownPaymentMethod(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name_matches_serde() {
        for method in PaymentMethod::ALL {
            let serialized = serde_json::to_string(&method).unwrap();
            assert_eq!(serialized, format!("\"{}\"", method.as_str()));
        }
    }

    #[test]
    fn test_from_str_roundtrips_every_method() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>(), Ok(method));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "applepay".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err, UnknownPaymentMethod("applepay".into()));
    }

    #[test]
    fn test_from_str_is_exact() {
        assert!("CreditCard".parse::<PaymentMethod>().is_err());
        assert!(" ideal".parse::<PaymentMethod>().is_err());
    }
}
