//! Currency codes.
//!
//! The canonical rule is a format check: exactly three ASCII uppercase
//! letters. A stricter rule, membership in a fixed ISO 4217 list, is
//! available for callers that want it (see [`CurrencyRule`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::InvoiceError;

/// A validated three-letter currency code, e.g. `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Validate `code` against the format rule `^[A-Z]{3}$`.
    pub fn new(code: impl Into<String>) -> Result<Self, InvoiceError> {
        let code = code.into();
        if is_valid_currency_format(&code) {
            Ok(Self(code))
        } else {
            Err(InvoiceError::InvalidCurrency(code))
        }
    }

    /// Validate `code` against the ISO 4217 allow-list.
    pub fn new_known(code: impl Into<String>) -> Result<Self, InvoiceError> {
        let code = code.into();
        if is_known_currency_code(&code) {
            Ok(Self(code))
        } else {
            Err(InvoiceError::InvalidCurrency(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this code is also on the ISO 4217 allow-list.
    pub fn is_known(&self) -> bool {
        is_known_currency_code(&self.0)
    }
}

/// `USD`, the currency of an invoice before its first line item.
impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = InvoiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

impl PartialEq<str> for CurrencyCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CurrencyCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Which check a currency code must pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyRule {
    /// Any three uppercase ASCII letters.
    #[default]
    Format,
    /// Only codes on the ISO 4217 allow-list.
    Iso4217,
}

impl CurrencyRule {
    pub fn accepts(self, code: &CurrencyCode) -> bool {
        match self {
            Self::Format => true,
            Self::Iso4217 => code.is_known(),
        }
    }

    /// Reject `code` if it does not satisfy this rule.
    pub fn check(self, code: &CurrencyCode) -> Result<(), InvoiceError> {
        if self.accepts(code) {
            Ok(())
        } else {
            Err(InvoiceError::InvalidCurrency(code.to_string()))
        }
    }
}

/// Check whether `code` is exactly three ASCII uppercase letters.
pub fn is_valid_currency_format(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Check whether `code` is a known ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    CURRENCY_CODES.binary_search(&code).is_ok()
}

/// Sorted list of common ISO 4217 currency codes.
/// Sorted for binary search.
static CURRENCY_CODES: &[&str] = &[
    "AED", // UAE Dirham
    "ARS", // Argentine Peso
    "AUD", // Australian Dollar
    "BGN", // Bulgarian Lev
    "BRL", // Brazilian Real
    "CAD", // Canadian Dollar
    "CHF", // Swiss Franc
    "CLP", // Chilean Peso
    "CNY", // Chinese Yuan
    "COP", // Colombian Peso
    "CZK", // Czech Koruna
    "DKK", // Danish Krone
    "EGP", // Egyptian Pound
    "EUR", // Euro
    "GBP", // Pound Sterling
    "HKD", // Hong Kong Dollar
    "HUF", // Hungarian Forint
    "IDR", // Indonesian Rupiah
    "ILS", // Israeli Shekel
    "INR", // Indian Rupee
    "ISK", // Icelandic Krona
    "JPY", // Japanese Yen
    "KES", // Kenyan Shilling
    "KRW", // South Korean Won
    "MXN", // Mexican Peso
    "MYR", // Malaysian Ringgit
    "NGN", // Nigerian Naira
    "NOK", // Norwegian Krone
    "NZD", // New Zealand Dollar
    "PEN", // Peruvian Sol
    "PHP", // Philippine Peso
    "PKR", // Pakistani Rupee
    "PLN", // Polish Zloty
    "RON", // Romanian Leu
    "SAR", // Saudi Riyal
    "SEK", // Swedish Krona
    "SGD", // Singapore Dollar
    "THB", // Thai Baht
    "TRY", // Turkish Lira
    "TWD", // New Taiwan Dollar
    "UAH", // Ukrainian Hryvnia
    "USD", // US Dollar
    "VND", // Vietnamese Dong
    "ZAR", // South African Rand
];
