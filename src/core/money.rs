use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::currencies::CurrencyCode;
use super::error::InvoiceError;

/// Decimal places every amount is held at (the minor unit).
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Largest amount money can hold: every 96-bit mantissa at two decimal places.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX, false, 2);

/// A non-negative monetary amount in one currency.
///
/// Amounts are exact decimals held at the minor unit: construction and
/// [`Money::multiply`] round half-up to two decimal places, so the text
/// form always shows the whole value and `parse(format(m)) == m`.
/// Money cannot go negative, so it is not a general signed balance type:
/// [`Money::subtract`] fails instead of producing a debt.
///
/// ```
/// use ledgerline::Money;
/// use rust_decimal::Decimal;
///
/// let price: Money = "50.00 USD".parse().unwrap();
/// let total = price.multiply(Decimal::TWO).unwrap();
/// assert_eq!(total.to_string(), "100.00 USD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr")]
pub struct Money {
    amount: Decimal,
    currency: CurrencyCode,
}

#[derive(Deserialize)]
struct MoneyRepr {
    amount: Decimal,
    currency: CurrencyCode,
}

impl TryFrom<MoneyRepr> for Money {
    type Error = InvoiceError;

    fn try_from(raw: MoneyRepr) -> Result<Self, Self::Error> {
        Self::with_code(raw.amount, raw.currency)
    }
}

impl Money {
    /// Create money from an amount and a currency code string.
    pub fn new(amount: Decimal, currency: &str) -> Result<Self, InvoiceError> {
        let currency = CurrencyCode::new(currency)?;
        Self::with_code(amount, currency)
    }

    /// Create money from an amount and an already validated currency.
    pub fn with_code(amount: Decimal, currency: CurrencyCode) -> Result<Self, InvoiceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(InvoiceError::InvalidAmount {
                amount,
                reason: "money amount cannot be negative",
            });
        }
        let amount = to_minor_units(amount).ok_or(InvoiceError::InvalidAmount {
            amount,
            reason: "money amount exceeds the supported range",
        })?;
        Ok(Self { amount, currency })
    }

    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::new(0, MINOR_UNIT_SCALE),
            currency,
        }
    }

    /// Parse the canonical text form `"<decimal> <CCY>"`, e.g. `"100.00 USD"`.
    ///
    /// The text must hold exactly two whitespace-separated tokens with the
    /// decimal first. Scientific notation, `NaN` and infinities are not
    /// decimals and fail with [`InvoiceError::InvalidFormat`]. Amounts with
    /// more than two decimal places are rounded half-up like any other
    /// construction.
    pub fn parse(text: &str) -> Result<Self, InvoiceError> {
        let invalid = || InvoiceError::InvalidFormat(text.to_string());

        let mut tokens = text.split_whitespace();
        let (Some(amount), Some(currency), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(invalid());
        };

        if !amount
            .bytes()
            .all(|b| b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+')
        {
            return Err(invalid());
        }
        let amount = Decimal::from_str_exact(amount).map_err(|_| invalid())?;

        Self::new(amount, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn add(&self, other: &Money) -> Result<Money, InvoiceError> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .and_then(to_minor_units)
            .ok_or(InvoiceError::Overflow("money addition"))?;
        Ok(Self {
            amount,
            currency: self.currency.clone(),
        })
    }

    pub fn subtract(&self, other: &Money) -> Result<Money, InvoiceError> {
        self.ensure_same_currency(other)?;
        if other.amount > self.amount {
            return Err(InvoiceError::NegativeResult {
                minuend: self.to_string(),
                subtrahend: other.to_string(),
            });
        }
        let mut amount = self.amount - other.amount;
        amount.rescale(MINOR_UNIT_SCALE);
        Ok(Self {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Scale by a non-negative factor, e.g. a line quantity.
    pub fn multiply(&self, factor: Decimal) -> Result<Money, InvoiceError> {
        if factor.is_sign_negative() && !factor.is_zero() {
            return Err(InvoiceError::InvalidFactor(factor));
        }
        let amount = self
            .amount
            .checked_mul(factor)
            .and_then(to_minor_units)
            .ok_or(InvoiceError::Overflow("money multiplication"))?;
        Ok(Self {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Canonical text form, e.g. `"100.00 USD"`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), InvoiceError> {
        if self.currency != other.currency {
            return Err(InvoiceError::currency_mismatch(
                &self.currency,
                &other.currency,
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// Round half-up to the minor unit and fix the scale at two places.
/// `None` when the result would exceed [`MAX_AMOUNT`].
fn to_minor_units(amount: Decimal) -> Option<Decimal> {
    let mut amount =
        amount.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if amount.abs() > MAX_AMOUNT {
        return None;
    }
    if amount.is_zero() {
        // -0.00 and 0.00 must compare and hash alike.
        amount = Decimal::ZERO;
    }
    amount.rescale(MINOR_UNIT_SCALE);
    Some(amount)
}

impl FromStr for Money {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
