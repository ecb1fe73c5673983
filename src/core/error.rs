use rust_decimal::Decimal;
use thiserror::Error;

use super::ids::{InvoiceId, LineItemId};
use super::invoice::InvoiceStatus;

/// Errors raised by the invoice core.
///
/// Every failure is a local, synchronous validation or invariant check.
/// None of them are transient, so none are worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InvoiceError {
    /// Money amount is negative (or zero where a positive amount is required).
    #[error("invalid amount {amount}: {reason}")]
    InvalidAmount { amount: Decimal, reason: &'static str },

    /// Currency code failed the configured validation rule.
    #[error("invalid currency code '{0}'")]
    InvalidCurrency(String),

    /// Money text did not match `"<decimal> <CCY>"`.
    #[error("invalid money format '{0}', expected e.g. \"100.00 USD\"")]
    InvalidFormat(String),

    /// Line item quantity must be strictly positive.
    #[error("invalid quantity {0}: must be greater than 0")]
    InvalidQuantity(Decimal),

    /// Product reference is empty.
    #[error("product reference must not be empty")]
    InvalidProductReference,

    /// Customer reference is empty.
    #[error("customer reference must not be empty")]
    InvalidCustomerReference,

    /// Multiplication factor is negative.
    #[error("invalid factor {0}: must not be negative")]
    InvalidFactor(Decimal),

    /// Arithmetic between two different currencies.
    #[error("cannot operate on different currencies: {left} and {right}")]
    CurrencyMismatch { left: String, right: String },

    /// Line item priced in a currency other than the invoice's.
    #[error("line item currency {item} conflicts with invoice currency {invoice}")]
    CurrencyConflict { invoice: String, item: String },

    /// Subtraction would produce a negative amount.
    #[error("cannot subtract {subtrahend} from {minuend}: result would be negative")]
    NegativeResult { minuend: String, subtrahend: String },

    /// Payment would push the amount paid above the invoice total.
    #[error("payment of {payment} exceeds outstanding balance {balance}")]
    PaymentExceedsBalance { payment: String, balance: String },

    /// No line item with this id on the invoice.
    #[error("line item {0} not found")]
    LineItemNotFound(LineItemId),

    /// A line item with this id is already on the invoice.
    #[error("line item {0} already exists on this invoice")]
    DuplicateLineItem(LineItemId),

    /// Operation requires a Draft invoice.
    #[error("invoice is {0}, only draft invoices can be changed")]
    NotDraft(InvoiceStatus),

    /// Issuing requires at least one line item.
    #[error("cannot issue an invoice with no line items")]
    EmptyInvoice,

    /// Invoice is cancelled and accepts no further changes.
    #[error("invoice is cancelled")]
    InvoiceCancelled,

    /// Payment targets a different invoice.
    #[error("payment for invoice {payment_invoice} cannot be applied to invoice {invoice}")]
    InvoiceMismatch {
        payment_invoice: InvoiceId,
        invoice: InvoiceId,
    },

    /// Status change not allowed by the lifecycle.
    #[error("cannot move invoice from {from} to {to}")]
    InvalidTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    /// Payment dated after the time it is recorded.
    #[error("payment date {0} is in the future")]
    PaymentDateInFuture(chrono::DateTime<chrono::Utc>),

    /// Invoice exceeds the configured line item limit.
    #[error("invoice cannot have more than {0} line items")]
    TooManyLineItems(usize),

    /// Decimal arithmetic overflowed.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),
}

/// Coarse classification of [`InvoiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input rejected before touching any state.
    Validation,
    /// Well-formed input that would violate an aggregate invariant.
    State,
}

impl InvoiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount { .. }
            | Self::InvalidCurrency(_)
            | Self::InvalidFormat(_)
            | Self::InvalidQuantity(_)
            | Self::InvalidProductReference
            | Self::InvalidCustomerReference
            | Self::InvalidFactor(_)
            | Self::PaymentDateInFuture(_) => ErrorKind::Validation,
            Self::CurrencyMismatch { .. }
            | Self::CurrencyConflict { .. }
            | Self::NegativeResult { .. }
            | Self::PaymentExceedsBalance { .. }
            | Self::LineItemNotFound(_)
            | Self::DuplicateLineItem(_)
            | Self::NotDraft(_)
            | Self::EmptyInvoice
            | Self::InvoiceCancelled
            | Self::InvoiceMismatch { .. }
            | Self::InvalidTransition { .. }
            | Self::TooManyLineItems(_)
            | Self::Overflow(_) => ErrorKind::State,
        }
    }

    pub(crate) fn currency_mismatch(left: &impl ToString, right: &impl ToString) -> Self {
        Self::CurrencyMismatch {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}
