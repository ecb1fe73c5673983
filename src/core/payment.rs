use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::InvoiceError;
use super::ids::{InvoiceId, PaymentId};
use super::invoice::Invoice;
use super::money::Money;

/// Funds received against exactly one invoice.
///
/// A payment is a transportable record; the invoice alone decides whether
/// it can be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaymentRepr")]
pub struct Payment {
    id: PaymentId,
    invoice_id: InvoiceId,
    amount: Money,
    date: DateTime<Utc>,
}

#[derive(Deserialize)]
struct PaymentRepr {
    id: PaymentId,
    invoice_id: InvoiceId,
    amount: Money,
    date: DateTime<Utc>,
}

impl TryFrom<PaymentRepr> for Payment {
    type Error = InvoiceError;

    fn try_from(raw: PaymentRepr) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.invoice_id, raw.amount, raw.date)
    }
}

impl Payment {
    /// Record a payment, checking its date against the current time.
    pub fn new(
        id: PaymentId,
        invoice_id: InvoiceId,
        amount: Money,
        date: DateTime<Utc>,
    ) -> Result<Self, InvoiceError> {
        Self::new_as_of(id, invoice_id, amount, date, Utc::now())
    }

    /// Record a payment, checking its date against `now`.
    pub fn new_as_of(
        id: PaymentId,
        invoice_id: InvoiceId,
        amount: Money,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, InvoiceError> {
        if amount.is_zero() {
            return Err(InvoiceError::InvalidAmount {
                amount: amount.amount(),
                reason: "payment amount must be greater than 0",
            });
        }
        if date > now {
            return Err(InvoiceError::PaymentDateInFuture(date));
        }
        Ok(Self {
            id,
            invoice_id,
            amount,
            date,
        })
    }

    pub fn id(&self) -> &PaymentId {
        &self.id
    }

    pub fn invoice_id(&self) -> &InvoiceId {
        &self.invoice_id
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Apply to the invoice this payment was recorded for.
    pub fn apply_to_invoice(&self, invoice: &mut Invoice) -> Result<(), InvoiceError> {
        if &self.invoice_id != invoice.id() {
            return Err(InvoiceError::InvoiceMismatch {
                payment_invoice: self.invoice_id.clone(),
                invoice: invoice.id().clone(),
            });
        }
        invoice.record_payment(&self.amount)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::core::{CurrencyCode, CustomerId, InvoiceStatus, LineItem, LineItemId};

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, h, 0, 0).unwrap()
    }

    fn invoice(id: &str) -> Invoice {
        let mut inv = Invoice::new(
            InvoiceId::new(id),
            CustomerId::new("CUST-1").unwrap(),
            CurrencyCode::default(),
        );
        inv.add_line_item(
            LineItem::from_parts(LineItemId::new("LI-1"), "PROD-1", dec!(1), "80.00 USD").unwrap(),
        )
        .unwrap();
        inv
    }

    fn payment(invoice_id: &str, amount: &str) -> Result<Payment, InvoiceError> {
        Payment::new_as_of(
            PaymentId::new("PAY-1"),
            InvoiceId::new(invoice_id),
            Money::parse(amount).unwrap(),
            at(9),
            at(12),
        )
    }

    #[test]
    fn rejects_zero_amount() {
        assert!(matches!(
            payment("INV-1", "0.00 USD"),
            Err(InvoiceError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn rejects_future_date() {
        let err = Payment::new_as_of(
            PaymentId::new("PAY-1"),
            InvoiceId::new("INV-1"),
            Money::parse("1.00 USD").unwrap(),
            at(13),
            at(12),
        )
        .unwrap_err();
        assert_eq!(err, InvoiceError::PaymentDateInFuture(at(13)));

        let tomorrow = Utc::now() + Duration::days(1);
        assert!(
            Payment::new(
                PaymentId::new("PAY-2"),
                InvoiceId::new("INV-1"),
                Money::parse("1.00 USD").unwrap(),
                tomorrow,
            )
            .is_err()
        );
    }

    #[test]
    fn same_instant_is_not_future() {
        assert!(
            Payment::new_as_of(
                PaymentId::new("PAY-1"),
                InvoiceId::new("INV-1"),
                Money::parse("1.00 USD").unwrap(),
                at(12),
                at(12),
            )
            .is_ok()
        );
    }

    #[test]
    fn applies_to_matching_invoice() {
        let mut inv = invoice("INV-1");
        payment("INV-1", "80.00 USD")
            .unwrap()
            .apply_to_invoice(&mut inv)
            .unwrap();
        assert_eq!(inv.status(), InvoiceStatus::Paid);
    }

    #[test]
    fn rejects_other_invoice() {
        let mut inv = invoice("INV-2");
        let err = payment("INV-1", "10.00 USD")
            .unwrap()
            .apply_to_invoice(&mut inv)
            .unwrap_err();
        assert_eq!(
            err,
            InvoiceError::InvoiceMismatch {
                payment_invoice: InvoiceId::new("INV-1"),
                invoice: InvoiceId::new("INV-2"),
            }
        );
        assert!(inv.amount_paid().is_zero());
    }

    #[test]
    fn invoice_rules_still_apply() {
        let mut inv = invoice("INV-1");
        let err = payment("INV-1", "80.01 USD")
            .unwrap()
            .apply_to_invoice(&mut inv)
            .unwrap_err();
        assert!(matches!(err, InvoiceError::PaymentExceedsBalance { .. }));
    }
}
