use std::fmt;

use serde::{Deserialize, Serialize};

use super::currencies::CurrencyCode;
use super::error::InvoiceError;
use super::ids::{CustomerId, InvoiceId, LineItemId};
use super::line_item::LineItem;
use super::money::Money;

/// Invoice lifecycle.
///
/// `Draft → Issued → Paid`, with `Cancelled` reachable from Draft or Issued.
/// Paid and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Issued => "Issued",
            Self::Paid => "Paid",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice aggregate root.
///
/// Owns its line items and keeps `total` and `amount_paid` consistent with
/// them:
///
/// * all line items share one currency, fixed by the first item added;
/// * `total` is recomputed from the line items after every mutation;
/// * `amount_paid` never exceeds `total`;
/// * the invoice is Paid exactly when `amount_paid == total`.
///
/// A mutator that returns an error has not changed the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    id: InvoiceId,
    customer_id: CustomerId,
    status: InvoiceStatus,
    line_items: Vec<LineItem>,
    total: Money,
    amount_paid: Money,
    #[serde(skip)]
    currency_fixed: bool,
}

impl Invoice {
    /// New Draft invoice with no line items.
    ///
    /// Until the first line item fixes the currency, `total` and
    /// `amount_paid` are zero in `default_currency`.
    pub fn new(id: InvoiceId, customer_id: CustomerId, default_currency: CurrencyCode) -> Self {
        Self {
            id,
            customer_id,
            status: InvoiceStatus::Draft,
            line_items: Vec::new(),
            total: Money::zero(default_currency.clone()),
            amount_paid: Money::zero(default_currency),
            currency_fixed: false,
        }
    }

    pub fn id(&self) -> &InvoiceId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    /// Read-only view of the line items, in insertion order.
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn line_item(&self, id: &LineItemId) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id() == id)
    }

    pub fn total(&self) -> &Money {
        &self.total
    }

    pub fn amount_paid(&self) -> &Money {
        &self.amount_paid
    }

    pub fn currency(&self) -> &CurrencyCode {
        self.total.currency()
    }

    /// True once a line item has fixed the invoice currency.
    pub fn has_fixed_currency(&self) -> bool {
        self.currency_fixed
    }

    /// Outstanding amount, `total − amount_paid`.
    pub fn balance_due(&self) -> Money {
        self.total
            .subtract(&self.amount_paid)
            .unwrap_or_else(|_| Money::zero(self.currency().clone()))
    }

    pub fn is_fully_paid(&self) -> bool {
        self.amount_paid == self.total
    }

    /// Sum of all line totals, recomputed from scratch.
    pub fn calculate_total(&self) -> Result<Money, InvoiceError> {
        sum_line_totals(&self.line_items, self.currency())
    }

    /// Add a line item to a Draft invoice.
    pub fn add_line_item(&mut self, item: LineItem) -> Result<(), InvoiceError> {
        self.ensure_draft()?;

        if self.line_item(item.id()).is_some() {
            return Err(InvoiceError::DuplicateLineItem(item.id().clone()));
        }
        if self.currency_fixed && item.currency() != self.currency() {
            return Err(InvoiceError::CurrencyConflict {
                invoice: self.currency().to_string(),
                item: item.currency().to_string(),
            });
        }

        let currency = item.currency().clone();
        let total = sum_line_totals(self.line_items.iter().chain([&item]), &currency)?;

        if !self.currency_fixed {
            // Draft invoices never hold payments, so nothing is lost here.
            self.amount_paid = Money::zero(currency);
            self.currency_fixed = true;
        }
        self.line_items.push(item);
        self.total = total;
        Ok(())
    }

    /// Remove a line item from a Draft invoice.
    ///
    /// Removing the last item leaves a zero total in the established
    /// currency; status and amount paid are untouched.
    pub fn remove_line_item(&mut self, id: &LineItemId) -> Result<LineItem, InvoiceError> {
        self.ensure_draft()?;

        let index = self
            .line_items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| InvoiceError::LineItemNotFound(id.clone()))?;

        let remaining = self
            .line_items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item);
        let total = sum_line_totals(remaining, self.currency())?;

        let removed = self.line_items.remove(index);
        self.total = total;
        Ok(removed)
    }

    /// Record received funds.
    ///
    /// A payment that settles the balance moves the invoice to Paid. A
    /// partial payment on a Draft invoice issues it.
    pub fn record_payment(&mut self, amount: &Money) -> Result<(), InvoiceError> {
        if self.status == InvoiceStatus::Cancelled {
            return Err(InvoiceError::InvoiceCancelled);
        }
        if amount.currency() != self.currency() {
            return Err(InvoiceError::currency_mismatch(
                self.currency(),
                amount.currency(),
            ));
        }
        if amount.is_zero() {
            return Err(InvoiceError::InvalidAmount {
                amount: amount.amount(),
                reason: "payment amount must be greater than 0",
            });
        }

        let paid = self.amount_paid.add(amount)?;
        if paid.amount() > self.total.amount() {
            return Err(InvoiceError::PaymentExceedsBalance {
                payment: amount.to_string(),
                balance: self.balance_due().to_string(),
            });
        }

        self.amount_paid = paid;
        if self.is_fully_paid() {
            self.status = InvoiceStatus::Paid;
        } else if self.status == InvoiceStatus::Draft {
            self.status = InvoiceStatus::Issued;
        }
        Ok(())
    }

    /// Draft → Issued, or straight to Paid when every line is free and
    /// nothing is owed.
    pub fn issue(&mut self) -> Result<(), InvoiceError> {
        self.ensure_draft()?;
        if self.line_items.is_empty() {
            return Err(InvoiceError::EmptyInvoice);
        }
        self.status = if self.total.is_zero() {
            InvoiceStatus::Paid
        } else {
            InvoiceStatus::Issued
        };
        Ok(())
    }

    /// Draft or Issued → Cancelled.
    pub fn cancel(&mut self) -> Result<(), InvoiceError> {
        match self.status {
            InvoiceStatus::Cancelled => Err(InvoiceError::InvoiceCancelled),
            InvoiceStatus::Paid => Err(InvoiceError::InvalidTransition {
                from: InvoiceStatus::Paid,
                to: InvoiceStatus::Cancelled,
            }),
            InvoiceStatus::Draft | InvoiceStatus::Issued => {
                self.status = InvoiceStatus::Cancelled;
                Ok(())
            }
        }
    }

    fn ensure_draft(&self) -> Result<(), InvoiceError> {
        if self.status != InvoiceStatus::Draft {
            return Err(InvoiceError::NotDraft(self.status));
        }
        Ok(())
    }
}

fn sum_line_totals<'a>(
    items: impl IntoIterator<Item = &'a LineItem>,
    currency: &CurrencyCode,
) -> Result<Money, InvoiceError> {
    items
        .into_iter()
        .try_fold(Money::zero(currency.clone()), |sum, item| {
            sum.add(&item.line_total()?)
        })
}
