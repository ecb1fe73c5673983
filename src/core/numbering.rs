use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::{InvoiceId, LineItemId, PaymentId};

/// Source of identifiers for invoices, line items and payments.
///
/// Implementations must never hand out the same id twice for one kind.
/// Pass a deterministic generator in tests; nothing in the core keeps a
/// process-wide counter.
pub trait IdGenerator: Send + Sync {
    fn next_invoice_id(&self) -> InvoiceId;
    fn next_line_item_id(&self) -> LineItemId;
    fn next_payment_id(&self) -> PaymentId;
}

impl<G: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<G> {
    fn next_invoice_id(&self) -> InvoiceId {
        (**self).next_invoice_id()
    }

    fn next_line_item_id(&self) -> LineItemId {
        (**self).next_line_item_id()
    }

    fn next_payment_id(&self) -> PaymentId {
        (**self).next_payment_id()
    }
}

/// Prefixes used when rendering generated ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdPrefixes {
    pub invoice: String,
    pub line_item: String,
    pub payment: String,
}

impl Default for IdPrefixes {
    fn default() -> Self {
        Self {
            invoice: "INV-".to_string(),
            line_item: "LI-".to_string(),
            payment: "PAY-".to_string(),
        }
    }
}

/// Sequential id generator.
///
/// Generates ids in the format `{prefix}{sequential}`, e.g. "INV-0001",
/// "INV-0002". Each kind (invoice, line item, payment) has its own counter.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefixes: IdPrefixes,
    zero_pad: usize,
    invoices: AtomicU64,
    line_items: AtomicU64,
    payments: AtomicU64,
}

impl SequentialIdGenerator {
    /// Create a generator whose counters all start at 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a generator continuing from a given number.
    pub fn starting_at(next_number: u64) -> Self {
        Self {
            prefixes: IdPrefixes::default(),
            zero_pad: 4,
            invoices: AtomicU64::new(next_number),
            line_items: AtomicU64::new(next_number),
            payments: AtomicU64::new(next_number),
        }
    }

    pub fn with_prefixes(mut self, prefixes: IdPrefixes) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Set zero-padding width (default: 4, so "0001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    /// Preview the next invoice id without consuming it.
    pub fn peek_invoice_id(&self) -> InvoiceId {
        InvoiceId::new(self.render(&self.prefixes.invoice, self.invoices.load(Ordering::Relaxed)))
    }

    fn take(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::Relaxed)
    }

    fn render(&self, prefix: &str, num: u64) -> String {
        format!("{}{:0>width$}", prefix, num, width = self.zero_pad)
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_invoice_id(&self) -> InvoiceId {
        let num = Self::take(&self.invoices);
        InvoiceId::new(self.render(&self.prefixes.invoice, num))
    }

    fn next_line_item_id(&self) -> LineItemId {
        let num = Self::take(&self.line_items);
        LineItemId::new(self.render(&self.prefixes.line_item, num))
    }

    fn next_payment_id(&self) -> PaymentId {
        let num = Self::take(&self.payments);
        PaymentId::new(self.render(&self.prefixes.payment, num))
    }
}

/// Random id generator backed by time-ordered UUIDv7 values.
#[derive(Debug, Clone, Default)]
pub struct UuidIdGenerator {
    prefixes: IdPrefixes,
}

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefixes(prefixes: IdPrefixes) -> Self {
        Self { prefixes }
    }

    fn render(prefix: &str) -> String {
        format!("{}{}", prefix, Uuid::now_v7().simple())
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_invoice_id(&self) -> InvoiceId {
        InvoiceId::new(Self::render(&self.prefixes.invoice))
    }

    fn next_line_item_id(&self) -> LineItemId {
        LineItemId::new(Self::render(&self.prefixes.line_item))
    }

    fn next_payment_id(&self) -> PaymentId {
        PaymentId::new(Self::render(&self.prefixes.payment))
    }
}
