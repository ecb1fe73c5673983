use super::config::DEFAULT_MAX_LINE_ITEMS;
use super::currencies::CurrencyCode;
use super::error::InvoiceError;
use super::ids::{CustomerId, InvoiceId};
use super::invoice::Invoice;
use super::line_item::LineItem;

/// Builder for constructing a Draft invoice with its initial line items.
///
/// ```
/// use ledgerline::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new(InvoiceId::new("INV-0001"), "CUST-123")
///     .add_line(LineItem::from_parts(LineItemId::new("LI-1"), "PROD-001", dec!(2), "50.00 USD").unwrap())
///     .add_line(LineItem::from_parts(LineItemId::new("LI-2"), "PROD-002", dec!(1), "100.00 USD").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.status(), InvoiceStatus::Draft);
/// assert_eq!(invoice.total().to_string(), "200.00 USD");
/// ```
pub struct InvoiceBuilder {
    id: InvoiceId,
    customer_id: Result<CustomerId, InvoiceError>,
    default_currency: CurrencyCode,
    lines: Vec<LineItem>,
    max_line_items: usize,
}

impl InvoiceBuilder {
    /// A blank customer reference is reported by [`InvoiceBuilder::build`].
    pub fn new(id: InvoiceId, customer_id: impl Into<String>) -> Self {
        Self::with_customer(id, CustomerId::new(customer_id))
    }

    /// Start from a customer reference that has already been validated.
    pub fn for_customer(id: InvoiceId, customer_id: CustomerId) -> Self {
        Self::with_customer(id, Ok(customer_id))
    }

    fn with_customer(id: InvoiceId, customer_id: Result<CustomerId, InvoiceError>) -> Self {
        Self {
            id,
            customer_id,
            default_currency: CurrencyCode::default(),
            lines: Vec::new(),
            max_line_items: DEFAULT_MAX_LINE_ITEMS,
        }
    }

    pub fn default_currency(mut self, currency: CurrencyCode) -> Self {
        self.default_currency = currency;
        self
    }

    pub fn max_line_items(mut self, limit: usize) -> Self {
        self.max_line_items = limit;
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn add_lines(mut self, lines: impl IntoIterator<Item = LineItem>) -> Self {
        self.lines.extend(lines);
        self
    }

    /// Build the invoice, applying every line through
    /// [`Invoice::add_line_item`] so the usual invariants hold.
    /// Fails on the first rejected line.
    pub fn build(self) -> Result<Invoice, InvoiceError> {
        let customer_id = self.customer_id?;

        if self.lines.len() > self.max_line_items {
            return Err(InvoiceError::TooManyLineItems(self.max_line_items));
        }

        let mut invoice = Invoice::new(self.id, customer_id, self.default_currency);
        for line in self.lines {
            invoice.add_line_item(line)?;
        }
        Ok(invoice)
    }
}
