use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::InvoiceId;

/// One requested line: product reference, quantity and a unit price in the
/// `"<decimal> <CCY>"` text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub product_id: String,
    pub quantity: Decimal,
    pub unit_price: String,
}

impl LineItemInput {
    pub fn new(
        product_id: impl Into<String>,
        quantity: Decimal,
        unit_price: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price: unit_price.into(),
        }
    }
}

/// Create a Draft invoice for a customer with its initial lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoice {
    pub customer_id: String,
    #[serde(default)]
    pub line_items: Vec<LineItemInput>,
}

/// Add one line to an existing Draft invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLineItem {
    pub invoice_id: InvoiceId,
    #[serde(flatten)]
    pub line: LineItemInput,
}

/// Record funds received, amount in `"<decimal> <CCY>"` text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayment {
    pub invoice_id: InvoiceId,
    pub amount: String,
}
