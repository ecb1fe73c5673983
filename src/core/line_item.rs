use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currencies::CurrencyCode;
use super::error::InvoiceError;
use super::ids::{LineItemId, ProductId};
use super::money::Money;

/// One line on an invoice: a product, a strictly positive quantity and a
/// unit price. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineItemRepr")]
pub struct LineItem {
    id: LineItemId,
    product_id: ProductId,
    quantity: Decimal,
    unit_price: Money,
}

#[derive(Deserialize)]
struct LineItemRepr {
    id: LineItemId,
    product_id: ProductId,
    quantity: Decimal,
    unit_price: Money,
}

impl TryFrom<LineItemRepr> for LineItem {
    type Error = InvoiceError;

    fn try_from(raw: LineItemRepr) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.product_id, raw.quantity, raw.unit_price)
    }
}

impl LineItem {
    /// Fails with [`InvoiceError::InvalidQuantity`] unless `quantity > 0`.
    pub fn new(
        id: LineItemId,
        product_id: ProductId,
        quantity: Decimal,
        unit_price: Money,
    ) -> Result<Self, InvoiceError> {
        if quantity <= Decimal::ZERO {
            return Err(InvoiceError::InvalidQuantity(quantity));
        }
        Ok(Self {
            id,
            product_id,
            quantity,
            unit_price,
        })
    }

    /// Build a line item from raw input: a product reference and a price in
    /// the `"<decimal> <CCY>"` text form.
    pub fn from_parts(
        id: LineItemId,
        product_id: &str,
        quantity: Decimal,
        unit_price: &str,
    ) -> Result<Self, InvoiceError> {
        let product_id = ProductId::new(product_id)?;
        let unit_price = Money::parse(unit_price)?;
        Self::new(id, product_id, quantity, unit_price)
    }

    pub fn id(&self) -> &LineItemId {
        &self.id
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit_price(&self) -> &Money {
        &self.unit_price
    }

    pub fn currency(&self) -> &CurrencyCode {
        self.unit_price.currency()
    }

    /// `unit_price × quantity`, exact.
    pub fn line_total(&self) -> Result<Money, InvoiceError> {
        self.unit_price.multiply(self.quantity)
    }
}
